use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use sigkit::{FirFilter, IirFilter, Processor, Signal, Window, WindowShape, save_wav};

#[derive(Parser, Debug)]
#[command(name = "sigkit")]
#[command(about = "Filter or window a signal stored as a text file", long_about = None)]
struct Args {
    /// Input file of whitespace-separated samples
    #[arg(short, long)]
    input: PathBuf,

    /// Number of samples to read from the input
    #[arg(short = 'n', long)]
    samples: usize,

    /// Output file, one sample per line
    #[arg(short, long)]
    output: PathBuf,

    /// Also write the processed signal as a mono float WAV
    #[arg(long)]
    wav: Option<PathBuf>,

    /// Sample rate recorded in the WAV header
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Print energy, power, and RMS of the processed signal
    #[arg(long)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Windowed-sinc low-pass FIR filter
    Lowpass {
        /// Normalized cutoff frequency in (0.0, 0.5)
        #[arg(long)]
        cutoff: f64,

        /// Number of filter taps
        #[arg(long, default_value = "63")]
        taps: usize,
    },
    /// Spectral-inversion high-pass FIR filter
    Highpass {
        /// Normalized cutoff frequency in (0.0, 0.5)
        #[arg(long)]
        cutoff: f64,

        /// Number of filter taps
        #[arg(long, default_value = "63")]
        taps: usize,
    },
    /// Subtractive band-pass FIR filter
    Bandpass {
        /// Normalized lower cutoff frequency in (0.0, 0.5)
        #[arg(long)]
        low: f64,

        /// Normalized upper cutoff frequency in (0.0, 0.5)
        #[arg(long)]
        high: f64,

        /// Number of filter taps
        #[arg(long, default_value = "63")]
        taps: usize,
    },
    /// IIR filter with explicit coefficients
    Iir {
        /// Feed-forward (b) coefficients, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        b: Vec<f64>,

        /// Feedback (a) coefficients, comma separated, leading unity term omitted
        #[arg(long, value_delimiter = ',')]
        a: Vec<f64>,
    },
    /// Multiply the whole signal by a window shape
    Window {
        #[arg(long, value_enum, default_value = "hamming")]
        shape: ShapeArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ShapeArg {
    Rectangular,
    Hamming,
    Hann,
    Blackman,
}

impl From<ShapeArg> for WindowShape {
    fn from(shape: ShapeArg) -> WindowShape {
        match shape {
            ShapeArg::Rectangular => WindowShape::Rectangular,
            ShapeArg::Hamming => WindowShape::Hamming,
            ShapeArg::Hann => WindowShape::Hann,
            ShapeArg::Blackman => WindowShape::Blackman,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut signal = Signal::from_file(&args.input, args.samples)?;
    log::info!(
        "loaded {} samples from {}",
        signal.len(),
        args.input.display()
    );

    match &args.command {
        Command::Lowpass { cutoff, taps } => {
            let mut filter = FirFilter::new(*taps)?;
            filter.setup_low_pass(*cutoff)?;
            log::info!(
                "low-pass: {} taps, group delay {} samples",
                filter.num_taps(),
                filter.group_delay_samples()
            );
            filter.process(signal.as_mut_slice())?;
        }
        Command::Highpass { cutoff, taps } => {
            let mut filter = FirFilter::new(*taps)?;
            filter.setup_high_pass(*cutoff)?;
            log::info!(
                "high-pass: {} taps, group delay {} samples",
                filter.num_taps(),
                filter.group_delay_samples()
            );
            filter.process(signal.as_mut_slice())?;
        }
        Command::Bandpass { low, high, taps } => {
            let mut filter = FirFilter::new(*taps)?;
            filter.setup_band_pass(*low, *high)?;
            log::info!(
                "band-pass: {} taps, group delay {} samples",
                filter.num_taps(),
                filter.group_delay_samples()
            );
            filter.process(signal.as_mut_slice())?;
        }
        Command::Iir { b, a } => {
            let mut filter = IirFilter::new(b.len(), a.len())?;
            filter.set_ba(b, a)?;
            log::info!(
                "iir: {} feed-forward, {} feedback taps",
                filter.num_feedforward(),
                filter.num_feedback()
            );
            filter.process(signal.as_mut_slice())?;
        }
        Command::Window { shape } => {
            let mut window = Window::with_shape(signal.len(), (*shape).into())?;
            window.process(signal.as_mut_slice())?;
        }
    }

    if args.stats {
        println!("energy: {:.6}", signal.energy());
        println!("power:  {:.6}", signal.power());
        println!("rms:    {:.6}", signal.rms());
    }

    signal.to_file(&args.output)?;
    if let Some(wav_path) = &args.wav {
        save_wav(wav_path, signal.as_slice(), args.sample_rate)?;
        log::info!("wrote WAV to {}", wav_path.display());
    }

    Ok(())
}
