use crate::error::{Result, SigError};
use std::fmt::Write as _;
use std::fs;
use std::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};
use std::path::Path;

/// Fixed-length sample container
///
/// Holds a contiguous buffer of samples whose length is chosen at
/// construction and never changes. Provides text file load/save, the basic
/// energy statistics, and element-wise arithmetic; processors consume it
/// through `as_mut_slice` or by iterating mutably.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
}

impl Signal {
    /// Create a zero-filled signal of the given length.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if `len` is 0.
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SigError::InvalidInput(
                "signal needs at least one sample".into(),
            ));
        }
        Ok(Self {
            samples: vec![0.0; len],
        })
    }

    /// Take ownership of an existing sample vector.
    ///
    /// # Errors
    /// Returns `SigError::InvalidInput` if the vector is empty.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SigError::InvalidInput(
                "signal needs at least one sample".into(),
            ));
        }
        Ok(Self { samples })
    }

    /// Read exactly `len` whitespace-separated numeric values from a file.
    ///
    /// Values may be separated by spaces, tabs, or newlines; anything past
    /// the first `len` values is ignored.
    ///
    /// # Errors
    /// * `SigError::File` if the file cannot be read.
    /// * `SigError::InsufficientData` if it holds fewer than `len` values.
    /// * `SigError::Parse` if a token is not a number.
    pub fn from_file<P: AsRef<Path>>(path: P, len: usize) -> Result<Self> {
        let path = path.as_ref();
        if len == 0 {
            return Err(SigError::InvalidInput(
                "signal needs at least one sample".into(),
            ));
        }
        let text = fs::read_to_string(path).map_err(|source| SigError::File {
            path: path.display().to_string(),
            source,
        })?;

        let mut samples = Vec::with_capacity(len);
        for (index, token) in text.split_whitespace().take(len).enumerate() {
            let value: f64 = token.parse().map_err(|_| SigError::Parse {
                path: path.display().to_string(),
                index,
                token: token.to_string(),
            })?;
            samples.push(value);
        }
        if samples.len() < len {
            return Err(SigError::InsufficientData {
                needed: len,
                available: samples.len(),
            });
        }

        log::debug!("loaded {} samples from {}", len, path.display());
        Ok(Self { samples })
    }

    /// Write the samples to a file, one value per line, overwriting any
    /// existing content.
    ///
    /// # Errors
    /// Returns `SigError::File` if the file cannot be written.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut text = String::with_capacity(self.samples.len() * 12);
        for sample in &self.samples {
            // Writing to a String cannot fail.
            let _ = writeln!(text, "{}", sample);
        }
        fs::write(path, text).map_err(|source| SigError::File {
            path: path.display().to_string(),
            source,
        })?;
        log::debug!("wrote {} samples to {}", self.samples.len(), path.display());
        Ok(())
    }

    /// Total energy: the sum of squared samples.
    pub fn energy(&self) -> f64 {
        self.samples.iter().map(|x| x * x).sum()
    }

    /// Average power: energy divided by the sample count.
    pub fn power(&self) -> f64 {
        self.energy() / self.samples.len() as f64
    }

    /// Root mean square: the square root of the average power.
    pub fn rms(&self) -> f64 {
        self.power().sqrt()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.samples.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, f64> {
        self.samples.iter_mut()
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.samples[index]
    }
}

impl IndexMut<usize> for Signal {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.samples[index]
    }
}

impl<'a> IntoIterator for &'a Signal {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a mut Signal {
    type Item = &'a mut f64;
    type IntoIter = std::slice::IterMut<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter_mut()
    }
}

impl Add for &Signal {
    type Output = Signal;

    /// Element-wise sum. Panics if the lengths differ.
    fn add(self, other: &Signal) -> Signal {
        assert_eq!(self.len(), other.len(), "signal lengths differ");
        Signal {
            samples: self
                .samples
                .iter()
                .zip(&other.samples)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }
}

impl Sub for &Signal {
    type Output = Signal;

    /// Element-wise difference. Panics if the lengths differ.
    fn sub(self, other: &Signal) -> Signal {
        assert_eq!(self.len(), other.len(), "signal lengths differ");
        Signal {
            samples: self
                .samples
                .iter()
                .zip(&other.samples)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }
}

impl AddAssign<&Signal> for Signal {
    fn add_assign(&mut self, other: &Signal) {
        assert_eq!(self.len(), other.len(), "signal lengths differ");
        for (a, b) in self.samples.iter_mut().zip(&other.samples) {
            *a += b;
        }
    }
}

impl SubAssign<&Signal> for Signal {
    fn sub_assign(&mut self, other: &Signal) {
        assert_eq!(self.len(), other.len(), "signal lengths differ");
        for (a, b) in self.samples.iter_mut().zip(&other.samples) {
            *a -= b;
        }
    }
}
