//! Numeric passcode generation

use rand::rngs::OsRng;
use rand::Rng;

/// Produces fixed-length numeric codes from the operating system CSPRNG
#[derive(Debug, Clone)]
pub struct NumericCodeGenerator {
    length: usize,
}

impl NumericCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Each digit is drawn independently and uniformly from 0-9
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

impl Default for NumericCodeGenerator {
    fn default() -> Self {
        Self::new(6)
    }
}
