//! randseq: generate 128-bit pseudo-random binary sequences
//!
//! The generator is a general-purpose PRNG seeded once from the operating
//! system's entropy source, see [`Generator::from_entropy`]. The quality of
//! its output can be checked with the statistical tests of [`nist`].
//!
//! # Example
//! ```
//! # fn main() -> Result<(), randseq::error::RandSeqError> {
//! let sequence = randseq::generate()?;
//! assert_eq!(sequence.to_string().len(), 128);
//! # Ok(())
//! # }
//! ```
use rand::{
    rngs::{OsRng, StdRng},
    Rng, RngCore, SeedableRng,
};
use tracing::debug;

pub mod error;
mod math;
pub mod nist;
pub mod sequence;

pub use sequence::{BitSequence, SEQUENCE_LENGTH};

use crate::error::RandSeqError;

/// Draws [`BitSequence`]s out of a pseudo-random number generator.
#[derive(Clone, Debug)]
pub struct Generator<R: RngCore> {
    rng: R,
}

impl Generator<StdRng> {
    /// Seeds a new generator from the OS entropy source.
    ///
    /// This will fail loudly with [`RandSeqError::EntropySourceUnavailable`]
    /// instead of falling back to a low-quality seed.
    pub fn from_entropy() -> Result<Self, RandSeqError> {
        debug!("seeding generator from the OS entropy source");
        Self::from_rng(OsRng)
    }

    /// Seeds a new generator with bytes drawn from `source`.
    pub fn from_rng<S: RngCore>(source: S) -> Result<Self, RandSeqError> {
        let rng = StdRng::from_rng(source)
            .map_err(|e| RandSeqError::EntropySourceUnavailable(e.to_string()))?;
        Ok(Self::new(rng))
    }

    /// Builds a reproducible generator, two generators with the same seed draw
    /// the same sequences.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(StdRng::from_seed(seed))
    }
}

impl<R: RngCore> Generator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draws [`SEQUENCE_LENGTH`] independent and uniform bits, starting with
    /// bit `0`.
    pub fn generate(&mut self) -> BitSequence {
        let mut value = 0u128;
        for i in 0..SEQUENCE_LENGTH {
            if self.rng.gen::<bool>() {
                value |= 1 << i;
            }
        }
        BitSequence::from(value)
    }
}

/// Generates a single sequence with a freshly seeded generator.
///
/// > **Note**
/// >
/// > This is a wrapper around [`Generator::from_entropy`] and
/// > [`Generator::generate`].
pub fn generate() -> Result<BitSequence, RandSeqError> {
    let mut generator = Generator::from_entropy()?;
    Ok(generator.generate())
}
