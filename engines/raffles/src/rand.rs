use rand_chacha::ChaChaRng;
use rand_core::{OsRng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::{error, trace};

use crate::error::DrawError;

/// Number of distinct values a single random word can take (2^32).
/// A source with another word width needs this constant and `rejection_limit` changed together
pub const WORD_SPACE: u64 = 1 << u32::BITS;

/// Capability handing out unpredictable 32 bits words.
/// Implementations must fail with `EntropyUnavailable` rather than fall back to a weaker generator
pub trait SecureRandomSource {
    fn next_word(&mut self) -> Result<u32, DrawError>;
}

impl<S: SecureRandomSource + ?Sized> SecureRandomSource for &mut S {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        (**self).next_word()
    }
}

impl<S: SecureRandomSource + ?Sized> SecureRandomSource for Box<S> {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        (**self).next_word()
    }
}

/// Operating system CSPRNG, the only source a live draw should use
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl SecureRandomSource for OsEntropy {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        let mut word = [0u8; 4];
        OsRng.try_fill_bytes(&mut word).map_err(|err| {
            error!("the operating system randomness provider failed : {}", err);
            DrawError::EntropyUnavailable(err.to_string())
        })?;
        Ok(u32::from_le_bytes(word))
    }
}

/// Deterministic source : the seed is hashed and expanded with ChaCha.
/// Anyone holding the seed can replay every draw, so this is meant for tests and audit replays only
pub struct SeededEntropy {
    rng: ChaChaRng,
}

impl SeededEntropy {
    pub fn new(seed: &[u8]) -> Self {
        let mut hasher = Sha256::new();

        // write input message
        hasher.update(seed);
        let hash = hasher.finalize();

        let mut result = [0u8; 32];
        result.copy_from_slice(hash.as_slice());

        Self {
            rng: ChaChaRng::from_seed(result),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self::new(&seed.to_le_bytes())
    }
}

impl SecureRandomSource for SeededEntropy {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        Ok(self.rng.next_u32())
    }
}

/// Largest multiple of `max` not exceeding the word space.
/// Words at or above it are rejected so every residue modulo `max` is equally likely.
/// `None` when `max` is outside `1..=WORD_SPACE`
pub fn rejection_limit(max: u64) -> Option<u64> {
    if max == 0 || max > WORD_SPACE {
        return None;
    }
    Some(WORD_SPACE - WORD_SPACE % max)
}

/// Unbiased integers in `[0, max)` drawn from a `SecureRandomSource`
pub struct UniformSampler<S> {
    source: S,
    rejections: u64,
}

impl<S: SecureRandomSource> UniformSampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            rejections: 0,
        }
    }

    /// Returns a uniformly distributed integer in `[0, max)`.
    /// `max` must be positive and fit in the word space
    pub fn next(&mut self, max: i64) -> Result<u32, DrawError> {
        if max <= 0 {
            return Err(DrawError::InvalidArgument(format!(
                "max must be greater than 0, got {}",
                max
            )));
        }
        let max = max as u64;
        let limit = rejection_limit(max).ok_or_else(|| {
            DrawError::InvalidArgument(format!("max must not exceed {}, got {}", WORD_SPACE, max))
        })?;

        let word = loop {
            let word = u64::from(self.source.next_word()?);
            if word < limit {
                break word;
            }
            self.rejections += 1;
            trace!(word, limit, "random word rejected");
        };

        // word < limit <= WORD_SPACE, so the remainder fits in a word
        Ok((word % max) as u32)
    }

    /// Uniform index into a sequence of `len` elements
    pub fn next_index(&mut self, len: usize) -> Result<usize, DrawError> {
        let max = i64::try_from(len).map_err(|_| {
            DrawError::InvalidArgument(format!("sequence of {} elements is too long", len))
        })?;
        Ok(self.next(max)? as usize)
    }

    /// Number of words thrown away since this sampler was created
    pub fn rejections(&self) -> u64 {
        self.rejections
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Fisher-Yates shuffle.
/// Returns a new, uniformly permuted vector and leaves `items` untouched
pub fn shuffle<S: SecureRandomSource, T: Clone>(
    sampler: &mut UniformSampler<S>,
    items: &[T],
) -> Result<Vec<T>, DrawError> {
    let mut shuffled = items.to_vec();

    for i in (1..shuffled.len()).rev() {
        let j = sampler.next_index(i + 1)?;
        shuffled.swap(i, j);
    }

    Ok(shuffled)
}
