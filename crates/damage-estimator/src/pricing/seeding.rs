use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Seeds derived from keys are reduced into `[0, 10^8)`.
pub const SEED_MODULUS: u64 = 100_000_000;

/// SHA-256 of the key read as a big-endian integer, modulo [`SEED_MODULUS`].
pub fn seed_from_key(key: &str) -> u64 {
    Sha256::digest(key.as_bytes())
        .iter()
        .fold(0u64, |acc, byte| (acc * 256 + u64::from(*byte)) % SEED_MODULUS)
}

/// Hex content digest of an image, suitable as a reproducibility key.
pub fn image_key(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Random stream owned by exactly one report.
///
/// Every draw advances the stream, so callers must keep the draw order fixed
/// for a given key to reproduce a report.
#[derive(Debug, Clone)]
pub struct ReportRng {
    rng: ChaCha8Rng,
    draws: u64,
}

impl ReportRng {
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(key) => Self::seeded(seed_from_key(key)),
            None => Self {
                rng: ChaCha8Rng::from_entropy(),
                draws: 0,
            },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Uniform pick. An empty slice yields `None` without consuming a draw.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let picked = items.choose(&mut self.rng);
        if picked.is_some() {
            self.draws += 1;
        }
        picked
    }

    /// Uniform integer in `[min, max]`, both inclusive.
    pub fn integer_in(&mut self, min: u32, max: u32) -> u32 {
        self.draws += 1;
        self.rng.gen_range(min..=max)
    }

    /// Uniform fraction in `[low, high]`.
    pub fn fraction_in(&mut self, low: f64, high: f64) -> f64 {
        self.draws += 1;
        self.rng.gen_range(low..=high)
    }

    /// Number of draws consumed so far.
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}
