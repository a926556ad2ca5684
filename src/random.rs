use crate::misc::numel;
use rand::distributions::Open01;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tch::Tensor;

/// Immutable generator state.
///
/// A key is consumed by value and never mutated. Two draws that must be
/// independent need two keys obtained through [`PrngKey::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrngKey {
    state: [u64; 4],
}

impl PrngKey {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::draw(&mut rng)
    }

    /// Forks the key into two independent keys.
    pub fn split(self) -> (Self, Self) {
        let mut rng = self.rng();
        let left = Self::draw(&mut rng);
        let right = Self::draw(&mut rng);
        (left, right)
    }

    pub fn split_n(self, n: usize) -> Vec<Self> {
        let mut rng = self.rng();
        (0..n).map(|_| Self::draw(&mut rng)).collect()
    }

    fn draw(rng: &mut ChaCha20Rng) -> Self {
        Self {
            state: std::array::from_fn(|_| rng.next_u64()),
        }
    }

    fn rng(&self) -> ChaCha20Rng {
        let mut seed = [0u8; 32];
        for (chunk, word) in seed.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        ChaCha20Rng::from_seed(seed)
    }
}

/// Uniform draws from the open interval (0, 1).
pub fn uniform(key: PrngKey, shape: &[i64]) -> Tensor {
    let mut rng = key.rng();
    let data: Vec<f64> = (0..numel(shape)).map(|_| rng.sample(Open01)).collect();
    Tensor::from_slice(&data).reshape(shape)
}

/// Standard normal draws.
pub fn normal(key: PrngKey, shape: &[i64]) -> Tensor {
    let mut rng = key.rng();
    let data: Vec<f64> = (0..numel(shape))
        .map(|_| rng.sample(StandardNormal))
        .collect();
    Tensor::from_slice(&data).reshape(shape)
}
