//! Injectable randomness for obstacle spawning
//!
//! The spawner only needs unit floats. Any `rand::Rng` works; tests can
//! hand in a fixed sequence instead.

use rand::Rng;

/// A source of uniform values in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    index: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            index: 0,
        }
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
