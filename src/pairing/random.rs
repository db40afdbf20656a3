use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the uniform draws in [0, 1) that decide search and connect outcomes.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

pub struct EntropyRandom {
    rng: StdRng,
}

impl EntropyRandom {
    pub fn new() -> Self {
        EntropyRandom { rng: StdRng::from_entropy() }
    }
}

impl Default for EntropyRandom {
    fn default() -> Self {
        EntropyRandom::new()
    }
}

impl RandomSource for EntropyRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/**
 * Replays a fixed list of draws, starting over once the list is exhausted.
 * An empty list always draws 0.0.
 */
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        SequenceRandom { values, position: 0 }
    }

    pub fn constant(value: f64) -> Self {
        SequenceRandom::new(vec![value])
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let value = self.values[self.position % self.values.len()];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}
