use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform picks for greetings, farewells and advice.
pub trait Chooser: Send {
    /// Returns an index in `0..len`, or `None` when `len` is zero.
    fn choose_index(&mut self, len: usize) -> Option<usize>;
}

pub fn choose<'a, T>(chooser: &mut dyn Chooser, options: &'a [T]) -> Option<&'a T> {
    chooser
        .choose_index(options.len())
        .and_then(|index| options.get(index))
}

#[derive(Debug, Clone)]
pub struct SeededChooser {
    rng: StdRng,
}

impl SeededChooser {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Chooser for SeededChooser {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.gen_range(0..len))
    }
}

/// Replays a fixed list of indices, cycling when exhausted. Each index is
/// reduced modulo the option count so any script is valid.
#[derive(Debug, Clone)]
pub struct SequenceChooser {
    script: Vec<usize>,
    cursor: usize,
}

impl SequenceChooser {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }

    pub fn always(index: usize) -> Self {
        Self::new(vec![index])
    }
}

impl Chooser for SequenceChooser {
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let next = self.script.get(self.cursor).copied().unwrap_or(0);
        if !self.script.is_empty() {
            self.cursor = (self.cursor + 1) % self.script.len();
        }
        Some(next % len)
    }
}
