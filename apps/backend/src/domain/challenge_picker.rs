//! Challenge prompt selection.
//!
//! The prompt draw is the only nondeterministic step in a move, so it sits
//! behind [`ChallengePicker`]. Production uses [`RandomPicker`]; tests pass a
//! seed or a [`SequencePicker`].

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::prelude::*;

pub trait ChallengePicker: Send + Sync {
    /// Index into a pool of `pool_len` prompts. `pool_len` is never zero.
    fn pick_index(&self, pool_len: usize) -> usize;
}

/// Uniform draw from an RNG behind a mutex.
pub struct RandomPicker {
    rng: Mutex<StdRng>,
}

impl RandomPicker {
    /// `Some(seed)` gives a reproducible sequence; `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl ChallengePicker for RandomPicker {
    fn pick_index(&self, pool_len: usize) -> usize {
        if pool_len <= 1 {
            return 0;
        }
        self.rng.lock().random_range(0..pool_len)
    }
}

/// Cycles through a fixed list of indices, wrapping each into the pool.
pub struct SequencePicker {
    indices: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequencePicker {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl ChallengePicker for SequencePicker {
    fn pick_index(&self, pool_len: usize) -> usize {
        if self.indices.is_empty() || pool_len == 0 {
            return 0;
        }
        let at = self.cursor.fetch_add(1, Ordering::Relaxed) % self.indices.len();
        self.indices[at] % pool_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_pickers_agree() {
        let a = RandomPicker::new(Some(7));
        let b = RandomPicker::new(Some(7));
        let first: Vec<usize> = (0..16).map(|_| a.pick_index(6)).collect();
        let second: Vec<usize> = (0..16).map(|_| b.pick_index(6)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn random_picks_stay_in_range() {
        let picker = RandomPicker::new(None);
        for _ in 0..200 {
            assert!(picker.pick_index(6) < 6);
        }
        assert_eq!(picker.pick_index(1), 0);
    }

    #[test]
    fn sequence_picker_wraps() {
        let picker = SequencePicker::new(vec![1, 8]);
        assert_eq!(picker.pick_index(6), 1);
        assert_eq!(picker.pick_index(6), 2);
        assert_eq!(picker.pick_index(6), 1);
    }
}
