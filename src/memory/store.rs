use log::{debug, trace};

use crate::{
    error::Result,
    math::vector,
    memory::memory::Memory,
};

/// Anything that can be retrained on a single example and then asked which
/// output it favours.
pub trait Learner {
    /// Forward pass on `input` followed by one training step towards `target`.
    fn train_example(&mut self, input: &[f64], target: &[f64]) -> Result<()>;

    /// Index of the output the learner currently favours.
    fn favored_neuron(&self) -> Result<usize>;
}

/// Outcome of one `ruminate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rumination {
    /// Memories retrained.
    pub replayed: usize,
    /// Memories classified correctly after their retraining step.
    pub recalled: usize,
}

/// Capacity-bounded collection of memories. A capacity of 0 disables it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    capacity: usize,
    entries: Vec<Memory>,
}

impl MemoryStore {
    pub fn new(capacity: usize) -> MemoryStore {
        MemoryStore {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Stored memories in their current order.
    pub fn entries(&self) -> &[Memory] {
        &self.entries
    }

    /// Admits a new memory with a zero streak.
    ///
    /// Below capacity the memory is appended. At capacity the entries are
    /// stably sorted by ascending streak and the last one (the highest
    /// streak) is overwritten and returned.
    pub fn add_memory(&mut self, input: &[f64], target: &[f64]) -> Option<Memory> {
        let memory = Memory::new(input.to_vec(), target.to_vec());

        if self.entries.len() < self.capacity {
            trace!("admitting memory {} of {}", self.entries.len() + 1, self.capacity);
            self.entries.push(memory);
            return None;
        }
        if self.capacity == 0 {
            return None;
        }

        self.sort_by_streak();
        let evicted = std::mem::replace(&mut self.entries[self.capacity - 1], memory);
        debug!("memory store full, evicted memory with streak {}", evicted.success_streak);
        Some(evicted)
    }

    /// Retrains `learner` on every memory in stored order and updates streaks:
    /// a hit (favoured output equals the target's largest component) extends
    /// the streak by one, a miss resets it to zero.
    ///
    /// The first training error aborts the pass; memories already replayed
    /// keep their updated streaks.
    pub fn ruminate<L: Learner + ?Sized>(&mut self, learner: &mut L) -> Result<Rumination> {
        let mut summary = Rumination::default();

        for memory in &mut self.entries {
            learner.train_example(&memory.input, &memory.target)?;
            summary.replayed += 1;

            if Some(learner.favored_neuron()?) == vector::max_index(&memory.target) {
                memory.success_streak = memory.success_streak.saturating_add(1);
                summary.recalled += 1;
            } else {
                memory.success_streak = 0;
            }
        }

        if summary.replayed > 0 {
            let (mean, _) = self.streak_statistics();
            debug!(
                "ruminated on {} memories, {} recalled, mean streak {:.2}",
                summary.replayed, summary.recalled, mean
            );
        }

        Ok(summary)
    }

    /// Streaks in ascending order. Sorts the entries as a side effect.
    pub fn solution_counts(&mut self) -> Vec<u32> {
        self.sort_by_streak();
        self.entries.iter().map(|m| m.success_streak).collect()
    }

    /// Mean and population standard deviation of the stored streaks.
    pub fn streak_statistics(&self) -> (f64, f64) {
        let streaks: Vec<f64> = self.entries.iter().map(|m| m.success_streak as f64).collect();
        let mean = vector::mean(&streaks);
        (mean, vector::standard_deviation(&streaks, mean))
    }

    fn sort_by_streak(&mut self) {
        self.entries.sort_by_key(|m| m.success_streak);
    }
}
