/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`           : total number of full passes over the training data
/// - `shuffle`          : visit examples in a fresh random order each epoch
/// - `ruminate`         : replay the network's memories at the start of each epoch
/// - `remember_failures`: admit examples the network got wrong into its memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub ruminate: bool,
    pub remember_failures: bool,
}

impl TrainConfig {
    /// Creates a `TrainConfig` with shuffling, rumination and memory admission on.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: true,
            ruminate: true,
            remember_failures: true,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig::new(1)
    }
}
