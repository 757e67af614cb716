use serde::{Serialize, Deserialize};

/// Per-epoch training statistics returned by `train_network` / `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean MSE over all samples, measured before each sample's update.
    pub train_loss: f64,
    /// Fraction of samples whose favoured output matched the target's
    /// largest component, measured before each sample's update.
    pub accuracy: f64,
    /// Memories replayed at the start of the epoch.
    pub ruminated: usize,
    /// Replayed memories that were classified correctly.
    pub recalled: usize,
    /// Misclassified samples handed to the memory store this epoch.
    pub memories_admitted: usize,
    pub memory_mean_streak: f64,
    pub memory_streak_std_dev: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
