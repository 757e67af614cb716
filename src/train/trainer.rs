use std::time::Instant;

use log::trace;
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{NetworkError, Result},
    loss::mse::MseLoss,
    math::vector,
    network::network::Network,
    train::{epoch_stats::EpochStats, train_config::TrainConfig},
};

/// Runs one epoch of the self-curriculum: rumination on stored memories,
/// then one training step per sample, remembering the samples the network
/// got wrong. `config.epochs` is ignored here; see `train_loop`.
///
/// Fails without training if the dataset is empty or `inputs` and `labels`
/// differ in length.
pub fn train_network<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<EpochStats> {
    if inputs.is_empty() {
        return Err(NetworkError::Config("training set is empty".to_string()));
    }
    if inputs.len() != labels.len() {
        return Err(NetworkError::DimensionMismatch { expected: inputs.len(), actual: labels.len() });
    }

    let t_start = Instant::now();

    let rumination = if config.ruminate {
        network.ruminate()?
    } else {
        Default::default()
    };

    let mut indices: Vec<usize> = (0..inputs.len()).collect();
    if config.shuffle {
        indices.shuffle(rng);
    }

    let mut total_loss = 0.0;
    let mut correct = 0;
    let mut admitted = 0;

    for &idx in &indices {
        let input = &inputs[idx];
        let expected = &labels[idx];

        let output = network.forward(input)?;
        total_loss += MseLoss::loss(output, expected)?;

        let hit = Some(network.favored_neuron()?) == vector::max_index(expected);
        network.train_step(expected)?;

        if hit {
            correct += 1;
        } else if config.remember_failures && network.memory().is_enabled() {
            trace!("remembering sample {idx}");
            network.add_memory(input, expected)?;
            admitted += 1;
        }
    }

    let n = inputs.len() as f64;
    let (memory_mean_streak, memory_streak_std_dev) = network.memory().streak_statistics();

    Ok(EpochStats {
        epoch: 1,
        total_epochs: 1,
        train_loss: total_loss / n,
        accuracy: correct as f64 / n,
        ruminated: rumination.replayed,
        recalled: rumination.recalled,
        memories_admitted: admitted,
        memory_mean_streak,
        memory_streak_std_dev,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    })
}
