use log::info;
use rand::Rng;

use crate::error::Result;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_network;

/// Trains `network` for `config.epochs` epochs and returns the statistics of
/// every completed epoch.
///
/// Each epoch starts by ruminating on the network's memories (when enabled),
/// so examples missed in epoch *n* are replayed from epoch *n + 1* onwards.
///
/// # Errors
/// The first failing epoch aborts the run; epochs already completed have
/// updated the network in place.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let mut stats = train_network(network, inputs, labels, config, rng)?;
        stats.epoch = epoch;
        stats.total_epochs = config.epochs;

        info!(
            "epoch {}/{}: loss {:.6}, accuracy {:.3}, recalled {}/{}, admitted {}",
            epoch,
            config.epochs,
            stats.train_loss,
            stats.accuracy,
            stats.recalled,
            stats.ruminated,
            stats.memories_admitted,
        );
        history.push(stats);
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::spec::NetworkSpec;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn numbers_epochs_and_stops_at_the_requested_count() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut net = NetworkSpec::new(2, vec![], 2, 2).build(&mut rng).unwrap();
        let inputs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![vec![1.0, 0.0], vec![0.0, 1.0]];

        let history = train_loop(&mut net, &inputs, &labels, &TrainConfig::new(3), &mut rng).unwrap();

        let epochs: Vec<(usize, usize)> = history.iter().map(|s| (s.epoch, s.total_epochs)).collect();
        assert_eq!(epochs, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn zero_epochs_leaves_the_network_untouched() {
        let mut net = Network::new(2, &[], 1, 0).unwrap();
        let history = train_loop(
            &mut net,
            &[vec![1.0, 1.0]],
            &[vec![1.0]],
            &TrainConfig::new(0),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();

        assert!(history.is_empty());
        assert!(net.layers()[0].input().is_none());
    }
}
