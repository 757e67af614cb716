//! Small fully-connected feed-forward networks trained by back-propagation,
//! with a bounded memory that replays hard examples between epochs.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use ruminate_nn::Network;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut network = Network::new(2, &[3], 2, 4)?;
//! network.randomize_weights(0.1, &mut rng)?;
//! network.randomize_biases(0.1, &mut rng)?;
//!
//! network.train(&[1.0, 0.0], &[0.0, 1.0])?;
//! network.forward(&[1.0, 0.0])?;
//! if network.favored_neuron()? != 1 {
//!     network.add_memory(&[1.0, 0.0], &[0.0, 1.0])?;
//! }
//! network.ruminate()?;
//! # Ok::<(), ruminate_nn::NetworkError>(())
//! ```

pub mod math;
pub mod activation;
pub mod error;
pub mod layers;
pub mod network;
pub mod memory;
pub mod loss;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use error::{NetworkError, Result};
pub use layers::dense::Layer;
pub use network::network::Network;
pub use network::selection::ranked_choice;
pub use network::snapshot::NetworkSnapshot;
pub use network::spec::NetworkSpec;
pub use memory::{Learner, Memory, MemoryStore, Rumination};
pub use loss::mse::MseLoss;
pub use train::{train_loop, train_network, EpochStats, TrainConfig};
