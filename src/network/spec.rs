use log::debug;
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};
use crate::network::network::Network;

fn default_learning_rate() -> f64 {
    1.0
}

fn default_init_range() -> f64 {
    0.1
}

/// Architecture and hyper-parameters of a network, loadable from JSON.
///
/// Only the shape is described here; trained weights are never stored.
///
/// Fields:
/// - `inputs`        — width of the input vector
/// - `hidden`        — hidden layer widths, input side first (may be empty)
/// - `outputs`       — width of the output layer
/// - `retention`     — memory capacity; 0 disables rumination
/// - `learning_rate` — applied to every layer (default 1.0)
/// - `init_range`    — weights and biases are drawn from `[-init_range, init_range]` (default 0.1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub inputs: usize,
    #[serde(default)]
    pub hidden: Vec<usize>,
    pub outputs: usize,
    #[serde(default)]
    pub retention: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    #[serde(default = "default_init_range")]
    pub init_range: f64,
}

impl NetworkSpec {
    pub fn new(inputs: usize, hidden: Vec<usize>, outputs: usize, retention: usize) -> NetworkSpec {
        NetworkSpec {
            inputs,
            hidden,
            outputs,
            retention,
            learning_rate: default_learning_rate(),
            init_range: default_init_range(),
        }
    }

    /// Parses and validates a spec.
    pub fn from_json(json: &str) -> Result<NetworkSpec> {
        let spec: NetworkSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(NetworkError::Config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.init_range.is_finite() && self.init_range >= 0.0) {
            return Err(NetworkError::Config(format!(
                "init_range must be non-negative, got {}",
                self.init_range
            )));
        }
        Ok(())
    }

    /// Constructs the network, randomises its parameters with `rng` and
    /// applies the learning rate.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        self.validate()?;

        let mut network = Network::new(self.inputs, &self.hidden, self.outputs, self.retention)?;
        network.randomize_weights(self.init_range, rng)?;
        network.randomize_biases(self.init_range, rng)?;
        network.set_learning_rate(self.learning_rate)?;

        debug!("initialised parameters in [-{0}, {0}], learning rate {1}", self.init_range, self.learning_rate);
        Ok(network)
    }
}
