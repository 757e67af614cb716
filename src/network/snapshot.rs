use serde::Serialize;

use crate::error::Result;
use crate::network::network::Network;

/// Read-only picture of a network for visualisation collaborators.
///
/// Layer 0 is the input layer: its neurons carry values only, with no bias
/// and no fan-in weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSnapshot {
    pub layers: Vec<LayerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub activation: &'static str,
    pub neurons: Vec<NeuronSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeuronSnapshot {
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
}

impl NetworkSnapshot {
    /// Captures every neuron through the network's introspection accessors.
    pub fn capture(network: &Network) -> Result<NetworkSnapshot> {
        let activations = network.activation_functions();
        let mut layers = Vec::with_capacity(network.layer_count());

        for (layer, activation) in activations.into_iter().enumerate() {
            let neurons = (0..network.layer_size(layer)?)
                .map(|neuron| -> Result<NeuronSnapshot> {
                    let value = network.neuron_value(layer, neuron)?;
                    if layer == 0 {
                        return Ok(NeuronSnapshot { value, bias: None, weights: vec![] });
                    }
                    Ok(NeuronSnapshot {
                        value,
                        bias: Some(network.neuron_bias(layer, neuron)?),
                        weights: network.neuron_weights(layer, neuron)?.to_vec(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            layers.push(LayerSnapshot { activation, neurons });
        }

        Ok(NetworkSnapshot { layers })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
