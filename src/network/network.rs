use std::fmt;

use log::debug;
use rand::Rng;

use crate::{
    activation::activation::ActivationFunction,
    error::{NetworkError, Result},
    layers::dense::Layer,
    math::{matrix::Matrix, vector},
    memory::{Learner, Memory, MemoryStore, Rumination},
};

/// An ordered chain of dense layers plus the replay memory that trains it.
///
/// Introspection by `(layer, neuron)` treats layer 0 as the raw input vector,
/// so the first dense layer is addressed as layer 1.
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
    memory: MemoryStore,
}

impl Network {
    /// Builds `inputs → hidden[0] → … → outputs`. Hidden layers use the
    /// hyperbolic tangent, the output layer the scaled sigmoid. All
    /// parameters start at zero; randomise them before training.
    pub fn new(inputs: usize, hidden: &[usize], outputs: usize, retention: usize) -> Result<Network> {
        let mut network = Network::with_retention(retention);

        let mut fan_in = inputs;
        for &size in hidden {
            network.add_layer(Layer::new(fan_in, size, ActivationFunction::HyperbolicTangent))?;
            fan_in = size;
        }
        network.add_layer(Layer::new(fan_in, outputs, ActivationFunction::Sigmoid))?;

        debug!(
            "built network {inputs} -> {hidden:?} -> {outputs} with retention {retention}"
        );
        Ok(network)
    }

    /// A network with no layers yet; append them with `add_layer`.
    pub fn with_retention(retention: usize) -> Network {
        Network {
            layers: Vec::new(),
            memory: MemoryStore::new(retention),
        }
    }

    /// Appends a layer, which must accept the current last layer's output.
    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        if layer.input_count() == 0 || layer.neuron_count() == 0 {
            return Err(NetworkError::ZeroSizedLayer { position: self.layers.len() });
        }
        if let Some(last) = self.layers.last() {
            if last.neuron_count() != layer.input_count() {
                return Err(NetworkError::DimensionMismatch {
                    expected: last.neuron_count(),
                    actual: layer.input_count(),
                });
            }
        }

        self.layers.push(layer);
        Ok(())
    }

    /// Feeds `input` through every layer in order and returns the final output.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        let (first, _) = self.layers.split_first_mut().ok_or(NetworkError::EmptyNetwork)?;
        first.forward(input)?;

        for i in 1..self.layers.len() {
            let (below, above) = self.layers.split_at_mut(i);
            let previous = below[i - 1]
                .output()
                .ok_or(NetworkError::UninitializedState { what: "layer output" })?;
            above[0].forward(previous)?;
        }

        self.last_layer()?
            .output()
            .ok_or(NetworkError::UninitializedState { what: "network output" })
    }

    /// One supervised step against `target`, reusing the state cached by the
    /// preceding `forward` call: output error, hidden errors from the top
    /// down, then a gradient step on every layer.
    pub fn train_step(&mut self, target: &[f64]) -> Result<()> {
        let last = self.layers.len().checked_sub(1).ok_or(NetworkError::EmptyNetwork)?;
        self.layers[last].backward_output_error(target)?;

        for i in (0..last).rev() {
            let (below, above) = self.layers.split_at_mut(i + 1);
            let upstream = &above[0];
            let upstream_error = upstream
                .error()
                .ok_or(NetworkError::UninitializedState { what: "upstream error" })?;
            below[i].backward_hidden_error(upstream.weights(), upstream_error)?;
        }

        for layer in &mut self.layers {
            layer.apply_gradient_step()?;
        }
        Ok(())
    }

    /// `forward(input)` followed by `train_step(target)`.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.forward(input)?;
        self.train_step(target)
    }

    /// Index of the largest output. A single-neuron output layer always
    /// answers 0 without looking at its value.
    pub fn favored_neuron(&self) -> Result<usize> {
        let last = self.last_layer()?;
        if last.neuron_count() == 1 {
            return Ok(0);
        }
        let outputs = last
            .output()
            .ok_or(NetworkError::UninitializedState { what: "network output" })?;
        vector::max_index(outputs).ok_or(NetworkError::NoValidSelection)
    }

    /// The output layer's last values, zeros before the first forward pass.
    pub fn current_outputs(&self) -> Result<Vec<f64>> {
        let last = self.last_layer()?;
        Ok(last
            .output()
            .map_or_else(|| vec![0.0; last.neuron_count()], |out| out.to_vec()))
    }

    // ------------------------------------------------------------------
    // Memory
    // ------------------------------------------------------------------

    /// Stores an example for later rumination. Lengths must match the
    /// network's input and output sizes.
    pub fn add_memory(&mut self, input: &[f64], target: &[f64]) -> Result<Option<Memory>> {
        let expected_input = self.input_count()?;
        if input.len() != expected_input {
            return Err(NetworkError::DimensionMismatch { expected: expected_input, actual: input.len() });
        }
        let expected_output = self.output_count()?;
        if target.len() != expected_output {
            return Err(NetworkError::DimensionMismatch { expected: expected_output, actual: target.len() });
        }

        Ok(self.memory.add_memory(input, target))
    }

    /// Retrains on every stored memory and updates their success streaks.
    /// Meant to run once per epoch, before training on fresh examples.
    pub fn ruminate(&mut self) -> Result<Rumination> {
        let mut memory = std::mem::take(&mut self.memory);
        let result = memory.ruminate(self);
        self.memory = memory;
        result
    }

    /// Success streaks in ascending order (reorders the stored memories).
    pub fn solution_counts(&mut self) -> Vec<u32> {
        self.memory.solution_counts()
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    pub fn randomize_weights<R: Rng + ?Sized>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        for layer in &mut self.layers {
            layer.randomize_weights(range, rng)?;
        }
        Ok(())
    }

    pub fn randomize_biases<R: Rng + ?Sized>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        for layer in &mut self.layers {
            layer.randomize_biases(range, rng)?;
        }
        Ok(())
    }

    /// Sets the same learning rate on every layer.
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        for layer in &mut self.layers {
            layer.set_learning_rate(learning_rate)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    /// Dense layers, input layer excluded.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Replaces one dense layer's weights and biases (layer 1 is the first
    /// dense layer). The new parameters must keep the layer's shape.
    pub fn set_layer_parameters(&mut self, layer: usize, weights: Matrix, biases: Vec<f64>) -> Result<()> {
        self.dense_layer_mut(layer)?.set_parameters(weights, biases)
    }

    pub fn set_layer_learning_rate(&mut self, layer: usize, learning_rate: f64) -> Result<()> {
        self.dense_layer_mut(layer)?.set_learning_rate(learning_rate)
    }

    /// Number of layers including the input layer.
    pub fn layer_count(&self) -> usize {
        self.layers.len() + 1
    }

    pub fn input_count(&self) -> Result<usize> {
        Ok(self.first_layer()?.input_count())
    }

    pub fn output_count(&self) -> Result<usize> {
        Ok(self.last_layer()?.neuron_count())
    }

    /// Width of `layer`; layer 0 is the input.
    pub fn layer_size(&self, layer: usize) -> Result<usize> {
        match layer {
            0 => self.input_count(),
            _ => Ok(self.dense_layer(layer)?.neuron_count()),
        }
    }

    /// Activation tags per layer, led by `"none"` for the input layer.
    pub fn activation_functions(&self) -> Vec<&'static str> {
        std::iter::once(ActivationFunction::None.tag())
            .chain(self.layers.iter().map(|l| l.activation().tag()))
            .collect()
    }

    /// Value of one neuron; layer 0 reads the last input vector. Every value
    /// is `0.0` until the first forward pass.
    pub fn neuron_value(&self, layer: usize, neuron: usize) -> Result<f64> {
        if layer == 0 {
            let first = self.first_layer()?;
            let len = first.input_count();
            if neuron >= len {
                return Err(NetworkError::IndexOutOfRange { what: "neuron", index: neuron, len });
            }
            return Ok(first.input().map_or(0.0, |input| input[neuron]));
        }
        self.dense_layer(layer)?.neuron_value(neuron)
    }

    /// Fan-in weights of one neuron. The input layer has none.
    pub fn neuron_weights(&self, layer: usize, neuron: usize) -> Result<&[f64]> {
        self.dense_layer(layer)?.neuron_weights(neuron)
    }

    pub fn neuron_bias(&self, layer: usize, neuron: usize) -> Result<f64> {
        self.dense_layer(layer)?.neuron_bias(neuron)
    }

    fn dense_layer(&self, layer: usize) -> Result<&Layer> {
        let len = self.layer_count();
        layer
            .checked_sub(1)
            .and_then(|i| self.layers.get(i))
            .ok_or(NetworkError::IndexOutOfRange { what: "layer", index: layer, len })
    }

    fn dense_layer_mut(&mut self, layer: usize) -> Result<&mut Layer> {
        let len = self.layer_count();
        layer
            .checked_sub(1)
            .and_then(|i| self.layers.get_mut(i))
            .ok_or(NetworkError::IndexOutOfRange { what: "layer", index: layer, len })
    }

    fn first_layer(&self) -> Result<&Layer> {
        self.layers.first().ok_or(NetworkError::EmptyNetwork)
    }

    fn last_layer(&self) -> Result<&Layer> {
        self.layers.last().ok_or(NetworkError::EmptyNetwork)
    }
}

impl Learner for Network {
    fn train_example(&mut self, input: &[f64], target: &[f64]) -> Result<()> {
        self.train(input, target)
    }

    fn favored_neuron(&self) -> Result<usize> {
        Network::favored_neuron(self)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network ({} layers, retention {})", self.layer_count(), self.memory.capacity())?;
        for layer in &self.layers {
            write!(f, "{layer}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn single_layer(weights: Vec<Vec<f64>>, bias: Vec<f64>) -> Network {
        let mut net = Network::new(weights[0].len(), &[], weights.len(), 0).unwrap();
        net.set_layer_parameters(1, Matrix::from_data(weights).unwrap(), bias).unwrap();
        net
    }

    #[test]
    fn construction_assigns_activations() {
        let net = Network::new(4, &[3, 2], 5, 0).unwrap();
        assert_eq!(net.layer_count(), 4);
        assert_eq!(
            net.activation_functions(),
            vec!["none", "hyperbolic_tangent", "hyperbolic_tangent", "sigmoid"]
        );
        let sizes: Vec<usize> = (0..4).map(|l| net.layer_size(l).unwrap()).collect();
        assert_eq!(sizes, vec![4, 3, 2, 5]);
    }

    #[test]
    fn zero_sized_layers_are_rejected() {
        assert_eq!(
            Network::new(3, &[0], 2, 0).unwrap_err(),
            NetworkError::ZeroSizedLayer { position: 0 }
        );
        assert_eq!(
            Network::new(3, &[4], 0, 0).unwrap_err(),
            NetworkError::ZeroSizedLayer { position: 1 }
        );
    }

    #[test]
    fn add_layer_validates_chain() {
        let mut net = Network::with_retention(0);
        net.add_layer(Layer::new(2, 3, ActivationFunction::HyperbolicTangent)).unwrap();
        assert_eq!(
            net.add_layer(Layer::new(4, 1, ActivationFunction::Sigmoid)).unwrap_err(),
            NetworkError::DimensionMismatch { expected: 3, actual: 4 }
        );
        net.add_layer(Layer::new(3, 1, ActivationFunction::Sigmoid)).unwrap();
        assert_eq!(net.layer_count(), 3);
    }

    #[test]
    fn empty_network_fails() {
        let mut net = Network::with_retention(0);
        assert_eq!(net.forward(&[1.0]).unwrap_err(), NetworkError::EmptyNetwork);
        assert_eq!(net.train_step(&[1.0]).unwrap_err(), NetworkError::EmptyNetwork);
        assert_eq!(net.favored_neuron().unwrap_err(), NetworkError::EmptyNetwork);
    }

    #[test]
    fn first_layer_mismatch_propagates_unchanged() {
        let mut net = Network::new(3, &[2], 1, 0).unwrap();
        assert_eq!(
            net.forward(&[1.0, 2.0]).unwrap_err(),
            NetworkError::DimensionMismatch { expected: 3, actual: 2 }
        );
    }

    #[test]
    fn train_step_requires_forward() {
        let mut net = Network::new(2, &[2], 1, 0).unwrap();
        assert_eq!(
            net.train_step(&[1.0]).unwrap_err(),
            NetworkError::UninitializedState { what: "layer output" }
        );
    }

    #[test]
    fn single_output_is_always_favored() {
        let mut net = single_layer(vec![vec![-5.0]], vec![0.0]);
        net.forward(&[1.0]).unwrap();
        assert!(net.current_outputs().unwrap()[0] < 0.0);
        assert_eq!(net.favored_neuron().unwrap(), 0);
    }

    #[test]
    fn favored_neuron_picks_largest_output() {
        let mut net = single_layer(vec![vec![0.1], vec![0.9], vec![-0.4]], vec![0.0; 3]);
        net.forward(&[1.0]).unwrap();
        assert_eq!(net.favored_neuron().unwrap(), 1);
    }

    #[test]
    fn outputs_and_values_are_zero_before_forward() {
        let net = Network::new(2, &[3], 2, 0).unwrap();
        assert_eq!(net.current_outputs().unwrap(), vec![0.0, 0.0]);
        assert_eq!(net.neuron_value(0, 1).unwrap(), 0.0);
        assert_eq!(net.neuron_value(2, 1).unwrap(), 0.0);
    }

    #[test]
    fn introspection_coordinates() {
        let mut net = single_layer(vec![vec![0.5, -0.5]], vec![0.25]);
        net.forward(&[2.0, 1.0]).unwrap();

        assert_eq!(net.neuron_value(0, 0).unwrap(), 2.0);
        assert_eq!(net.neuron_weights(1, 0).unwrap(), &[0.5, -0.5]);
        assert_eq!(net.neuron_bias(1, 0).unwrap(), 0.25);
        assert_relative_eq!(
            net.neuron_value(1, 0).unwrap(),
            ActivationFunction::Sigmoid.function(0.75)
        );
        assert_eq!(
            net.neuron_weights(0, 0).unwrap_err(),
            NetworkError::IndexOutOfRange { what: "layer", index: 0, len: 2 }
        );
        assert_eq!(
            net.neuron_bias(2, 0).unwrap_err(),
            NetworkError::IndexOutOfRange { what: "layer", index: 2, len: 2 }
        );
        assert_eq!(
            net.neuron_value(0, 2).unwrap_err(),
            NetworkError::IndexOutOfRange { what: "neuron", index: 2, len: 2 }
        );
    }

    #[test]
    fn training_reduces_error() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut net = Network::new(2, &[3], 1, 0).unwrap();
        net.randomize_weights(0.5, &mut rng).unwrap();
        net.randomize_biases(0.5, &mut rng).unwrap();
        net.set_learning_rate(0.1).unwrap();

        let target = [0.5];
        for _ in 0..200 {
            net.train(&[1.0, -1.0], &target).unwrap();
        }
        let after = (net.forward(&[1.0, -1.0]).unwrap()[0] - target[0]).abs();

        assert!(after < 0.05);
    }

    #[test]
    fn train_step_updates_every_layer() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut net = Network::new(2, &[2, 2], 2, 0).unwrap();
        net.randomize_weights(0.3, &mut rng).unwrap();
        let before: Vec<Matrix> = net.layers().iter().map(|l| l.weights().clone()).collect();

        net.train(&[1.0, 0.5], &[1.0, -1.0]).unwrap();

        for (layer, old) in net.layers().iter().zip(&before) {
            assert_ne!(layer.weights(), old);
            assert!(layer.error().is_some());
        }
    }

    #[test]
    fn train_step_matches_hand_computed_update() {
        let mut net = Network::new(1, &[1], 2, 0).unwrap();
        net.set_layer_parameters(1, Matrix::from_data(vec![vec![0.5]]).unwrap(), vec![0.0]).unwrap();
        net.set_layer_parameters(2, Matrix::from_data(vec![vec![1.0], vec![-1.0]]).unwrap(), vec![0.0, 0.5])
            .unwrap();
        net.set_learning_rate(0.5).unwrap();

        net.train(&[1.0], &[1.0, 0.0]).unwrap();

        // h = tanh(0.5), output errors from the pre-update outputs, hidden error
        // = (1·e0 - 1·e1) / 2 · sech²(0.5) using the output weights before the step
        let (hidden, output) = (&net.layers()[0], &net.layers()[1]);
        assert_relative_eq!(output.error().unwrap()[0], -0.3665628552347297, max_relative = 1e-10);
        assert_relative_eq!(output.error().unwrap()[1], 0.009466181563122135, max_relative = 1e-10);
        assert_relative_eq!(hidden.error().unwrap()[0], -0.14786359175951594, max_relative = 1e-10);

        assert_relative_eq!(hidden.weights().data[0][0], 0.573931795879758, max_relative = 1e-10);
        assert_relative_eq!(hidden.biases()[0], 0.07393179587975797, max_relative = 1e-10);
        assert_relative_eq!(output.weights().data[0][0], 1.0846974923090928, max_relative = 1e-10);
        assert_relative_eq!(output.weights().data[1][0], -1.0021872424570286, max_relative = 1e-10);
        assert_relative_eq!(output.biases()[0], 0.18328142761736485, max_relative = 1e-10);
        assert_relative_eq!(output.biases()[1], 0.4952669092184389, max_relative = 1e-10);
    }

    #[test]
    fn layer_setters_keep_the_chain_intact() {
        let mut net = Network::new(2, &[3], 1, 0).unwrap();

        assert_eq!(
            net.set_layer_parameters(1, Matrix::zeros(5, 2), vec![0.0; 5]).unwrap_err(),
            NetworkError::DimensionMismatch { expected: 3, actual: 5 }
        );
        assert_eq!(
            net.set_layer_parameters(0, Matrix::zeros(2, 2), vec![0.0; 2]).unwrap_err(),
            NetworkError::IndexOutOfRange { what: "layer", index: 0, len: 3 }
        );
        assert_eq!(
            net.set_layer_learning_rate(3, 0.1).unwrap_err(),
            NetworkError::IndexOutOfRange { what: "layer", index: 3, len: 3 }
        );
        assert_eq!(net.layer_size(1).unwrap(), 3);
        assert_eq!(net.layers()[1].input_count(), 3);

        net.set_layer_learning_rate(2, 0.1).unwrap();
        assert_eq!(net.layers()[0].learning_rate(), 1.0);
        assert_eq!(net.layers()[1].learning_rate(), 0.1);
        assert_eq!(net.forward(&[1.0, 1.0]).unwrap().len(), 1);
    }

    #[test]
    fn set_learning_rate_applies_to_all_layers() {
        let mut net = Network::new(2, &[2], 1, 0).unwrap();
        net.set_learning_rate(0.25).unwrap();
        assert!(net.layers().iter().all(|l| l.learning_rate() == 0.25));
    }

    #[test]
    fn add_memory_checks_lengths() {
        let mut net = Network::new(2, &[], 3, 1).unwrap();
        assert_eq!(
            net.add_memory(&[1.0], &[0.0, 0.0, 1.0]).unwrap_err(),
            NetworkError::DimensionMismatch { expected: 2, actual: 1 }
        );
        assert_eq!(
            net.add_memory(&[1.0, 0.0], &[1.0]).unwrap_err(),
            NetworkError::DimensionMismatch { expected: 3, actual: 1 }
        );
        assert!(net.add_memory(&[1.0, 0.0], &[0.0, 0.0, 1.0]).unwrap().is_none());
        assert_eq!(net.memory().len(), 1);
    }

    #[test]
    fn ruminate_restores_the_store() {
        let mut net = Network::new(2, &[], 2, 2).unwrap();
        net.add_memory(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        net.add_memory(&[0.0, 1.0], &[0.0, 1.0]).unwrap();

        let summary = net.ruminate().unwrap();

        assert_eq!(summary.replayed, 2);
        assert_eq!(net.memory().capacity(), 2);
        assert_eq!(net.memory().len(), 2);
    }

    #[test]
    fn display_lists_layers() {
        let net = Network::new(2, &[2], 1, 3).unwrap();
        let text = net.to_string();
        assert!(text.starts_with("Network (3 layers, retention 3)"));
        assert_eq!(text.matches("Layer (").count(), 2);
        assert!(text.contains("errors: Empty"));
    }
}
