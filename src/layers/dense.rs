use std::fmt;

use rand::Rng;

use crate::{
    activation::activation::ActivationFunction,
    error::{NetworkError, Result},
    loss::mse::MseLoss,
    math::{matrix::{self, Matrix}, vector},
};

/// One affine transform followed by an element-wise activation.
///
/// The layer caches the vectors of its most recent forward and backward
/// passes; `apply_gradient_step` consumes those caches, so a step is always
/// forward → error → update on the same layer.
#[derive(Debug, Clone)]
pub struct Layer {
    weights: Matrix,  // neuron_count × input_count
    biases: Vec<f64>,
    activation: ActivationFunction,
    learning_rate: f64,
    input: Option<Vec<f64>>,
    pre_activation: Option<Vec<f64>>,  // z = Wx + b, needed for the derivative
    output: Option<Vec<f64>>,
    error: Option<Vec<f64>>,
}

impl Layer {
    /// Creates a layer with all-zero weights and biases and a learning rate of 1.0.
    pub fn new(input_count: usize, neuron_count: usize, activation: ActivationFunction) -> Layer {
        Layer {
            weights: Matrix::zeros(neuron_count, input_count),
            biases: vec![0.0; neuron_count],
            activation,
            learning_rate: 1.0,
            input: None,
            pre_activation: None,
            output: None,
            error: None,
        }
    }

    /// Creates a layer from explicit parameters; `biases` must hold one value per weight row.
    pub fn with_parameters(weights: Matrix, biases: Vec<f64>, activation: ActivationFunction) -> Result<Layer> {
        let mut layer = Layer::new(weights.cols, weights.rows, activation);
        layer.set_parameters(weights, biases)?;
        Ok(layer)
    }

    /// Replaces weights and biases, keeping the layer's shape.
    pub fn set_parameters(&mut self, weights: Matrix, biases: Vec<f64>) -> Result<()> {
        if weights.rows != self.neuron_count() {
            return Err(NetworkError::DimensionMismatch { expected: self.neuron_count(), actual: weights.rows });
        }
        if weights.cols != self.input_count() {
            return Err(NetworkError::DimensionMismatch { expected: self.input_count(), actual: weights.cols });
        }
        if biases.len() != weights.rows {
            return Err(NetworkError::DimensionMismatch { expected: weights.rows, actual: biases.len() });
        }

        self.weights = weights;
        self.biases = biases;
        Ok(())
    }

    /// Forward pass; caches input, pre-activation and output for backprop.
    pub fn forward(&mut self, input: &[f64]) -> Result<&[f64]> {
        let mut z = self.weights.dot(input)?;
        for (x, b) in z.iter_mut().zip(&self.biases) {
            *x += b;
        }
        let a = z.iter().map(|&x| self.activation.function(x)).collect();

        self.input = Some(input.to_vec());
        self.pre_activation = Some(z);
        Ok(self.output.insert(a).as_slice())
    }

    /// Error of an output layer against `target`: `(output - target) ⊙ f'(z)`.
    pub fn backward_output_error(&mut self, target: &[f64]) -> Result<&[f64]> {
        if target.len() != self.neuron_count() {
            return Err(NetworkError::DimensionMismatch { expected: self.neuron_count(), actual: target.len() });
        }
        let (Some(output), Some(z)) = (&self.output, &self.pre_activation) else {
            return Err(NetworkError::UninitializedState { what: "layer output" });
        };

        let delta = MseLoss::derivative(output, target)?;
        let error = self.scale_by_derivative(delta, z)?;
        Ok(self.error.insert(error).as_slice())
    }

    /// Error of a hidden layer from the layer directly above it.
    ///
    /// The back-propagated signal `Wᵗ · e` is divided by the number of upstream
    /// error components before the derivative is applied. This fan-out
    /// normalisation is not part of textbook back-propagation; trained
    /// outcomes depend on it.
    pub fn backward_hidden_error(&mut self, upstream_weights: &Matrix, upstream_error: &[f64]) -> Result<&[f64]> {
        if upstream_weights.cols != self.neuron_count() {
            return Err(NetworkError::DimensionMismatch { expected: self.neuron_count(), actual: upstream_weights.cols });
        }

        let fan_out = upstream_error.len().max(1) as f64;
        let raw: Vec<f64> = upstream_weights
            .transpose_dot(upstream_error)?
            .into_iter()
            .map(|x| x / fan_out)
            .collect();

        let error = match (&self.activation, &self.pre_activation) {
            (ActivationFunction::None, _) => raw,
            (_, Some(z)) => self.scale_by_derivative(raw, z)?,
            (_, None) => return Err(NetworkError::UninitializedState { what: "layer pre-activation" }),
        };
        Ok(self.error.insert(error).as_slice())
    }

    /// Gradient-descent update from the cached error and input:
    /// `W -= lr · (error ⊗ input)`, `b -= lr · error`.
    pub fn apply_gradient_step(&mut self) -> Result<()> {
        let Some(error) = &self.error else {
            return Err(NetworkError::UninitializedState { what: "layer error" });
        };
        let Some(input) = &self.input else {
            return Err(NetworkError::UninitializedState { what: "layer input" });
        };

        let step = Matrix::outer(error, input);
        self.weights.sub_scaled(&step, self.learning_rate)?;
        vector::sub_scaled(&mut self.biases, error, self.learning_rate)
    }

    /// Redraws every weight uniformly from `[-range, range]`.
    pub fn randomize_weights<R: Rng + ?Sized>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        self.weights.randomize(range, rng)
    }

    /// Redraws every bias uniformly from `[-range, range]`.
    pub fn randomize_biases<R: Rng + ?Sized>(&mut self, range: f64, rng: &mut R) -> Result<()> {
        matrix::fill_uniform(&mut self.biases, range, rng)
    }

    fn scale_by_derivative(&self, error: Vec<f64>, z: &[f64]) -> Result<Vec<f64>> {
        if self.activation == ActivationFunction::None {
            return Ok(error);
        }
        let derivative: Vec<f64> = z.iter().map(|&x| self.activation.derivative(x)).collect();
        vector::hadamard(&error, &derivative)
    }

    pub fn input_count(&self) -> usize {
        self.weights.cols
    }

    pub fn neuron_count(&self) -> usize {
        self.weights.rows
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<()> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetworkError::Config(format!("learning rate must be positive, got {learning_rate}")));
        }
        self.learning_rate = learning_rate;
        Ok(())
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn input(&self) -> Option<&[f64]> {
        self.input.as_deref()
    }

    pub fn pre_activation(&self) -> Option<&[f64]> {
        self.pre_activation.as_deref()
    }

    pub fn output(&self) -> Option<&[f64]> {
        self.output.as_deref()
    }

    pub fn error(&self) -> Option<&[f64]> {
        self.error.as_deref()
    }

    /// Fan-in weights of one neuron.
    pub fn neuron_weights(&self, neuron: usize) -> Result<&[f64]> {
        self.weights.row(neuron).ok_or(NetworkError::IndexOutOfRange {
            what: "neuron",
            index: neuron,
            len: self.neuron_count(),
        })
    }

    pub fn neuron_bias(&self, neuron: usize) -> Result<f64> {
        self.biases.get(neuron).copied().ok_or(NetworkError::IndexOutOfRange {
            what: "neuron",
            index: neuron,
            len: self.neuron_count(),
        })
    }

    /// Last output of one neuron, `0.0` before the first forward pass.
    pub fn neuron_value(&self, neuron: usize) -> Result<f64> {
        if neuron >= self.neuron_count() {
            return Err(NetworkError::IndexOutOfRange { what: "neuron", index: neuron, len: self.neuron_count() });
        }
        Ok(self.output.as_ref().map_or(0.0, |out| out[neuron]))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Layer ({}, {} neurons, {} inputs)", self.activation.tag(), self.neuron_count(), self.input_count())?;
        writeln!(f, "weights:")?;
        for row in &self.weights.data {
            writeln!(f, "  {row:?}")?;
        }
        writeln!(f, "biases: {:?}", self.biases)?;
        match &self.error {
            Some(error) => writeln!(f, "errors: {error:?}"),
            None => writeln!(f, "errors: Empty"),
        }
    }
}
