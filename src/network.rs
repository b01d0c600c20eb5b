//! Fully connected feedforward network trained by backpropagation.
//!
//! Layers hold 1xN row-vector activations; `weights[i]` connects layer i to
//! layer i+1 and `biases[i]` is the 1x(i+1) bias row. Training uses sigmoid
//! activations with the delta rule on `target - output`, either applied
//! immediately per example (`train`) or accumulated across a mini-batch and
//! applied once, averaged (`train_batch`).
//!
//! Scratch buffers (`layers`, `errors`, `deltas`) are overwritten in place on
//! every call; a network instance must not be shared across threads without
//! external serialization. Distinct instances are fully independent.

use crate::error::TensorNetError;
use crate::matrix::Matrix;
use crate::utils::activations::{sigmoid, sigmoid_derivative};
use crate::utils::SimpleRng;

/// Feedforward network over [`Matrix`] values.
///
/// # Examples
///
/// ```
/// use tensornet::{NeuralNetwork, SimpleRng};
///
/// let mut rng = SimpleRng::new(42);
/// let mut net = NeuralNetwork::new(&[2, 3, 1], 0.5, &mut rng).unwrap();
/// let out = net.feed_forward_slice(&[0.0, 1.0]).unwrap();
/// assert_eq!((out.rows(), out.cols()), (1, 1));
/// ```
pub struct NeuralNetwork {
    layer_sizes: Vec<usize>,
    learning_rate: f64,

    layers: Vec<Matrix>,
    weights: Vec<Matrix>,
    biases: Vec<Matrix>,

    errors: Vec<Matrix>,
    deltas: Vec<Matrix>,
}

impl NeuralNetwork {
    /// Create a network from an ordered list of layer widths.
    ///
    /// Weights and biases are filled with uniform values in [-1, 1] drawn
    /// from the supplied generator; `weights[i]` is
    /// `layer_sizes[i] x layer_sizes[i+1]` and `biases[i]` is
    /// `1 x layer_sizes[i+1]`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when fewer than two layers are given.
    pub fn new(
        layer_sizes: &[usize],
        learning_rate: f64,
        rng: &mut SimpleRng,
    ) -> Result<Self, TensorNetError> {
        if layer_sizes.len() < 2 {
            return Err(TensorNetError::InvalidArgument(
                "a network needs at least an input and an output layer".into(),
            ));
        }

        let num_layers = layer_sizes.len();
        let mut weights = Vec::with_capacity(num_layers - 1);
        let mut biases = Vec::with_capacity(num_layers - 1);
        for i in 0..num_layers - 1 {
            let mut w = Matrix::zeros(layer_sizes[i], layer_sizes[i + 1]);
            w.randomize(rng);
            weights.push(w);

            let mut b = Matrix::zeros(1, layer_sizes[i + 1]);
            b.randomize(rng);
            biases.push(b);
        }

        Ok(Self {
            layer_sizes: layer_sizes.to_vec(),
            learning_rate,
            layers: vec![Matrix::zeros(0, 0); num_layers],
            weights,
            biases,
            errors: vec![Matrix::zeros(0, 0); num_layers],
            deltas: vec![Matrix::zeros(0, 0); num_layers],
        })
    }

    /// Assemble a network from already-built parameter matrices (the restore
    /// path; no randomization involved). Dimensions must chain:
    /// `weights[i]` is `layer_sizes[i] x layer_sizes[i+1]` and `biases[i]`
    /// is `1 x layer_sizes[i+1]`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a short layer list or wrong parameter counts,
    /// `DimensionMismatch` when a matrix breaks the size chain.
    pub fn from_parameters(
        layer_sizes: &[usize],
        weights: Vec<Matrix>,
        biases: Vec<Matrix>,
        learning_rate: f64,
    ) -> Result<Self, TensorNetError> {
        if layer_sizes.len() < 2 {
            return Err(TensorNetError::InvalidArgument(
                "a network needs at least an input and an output layer".into(),
            ));
        }
        let num_layers = layer_sizes.len();
        if weights.len() != num_layers - 1 || biases.len() != num_layers - 1 {
            return Err(TensorNetError::InvalidArgument(format!(
                "expected {} weight and bias matrices, got {} and {}",
                num_layers - 1,
                weights.len(),
                biases.len()
            )));
        }
        for i in 0..num_layers - 1 {
            let w = &weights[i];
            if w.rows() != layer_sizes[i] || w.cols() != layer_sizes[i + 1] {
                return Err(TensorNetError::DimensionMismatch {
                    left_rows: w.rows(),
                    left_cols: w.cols(),
                    right_rows: layer_sizes[i],
                    right_cols: layer_sizes[i + 1],
                });
            }
            let b = &biases[i];
            if b.rows() != 1 || b.cols() != layer_sizes[i + 1] {
                return Err(TensorNetError::DimensionMismatch {
                    left_rows: b.rows(),
                    left_cols: b.cols(),
                    right_rows: 1,
                    right_cols: layer_sizes[i + 1],
                });
            }
        }

        Ok(Self {
            layer_sizes: layer_sizes.to_vec(),
            learning_rate,
            layers: vec![Matrix::zeros(0, 0); num_layers],
            weights,
            biases,
            errors: vec![Matrix::zeros(0, 0); num_layers],
            deltas: vec![Matrix::zeros(0, 0); num_layers],
        })
    }

    /// Propagate a 1xN input row through the network, returning the output
    /// activations.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless the input is `1 x layer_sizes[0]`.
    pub fn feed_forward(&mut self, input: &Matrix) -> Result<Matrix, TensorNetError> {
        if input.rows() != 1 || input.cols() != self.layer_sizes[0] {
            return Err(TensorNetError::DimensionMismatch {
                left_rows: input.rows(),
                left_cols: input.cols(),
                right_rows: 1,
                right_cols: self.layer_sizes[0],
            });
        }

        self.layers[0] = input.clone();
        for i in 0..self.num_layers() - 1 {
            // z = a[i] . W[i] + b[i]; a[i+1] = sigmoid(z)
            let mut z = Matrix::dot(&self.layers[i], &self.weights[i])?;
            z.add_assign(&self.biases[i])?;
            z.map_assign(sigmoid);
            self.layers[i + 1] = z;
        }
        Ok(self.layers[self.num_layers() - 1].clone())
    }

    /// Convenience wrapper turning a flat slice into a row vector first.
    pub fn feed_forward_slice(&mut self, input: &[f64]) -> Result<Matrix, TensorNetError> {
        self.feed_forward(&Matrix::row_vector(input))
    }

    /// Fill `errors`/`deltas` for the current activations against a target.
    /// `feed_forward` must have run first.
    fn backpropagate(&mut self, target: &Matrix) -> Result<(), TensorNetError> {
        let last = self.num_layers() - 1;
        let outputs = &self.layers[last];

        self.errors[last] = Matrix::sub(target, outputs)?;
        let output_derivs = Matrix::map(outputs, sigmoid_derivative);
        self.deltas[last] = Matrix::hadamard(&self.errors[last], &output_derivs)?;

        for i in (1..last).rev() {
            // error[i] = delta[i+1] . W[i]^T
            let wt = Matrix::transposed(&self.weights[i]);
            self.errors[i] = Matrix::dot(&self.deltas[i + 1], &wt)?;

            let derivs = Matrix::map(&self.layers[i], sigmoid_derivative);
            self.deltas[i] = Matrix::hadamard(&self.errors[i], &derivs)?;
        }
        Ok(())
    }

    /// Train on a single example and apply the update immediately (pure
    /// stochastic gradient descent, no momentum).
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when input or target dimensions are wrong.
    pub fn train(&mut self, input: &Matrix, target: &Matrix) -> Result<(), TensorNetError> {
        self.feed_forward(input)?;
        self.backpropagate(target)?;

        for i in 0..self.num_layers() - 1 {
            let at = Matrix::transposed(&self.layers[i]);
            let mut weight_deltas = Matrix::dot(&at, &self.deltas[i + 1])?;
            weight_deltas.scale(self.learning_rate);
            self.weights[i].add_assign(&weight_deltas)?;

            let mut bias_deltas = self.deltas[i + 1].clone();
            bias_deltas.scale(self.learning_rate);
            self.biases[i].add_assign(&bias_deltas)?;
        }
        Ok(())
    }

    /// Convenience wrapper over [`NeuralNetwork::train`] for flat slices.
    pub fn train_slice(&mut self, input: &[f64], target: &[f64]) -> Result<(), TensorNetError> {
        self.train(&Matrix::row_vector(input), &Matrix::row_vector(target))
    }

    /// Train on a mini-batch of examples packed contiguously into flat
    /// slices (`layer_sizes[0]` input values and `layer_sizes[last]` target
    /// values per example).
    ///
    /// Per-example gradients are accumulated across the batch and applied
    /// once, scaled by `learning_rate / batch_size`. A zero `batch_size` is
    /// a no-op. With `batch_size == 1` the applied update equals a single
    /// [`NeuralNetwork::train`] call from the same state.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the slice lengths don't cover the batch.
    pub fn train_batch(
        &mut self,
        inputs: &[f64],
        targets: &[f64],
        batch_size: usize,
    ) -> Result<(), TensorNetError> {
        if batch_size == 0 {
            return Ok(());
        }
        let input_size = self.layer_sizes[0];
        let output_size = self.layer_sizes[self.num_layers() - 1];
        if inputs.len() != batch_size * input_size {
            return Err(TensorNetError::InvalidArgument(format!(
                "expected {} input values for batch of {}, got {}",
                batch_size * input_size,
                batch_size,
                inputs.len()
            )));
        }
        if targets.len() != batch_size * output_size {
            return Err(TensorNetError::InvalidArgument(format!(
                "expected {} target values for batch of {}, got {}",
                batch_size * output_size,
                batch_size,
                targets.len()
            )));
        }

        let mut weight_grads: Vec<Matrix> = self
            .weights
            .iter()
            .map(|w| Matrix::zeros(w.rows(), w.cols()))
            .collect();
        let mut bias_grads: Vec<Matrix> = self
            .biases
            .iter()
            .map(|b| Matrix::zeros(b.rows(), b.cols()))
            .collect();

        for example in 0..batch_size {
            let input = &inputs[example * input_size..(example + 1) * input_size];
            let target = &targets[example * output_size..(example + 1) * output_size];

            self.feed_forward(&Matrix::row_vector(input))?;
            self.backpropagate(&Matrix::row_vector(target))?;

            for i in 0..self.num_layers() - 1 {
                let at = Matrix::transposed(&self.layers[i]);
                weight_grads[i].add_assign(&Matrix::dot(&at, &self.deltas[i + 1])?)?;
                bias_grads[i].add_assign(&self.deltas[i + 1])?;
            }
        }

        let scale = self.learning_rate / batch_size as f64;
        for i in 0..self.num_layers() - 1 {
            weight_grads[i].scale(scale);
            self.weights[i].add_assign(&weight_grads[i])?;

            bias_grads[i].scale(scale);
            self.biases[i].add_assign(&bias_grads[i])?;
        }
        Ok(())
    }

    /// Number of layers, input and output included.
    pub fn num_layers(&self) -> usize {
        self.layer_sizes.len()
    }

    /// The layer-size list.
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Activations of layer `index`, or an empty matrix when out of range.
    pub fn layer(&self, index: usize) -> Matrix {
        self.layers.get(index).cloned().unwrap_or_default()
    }

    /// Weight matrix `index`, or an empty matrix when out of range.
    pub fn weights(&self, index: usize) -> Matrix {
        self.weights.get(index).cloned().unwrap_or_default()
    }

    /// Bias matrix `index`, or an empty matrix when out of range.
    pub fn biases(&self, index: usize) -> Matrix {
        self.biases.get(index).cloned().unwrap_or_default()
    }

    /// A single neuron's activation, or 0.0 for a stale index.
    pub fn neuron_val(&self, layer_idx: usize, neuron_idx: usize) -> f64 {
        self.layers
            .get(layer_idx)
            .and_then(|layer| layer.get(0, neuron_idx).ok())
            .unwrap_or(0.0)
    }

    /// A single connection weight, or 0.0 for a stale index.
    pub fn weight_val(&self, layer_idx: usize, from_idx: usize, to_idx: usize) -> f64 {
        self.weights
            .get(layer_idx)
            .and_then(|w| w.get(from_idx, to_idx).ok())
            .unwrap_or(0.0)
    }

    /// Width of layer `layer_idx`, or 0 when out of range.
    pub fn layer_size(&self, layer_idx: usize) -> usize {
        self.layer_sizes.get(layer_idx).copied().unwrap_or(0)
    }

    /// Replace weight matrix `index` (the restore path). An out-of-range
    /// index is silently ignored so stale callers stay harmless.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` when the matrix breaks the layer-size chain.
    pub fn set_weights(&mut self, index: usize, w: Matrix) -> Result<(), TensorNetError> {
        if index >= self.weights.len() {
            return Ok(());
        }
        if w.rows() != self.layer_sizes[index] || w.cols() != self.layer_sizes[index + 1] {
            return Err(TensorNetError::DimensionMismatch {
                left_rows: w.rows(),
                left_cols: w.cols(),
                right_rows: self.layer_sizes[index],
                right_cols: self.layer_sizes[index + 1],
            });
        }
        self.weights[index] = w;
        Ok(())
    }

    /// Replace bias matrix `index`; same contract as
    /// [`NeuralNetwork::set_weights`].
    pub fn set_biases(&mut self, index: usize, b: Matrix) -> Result<(), TensorNetError> {
        if index >= self.biases.len() {
            return Ok(());
        }
        if b.rows() != 1 || b.cols() != self.layer_sizes[index + 1] {
            return Err(TensorNetError::DimensionMismatch {
                left_rows: b.rows(),
                left_cols: b.cols(),
                right_rows: 1,
                right_cols: self.layer_sizes[index + 1],
            });
        }
        self.biases[index] = b;
        Ok(())
    }

    /// Current learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Change the learning rate for subsequent training calls.
    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    /// Zero every layer's activation values in place, leaving weights and
    /// biases untouched (clears visualization state).
    pub fn reset_activations(&mut self) {
        for layer in &mut self.layers {
            layer.map_assign(|_| 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_two_layers() {
        let mut rng = SimpleRng::new(1);
        assert!(NeuralNetwork::new(&[3], 0.1, &mut rng).is_err());
        assert!(NeuralNetwork::new(&[], 0.1, &mut rng).is_err());
    }

    #[test]
    fn test_parameter_dimensions_chain() {
        let mut rng = SimpleRng::new(1);
        let net = NeuralNetwork::new(&[4, 3, 2], 0.1, &mut rng).unwrap();
        assert_eq!((net.weights(0).rows(), net.weights(0).cols()), (4, 3));
        assert_eq!((net.weights(1).rows(), net.weights(1).cols()), (3, 2));
        assert_eq!((net.biases(0).rows(), net.biases(0).cols()), (1, 3));
        assert_eq!((net.biases(1).rows(), net.biases(1).cols()), (1, 2));
    }

    #[test]
    fn test_stale_indices_return_neutral_values() {
        let mut rng = SimpleRng::new(1);
        let net = NeuralNetwork::new(&[2, 2], 0.1, &mut rng).unwrap();
        assert_eq!(net.layer(9).rows(), 0);
        assert_eq!(net.weights(9).rows(), 0);
        assert_eq!(net.biases(9).rows(), 0);
        assert_eq!(net.neuron_val(9, 0), 0.0);
        assert_eq!(net.weight_val(9, 0, 0), 0.0);
        assert_eq!(net.layer_size(9), 0);
    }

    #[test]
    fn test_set_weights_out_of_range_is_noop() {
        let mut rng = SimpleRng::new(1);
        let mut net = NeuralNetwork::new(&[2, 2], 0.1, &mut rng).unwrap();
        assert!(net.set_weights(5, Matrix::zeros(2, 2)).is_ok());
    }

    #[test]
    fn test_set_weights_wrong_shape_rejected() {
        let mut rng = SimpleRng::new(1);
        let mut net = NeuralNetwork::new(&[2, 2], 0.1, &mut rng).unwrap();
        assert!(matches!(
            net.set_weights(0, Matrix::zeros(3, 2)),
            Err(TensorNetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_feed_forward_rejects_bad_input() {
        let mut rng = SimpleRng::new(1);
        let mut net = NeuralNetwork::new(&[2, 2], 0.1, &mut rng).unwrap();
        assert!(net.feed_forward_slice(&[1.0]).is_err());
    }

    #[test]
    fn test_train_batch_zero_is_noop() {
        let mut rng = SimpleRng::new(1);
        let mut net = NeuralNetwork::new(&[2, 2, 1], 0.1, &mut rng).unwrap();
        let before = net.weights(0);
        net.train_batch(&[], &[], 0).unwrap();
        assert_eq!(net.weights(0), before);
    }

    #[test]
    fn test_train_batch_validates_lengths() {
        let mut rng = SimpleRng::new(1);
        let mut net = NeuralNetwork::new(&[2, 2, 1], 0.1, &mut rng).unwrap();
        assert!(net.train_batch(&[0.0, 1.0, 0.5], &[1.0], 2).is_err());
    }
}
