//! JSON persistence of full network state.
//!
//! The document format is
//! `{ "layerSizes": [...], "weights": [[[..]]], "biases": [[[..]]], "learningRate": n }`
//! with every matrix spelled out as nested row arrays, so saved networks can
//! be restored exactly (layer sizes, per-layer weight and bias matrices,
//! learning rate).

use crate::error::TensorNetError;
use crate::matrix::Matrix;
use crate::network::NeuralNetwork;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable snapshot of a network's persistent parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkState {
    /// Ordered layer widths, input and output included.
    pub layer_sizes: Vec<usize>,
    /// One nested-row matrix per layer transition.
    pub weights: Vec<Vec<Vec<f64>>>,
    /// One 1-row bias matrix per layer transition.
    pub biases: Vec<Vec<Vec<f64>>>,
    /// Learning rate at save time.
    pub learning_rate: f64,
}

impl NeuralNetwork {
    /// Snapshot the persistent parameters (activations and scratch buffers
    /// are not part of the state).
    pub fn to_state(&self) -> NetworkState {
        let n = self.num_layers() - 1;
        NetworkState {
            layer_sizes: self.layer_sizes().to_vec(),
            weights: (0..n).map(|i| self.weights(i).to_rows()).collect(),
            biases: (0..n).map(|i| self.biases(i).to_rows()).collect(),
            learning_rate: self.learning_rate(),
        }
    }

    /// Rebuild a network from a snapshot.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` or `DimensionMismatch` when the document's sizes
    /// don't form a valid chain, `RaggedInput` for uneven matrix rows.
    pub fn from_state(state: &NetworkState) -> Result<Self, TensorNetError> {
        let weights = state
            .weights
            .iter()
            .map(|rows| Matrix::from_rows(rows))
            .collect::<Result<Vec<_>, _>>()?;
        let biases = state
            .biases
            .iter()
            .map(|rows| Matrix::from_rows(rows))
            .collect::<Result<Vec<_>, _>>()?;
        NeuralNetwork::from_parameters(&state.layer_sizes, weights, biases, state.learning_rate)
    }
}

/// Write a network's state to a JSON file.
pub fn save_state<P: AsRef<Path>>(net: &NeuralNetwork, path: P) -> Result<(), TensorNetError> {
    let json = serde_json::to_string_pretty(&net.to_state())?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a network back from a JSON state file, validating the size chain
/// before constructing.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<NeuralNetwork, TensorNetError> {
    let contents = fs::read_to_string(path)?;
    let state: NetworkState = serde_json::from_str(&contents)?;
    NeuralNetwork::from_state(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SimpleRng;

    #[test]
    fn test_state_roundtrip_in_memory() {
        let mut rng = SimpleRng::new(42);
        let net = NeuralNetwork::new(&[2, 3, 1], 0.5, &mut rng).unwrap();

        let restored = NeuralNetwork::from_state(&net.to_state()).unwrap();
        assert_eq!(restored.layer_sizes(), net.layer_sizes());
        assert_eq!(restored.weights(0), net.weights(0));
        assert_eq!(restored.biases(1), net.biases(1));
        assert_eq!(restored.learning_rate(), net.learning_rate());
    }

    #[test]
    fn test_state_uses_camel_case_keys() {
        let mut rng = SimpleRng::new(42);
        let net = NeuralNetwork::new(&[2, 2], 0.1, &mut rng).unwrap();
        let json = serde_json::to_string(&net.to_state()).unwrap();
        assert!(json.contains("\"layerSizes\""));
        assert!(json.contains("\"learningRate\""));
    }

    #[test]
    fn test_from_state_rejects_broken_chain() {
        let mut rng = SimpleRng::new(42);
        let net = NeuralNetwork::new(&[2, 3, 1], 0.5, &mut rng).unwrap();
        let mut state = net.to_state();
        state.layer_sizes = vec![2, 4, 1];
        assert!(matches!(
            NeuralNetwork::from_state(&state),
            Err(TensorNetError::DimensionMismatch { .. })
        ));
    }
}
