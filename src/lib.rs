//! Tensornet
//!
//! A dense 2-D matrix algebra engine, an n-dimensional tensor container with
//! axis-0 resize/slice operations, and a fully connected feedforward neural
//! network trained by backpropagation with sigmoid activations.
//!
//! # Modules
//!
//! - `matrix`: dense rows x cols matrix with elementwise, product, transpose,
//!   map, and randomized-initialization operations
//! - `tensor`: flat-buffer tensor with strided multi-index addressing and
//!   axis-0 push/insert/pop/slice
//! - `network`: feedforward network with single-example and mini-batch
//!   gradient descent
//! - `nested`: typed ingestion boundary for externally supplied nested arrays
//! - `state`: JSON persistence of full network state
//! - `error`: shared error taxonomy
//! - `utils`: seeded RNG and activation functions

pub mod error;
pub mod matrix;
pub mod nested;
pub mod network;
pub mod state;
pub mod tensor;
pub mod utils;

pub use error::TensorNetError;
pub use matrix::Matrix;
pub use nested::NestedArray;
pub use network::NeuralNetwork;
pub use state::{load_state, save_state, NetworkState};
pub use tensor::Tensor;
pub use utils::SimpleRng;
