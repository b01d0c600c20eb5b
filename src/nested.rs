//! Typed ingestion boundary for externally supplied nested arrays.
//!
//! External callers hand matrices and tensors over as arbitrarily nested
//! arrays of numbers (a JSON document in practice). `NestedArray` is the typed
//! decoding of that document: serde rejects non-numeric leaves and non-array
//! containers at decode time, and `infer_shape` enforces the structural rules
//! (equal sibling lengths, uniform nesting depth) with explicit errors.

use crate::error::TensorNetError;
use serde::{Deserialize, Serialize};

/// An arbitrarily nested array of f64 values.
///
/// Deserializes from any JSON nesting of numbers, e.g. `3.0`, `[1, 2]`,
/// or `[[1, 2], [3, 4]]`.
///
/// # Examples
///
/// ```
/// use tensornet::NestedArray;
///
/// let v: NestedArray = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
/// assert_eq!(v.infer_shape().unwrap(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NestedArray {
    /// A numeric leaf.
    Number(f64),
    /// A nested level of the document.
    Array(Vec<NestedArray>),
}

impl NestedArray {
    /// Infer the shape of the nested structure.
    ///
    /// The length of each level must agree across siblings and every leaf
    /// must sit at the same depth. A bare number has shape `[]`.
    ///
    /// # Errors
    ///
    /// `RaggedInput` when sibling lengths differ, `InvalidArgument` when
    /// numbers and arrays are mixed at one depth.
    pub fn infer_shape(&self) -> Result<Vec<usize>, TensorNetError> {
        let mut shape = Vec::new();
        let mut rank = None;
        self.walk_shape(0, &mut shape, &mut rank)?;
        Ok(shape)
    }

    fn walk_shape(
        &self,
        depth: usize,
        shape: &mut Vec<usize>,
        rank: &mut Option<usize>,
    ) -> Result<(), TensorNetError> {
        match self {
            NestedArray::Number(_) => {
                // The first leaf fixes the rank; later leaves must match it.
                match *rank {
                    None => {
                        if depth != shape.len() {
                            return Err(TensorNetError::InvalidArgument(
                                "number found where an array was expected".into(),
                            ));
                        }
                        *rank = Some(depth);
                    }
                    Some(r) if r != depth => {
                        return Err(TensorNetError::InvalidArgument(
                            "mixed nesting depths in input".into(),
                        ));
                    }
                    Some(_) => {}
                }
                Ok(())
            }
            NestedArray::Array(items) => {
                if rank.map_or(false, |r| depth >= r) {
                    return Err(TensorNetError::InvalidArgument(
                        "array found where a number was expected".into(),
                    ));
                }
                if shape.len() <= depth {
                    shape.push(items.len());
                } else if shape[depth] != items.len() {
                    return Err(TensorNetError::RaggedInput {
                        depth,
                        expected: shape[depth],
                        actual: items.len(),
                    });
                }
                for item in items {
                    item.walk_shape(depth + 1, shape, rank)?;
                }
                Ok(())
            }
        }
    }

    /// Validate this value against an expected sub-shape without mutating
    /// anything. Used by tensor push/insert so the receiver stays untouched
    /// when validation fails.
    pub fn check_shape(&self, expected: &[usize]) -> Result<(), TensorNetError> {
        let actual = self.infer_shape()?;
        if actual != expected {
            return Err(TensorNetError::ItemShapeMismatch {
                expected: expected.to_vec(),
                actual,
            });
        }
        Ok(())
    }

    /// Append every leaf value in row-major order.
    pub fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            NestedArray::Number(x) => out.push(*x),
            NestedArray::Array(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Collect every leaf value in row-major order.
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }
}

impl From<f64> for NestedArray {
    fn from(x: f64) -> Self {
        NestedArray::Number(x)
    }
}

impl From<Vec<f64>> for NestedArray {
    fn from(v: Vec<f64>) -> Self {
        NestedArray::Array(v.into_iter().map(NestedArray::Number).collect())
    }
}

impl From<Vec<Vec<f64>>> for NestedArray {
    fn from(v: Vec<Vec<f64>>) -> Self {
        NestedArray::Array(v.into_iter().map(NestedArray::from).collect())
    }
}
