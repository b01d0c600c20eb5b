//! N-dimensional tensor container with strided flat-index addressing.
//!
//! A tensor owns a flat f64 buffer plus a shape vector; the flat index for a
//! multi-index is computed row-major. Axis-0 mutators (push/insert/pop/slice)
//! keep `shape[0]` and the buffer consistent: every operation validates its
//! argument completely before mutating, so a failed call leaves the tensor
//! untouched.

use crate::error::TensorNetError;
use crate::nested::NestedArray;
use std::fmt;

/// Total element count implied by a shape. An empty shape means no data.
fn size_from_shape(shape: &[usize]) -> usize {
    if shape.is_empty() {
        return 0;
    }
    shape.iter().product()
}

/// Flat elements spanned by one axis-0 step, i.e. the product of the
/// sub-shape's dimensions (1 when the sub-shape is empty).
fn stride(sub_shape: &[usize]) -> usize {
    sub_shape.iter().product()
}

/// N-dimensional tensor of f64 values.
///
/// Invariant: `data.len() == product(shape)` at all times (empty shape means
/// empty data).
///
/// # Examples
///
/// ```
/// use tensornet::{NestedArray, Tensor};
///
/// let value = NestedArray::from(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
/// let t = Tensor::from_value(&value).unwrap();
/// assert_eq!(t.shape(), &[3, 2]);
/// assert_eq!(t.get(&[1, 0]).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tensor {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl Tensor {
    /// Create a zero-filled tensor with the given shape.
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![0.0; size_from_shape(shape)],
        }
    }

    /// Build a tensor from an externally supplied nested-array document,
    /// inferring the shape recursively.
    ///
    /// # Errors
    ///
    /// `RaggedInput` for uneven substructure, `InvalidArgument` when the
    /// top-level value is a bare number.
    pub fn from_value(value: &NestedArray) -> Result<Self, TensorNetError> {
        if matches!(value, NestedArray::Number(_)) {
            return Err(TensorNetError::InvalidArgument(
                "tensor input must be an array".into(),
            ));
        }
        let shape = value.infer_shape()?;
        Ok(Self {
            data: value.flatten(),
            shape,
        })
    }

    /// The shape vector.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The flat row-major buffer.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tensor holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Flat elements spanned by one axis-0 slice.
    pub fn row_stride(&self) -> usize {
        if self.shape.len() > 1 {
            stride(&self.shape[1..])
        } else {
            1
        }
    }

    /// Resolve a multi-index to a flat offset, row-major.
    ///
    /// Indices beyond the rank are ignored; fewer indices than dimensions is
    /// an error.
    fn flat_index(&self, indices: &[usize]) -> Result<usize, TensorNetError> {
        if indices.len() < self.shape.len() {
            return Err(TensorNetError::MissingIndices {
                expected: self.shape.len(),
                actual: indices.len(),
            });
        }
        let mut flat = 0;
        let mut multiplier = 1;
        for i in (0..self.shape.len()).rev() {
            flat += indices[i] * multiplier;
            multiplier *= self.shape[i];
        }
        if flat >= self.data.len() {
            return Err(TensorNetError::IndexOutOfRange {
                index: flat,
                len: self.data.len(),
            });
        }
        Ok(flat)
    }

    /// Read the element at a multi-index.
    ///
    /// # Errors
    ///
    /// `MissingIndices` when fewer indices than dimensions are supplied,
    /// `IndexOutOfRange` when the flat offset falls outside the buffer.
    pub fn get(&self, indices: &[usize]) -> Result<f64, TensorNetError> {
        Ok(self.data[self.flat_index(indices)?])
    }

    /// Write the element at a multi-index.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Tensor::get`].
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<(), TensorNetError> {
        let idx = self.flat_index(indices)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Append one item along axis 0.
    ///
    /// A shapeless tensor is re-initialized from `[item]`. For rank 1 the
    /// item must be a number; for rank >= 2 its structure must match
    /// `shape[1..]` exactly.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a structurally wrong item kind,
    /// `ItemShapeMismatch` when the item's shape disagrees with the
    /// sub-shape. The tensor is unchanged on error.
    pub fn push(&mut self, item: &NestedArray) -> Result<(), TensorNetError> {
        if self.shape.is_empty() {
            let wrapped = NestedArray::Array(vec![item.clone()]);
            *self = Tensor::from_value(&wrapped)?;
            return Ok(());
        }

        if self.shape.len() == 1 {
            match item {
                NestedArray::Number(x) => {
                    self.data.push(*x);
                    self.shape[0] += 1;
                    Ok(())
                }
                NestedArray::Array(_) => Err(TensorNetError::InvalidArgument(
                    "expected a number when pushing onto a rank-1 tensor".into(),
                )),
            }
        } else {
            item.check_shape(&self.shape[1..])?;
            item.flatten_into(&mut self.data);
            self.shape[0] += 1;
            Ok(())
        }
    }

    /// Splice one item in along axis 0 at the given position.
    ///
    /// `index` may equal `shape[0]` (end insert). A shapeless tensor behaves
    /// like [`Tensor::push`] regardless of `index`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index > shape[0]`; otherwise the same
    /// conditions as [`Tensor::push`]. The tensor is unchanged on error.
    pub fn insert(&mut self, index: usize, item: &NestedArray) -> Result<(), TensorNetError> {
        if self.shape.is_empty() {
            return self.push(item);
        }
        if index > self.shape[0] {
            return Err(TensorNetError::IndexOutOfRange {
                index,
                len: self.shape[0],
            });
        }

        if self.shape.len() == 1 {
            match item {
                NestedArray::Number(x) => {
                    self.data.insert(index, *x);
                    self.shape[0] += 1;
                    Ok(())
                }
                NestedArray::Array(_) => Err(TensorNetError::InvalidArgument(
                    "expected a number when inserting into a rank-1 tensor".into(),
                )),
            }
        } else {
            item.check_shape(&self.shape[1..])?;
            let offset = index * self.row_stride();
            let flat = item.flatten();
            self.data.splice(offset..offset, flat);
            self.shape[0] += 1;
            Ok(())
        }
    }

    /// Remove the last axis-0 slice. No-op when the tensor is shapeless or
    /// axis 0 is already empty.
    pub fn pop(&mut self) {
        if self.shape.is_empty() || self.shape[0] == 0 {
            return;
        }
        let stride = self.row_stride();
        self.data.truncate(self.data.len() - stride);
        self.shape[0] -= 1;
    }

    /// A new tensor holding the axis-0 sub-range `[start, end)`.
    ///
    /// Negative indices count from the end; both bounds are clamped into
    /// `[0, shape[0]]` and an inverted range yields an empty result. `None`
    /// for `end` means `shape[0]`. The source tensor is not mutated.
    pub fn slice(&self, start: isize, end: Option<isize>) -> Tensor {
        if self.shape.is_empty() {
            return self.clone();
        }

        let dim0 = self.shape[0] as isize;
        let mut start = if start < 0 { start + dim0 } else { start };
        let mut end = end.unwrap_or(dim0);
        if end < 0 {
            end += dim0;
        }
        start = start.clamp(0, dim0);
        end = end.clamp(0, dim0);
        if start > end {
            start = end;
        }

        let stride = self.row_stride();
        let mut shape = self.shape.clone();
        shape[0] = (end - start) as usize;

        let lo = start as usize * stride;
        let hi = end as usize * stride;
        Tensor {
            shape,
            data: self.data[lo..hi].to_vec(),
        }
    }
}

/// Diagnostic shape-and-size line. Debug aid only.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self
            .shape
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Tensor shape: [{dims}], size: {}", self.data.len())
    }
}
