// Tests for tensor behavior driven through the external nested-array
// boundary: construction, strided addressing, axis-0 mutation, slicing.

use tensornet::{NestedArray, Tensor, TensorNetError};

fn tensor_from_json(json: &str) -> Tensor {
    let value: NestedArray = serde_json::from_str(json).unwrap();
    Tensor::from_value(&value).unwrap()
}

#[test]
fn test_construction_roundtrip() {
    let t = tensor_from_json("[[1, 2], [3, 4], [5, 6]]");
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(t.get(&[1, 0]).unwrap(), 3.0);
    assert_eq!(t.get(&[2, 1]).unwrap(), 6.0);
}

#[test]
fn test_rank3_strided_addressing() {
    let t = tensor_from_json("[[[1, 2], [3, 4]], [[5, 6], [7, 8]]]");
    assert_eq!(t.shape(), &[2, 2, 2]);
    // flat = i*4 + j*2 + k
    assert_eq!(t.get(&[1, 0, 1]).unwrap(), 6.0);
    assert_eq!(t.get(&[0, 1, 0]).unwrap(), 3.0);
}

#[test]
fn test_ragged_construction_fails() {
    let value: NestedArray = serde_json::from_str("[[1, 2], [3]]").unwrap();
    assert!(matches!(
        Tensor::from_value(&value),
        Err(TensorNetError::RaggedInput { .. })
    ));
}

#[test]
fn test_scalar_input_rejected() {
    let value: NestedArray = serde_json::from_str("3.5").unwrap();
    assert!(matches!(
        Tensor::from_value(&value),
        Err(TensorNetError::InvalidArgument(_))
    ));
}

#[test]
fn test_push_then_pop_restores_tensor() {
    let mut t = tensor_from_json("[[1, 2], [3, 4], [5, 6]]");
    let original = t.clone();

    let row: NestedArray = serde_json::from_str("[7, 8]").unwrap();
    t.push(&row).unwrap();
    assert_eq!(t.shape(), &[4, 2]);
    assert_eq!(t.len(), 8);

    t.pop();
    assert_eq!(t, original);
}

#[test]
fn test_push_rank3_item() {
    let mut t = tensor_from_json("[[[1, 2], [3, 4]]]");
    let item: NestedArray = serde_json::from_str("[[5, 6], [7, 8]]").unwrap();
    t.push(&item).unwrap();
    assert_eq!(t.shape(), &[2, 2, 2]);
    assert_eq!(t.get(&[1, 1, 1]).unwrap(), 8.0);
}

#[test]
fn test_push_ragged_item_rejected_without_mutation() {
    let mut t = tensor_from_json("[[[1, 2], [3, 4]]]");
    let original = t.clone();
    let item: NestedArray = serde_json::from_str("[[5, 6], [7]]").unwrap();
    assert!(t.push(&item).is_err());
    assert_eq!(t, original);
}

#[test]
fn test_insert_splices_at_stride_offset() {
    let mut t = tensor_from_json("[[1, 2], [5, 6]]");
    let row: NestedArray = serde_json::from_str("[3, 4]").unwrap();
    t.insert(1, &row).unwrap();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_insert_on_shapeless_acts_like_push() {
    let mut t = Tensor::zeros(&[]);
    let row: NestedArray = serde_json::from_str("[1, 2]").unwrap();
    // The index is irrelevant for a shapeless tensor.
    t.insert(17, &row).unwrap();
    assert_eq!(t.shape(), &[1, 2]);
}

#[test]
fn test_slice_sub_range() {
    let t = tensor_from_json("[[0, 1], [2, 3], [4, 5], [6, 7], [8, 9]]");

    let s = t.slice(1, Some(3));
    assert_eq!(s.shape(), &[2, 2]);
    assert_eq!(s.data(), &[2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn test_slice_negative_start_takes_tail() {
    let t = tensor_from_json("[[0, 1], [2, 3], [4, 5], [6, 7], [8, 9]]");

    let tail = t.slice(-2, None);
    assert_eq!(tail.shape(), &[2, 2]);
    assert_eq!(tail.data(), &[6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn test_slice_clamps_and_preserves_source() {
    let t = tensor_from_json("[[0, 1], [2, 3], [4, 5]]");

    assert_eq!(t.slice(-100, Some(100)), t);
    assert_eq!(t.slice(2, Some(1)).shape(), &[0, 2]);
    assert_eq!(t.slice(0, Some(-1)).shape(), &[2, 2]);

    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.len(), 6);
}

#[test]
fn test_pop_to_empty_keeps_dimensionality() {
    let mut t = tensor_from_json("[[1, 2]]");
    t.pop();
    assert_eq!(t.shape(), &[0, 2]);
    assert!(t.is_empty());
    // Further pops are no-ops.
    t.pop();
    assert_eq!(t.shape(), &[0, 2]);
}

#[test]
fn test_display_reports_shape_and_size() {
    let t = tensor_from_json("[[1, 2], [3, 4], [5, 6]]");
    assert_eq!(t.to_string(), "Tensor shape: [3, 2], size: 6");
}
