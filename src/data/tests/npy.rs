use ndarray::Array2;
use ndarray_npy::write_npy;

use crate::data::{DataError, load_samples_npy};

#[test]
fn test_load_samples_npy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("real.npy");
    let samples = Array2::<f32>::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f32 / 12.0);
    write_npy(&path, &samples).unwrap();

    let tensor = load_samples_npy(&path, 4).unwrap();
    assert_eq!(tensor.shape(), &[3, 4]);
    assert_eq!(tensor.to_vec(), samples.iter().copied().collect::<Vec<_>>());
}

#[test]
fn test_load_samples_npy_wrong_width() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("real.npy");
    write_npy(&path, &Array2::<f32>::zeros((2, 5))).unwrap();

    let err = load_samples_npy(&path, 784).unwrap_err();
    assert!(matches!(err, DataError::ShapeMismatch { .. }));
}

#[test]
fn test_load_samples_npy_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_samples_npy(dir.path().join("absent.npy"), 784).unwrap_err();
    assert!(matches!(err, DataError::FileNotFound(_)));
}
