use approx::assert_abs_diff_eq;

use crate::nn::{GradMode, Layer, LeakyReLU, NnError, ReLU, Tanh};
use crate::tensor::Tensor;

#[test]
fn test_leaky_relu_forward_backward() {
    let mut layer = LeakyReLU::new("act", 0.2).unwrap();
    let x = Tensor::new(&[-2.0, -0.5, 0.0, 1.5], &[1, 4]).unwrap();
    let y = layer.forward(&x).unwrap();
    assert_abs_diff_eq!(
        y,
        Tensor::new(&[-0.4, -0.1, 0.0, 1.5], &[1, 4]).unwrap(),
        epsilon = 1e-6
    );

    let g = Tensor::ones(&[1, 4]);
    let grad = layer.backward(&x, &g, GradMode::Accumulate).unwrap();
    // x <= 0 时导数为 slope
    assert_abs_diff_eq!(
        grad,
        Tensor::new(&[0.2, 0.2, 0.2, 1.0], &[1, 4]).unwrap(),
        epsilon = 1e-6
    );
}

#[test]
fn test_leaky_relu_rejects_negative_slope() {
    assert!(matches!(
        LeakyReLU::new("act", -0.1),
        Err(NnError::InvalidHyperParameter(_))
    ));
    assert!(LeakyReLU::new("act", f32::NAN).is_err());
}

#[test]
fn test_relu_forward_backward() {
    let mut layer = ReLU::new("act");
    let x = Tensor::new(&[-1.0, 0.0, 2.0], &[1, 3]).unwrap();
    assert_eq!(layer.forward(&x).unwrap().to_vec(), vec![0.0, 0.0, 2.0]);
    let grad = layer
        .backward(&x, &Tensor::full(3.0, &[1, 3]), GradMode::Accumulate)
        .unwrap();
    assert_eq!(grad.to_vec(), vec![0.0, 0.0, 3.0]);
}

#[test]
fn test_tanh_forward_backward() {
    let mut layer = Tanh::new("act");
    let x = Tensor::new(&[-3.0, 0.0, 0.5], &[1, 3]).unwrap();
    let y = layer.forward(&x).unwrap();
    assert!(y.iter().all(|&v| v > -1.0 && v < 1.0));
    assert_abs_diff_eq!(y.to_vec()[1], 0.0);

    let grad = layer
        .backward(&x, &Tensor::ones(&[1, 3]), GradMode::Accumulate)
        .unwrap();
    for (g, v) in grad.iter().zip(y.iter()) {
        assert_abs_diff_eq!(*g, 1.0 - v * v, epsilon = 1e-6);
    }
}

#[test]
fn test_activation_shape_mismatch_in_backward() {
    let mut layer = Tanh::new("act");
    let x = Tensor::zeros(&[2, 3]);
    assert!(
        layer
            .backward(&x, &Tensor::zeros(&[3, 2]), GradMode::Accumulate)
            .is_err()
    );
}
