/*
 * @Date         : 2026-10-19
 * @Description  : 基于ndarray的稠密f32张量，只提供WGAN训练所需的运算
 */

use ndarray::{Array, ArrayD, IxDyn};
use rand::Rng;
use rand::distributions::{Distribution, Standard, Uniform};
use serde::{Deserialize, Serialize};

use crate::errors::TensorError;

mod ops {
    pub mod arith;
    pub mod mat_mul;
    pub mod others;
}

mod approx_eq;
mod property;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：神经网络中的批数据一律为2阶张量，即`[batch_size, features]`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等，否则返回错误。
    pub fn new(data: &[f32], shape: &[usize]) -> Result<Self, TensorError> {
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec()).map_err(|_| {
            TensorError::DataShapeMismatch {
                len: data.len(),
                shape: shape.to_vec(),
            }
        })?;
        Ok(Self { data })
    }

    /// 创建一个元素全为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(shape), value),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::full(0.0, shape)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::full(1.0, shape)
    }

    /// 创建一个服从正态分布的随机张量（Box-Muller变换）。
    /// 随机数发生器由调用者持有，从而保证给定种子时结果可复现。
    pub fn normal<R: Rng + ?Sized>(mean: f32, std_dev: f32, shape: &[usize], rng: &mut R) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = Standard.sample(rng);
            let u2: f32 = Standard.sample(rng);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            // u1为0时ln发散，直接丢弃这一对
            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::from_vec_unchecked(data, shape)
    }

    /// 创建一个服从`[low, high)`均匀分布的随机张量
    pub fn uniform<R: Rng + ?Sized>(low: f32, high: f32, shape: &[usize], rng: &mut R) -> Self {
        let dist = Uniform::new(low, high);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::from_vec_unchecked(data, shape)
    }

    /// 直接包装一个ndarray数组
    pub fn from_array(data: ArrayD<f32>) -> Self {
        Self { data }
    }

    /// 借出底层ndarray数组
    pub fn as_array(&self) -> &ArrayD<f32> {
        &self.data
    }
}

// 私有方法
impl Tensor {
    /// 调用方已保证`data.len()`与`shape`一致
    fn from_vec_unchecked(data: Vec<f32>, shape: &[usize]) -> Self {
        let len = data.len();
        match Array::from_shape_vec(IxDyn(shape), data) {
            Ok(data) => Self { data },
            Err(_) => unreachable!("长度{len}与形状{shape:?}不一致"),
        }
    }
}
