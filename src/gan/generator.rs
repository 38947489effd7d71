/*
 * @Date         : 2026-10-19
 * @Description  : 生成器：把标准正态潜在向量映射为 [-1, 1] 区间内的样本
 */

use rand::Rng;

use super::{LATENT_DIM, SAMPLE_DIM};
use crate::nn::{GradMode, Linear, Module, NnError, Parameter, ReLU, Sequential, Tanh, Tape};
use crate::tensor::Tensor;

/// 生成器
///
/// 输出经过 tanh，因此每个元素都落在 (-1, 1) 内；
/// 但预激活值很大时，f32 下的 tanh 会饱和为恰好 ±1。
#[derive(Debug, Clone)]
pub struct Generator {
    net: Sequential,
}

impl Generator {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let net = Sequential::new()
            .add(Linear::new(LATENT_DIM, 256, "g_fc1", rng))
            .add(ReLU::new("g_relu1"))
            .add(Linear::new(256, 512, "g_fc2", rng))
            .add(ReLU::new("g_relu2"))
            .add(Linear::new(512, 1024, "g_fc3", rng))
            .add(ReLU::new("g_relu3"))
            .add(Linear::new(1024, SAMPLE_DIM, "g_fc4", rng))
            .add(Tanh::new("g_tanh"));
        Self { net }
    }

    /// 从标准正态分布采样`batch_size`个潜在向量，形状为 [batch_size, 100]
    pub fn sample_latent<R: Rng + ?Sized>(batch_size: usize, rng: &mut R) -> Tensor {
        Tensor::normal(0.0, 1.0, &[batch_size, LATENT_DIM], rng)
    }

    /// 可追踪的前向传播：z [B, 100] -> 样本 [B, 784]
    pub fn forward(&self, z: &Tensor) -> Result<(Tensor, Tape), NnError> {
        self.net.forward(z)
    }

    /// 不追踪梯度的前向传播，输出与生成器参数之间不再有梯度通路
    pub fn forward_detached(&self, z: &Tensor) -> Result<Tensor, NnError> {
        self.net.forward_detached(z)
    }

    pub fn backward(
        &mut self,
        tape: &Tape,
        grad_output: &Tensor,
        mode: GradMode,
    ) -> Result<Tensor, NnError> {
        self.net.backward(tape, grad_output, mode)
    }

    /// 直接生成`batch_size`个样本（推理用）
    pub fn generate<R: Rng + ?Sized>(
        &self,
        batch_size: usize,
        rng: &mut R,
    ) -> Result<Tensor, NnError> {
        self.forward_detached(&Self::sample_latent(batch_size, rng))
    }
}

impl Module for Generator {
    fn parameters(&self) -> Vec<&Parameter> {
        self.net.parameters()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.net.parameters_mut()
    }
}
