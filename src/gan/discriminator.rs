/*
 * @Date         : 2026-10-19
 * @Description  : 判别器（critic）：输出无界的实数评分，而非概率
 */

use rand::Rng;

use super::SAMPLE_DIM;
use crate::nn::{GradMode, LeakyReLU, Linear, Module, NnError, Parameter, Sequential, Tape};
use crate::tensor::Tensor;

const LEAKY_SLOPE: f32 = 0.2;

/// 判别器（critic）
///
/// 最后一层没有任何有界激活函数：WGAN 的 critic 估计的是 Wasserstein 距离，
/// 评分可以是任意实数。
#[derive(Debug, Clone)]
pub struct Discriminator {
    net: Sequential,
}

impl Discriminator {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, NnError> {
        let net = Sequential::new()
            .add(Linear::new(SAMPLE_DIM, 1024, "d_fc1", rng))
            .add(LeakyReLU::new("d_lrelu1", LEAKY_SLOPE)?)
            .add(Linear::new(1024, 512, "d_fc2", rng))
            .add(LeakyReLU::new("d_lrelu2", LEAKY_SLOPE)?)
            .add(Linear::new(512, 256, "d_fc3", rng))
            .add(LeakyReLU::new("d_lrelu3", LEAKY_SLOPE)?)
            .add(Linear::new(256, 1, "d_fc4", rng));
        Ok(Self { net })
    }

    /// 可追踪的前向传播：样本 [B, 784] -> 评分 [B, 1]。
    /// 宽度不是 784 的输入返回`NnError::InputShape`
    pub fn forward(&self, x: &Tensor) -> Result<(Tensor, Tape), NnError> {
        self.net.forward(x)
    }

    pub fn forward_detached(&self, x: &Tensor) -> Result<Tensor, NnError> {
        self.net.forward_detached(x)
    }

    /// 训练生成器时用`GradMode::InputOnly`：梯度穿过 critic 回到样本，
    /// critic 自身的参数梯度保持不变
    pub fn backward(
        &mut self,
        tape: &Tape,
        grad_output: &Tensor,
        mode: GradMode,
    ) -> Result<Tensor, NnError> {
        self.net.backward(tape, grad_output, mode)
    }
}

impl Module for Discriminator {
    fn parameters(&self) -> Vec<&Parameter> {
        self.net.parameters()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.net.parameters_mut()
    }
}
