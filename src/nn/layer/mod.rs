/*
 * @Date         : 2026-10-19
 * @Description  : Layer 模块 - 全连接层与激活函数层，各自实现前向与反向传播
 */

mod activation;
mod linear;

pub use activation::{LeakyReLU, ReLU, Tanh};
pub use linear::Linear;

use enum_dispatch::enum_dispatch;

use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// 反向传播模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradMode {
    /// 累加参数梯度，同时返回对输入的梯度
    Accumulate,
    /// 只计算对输入的梯度，不触碰任何参数的梯度
    /// （如训练生成器时，梯度只"借道"判别器回传）
    InputOnly,
}

/// 网络层 trait
///
/// 层本身不缓存任何前向结果，反向传播所需的本层输入由调用者
/// （见[`crate::nn::Sequential`]的 tape）保存并传回。
#[enum_dispatch]
pub trait Layer {
    /// 层名称（用于错误提示与参数命名）
    fn name(&self) -> &str;

    fn forward(&self, x: &Tensor) -> Result<Tensor, NnError>;

    /// 给定前向时的输入`input`与上游梯度`grad_output`，返回对`input`的梯度
    fn backward(
        &mut self,
        input: &Tensor,
        grad_output: &Tensor,
        mode: GradMode,
    ) -> Result<Tensor, NnError>;

    fn parameters(&self) -> Vec<&Parameter> {
        Vec::new()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        Vec::new()
    }
}

/// 所有层类型的静态分发枚举
#[enum_dispatch(Layer)]
#[derive(Debug, Clone)]
pub enum LayerKind {
    Linear,
    ReLU,
    LeakyReLU,
    Tanh,
}
