/*
 * @Date         : 2026-10-19
 * @Description  : 优化器基础trait
 */

use crate::nn::{Module, NnError};

/// 优化器核心 trait
pub trait Optimizer {
    /// 参数更新（使用已计算的梯度）
    ///
    /// `PyTorch` 风格训练循环：
    /// ```ignore
    /// model.zero_grad();
    /// let (out, tape) = model.forward(&x)?;
    /// model.backward(&tape, &grad, GradMode::Accumulate)?;
    /// optimizer.step(&mut model)?; // ← 只更新参数，不做 forward/backward
    /// ```
    ///
    /// 没有梯度的参数（本轮未参与反向传播）会被跳过。
    fn step(&mut self, module: &mut dyn Module) -> Result<(), NnError>;

    /// 获取学习率
    fn learning_rate(&self) -> f32;
}
