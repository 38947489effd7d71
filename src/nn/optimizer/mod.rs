/*
 * @Date         : 2026-10-19
 * @Description  : 优化器模块，实现 PyTorch 风格的梯度优化算法
 */

mod base;
mod rmsprop;

pub use base::Optimizer;
pub use rmsprop::{RMSprop, RMSpropState};
