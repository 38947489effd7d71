/*
 * @Date         : 2026-10-19
 * @Description  : 负责神经网络（neural network）的构建：层、模块、优化器
 */

mod error;
pub mod layer;
mod module;
pub mod optimizer;
mod parameter;
mod sequential;

pub use error::NnError;
pub use layer::{GradMode, Layer, LayerKind, LeakyReLU, Linear, ReLU, Tanh};
pub use module::{Module, StateDict};
pub use optimizer::{Optimizer, RMSprop, RMSpropState};
pub use parameter::Parameter;
pub use sequential::{Sequential, Tape};

#[cfg(test)]
mod tests;
