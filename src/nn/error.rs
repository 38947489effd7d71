/*
 * @Date         : 2026-10-19
 * @Description  : nn 模块的错误类型
 */

use thiserror::Error;

use crate::errors::TensorError;

/// 网络层/模块操作错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NnError {
    #[error("张量运算失败: {0}")]
    Tensor(#[from] TensorError),

    #[error("{layer}的输入形状应为[batch, {expected}]，但得到{got:?}")]
    InputShape {
        layer: String,
        expected: usize,
        got: Vec<usize>,
    },

    #[error("反向传播记录（tape）与网络不匹配：网络有{expected}层，tape记录了{got}层")]
    TapeMismatch { expected: usize, got: usize },

    #[error("state dict 中缺少参数: {0}")]
    MissingParameter(String),

    #[error("state dict 中存在模型没有的参数: {0}")]
    UnexpectedParameter(String),

    #[error("参数{name}形状不匹配：期望{expected:?}，实际{got:?}")]
    ParameterShape {
        name: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("非法的超参数: {0}")]
    InvalidHyperParameter(String),
}
