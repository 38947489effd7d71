use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    // 维度（阶数）检查
    #[error("{operator}只接受{expected}阶张量，但得到的张量形状为{shape:?}")]
    DimensionMismatch {
        operator: Operator,
        expected: usize,
        shape: Vec<usize>,
    },
    #[error("数据长度{len}与形状{shape:?}不匹配")]
    DataShapeMismatch { len: usize, shape: Vec<usize> },
    #[error("张量为空，无法{operator}")]
    Empty { operator: Operator },
}

/// 训练流程的顶层错误：汇总各子模块的错误类型
#[derive(Error, Debug)]
pub enum WganError {
    #[error(transparent)]
    Nn(#[from] crate::nn::NnError),
    #[error(transparent)]
    Data(#[from] crate::data::DataError),
    #[error(transparent)]
    Checkpoint(#[from] crate::checkpoint::CheckpointError),
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 读写失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("配置无效: {0}")]
    Config(String),
}
