//! 数据加载模块
//!
//! 训练器只依赖 [`DataSource`] trait：一个可重复遍历的批数据序列。
//!
//! # 主要组件
//!
//! - [`DataSource`]: 可重启的批数据序列（每轮训练调用一次 `batches()`）
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`TensorDataset`]: 持有特征和标签的数据集
//! - [`load_samples_npy`]: 从 `.npy` 文件读取真实样本矩阵
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use wgan_trainer::data::{DataLoader, TensorDataset, load_samples_npy};
//!
//! let samples = load_samples_npy("real_samples.npy", 784)?;
//! let loader = DataLoader::new(TensorDataset::unlabeled(samples)?, 64)?
//!     .shuffle(true);
//! let trainer = wgan_trainer::app::run(&config, &loader)?;
//! ```

mod dataloader;
pub mod error;
mod npy;

#[cfg(test)]
mod tests;

use crate::tensor::Tensor;

pub use dataloader::{DataLoader, DataLoaderIterator, TensorDataset};
pub use error::DataError;
pub use npy::load_samples_npy;

/// 一个批次：(真实样本 [batch_size, features], 标签)。WGAN 只使用第一个元素
pub type Batch = (Tensor, Tensor);

/// 可重启的批数据序列
///
/// 每次调用 `batches()` 必须返回一轮全新的遍历，而不是上一轮耗尽后的延续。
/// 各批次的 batch_size 可以不同（如最后一个不完整批次）。
pub trait DataSource {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_>;

    /// 每轮的批次数（若可预知），仅用于日志
    fn len_hint(&self) -> Option<usize> {
        None
    }
}

/// 预先分好的批次列表，常用于测试或外部已完成分批的场景
impl DataSource for Vec<Batch> {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
        Box::new(self.iter().cloned())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}
