//! # WGAN Trainer
//!
//! 用纯 rust 实现的 [WGAN](https://arxiv.org/abs/1701.07875) 训练器：
//! 生成器把随机噪声映射为合成样本，判别器（critic）以 Wasserstein 距离为目标打分，
//! 两者交替更新，并支持基于检查点的断点续训。
//!
//! - [`tensor`]: 基于`ndarray`的稠密张量
//! - [`nn`]: 网络层、`Sequential`容器、`Module` trait 与 RMSprop 优化器
//! - [`data`]: 可重复遍历的批数据源
//! - [`gan`]: 生成器、判别器与训练器
//! - [`checkpoint`]: 训练状态的保存与恢复
//! - [`app`]: 完整训练流程的入口
//!

pub mod app;
pub mod checkpoint;
pub mod data;
pub mod errors;
pub mod gan;
pub mod nn;
pub mod tensor;
