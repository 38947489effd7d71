/*
 * @Date         : 2026-10-19
 * @Description  : WGAN 模块：生成器、判别器（critic）与交替训练的训练器
 *
 * 网络结构：
 * - Generator:     z(100) -> FC(256, ReLU) -> FC(512, ReLU) -> FC(1024, ReLU) -> FC(784, Tanh)
 * - Discriminator: x(784) -> FC(1024, LeakyReLU) -> FC(512, LeakyReLU) -> FC(256, LeakyReLU) -> FC(1)
 */

mod config;
mod discriminator;
mod generator;
mod loss_history;
mod trainer;

#[cfg(test)]
mod tests;

pub use config::{LipschitzConfig, TrainingConfig};
pub use discriminator::Discriminator;
pub use generator::Generator;
pub use loss_history::LossHistory;
pub use trainer::{Trainer, TrainingPhase};

/// 潜在向量维度
pub const LATENT_DIM: usize = 100;
/// 样本维度（28×28 展平）
pub const SAMPLE_DIM: usize = 784;
