
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::Batch;
use crate::gan::{SAMPLE_DIM, Trainer, TrainingConfig};
use crate::nn::Module;
use crate::tensor::Tensor;

pub(super) fn seeded_trainer(seed: u64) -> Trainer {
    Trainer::new(TrainingConfig {
        seed: Some(seed),
        ..TrainingConfig::default()
    })
    .unwrap()
}

/// 取值在 [-1, 1) 内的"真实"样本批次
pub(super) fn real_batch(batch_size: usize, seed: u64) -> Tensor {
    let mut rng = StdRng::seed_from_u64(seed);
    Tensor::uniform(-1.0, 1.0, &[batch_size, SAMPLE_DIM], &mut rng)
}

/// 按给定的批大小依次构造批次（标签不参与 WGAN 训练，以零占位）
pub(super) fn batches_of(sizes: &[usize]) -> Vec<Batch> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, &b)| (real_batch(b, 100 + i as u64), Tensor::zeros(&[b, 1])))
        .collect()
}

/// 模块所有参数梯度的快照
pub(super) fn grads(module: &dyn Module) -> Vec<Option<Tensor>> {
    module
        .parameters()
        .iter()
        .map(|p| p.grad().cloned())
        .collect()
}
