mod npy;

use crate::tensor::Tensor;

/// 第 i 行的所有元素都等于 i，便于检查批次包含哪些样本
pub(super) fn indexed_samples(n: usize, width: usize) -> Tensor {
    let data: Vec<f32> = (0..n)
        .flat_map(|i| std::iter::repeat_n(i as f32, width))
        .collect();
    Tensor::new(&data, &[n, width]).unwrap()
}

/// 批次中每行的首元素（即样本序号）
pub(super) fn row_ids(batch: &Tensor) -> Vec<usize> {
    let width = batch.shape()[1];
    batch
        .to_vec()
        .chunks(width)
        .map(|row| row[0] as usize)
        .collect()
}
