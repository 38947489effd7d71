/*
 * @Date         : 2026-10-19
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 提供统一的数据迭代 API，支持：
 * - 自动分批 (batch_size)，最后一个批次可以不完整
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 *
 * 每次调用 `iter()` 都是一轮全新的遍历，因此可直接作为训练器的数据源。
 * 固定种子时，每一轮的打乱顺序不同，但整个遍历序列可复现。
 */

use std::cell::Cell;

use ndarray::Axis;
use rand::SeedableRng;
use rand::seq::SliceRandom;

use super::{Batch, DataError, DataSource};
use crate::tensor::Tensor;

/// TensorDataset - 持有特征和标签的数据集
///
/// # 示例
/// ```ignore
/// let dataset = TensorDataset::new(features, labels)?;
/// println!("样本数: {}", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    labels: Tensor,
    len: usize,
}

impl TensorDataset {
    /// 创建新的 TensorDataset
    ///
    /// # 参数
    /// - `features`: 特征张量，第一维为样本数
    /// - `labels`: 标签张量，第一维为样本数（必须与 features 一致）
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        let len = features.shape().first().copied().unwrap_or(0);
        let label_len = labels.shape().first().copied().unwrap_or(0);
        if features.dimension() == 0 || len != label_len {
            return Err(DataError::ShapeMismatch {
                expected: vec![len],
                got: vec![label_len],
            });
        }
        Ok(Self {
            features,
            labels,
            len,
        })
    }

    /// 无标签数据集（GAN 只需要真实样本），标签以全零 [N, 1] 占位
    pub fn unlabeled(features: Tensor) -> Result<Self, DataError> {
        let len = features.shape().first().copied().unwrap_or(0);
        Self::new(features, Tensor::zeros(&[len, 1]))
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取特征张量引用
    pub fn features(&self) -> &Tensor {
        &self.features
    }

    /// 获取标签张量引用
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }
}

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// # 示例
/// ```ignore
/// let dataset = TensorDataset::unlabeled(real_samples)?;
/// let loader = DataLoader::new(dataset, 64)?
///     .shuffle(true)
///     .seed(42);
///
/// for (real_batch, _) in loader.iter() {
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    dataset: TensorDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    /// 已开始的遍历轮数，固定种子时与种子混合，使每轮的打乱顺序不同
    passes: Cell<u64>,
}

impl DataLoader {
    /// 创建新的 DataLoader
    pub fn new(dataset: TensorDataset, batch_size: usize) -> Result<Self, DataError> {
        if batch_size == 0 {
            return Err(DataError::ZeroBatchSize);
        }
        Ok(Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
            passes: Cell::new(0),
        })
    }

    /// 设置是否打乱数据
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）。
    /// 第 k 轮遍历使用`seed + k`：各轮顺序不同，但整个序列可复现
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.passes.set(0);
        self
    }

    /// 获取批次数量
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// 创建迭代器（一轮新的遍历）
    pub fn iter(&self) -> DataLoaderIterator<'_> {
        // 生成索引
        let n = self.dataset.len();
        let mut indices: Vec<usize> = (0..n).collect();

        let pass = self.passes.get();
        self.passes.set(pass.wrapping_add(1));

        // 如果需要打乱
        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed.wrapping_add(pass));
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

impl DataSource for DataLoader {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
        Box::new(self.iter())
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.num_batches())
    }
}

/// DataLoader 迭代器
pub struct DataLoaderIterator<'a> {
    loader: &'a DataLoader,
    indices: Vec<usize>,
    current_batch: usize,
}

impl Iterator for DataLoaderIterator<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.loader.dataset.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;

        // 检查是否还有数据
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);

        // 如果 drop_last 且批次不完整，则跳过
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }

        self.current_batch += 1;

        // 提取批次数据
        let batch_indices = &self.indices[start..end];
        Some(extract_batch(&self.loader.dataset, batch_indices))
    }
}

/// 从数据集中按索引提取批次（沿第 0 维选取）
fn extract_batch(dataset: &TensorDataset, indices: &[usize]) -> Batch {
    let features = dataset.features.as_array().select(Axis(0), indices);
    let labels = dataset.labels.as_array().select(Axis(0), indices);
    (Tensor::from_array(features), Tensor::from_array(labels))
}
