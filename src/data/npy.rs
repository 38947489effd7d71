use std::path::Path;

use ndarray::Array2;
use ndarray_npy::read_npy;

use super::DataError;
use crate::tensor::Tensor;

/// 从`.npy`文件读取一个 [N, `sample_dim`] 的 f32 样本矩阵
///
/// 预处理（如把像素缩放到 tanh 的值域 [-1, 1]）应在生成该文件时完成。
pub fn load_samples_npy<P: AsRef<Path>>(path: P, sample_dim: usize) -> Result<Tensor, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::FileNotFound(path.to_path_buf()));
    }
    let samples: Array2<f32> = read_npy(path)?;
    if samples.ncols() != sample_dim {
        return Err(DataError::ShapeMismatch {
            expected: vec![samples.nrows(), sample_dim],
            got: samples.shape().to_vec(),
        });
    }
    Ok(Tensor::from_array(samples.into_dyn()))
}
