use ndarray::{Axis, Zip};

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 对张量中的所有元素求和
    pub fn sum(&self) -> f32 {
        self.data.sum()
    }

    /// 所有元素的算术平均值。空张量没有均值，返回错误
    pub fn mean(&self) -> Result<f32, TensorError> {
        if self.size() == 0 {
            return Err(TensorError::Empty {
                operator: Operator::Mean,
            });
        }
        Ok(self.sum() / self.size() as f32)
    }

    /// 2阶张量按列求和（即沿batch维累加），结果形状为`[1, cols]`
    pub fn sum_rows(&self) -> Result<Tensor, TensorError> {
        let view = self.view_2d(Operator::Add)?;
        Ok(Tensor::from_array(
            view.sum_axis(Axis(0)).insert_axis(Axis(0)).into_dyn(),
        ))
    }

    /// 将形状为`[1, cols]`的行向量广播加到`[rows, cols]`的每一行上（偏置相加）
    pub fn add_row_broadcast(&self, row: &Tensor) -> Result<Tensor, TensorError> {
        let view = self.view_2d(Operator::BroadcastAdd)?;
        let row_view = row.view_2d(Operator::BroadcastAdd)?;
        if row_view.nrows() != 1 || row_view.ncols() != view.ncols() {
            return Err(TensorError::OperatorError {
                operator: Operator::BroadcastAdd,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: row.shape().to_vec(),
            });
        }
        Ok(Tensor::from_array((&view + &row_view).into_dyn()))
    }

    /// 逐元素映射
    pub fn map<F: Fn(f32) -> f32>(&self, f: F) -> Tensor {
        Tensor::from_array(self.data.mapv(f))
    }

    /// 两个同形张量逐元素组合
    pub fn zip_map<F: Fn(f32, f32) -> f32>(
        &self,
        other: &Tensor,
        operator: Operator,
        f: F,
    ) -> Result<Tensor, TensorError> {
        if !self.is_same_shape(other) {
            return Err(TensorError::OperatorError {
                operator,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        let data = Zip::from(&self.data)
            .and(&other.data)
            .map_collect(|&a, &b| f(a, b));
        Ok(Tensor::from_array(data))
    }

    /// 原地把每个元素限制在`[low, high]`内
    pub fn clamp_(&mut self, low: f32, high: f32) {
        self.data.mapv_inplace(|x| x.clamp(low, high));
    }

    /// 原地逐元素更新：`self = f(self, other)`，要求两者同形
    pub fn zip_apply_<F: Fn(&mut f32, f32)>(
        &mut self,
        other: &Tensor,
        operator: Operator,
        f: F,
    ) -> Result<(), TensorError> {
        if !self.is_same_shape(other) {
            return Err(TensorError::OperatorError {
                operator,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| f(a, b));
        Ok(())
    }

    /// 最小、最大元素。空张量返回None
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.data.iter().fold(None, |acc, &x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
    }
}
