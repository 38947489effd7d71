use ndarray::Ix2;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量，
    /// 且前一个张量的列数（col）必须等于后一个张量的行数（row），否则返回错误。
    pub fn mat_mul(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        let self_data = self.view_2d(Operator::MatMul)?;
        let other_data = other.view_2d(Operator::MatMul)?;
        if self_data.ncols() != other_data.nrows() {
            return Err(TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        Ok(Tensor::from_array(self_data.dot(&other_data).into_dyn()))
    }

    /// 计算`selfᵀ @ other`，不实际生成转置矩阵（反向传播求权重梯度用）
    pub fn t_mat_mul(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        let self_data = self.view_2d(Operator::MatMul)?;
        let other_data = other.view_2d(Operator::MatMul)?;
        if self_data.nrows() != other_data.nrows() {
            return Err(TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        Ok(Tensor::from_array(self_data.t().dot(&other_data).into_dyn()))
    }

    /// 计算`self @ otherᵀ`（反向传播求输入梯度用）
    pub fn mat_mul_t(&self, other: &Tensor) -> Result<Tensor, TensorError> {
        let self_data = self.view_2d(Operator::MatMul)?;
        let other_data = other.view_2d(Operator::MatMul)?;
        if self_data.ncols() != other_data.ncols() {
            return Err(TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            });
        }
        Ok(Tensor::from_array(self_data.dot(&other_data.t()).into_dyn()))
    }

    pub(crate) fn view_2d(
        &self,
        operator: Operator,
    ) -> Result<ndarray::ArrayView2<'_, f32>, TensorError> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| TensorError::DimensionMismatch {
                operator,
                expected: 2,
                shape: self.shape().to_vec(),
            })
    }
}
