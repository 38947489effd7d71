use crate::errors::Operator;
use crate::nn::NnError;
use crate::tensor::Tensor;

/// 可训练参数：带名字的张量值 + 可选的梯度累加器
///
/// 名字是 state dict 的键，同一个模块内必须唯一。
/// 梯度在`zero_grad()`后为`None`，第一次反向传播时才分配。
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    value: Tensor,
    grad: Option<Tensor>, // Batch 模式的梯度
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Tensor) -> Self {
        Self {
            name: name.into(),
            value,
            grad: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut Tensor {
        &mut self.value
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// 替换参数值，形状必须与原值一致
    pub fn set_value(&mut self, value: &Tensor) -> Result<(), NnError> {
        if !self.value.is_same_shape(value) {
            return Err(NnError::ParameterShape {
                name: self.name.clone(),
                expected: self.shape().to_vec(),
                got: value.shape().to_vec(),
            });
        }
        self.value = value.clone();
        Ok(())
    }

    /// 累加梯度（同一参数在一次迭代中可能参与多次前向，如critic同时评估真/假样本）
    pub fn accumulate_grad(&mut self, grad: &Tensor) -> Result<(), NnError> {
        match self.grad.as_mut() {
            Some(acc) => acc.zip_apply_(grad, Operator::Add, |a, g| *a += g)?,
            None => {
                if !self.value.is_same_shape(grad) {
                    return Err(NnError::ParameterShape {
                        name: self.name.clone(),
                        expected: self.shape().to_vec(),
                        got: grad.shape().to_vec(),
                    });
                }
                self.grad = Some(grad.clone());
            }
        }
        Ok(())
    }

    pub fn zero_grad(&mut self) {
        self.grad = None;
    }
}
