use super::{GradMode, Layer};
use crate::errors::Operator;
use crate::nn::NnError;
use crate::tensor::Tensor;

/// ReLU 激活函数层
///
/// forward: f(x) = max(0, x)
/// backward: d(f)/dx = 1 if x > 0, else 0
#[derive(Debug, Clone)]
pub struct ReLU {
    name: String,
}

impl ReLU {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Layer for ReLU {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor, NnError> {
        Ok(x.map(|v| v.max(0.0)))
    }

    fn backward(
        &mut self,
        input: &Tensor,
        grad_output: &Tensor,
        _mode: GradMode,
    ) -> Result<Tensor, NnError> {
        Ok(input.zip_map(grad_output, Operator::Mul, |x, g| {
            if x > 0.0 { g } else { 0.0 }
        })?)
    }
}

/// Leaky ReLU 激活函数层
///
/// forward: f(x) = x if x > 0, else negative_slope * x
/// backward: d(f)/dx = 1 if x > 0, else negative_slope
#[derive(Debug, Clone)]
pub struct LeakyReLU {
    name: String,
    /// 负半轴斜率
    negative_slope: f32,
}

impl LeakyReLU {
    pub fn new(name: &str, negative_slope: f32) -> Result<Self, NnError> {
        // negative_slope 应该是非负小数
        if !(negative_slope >= 0.0) {
            return Err(NnError::InvalidHyperParameter(format!(
                "LeakyReLU的negative_slope应为非负数，但得到: {negative_slope}"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            negative_slope,
        })
    }

    pub const fn negative_slope(&self) -> f32 {
        self.negative_slope
    }
}

impl Layer for LeakyReLU {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor, NnError> {
        let slope = self.negative_slope;
        Ok(x.map(|v| if v > 0.0 { v } else { slope * v }))
    }

    fn backward(
        &mut self,
        input: &Tensor,
        grad_output: &Tensor,
        _mode: GradMode,
    ) -> Result<Tensor, NnError> {
        let slope = self.negative_slope;
        Ok(input.zip_map(grad_output, Operator::Mul, |x, g| {
            if x > 0.0 { g } else { slope * g }
        })?)
    }
}

/// Tanh 激活函数层，输出位于(-1, 1)；f32 下输入绝对值很大时会饱和为恰好 ±1
///
/// backward: d(tanh(x))/dx = 1 - tanh²(x)
#[derive(Debug, Clone)]
pub struct Tanh {
    name: String,
}

impl Tanh {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl Layer for Tanh {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor, NnError> {
        Ok(x.map(f32::tanh))
    }

    fn backward(
        &mut self,
        input: &Tensor,
        grad_output: &Tensor,
        _mode: GradMode,
    ) -> Result<Tensor, NnError> {
        Ok(input.zip_map(grad_output, Operator::Mul, |x, g| {
            let t = x.tanh();
            (1.0 - t * t) * g
        })?)
    }
}
