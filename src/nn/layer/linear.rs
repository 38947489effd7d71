/*
 * @Date         : 2026-10-19
 * @Description  : Linear (全连接) 层
 */

use rand::Rng;

use super::{GradMode, Layer};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// Linear (全连接) 层
///
/// PyTorch 风格的全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// # 使用示例
/// ```ignore
/// let fc = Linear::new(784, 128, "fc1", &mut rng);
/// let h = fc.forward(&x)?;
/// ```
#[derive(Debug, Clone)]
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Parameter,
    /// 偏置参数 [1, out_features]
    bias: Parameter,
    in_features: usize,
    out_features: usize,
    /// 层名称（参数名前缀）
    name: String,
}

impl Linear {
    /// 创建新的 Linear 层
    ///
    /// 权重与偏置均按 U(-1/√in, 1/√in) 初始化（与 PyTorch `nn.Linear` 默认一致），
    /// 参数分别命名为`{name}_W`与`{name}_b`。
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        name: &str,
        rng: &mut R,
    ) -> Self {
        let bound = 1.0 / (in_features as f32).sqrt();
        let weights = Parameter::new(
            format!("{name}_W"),
            Tensor::uniform(-bound, bound, &[in_features, out_features], rng),
        );
        let bias = Parameter::new(
            format!("{name}_b"),
            Tensor::uniform(-bound, bound, &[1, out_features], rng),
        );

        Self {
            weights,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
        }
    }

    pub const fn in_features(&self) -> usize {
        self.in_features
    }

    pub const fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weights(&self) -> &Parameter {
        &self.weights
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }

    fn check_input(&self, x: &Tensor) -> Result<(), NnError> {
        let shape = x.shape();
        if shape.len() != 2 || shape[1] != self.in_features {
            return Err(NnError::InputShape {
                layer: self.name.clone(),
                expected: self.in_features,
                got: shape.to_vec(),
            });
        }
        Ok(())
    }
}

impl Layer for Linear {
    fn name(&self) -> &str {
        &self.name
    }

    fn forward(&self, x: &Tensor) -> Result<Tensor, NnError> {
        self.check_input(x)?;
        // x @ W: [batch, in] @ [in, out] = [batch, out]
        let xw = x.mat_mul(self.weights.value())?;
        Ok(xw.add_row_broadcast(self.bias.value())?)
    }

    fn backward(
        &mut self,
        input: &Tensor,
        grad_output: &Tensor,
        mode: GradMode,
    ) -> Result<Tensor, NnError> {
        self.check_input(input)?;
        if mode == GradMode::Accumulate {
            // dL/dW = xᵀ @ g，dL/db = Σ_batch g
            self.weights
                .accumulate_grad(&input.t_mat_mul(grad_output)?)?;
            self.bias.accumulate_grad(&grad_output.sum_rows()?)?;
        }
        // dL/dx = g @ Wᵀ
        Ok(grad_output.mat_mul_t(self.weights.value())?)
    }

    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weights, &self.bias]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.weights, &mut self.bias]
    }
}
