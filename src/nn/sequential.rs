/*
 * @Date         : 2026-10-19
 * @Description  : Sequential 容器：按顺序串联各层，前向时可选择是否记录 tape
 *
 * 梯度隔离的两种原语：
 * - `forward_detached()`：不记录 tape，输出只是一个普通张量值，梯度无法经由它回到参数
 * - `backward(.., GradMode::InputOnly)`：梯度穿过本网络回传给输入，但不写入本网络的任何参数梯度
 */

use super::layer::{GradMode, Layer, LayerKind};
use super::{Module, NnError, Parameter};
use crate::tensor::Tensor;

/// 一次可追踪前向传播的记录：第 i 个元素是第 i 层的输入
#[derive(Debug, Clone)]
pub struct Tape {
    inputs: Vec<Tensor>,
}

impl Tape {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sequential {
    layers: Vec<LayerKind>,
}

impl Sequential {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// 追加一层（builder 风格）
    pub fn add(mut self, layer: impl Into<LayerKind>) -> Self {
        self.layers.push(layer.into());
        self
    }

    pub fn layers(&self) -> &[LayerKind] {
        &self.layers
    }

    /// 可追踪的前向传播，返回输出与反向传播所需的 tape
    pub fn forward(&self, x: &Tensor) -> Result<(Tensor, Tape), NnError> {
        let mut inputs = Vec::with_capacity(self.layers.len());
        let mut current = x.clone();
        for layer in &self.layers {
            let next = layer.forward(&current)?;
            inputs.push(current);
            current = next;
        }
        Ok((current, Tape { inputs }))
    }

    /// 不追踪梯度的前向传播（相当于 PyTorch 的 `no_grad`/`detach`）
    pub fn forward_detached(&self, x: &Tensor) -> Result<Tensor, NnError> {
        self.layers
            .iter()
            .try_fold(x.clone(), |current, layer| layer.forward(&current))
    }

    /// 反向传播：消费一次`forward()`的 tape，返回对网络输入的梯度
    pub fn backward(
        &mut self,
        tape: &Tape,
        grad_output: &Tensor,
        mode: GradMode,
    ) -> Result<Tensor, NnError> {
        if tape.len() != self.layers.len() {
            return Err(NnError::TapeMismatch {
                expected: self.layers.len(),
                got: tape.len(),
            });
        }
        let mut grad = grad_output.clone();
        for (layer, input) in self.layers.iter_mut().zip(&tape.inputs).rev() {
            grad = layer.backward(input, &grad, mode)?;
        }
        Ok(grad)
    }
}

impl Module for Sequential {
    fn parameters(&self) -> Vec<&Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.layers
            .iter_mut()
            .flat_map(|l| l.parameters_mut())
            .collect()
    }
}
