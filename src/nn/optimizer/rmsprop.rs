/*
 * @Date         : 2026-10-19
 * @Description  : RMSprop优化器实现（与 PyTorch `optim.RMSprop` 默认配置一致：无动量、非centered）
 */

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::base::Optimizer;
use crate::errors::Operator;
use crate::nn::{Module, NnError};
use crate::tensor::Tensor;

/// RMSprop 的完整内部状态，可序列化以便断点续训时逐位恢复
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RMSpropState {
    pub learning_rate: f32,
    /// 平方梯度滑动平均的衰减系数
    pub alpha: f32,
    pub epsilon: f32,
    /// 已执行的`step()`次数
    pub step: u64,
    /// 参数名 -> 平方梯度的滑动平均
    pub square_avg: BTreeMap<String, Tensor>,
}

/// RMSprop优化器
///
/// 对每个参数 θ（梯度为 g）：
/// - `v = α·v + (1-α)·g²`
/// - `θ = θ - lr·g / (√v + ε)`
#[derive(Debug, Clone)]
pub struct RMSprop {
    state: RMSpropState,
}

impl RMSprop {
    /// 使用指定参数创建RMSprop优化器
    pub fn new(learning_rate: f32, alpha: f32, epsilon: f32) -> Result<Self, NnError> {
        if !learning_rate.is_finite() || learning_rate < 0.0 {
            return Err(NnError::InvalidHyperParameter(format!(
                "RMSprop的学习率须为非负有限值，但得到: {learning_rate}"
            )));
        }
        if !(0.0..1.0).contains(&alpha) {
            return Err(NnError::InvalidHyperParameter(format!(
                "RMSprop的alpha须在[0, 1)内，但得到: {alpha}"
            )));
        }
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(NnError::InvalidHyperParameter(format!(
                "RMSprop的epsilon须为正数，但得到: {epsilon}"
            )));
        }
        Ok(Self {
            state: RMSpropState {
                learning_rate,
                alpha,
                epsilon,
                step: 0,
                square_avg: BTreeMap::new(),
            },
        })
    }

    /// 使用默认参数（alpha=0.99, eps=1e-8）创建RMSprop优化器
    pub fn new_default(learning_rate: f32) -> Result<Self, NnError> {
        Self::new(learning_rate, 0.99, 1e-8)
    }

    pub const fn step_count(&self) -> u64 {
        self.state.step
    }

    /// 导出内部状态
    pub fn state_dict(&self) -> RMSpropState {
        self.state.clone()
    }

    /// 恢复内部状态（含滑动平均统计量，而不只是学习率）。
    /// `module`用于校验统计量与参数一一对应，校验失败时优化器保持原样。
    pub fn load_state_dict(
        &mut self,
        state: RMSpropState,
        module: &dyn Module,
    ) -> Result<(), NnError> {
        let params = module.parameters();
        for (name, avg) in &state.square_avg {
            let param = params
                .iter()
                .find(|p| p.name() == name)
                .ok_or_else(|| NnError::UnexpectedParameter(name.clone()))?;
            if param.shape() != avg.shape() {
                return Err(NnError::ParameterShape {
                    name: name.clone(),
                    expected: param.shape().to_vec(),
                    got: avg.shape().to_vec(),
                });
            }
        }
        // 复用构造函数的超参数校验
        Self::new(state.learning_rate, state.alpha, state.epsilon)?;
        self.state = state;
        Ok(())
    }
}

impl Optimizer for RMSprop {
    fn step(&mut self, module: &mut dyn Module) -> Result<(), NnError> {
        self.state.step += 1;

        let lr = self.state.learning_rate;
        let alpha = self.state.alpha;
        let eps = self.state.epsilon;

        for param in module.parameters_mut() {
            let Some(gradient) = param.grad().cloned() else {
                continue;
            };

            // 原地更新平方梯度滑动平均: v = α * v + (1 - α) * g²
            let square_avg = self
                .state
                .square_avg
                .entry(param.name().to_string())
                .or_insert_with(|| Tensor::zeros(gradient.shape()));
            square_avg.zip_apply_(&gradient, Operator::Add, |v, g| {
                *v = alpha * *v + (1.0 - alpha) * g * g;
            })?;

            // 参数更新: θ = θ - lr * g / (√v + ε)
            let update = square_avg.zip_map(&gradient, Operator::Mul, |v, g| {
                lr * g / (v.sqrt() + eps)
            })?;
            param
                .value_mut()
                .zip_apply_(&update, Operator::Sub, |p, u| *p -= u)?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.state.learning_rate
    }
}
