/*
 * @Date         : 2026-10-19
 * @Description  : Module trait 定义
 */

use std::collections::BTreeMap;

use super::{NnError, Parameter};
use crate::tensor::Tensor;

/// 参数名 -> 参数值（有序，便于序列化结果稳定）
pub type StateDict = BTreeMap<String, Tensor>;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（签名各异）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()`/`parameters_mut()` 签名一致，放入 trait，其余方法都基于它们
///
/// # 使用示例
///
/// ```ignore
/// struct MLP {
///     net: Sequential,
/// }
///
/// impl Module for MLP {
///     fn parameters(&self) -> Vec<&Parameter> {
///         self.net.parameters()
///     }
///     fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
///         self.net.parameters_mut()
///     }
/// }
/// ```
pub trait Module {
    /// 获取所有可训练参数
    fn parameters(&self) -> Vec<&Parameter>;

    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// 获取参数数量（标量个数）
    fn num_params(&self) -> usize {
        self.parameters().iter().map(|p| p.value().size()).sum()
    }

    /// 清空所有参数的梯度累加器
    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }

    /// 导出全部参数值
    fn state_dict(&self) -> StateDict {
        self.parameters()
            .into_iter()
            .map(|p| (p.name().to_string(), p.value().clone()))
            .collect()
    }

    /// 严格加载参数：名字必须一一对应、形状必须一致。
    /// 先整体校验再写入，校验失败时模块保持原样。
    fn load_state_dict(&mut self, state: &StateDict) -> Result<(), NnError> {
        {
            let params = self.parameters();
            for param in &params {
                let value = state
                    .get(param.name())
                    .ok_or_else(|| NnError::MissingParameter(param.name().to_string()))?;
                if value.shape() != param.shape() {
                    return Err(NnError::ParameterShape {
                        name: param.name().to_string(),
                        expected: param.shape().to_vec(),
                        got: value.shape().to_vec(),
                    });
                }
            }
            if let Some(extra) = state
                .keys()
                .find(|k| !params.iter().any(|p| p.name() == k.as_str()))
            {
                return Err(NnError::UnexpectedParameter(extra.clone()));
            }
        }

        for param in self.parameters_mut() {
            if let Some(value) = state.get(param.name()) {
                param.set_value(value)?;
            }
        }
        Ok(())
    }

    /// 把每个参数的每个元素限制在`[low, high]`内（WGAN 权重裁剪）
    fn clamp_parameters(&mut self, low: f32, high: f32) {
        for param in self.parameters_mut() {
            param.value_mut().clamp_(low, high);
        }
    }
}
