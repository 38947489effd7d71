/*
 * @Date         : 2026-10-19
 * @Description  : 训练超参数配置（可由 JSON 反序列化，缺省字段取默认值）
 */

use serde::{Deserialize, Serialize};

use crate::errors::WganError;

/// 判别器权重裁剪（原始 WGAN 论文中保证 Lipschitz 约束的手段）
///
/// 默认关闭：此时 critic 不受约束，其损失无界，训练可能发散。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LipschitzConfig {
    pub enforce: bool,
    /// 每个判别器参数被限制到的闭区间`(low, high)`
    pub clip_range: (f32, f32),
}

impl Default for LipschitzConfig {
    fn default() -> Self {
        Self {
            enforce: false,
            clip_range: (-0.01, 0.01),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// 两个 RMSprop 优化器共用的学习率
    pub learning_rate: f32,
    pub rmsprop_alpha: f32,
    pub rmsprop_epsilon: f32,
    /// 设定后，参数初始化与潜在向量采样均可复现
    pub seed: Option<u64>,
    pub lipschitz: LipschitzConfig,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 5e-5,
            rmsprop_alpha: 0.99,
            rmsprop_epsilon: 1e-8,
            seed: None,
            lipschitz: LipschitzConfig::default(),
        }
    }
}

impl TrainingConfig {
    /// 检查无法由 RMSprop 自身校验的部分
    pub fn validate(&self) -> Result<(), WganError> {
        let (low, high) = self.lipschitz.clip_range;
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(WganError::Config(format!(
                "clip_range 须满足 low < high，但得到 ({low}, {high})"
            )));
        }
        Ok(())
    }
}
