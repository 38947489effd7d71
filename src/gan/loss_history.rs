use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::WganError;

/// 每个 mini-batch 一条`(判别器损失, 生成器损失)`记录，只追加不修改
///
/// JSON 形式为`[[d_loss, g_loss], ...]`；非有限值（NaN/inf）会被写成`null`。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LossHistory(Vec<(f32, f32)>);

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, d_loss: f32, g_loss: f32) {
        self.0.push((d_loss, g_loss));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(f32, f32)] {
        &self.0
    }

    /// 最近`n`条记录各自的均值（用于每个 epoch 的日志）
    pub fn tail_mean(&self, n: usize) -> Option<(f32, f32)> {
        if n == 0 || n > self.0.len() {
            return None;
        }
        let tail = &self.0[self.0.len() - n..];
        let (d, g) = tail
            .iter()
            .fold((0.0, 0.0), |(sd, sg), (d, g)| (sd + d, sg + g));
        Some((d / n as f32, g / n as f32))
    }

    /// 以 JSON 数组形式写入文件（覆盖已有文件）
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), WganError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

impl From<Vec<(f32, f32)>> for LossHistory {
    fn from(entries: Vec<(f32, f32)>) -> Self {
        Self(entries)
    }
}
