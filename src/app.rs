/*
 * @Date         : 2026-10-19
 * @Description  : 训练入口：若有检查点则续训，训练指定 epoch 数，最后保存检查点与损失曲线
 */

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::checkpoint::CheckpointManager;
use crate::data::DataSource;
use crate::errors::WganError;
use crate::gan::{Trainer, TrainingConfig};

/// 整个训练流程的配置，可从 JSON 文件读取（缺省字段取默认值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub training: TrainingConfig,
    pub num_epochs: usize,
    pub batch_size: usize,
    pub shuffle: bool,
    /// 真实样本矩阵（`.npy`, 形状 [N, 784]）
    pub data_path: PathBuf,
    /// 每个 epoch 的检查点写入此目录
    pub checkpoint_dir: PathBuf,
    /// 启动时若该文件存在则从它续训
    pub resume_checkpoint: PathBuf,
    pub loss_metrics_path: PathBuf,
    /// 训练结束时是否把最终检查点同时写到`resume_checkpoint`
    pub refresh_resume_checkpoint: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            training: TrainingConfig::default(),
            num_epochs: 100,
            batch_size: 64,
            shuffle: true,
            data_path: PathBuf::from("real_samples.npy"),
            checkpoint_dir: PathBuf::from("."),
            resume_checkpoint: PathBuf::from("checkpoint.pth"),
            loss_metrics_path: PathBuf::from("loss_metrics.json"),
            refresh_resume_checkpoint: true,
        }
    }
}

impl AppConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, WganError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn to_json(&self) -> Result<String, WganError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// 运行一次完整的训练流程，返回训练结束时的训练器
///
/// 1. 按`config.training`新建训练器
/// 2. 若`config.resume_checkpoint`存在则载入（不存在不算错误，损坏则返回错误）
/// 3. 训练`config.num_epochs`个 epoch（每个 epoch 保存一次检查点）
/// 4. 再保存一次最终检查点，并把损失历史写成 JSON
pub fn run<S: DataSource + ?Sized>(config: &AppConfig, source: &S) -> Result<Trainer, WganError> {
    let mut trainer = Trainer::new(config.training.clone())?;
    if let Some(state) = CheckpointManager::load_if_exists(&config.resume_checkpoint)? {
        trainer.apply_checkpoint(state)?;
        tracing::info!(
            epoch = trainer.epochs(),
            losses = trainer.losses().len(),
            "从检查点恢复训练"
        );
    }

    let checkpoints = CheckpointManager::new(&config.checkpoint_dir);
    trainer.train(source, config.num_epochs, &checkpoints)?;

    checkpoints.save(&trainer)?;
    if config.refresh_resume_checkpoint {
        CheckpointManager::save_to(&trainer, &config.resume_checkpoint)?;
    }

    trainer.losses().save_json(&config.loss_metrics_path)?;
    tracing::info!(
        path = %config.loss_metrics_path.display(),
        entries = trainer.losses().len(),
        "损失历史已保存"
    );
    Ok(trainer)
}
