/*
 * @Date         : 2026-10-19
 * @Description  : CheckpointManager：按 epoch 命名保存检查点，并负责读取与校验
 */

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use super::CheckpointError;
use crate::gan::{LossHistory, Trainer};
use crate::nn::{RMSpropState, StateDict};

/// 检查点文件魔数
const CHECKPOINT_MAGIC: &[u8; 4] = b"WGCK";
/// 检查点文件版本
const CHECKPOINT_VERSION: u32 = 1;

const GENERATOR_KEY: &str = "generator_state_dict";
const DISCRIMINATOR_KEY: &str = "discriminator_state_dict";
const OPTIMIZER_G_KEY: &str = "optimizer_g_state_dict";
const OPTIMIZER_D_KEY: &str = "optimizer_d_state_dict";
const EPOCHS_KEY: &str = "epochs";
const LOSSES_KEY: &str = "losses";

/// 检查点中必须存在的键
pub const REQUIRED_KEYS: [&str; 6] = [
    GENERATOR_KEY,
    DISCRIMINATOR_KEY,
    OPTIMIZER_G_KEY,
    OPTIMIZER_D_KEY,
    EPOCHS_KEY,
    LOSSES_KEY,
];

const EPOCH_FILE_PREFIX: &str = "checkpoint_epoch_";
const EPOCH_FILE_SUFFIX: &str = ".pth";

/// 一份完整的训练状态快照
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointState {
    pub generator: StateDict,
    pub discriminator: StateDict,
    pub optimizer_g: RMSpropState,
    pub optimizer_d: RMSpropState,
    pub epochs: u64,
    pub losses: LossHistory,
    /// 读取自哪个文件（内存中导出的快照为`None`），仅用于错误信息
    pub source: Option<PathBuf>,
}

/// 检查点管理器：在`dir`下写入`checkpoint_epoch_<N>.pth`
#[derive(Debug, Clone)]
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 第`epoch`个 epoch 对应的检查点路径
    pub fn epoch_path(&self, epoch: u64) -> PathBuf {
        self.dir
            .join(format!("{EPOCH_FILE_PREFIX}{epoch}{EPOCH_FILE_SUFFIX}"))
    }

    /// 以训练器当前的 epoch 计数命名并保存检查点（目录不存在时自动创建）
    pub fn save(&self, trainer: &Trainer) -> Result<PathBuf, CheckpointError> {
        fs::create_dir_all(&self.dir).map_err(|e| CheckpointError::io(&self.dir, e))?;
        let path = self.epoch_path(trainer.epochs());
        Self::save_to(trainer, &path)?;
        Ok(path)
    }

    /// 把训练器状态写入指定路径（覆盖已有文件）
    pub fn save_to<P: AsRef<Path>>(trainer: &Trainer, path: P) -> Result<(), CheckpointError> {
        let path = path.as_ref();
        let bytes = encode(&trainer.checkpoint_state())?;

        let file = File::create(path).map_err(|e| CheckpointError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| CheckpointError::io(path, e))?;

        tracing::info!(path = %path.display(), epoch = trainer.epochs(), "检查点已保存");
        Ok(())
    }

    /// 读取并校验检查点
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CheckpointState, CheckpointError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CheckpointError::NotFound(path.to_path_buf()),
            _ => CheckpointError::io(path, e),
        })?;
        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| CheckpointError::io(path, e))?;

        let mut state = decode(&bytes).map_err(|reason| CheckpointError::corrupt(path, reason))?;
        state.source = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), epoch = state.epochs, "检查点已读取");
        Ok(state)
    }

    /// 文件不存在时返回`Ok(None)`，其余错误照常返回
    pub fn load_if_exists<P: AsRef<Path>>(
        path: P,
    ) -> Result<Option<CheckpointState>, CheckpointError> {
        match Self::load(path) {
            Ok(state) => Ok(Some(state)),
            Err(CheckpointError::NotFound(path)) => {
                tracing::info!(path = %path.display(), "未找到检查点，从头开始训练");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// 列出目录下所有`checkpoint_epoch_<N>.pth`，按 N 升序
    pub fn list(&self) -> Result<Vec<(u64, PathBuf)>, CheckpointError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CheckpointError::io(&self.dir, e)),
        };

        let mut found = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CheckpointError::io(&self.dir, e))?.path();
            let epoch = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(EPOCH_FILE_PREFIX))
                .and_then(|rest| rest.strip_suffix(EPOCH_FILE_SUFFIX))
                .and_then(|n| n.parse::<u64>().ok());
            if let Some(epoch) = epoch {
                found.push((epoch, path));
            }
        }
        found.sort_by_key(|(epoch, _)| *epoch);
        Ok(found)
    }

    /// epoch 最大的检查点
    pub fn latest(&self) -> Result<Option<PathBuf>, CheckpointError> {
        Ok(self.list()?.pop().map(|(_, path)| path))
    }
}

fn encode(state: &CheckpointState) -> Result<Vec<u8>, CheckpointError> {
    let mut entries: BTreeMap<String, Vec<u8>> = BTreeMap::new();
    entries.insert(GENERATOR_KEY.into(), bincode::serialize(&state.generator)?);
    entries.insert(
        DISCRIMINATOR_KEY.into(),
        bincode::serialize(&state.discriminator)?,
    );
    entries.insert(OPTIMIZER_G_KEY.into(), bincode::serialize(&state.optimizer_g)?);
    entries.insert(OPTIMIZER_D_KEY.into(), bincode::serialize(&state.optimizer_d)?);
    entries.insert(EPOCHS_KEY.into(), bincode::serialize(&state.epochs)?);
    entries.insert(LOSSES_KEY.into(), bincode::serialize(&state.losses)?);

    let mut bytes = Vec::new();
    bytes.extend_from_slice(CHECKPOINT_MAGIC);
    bytes.extend_from_slice(&CHECKPOINT_VERSION.to_le_bytes());
    bytes.extend(bincode::serialize(&entries)?);
    Ok(bytes)
}

/// 解码失败时返回损坏原因
fn decode(bytes: &[u8]) -> Result<CheckpointState, String> {
    let (magic, rest) = bytes
        .split_first_chunk::<4>()
        .ok_or("文件过短，缺少魔数")?;
    if magic != CHECKPOINT_MAGIC {
        return Err("魔数不符，这不是 WGAN 检查点文件".to_string());
    }
    let (version, body) = rest
        .split_first_chunk::<4>()
        .ok_or("文件过短，缺少版本号")?;
    let version = u32::from_le_bytes(*version);
    if version != CHECKPOINT_VERSION {
        return Err(format!("不支持的检查点版本: {version}"));
    }

    let entries: BTreeMap<String, Vec<u8>> =
        bincode::deserialize(body).map_err(|e| format!("无法解码检查点内容: {e}"))?;
    if let Some(missing) = REQUIRED_KEYS.iter().find(|k| !entries.contains_key(**k)) {
        return Err(format!("缺少必需的键: {missing}"));
    }

    Ok(CheckpointState {
        generator: field(&entries, GENERATOR_KEY)?,
        discriminator: field(&entries, DISCRIMINATOR_KEY)?,
        optimizer_g: field(&entries, OPTIMIZER_G_KEY)?,
        optimizer_d: field(&entries, OPTIMIZER_D_KEY)?,
        epochs: field(&entries, EPOCHS_KEY)?,
        losses: field(&entries, LOSSES_KEY)?,
        source: None,
    })
}

fn field<T: DeserializeOwned>(entries: &BTreeMap<String, Vec<u8>>, key: &str) -> Result<T, String> {
    let bytes = entries
        .get(key)
        .ok_or_else(|| format!("缺少必需的键: {key}"))?;
    bincode::deserialize(bytes).map_err(|e| format!("无法解码{key}: {e}"))
}

/// 供测试构造任意键集合的检查点文件
#[cfg(test)]
pub(crate) fn write_raw_entries<T: serde::Serialize>(
    path: &Path,
    magic: &[u8; 4],
    entries: &BTreeMap<String, T>,
) -> Result<(), CheckpointError> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(magic);
    bytes.extend_from_slice(&CHECKPOINT_VERSION.to_le_bytes());
    bytes.extend(bincode::serialize(entries)?);
    fs::write(path, bytes).map_err(|e| CheckpointError::io(path, e))
}
