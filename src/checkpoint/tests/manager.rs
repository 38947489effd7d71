/*
 * @Date         : 2026-10-19
 * @Description  : 检查点保存/读取/校验测试
 */

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::checkpoint::manager::write_raw_entries;
use crate::checkpoint::{CheckpointError, CheckpointManager, REQUIRED_KEYS};
use crate::data::Batch;
use crate::gan::{SAMPLE_DIM, Trainer, TrainingConfig};
use crate::tensor::Tensor;

fn trained_trainer(seed: u64) -> Trainer {
    let mut trainer = Trainer::new(TrainingConfig {
        seed: Some(seed),
        ..TrainingConfig::default()
    })
    .unwrap();
    let source: Vec<Batch> = vec![(Tensor::full(0.5, &[2, SAMPLE_DIM]), Tensor::zeros(&[2, 1]))];
    trainer.train_epoch(&source).unwrap();
    trainer
}

/// 读出一个合法检查点的键值表
fn read_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let bytes = fs::read(path).unwrap();
    bincode::deserialize(&bytes[8..]).unwrap()
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path().join("ckpt"));
    let trainer = trained_trainer(0);

    let path = manager.save(&trainer).unwrap();
    assert_eq!(path, dir.path().join("ckpt").join("checkpoint_epoch_1.pth"));

    let state = CheckpointManager::load(&path).unwrap();
    assert_eq!(state.source.as_deref(), Some(path.as_path()));
    let expected = trainer.checkpoint_state();
    assert_eq!(state.generator, expected.generator);
    assert_eq!(state.discriminator, expected.discriminator);
    assert_eq!(state.optimizer_g, expected.optimizer_g);
    assert_eq!(state.optimizer_d, expected.optimizer_d);
    assert_eq!(state.epochs, 1);
    assert_eq!(state.losses, *trainer.losses());

    // 恢复到另一个训练器后，完整状态逐位一致
    let mut restored = Trainer::new(TrainingConfig::default()).unwrap();
    restored.apply_checkpoint(state).unwrap();
    assert_eq!(restored.checkpoint_state(), expected);
}

#[test]
fn test_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoint.pth");
    CheckpointManager::save_to(&trained_trainer(1), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"WGCK");
    assert_eq!(u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]), 1);

    let entries = read_entries(&path);
    let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
    let mut required = REQUIRED_KEYS.to_vec();
    required.sort_unstable();
    assert_eq!(keys, required);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoint.pth");
    assert!(matches!(
        CheckpointManager::load(&path),
        Err(CheckpointError::NotFound(_))
    ));
    assert!(CheckpointManager::load_if_exists(&path).unwrap().is_none());
}

#[test]
fn test_missing_key_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoint.pth");
    CheckpointManager::save_to(&trained_trainer(2), &path).unwrap();

    let mut entries = read_entries(&path);
    entries.remove("losses");
    write_raw_entries(&path, b"WGCK", &entries).unwrap();

    let err = CheckpointManager::load(&path).unwrap_err();
    match err {
        CheckpointError::Corrupt { reason, .. } => assert!(reason.contains("losses")),
        other => panic!("期望 Corrupt，实际为 {other:?}"),
    }
    // 损坏的检查点不能被当作"不存在"
    assert!(CheckpointManager::load_if_exists(&path).is_err());
}

#[test]
fn test_bad_magic_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkpoint.pth");
    CheckpointManager::save_to(&trained_trainer(3), &path).unwrap();
    let entries = read_entries(&path);
    write_raw_entries(&path, b"PTCH", &entries).unwrap();

    assert!(matches!(
        CheckpointManager::load(&path),
        Err(CheckpointError::Corrupt { .. })
    ));
}

#[test]
fn test_bad_version_and_truncated_file_are_corrupt() {
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("v2.pth");
    let mut bytes = b"WGCK".to_vec();
    bytes.extend_from_slice(&2u32.to_le_bytes());
    fs::write(&path, bytes).unwrap();
    assert!(matches!(
        CheckpointManager::load(&path),
        Err(CheckpointError::Corrupt { .. })
    ));

    let path = dir.path().join("short.pth");
    fs::write(&path, b"WG").unwrap();
    assert!(matches!(
        CheckpointManager::load(&path),
        Err(CheckpointError::Corrupt { .. })
    ));

    let path = dir.path().join("garbage.pth");
    let mut bytes = b"WGCK".to_vec();
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&[0xFF; 16]);
    fs::write(&path, bytes).unwrap();
    assert!(matches!(
        CheckpointManager::load(&path),
        Err(CheckpointError::Corrupt { .. })
    ));
}

#[test]
fn test_list_and_latest() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path());
    assert!(manager.list().unwrap().is_empty());
    assert!(manager.latest().unwrap().is_none());

    let mut trainer = Trainer::new(TrainingConfig {
        seed: Some(4),
        ..TrainingConfig::default()
    })
    .unwrap();
    let empty: Vec<Batch> = Vec::new();
    for target in [1, 2, 10] {
        while trainer.epochs() < target {
            trainer.train_epoch(&empty).unwrap();
        }
        manager.save(&trainer).unwrap();
    }
    // 续训入口文件不属于按 epoch 命名的检查点
    CheckpointManager::save_to(&trainer, dir.path().join("checkpoint.pth")).unwrap();

    let epochs: Vec<u64> = manager.list().unwrap().into_iter().map(|(e, _)| e).collect();
    assert_eq!(epochs, vec![1, 2, 10]);
    assert_eq!(manager.latest().unwrap(), Some(manager.epoch_path(10)));
}

#[test]
fn test_list_of_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let manager = CheckpointManager::new(dir.path().join("never_created"));
    assert!(manager.list().unwrap().is_empty());
}
