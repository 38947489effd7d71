/*
 * @Date         : 2026-10-19
 * @Description  : 检查点：完整保存/恢复训练状态，用于断点续训
 *
 * 文件格式：
 * - Header: magic(4) = "WGCK" + version(4, u32 小端) = 1
 * - Body:   bincode 编码的`BTreeMap<String, Vec<u8>>`，每个值本身也是 bincode 编码。
 *           必须包含的键见[`REQUIRED_KEYS`]
 */

mod error;
mod manager;

#[cfg(test)]
mod tests;

pub use error::CheckpointError;
pub use manager::{CheckpointManager, CheckpointState, REQUIRED_KEYS};
