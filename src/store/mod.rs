//! 积分存储
//!
//! 小票ID → 积分，写入一次后只读，不提供更新和删除。

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;

/// 积分存储接口
pub trait PointsStore: Send + Sync {
    /// 写入新记录，ID 已存在时返回 `DuplicateId`
    fn put(&self, id: &str, points: u64) -> Result<(), StoreError>;

    /// 读取积分，不存在时返回 `NotFound`
    fn get(&self, id: &str) -> Result<u64, StoreError>;

    /// 已保存的记录数
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
