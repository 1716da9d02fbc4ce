use crate::error::{ApiError, StoreError};
use crate::models::Receipt;
use crate::service::rules;
use crate::store::{MemoryStore, PointsStore};
use std::sync::Arc;
use uuid::Uuid;

/// 小票ID生成器
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 随机 UUID v4
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// 小票处理服务：计算积分并按新ID保存
pub struct ReceiptProcessor {
    store: Arc<dyn PointsStore>,
    ids: Arc<dyn IdGenerator>,
}

impl ReceiptProcessor {
    pub fn new(store: Arc<dyn PointsStore>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { store, ids }
    }

    /// 内存存储 + UUID
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(UuidGenerator))
    }

    /// 计算积分并保存，返回新ID；积分计算失败时不写入存储
    pub fn process(&self, receipt: &Receipt) -> Result<String, ApiError> {
        let breakdown = rules::score_breakdown(receipt)?;
        tracing::debug!(
            "Receipt from {:?} scored: {:?}",
            receipt.retailer,
            breakdown.contributions
        );

        let id = self.ids.generate();
        self.store.put(&id, breakdown.total)?;
        tracing::info!("Receipt {} stored with {} points", id, breakdown.total);

        Ok(id)
    }

    /// 按ID查询积分
    pub fn points(&self, id: &str) -> Result<u64, StoreError> {
        self.store.get(id)
    }

    pub fn stored(&self) -> usize {
        self.store.len()
    }
}
