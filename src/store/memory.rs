//! 内存存储实现，进程重启后数据丢失。

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::PointsStore;
use crate::error::StoreError;

/// 基于 DashMap 的内存存储 (分片加锁，可并发读写)
#[derive(Debug, Default)]
pub struct MemoryStore {
    points: DashMap<String, u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PointsStore for MemoryStore {
    fn put(&self, id: &str, points: u64) -> Result<(), StoreError> {
        match self.points.entry(id.to_string()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(points);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Result<u64, StoreError> {
        self.points
            .get(id)
            .map(|entry| *entry.value())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn put_then_get() {
        let store = MemoryStore::new();
        store.put("a", 28).unwrap();
        assert_eq!(store.get("a"), Ok(28));
        assert_eq!(store.get("a"), Ok(28));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_id_is_not_found() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("nope"), Err(StoreError::NotFound("nope".into())));
    }

    #[test]
    fn duplicate_put_keeps_first_value() {
        let store = MemoryStore::new();
        store.put("a", 1).unwrap();
        assert_eq!(store.put("a", 2), Err(StoreError::DuplicateId("a".into())));
        assert_eq!(store.get("a"), Ok(1));
    }

    #[test]
    fn lookup_is_verbatim() {
        let store = MemoryStore::new();
        store.put("ABC", 5).unwrap();
        assert!(store.get("abc").is_err());
        assert!(store.get(" ABC").is_err());
    }

    #[test]
    fn concurrent_writers() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..250u64 {
                        store.put(&format!("{}-{}", t, i), i).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.len(), 2000);
        assert_eq!(store.get("7-249"), Ok(249));
    }
}
