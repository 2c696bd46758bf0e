//! 过期请求丢弃
//!
//! 同一 key 只认最新发出的 req_id，旧请求的响应返回时会被丢弃。

use std::collections::HashMap;
use std::hash::Hash;

/// 通用请求追踪器
#[derive(Debug)]
pub struct RequestTracker<K> {
    pending: HashMap<K, u64>,
    next_id: u64,
}

impl<K: Eq + Hash> Default for RequestTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            next_id: 1,
        }
    }

    /// 发起新请求，返回分配的 req_id（从 1 开始，不会为 0）
    ///
    /// 同一 key 已有 pending 请求时，旧请求作废。
    pub fn issue(&mut self, key: K) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        self.pending.insert(key, id);
        id
    }

    /// 只有 req_id 与该 key 最新的 pending id 一致才返回 true，并清除 pending。
    pub fn accept(&mut self, key: &K, req_id: u64) -> bool {
        match self.pending.get(key) {
            Some(&pending_id) if pending_id == req_id => {
                self.pending.remove(key);
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    /// 目录列表
    FolderListing,
}
