//! # 状态显示槽
//!
//! ## 设计思路
//!
//! 界面上只有一行状态文本，任何批次的后台任务都可能写它。这里把它建模为一个共享可变单元：
//! - 每个批次开始时领取单调递增的序号（`begin_batch`）
//! - 写入时携带序号，序号比槽内已写入的最新序号旧的写入直接丢弃
//!
//! 因此并发批次互不覆盖：后开始的批次一旦写过状态，先开始的批次就不会再把它改回去。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const STATUS_READY: &str = "Ready";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const STATUS_NO_VALID_IMAGES: &str = "No valid images found to convert";

#[derive(Debug)]
struct StatusState {
    text: String,
    sequence: u64,
}

/// 共享状态文本单元，克隆后指向同一个槽。
#[derive(Debug, Clone)]
pub struct StatusSlot {
    state: Arc<Mutex<StatusState>>,
    next_sequence: Arc<AtomicU64>,
}

impl Default for StatusSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSlot {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StatusState {
                text: STATUS_READY.to_string(),
                sequence: 0,
            })),
            next_sequence: Arc::new(AtomicU64::new(1)),
        }
    }

    /// 为新批次领取序号。
    pub fn begin_batch(&self) -> BatchReporter {
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        BatchReporter {
            slot: self.clone(),
            sequence,
        }
    }

    /// 当前显示的文本。
    pub fn current(&self) -> String {
        match self.state.lock() {
            Ok(guard) => guard.text.clone(),
            Err(poisoned) => poisoned.into_inner().text.clone(),
        }
    }

    /// 写入状态；返回 `false` 表示被更新的批次覆盖而丢弃。
    fn publish(&self, sequence: u64, text: String) -> bool {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(_) => {
                log::warn!("状态槽锁已中毒，丢弃状态：{}", text);
                return false;
            }
        };

        if sequence < guard.sequence {
            log::debug!(
                "忽略过期状态（batch={} < latest={}）：{}",
                sequence,
                guard.sequence,
                text
            );
            return false;
        }

        guard.sequence = sequence;
        guard.text = text;
        true
    }
}

/// 单个批次持有的写入句柄。
#[derive(Debug, Clone)]
pub struct BatchReporter {
    slot: StatusSlot,
    sequence: u64,
}

impl BatchReporter {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn report(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        log::info!("[batch #{}] {}", self.sequence, text);
        self.slot.publish(self.sequence, text)
    }
}

/// 批次结果：只保留成功计数与最后一条错误文本，用于生成最终状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub converted: usize,
    pub last_error: Option<String>,
    pub status: String,
}

pub(crate) fn processed_message(converted: usize) -> String {
    format!("Processed: {} image(s)", converted)
}

pub(crate) fn error_message(error: &impl std::fmt::Display) -> String {
    format!("Error: {}", error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_ready() {
        assert_eq!(StatusSlot::new().current(), STATUS_READY);
    }

    #[test]
    fn sequences_are_monotonic() {
        let slot = StatusSlot::new();
        let first = slot.begin_batch();
        let second = slot.begin_batch();
        assert!(second.sequence() > first.sequence());
    }

    #[test]
    fn stale_batch_cannot_overwrite_newer_status() {
        let slot = StatusSlot::new();
        let older = slot.begin_batch();
        let newer = slot.begin_batch();

        assert!(older.report("Processing..."));
        assert!(newer.report("Processing..."));
        assert!(!older.report("Converted 1 image(s) to WebP"));
        assert_eq!(slot.current(), "Processing...");

        assert!(newer.report("Converted 2 image(s) to WebP"));
        assert_eq!(slot.current(), "Converted 2 image(s) to WebP");
    }

    #[test]
    fn older_batch_writes_until_newer_one_reports() {
        let slot = StatusSlot::new();
        let older = slot.begin_batch();
        let _newer = slot.begin_batch();

        assert!(older.report(processed_message(1)));
        assert_eq!(slot.current(), "Processed: 1 image(s)");
    }

    #[test]
    fn clones_share_the_same_slot() {
        let slot = StatusSlot::new();
        let view = slot.clone();
        slot.begin_batch().report(STATUS_NO_VALID_IMAGES);
        assert_eq!(view.current(), STATUS_NO_VALID_IMAGES);
    }
}
