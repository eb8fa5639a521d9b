//! 忙碌标记
//!
//! 请求进行中时置位，guard 析构时一定复位

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{AppResult, SelectionError};

/// 忙碌标记，可以克隆给观察者读取
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    /// 置位；已经忙碌时返回 Busy 错误
    pub fn try_acquire(&self) -> AppResult<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SelectionError::Busy)?;
        Ok(BusyGuard {
            flag: self.inner.clone(),
        })
    }
}

/// 持有期间标记为忙碌
#[derive(Debug)]
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
