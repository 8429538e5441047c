//! Feature Gate - 单功能在途请求闸门
//!
//! 每个功能持有一个闸门：请求进行中时同一功能的再次触发会被拒绝，
//! 不同功能之间互不影响。守卫被 drop 时（无论成功、失败还是提前返回）闸门重新打开。

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::error::Feature;

/// 单功能闸门
#[derive(Debug)]
pub struct FeatureGate {
    feature: Feature,
    busy: AtomicBool,
}

impl FeatureGate {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            busy: AtomicBool::new(false),
        }
    }

    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// 是否有请求在途
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// 尝试占用闸门，已被占用时返回 None
    pub fn try_acquire(&self) -> Option<GateGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;

        tracing::debug!(feature = %self.feature, "Feature started");

        Some(GateGuard {
            gate: self,
            started: Instant::now(),
        })
    }
}

/// 闸门守卫
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a FeatureGate,
    started: Instant,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
        tracing::debug!(
            feature = %self.gate.feature,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Feature released"
        );
    }
}
