//! Retry - 有界指数退避重试
//!
//! 首次尝试失败后最多再重试 `max_retries` 次，等待时间从 `initial_delay` 开始逐次翻倍，
//! 不加抖动。重试状态只属于单次调用。

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// 重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 首次尝试之后的最大重试次数
    pub max_retries: u32,
    /// 第一次等待的时长
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// 不重试
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// 最大尝试次数（含首次）
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// 第 `retry` 次重试前的等待时长（从 0 开始）
    pub fn delay_for(&self, retry: u32) -> Duration {
        let multiplier = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
        self.initial_delay.saturating_mul(multiplier)
    }

    /// 完整的等待序列：d, 2d, 4d, ...
    pub fn delays(&self) -> Vec<Duration> {
        (0..self.max_retries).map(|retry| self.delay_for(retry)).collect()
    }
}

/// 按策略执行 `op`，返回第一个成功值；重试耗尽后原样返回最后一次的错误
pub async fn retry_with_backoff<F, Fut, T, E>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut retry = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if retry < policy.max_retries => {
                let delay = policy.delay_for(retry);
                retry += 1;
                tracing::warn!(
                    attempt = retry,
                    max_attempts = policy.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Request attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(
                    attempts = retry + 1,
                    error = %e,
                    "Request failed after all retries"
                );
                return Err(e);
            }
        }
    }
}
