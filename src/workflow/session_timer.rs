//! 考试倒计时
//!
//! 每秒减一，归零时调用一次终止回调然后停止。
//! 计时器是一个可取消的后台任务句柄，由考试会话持有。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// 考试倒计时句柄
///
/// - `on_tick` 每秒调用一次，参数为剩余秒数
/// - `on_expire` 在剩余秒数归零时调用且只调用一次
/// - `cancel()` 或 drop 之后不会再调用任何回调
#[derive(Debug)]
pub struct SessionTimer {
    remaining: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    /// 启动倒计时
    ///
    /// `duration_secs` 为 0 时不会调度任何 tick，计时器直接处于已到期状态，
    /// 也不会调用 `on_expire`，由调用方决定如何处理
    pub fn start<T, E>(duration_secs: u64, mut on_tick: T, on_expire: E) -> Self
    where
        T: FnMut(u64) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let remaining = Arc::new(AtomicU64::new(duration_secs));

        if duration_secs == 0 {
            debug!("倒计时时长为 0，不启动计时器");
            return Self {
                remaining,
                handle: None,
            };
        }

        let counter = Arc::clone(&remaining);
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + TICK, TICK);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                ticker.tick().await;
                let left = counter.load(Ordering::SeqCst).saturating_sub(1);
                counter.store(left, Ordering::SeqCst);
                on_tick(left);

                if left == 0 {
                    on_expire();
                    break;
                }
            }
        });

        debug!("倒计时已启动: {} 秒", duration_secs);

        Self {
            remaining,
            handle: Some(handle),
        }
    }

    /// 剩余秒数
    pub fn remaining(&self) -> u64 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// 后台任务是否仍在计时
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// 停止计时并注销周期任务
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("倒计时已取消，剩余 {} 秒", self.remaining());
        }
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<u64>>>, Arc<AtomicUsize>) {
        (Arc::new(Mutex::new(Vec::new())), Arc::new(AtomicUsize::new(0)))
    }

    fn start_recording(
        secs: u64,
        ticks: &Arc<Mutex<Vec<u64>>>,
        expired: &Arc<AtomicUsize>,
    ) -> SessionTimer {
        let ticks = Arc::clone(ticks);
        let expired = Arc::clone(expired);
        SessionTimer::start(
            secs,
            move |left| ticks.lock().unwrap().push(left),
            move || {
                expired.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_and_expires_once() {
        let (ticks, expired) = recorder();
        let timer = start_recording(3, &ticks, &expired);
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 3);

        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![2, 1, 0]);
        assert_eq!(expired.load(Ordering::SeqCst), 1);
        assert!(timer.is_expired());
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (ticks, expired) = recorder();
        let mut timer = start_recording(5, &ticks, &expired);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        timer.cancel();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(*ticks.lock().unwrap(), vec![4, 3]);
        assert_eq!(expired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.remaining(), 3);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (ticks, expired) = recorder();
        let timer = start_recording(2, &ticks, &expired);
        drop(timer);

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(ticks.lock().unwrap().is_empty());
        assert_eq!(expired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_never_ticks() {
        let (ticks, expired) = recorder();
        let timer = start_recording(0, &ticks, &expired);

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(timer.is_expired());
        assert!(!timer.is_running());
        assert!(ticks.lock().unwrap().is_empty());
        assert_eq!(expired.load(Ordering::SeqCst), 0);
    }
}
