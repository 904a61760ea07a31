//! Wall-clock helpers with a clock abstraction for testability.
//!
//! Timestamps are Unix milliseconds; rendering uses JST (UTC+9).

use chrono::{DateTime, FixedOffset, Utc};

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in milliseconds.
    fn now_millis(&self) -> i64;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Clock frozen at one instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_millis: i64,
}

impl FixedClock {
    pub fn new(fixed_millis: i64) -> Self {
        Self { fixed_millis }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_millis
    }
}

/// Current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a Unix millisecond timestamp as RFC 3339 in JST.
///
/// Returns `None` when the timestamp is outside chrono's representable range.
pub fn to_jst_rfc3339(timestamp_millis: i64) -> Option<String> {
    let jst = FixedOffset::east_opt(JST_OFFSET_SECS)?;
    DateTime::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&jst).to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        // テスト項目: SystemClock が単調に増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let first = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = clock.now_millis();

        // then (期待する結果):
        assert!(first > 0);
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_is_frozen() {
        // テスト項目: FixedClock は常に同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::new(1_672_498_800_000);

        // when (操作):
        let readings = [clock.now_millis(), clock.now_millis()];

        // then (期待する結果):
        assert_eq!(readings, [1_672_498_800_000, 1_672_498_800_000]);
    }

    #[test]
    fn test_to_jst_rfc3339() {
        // テスト項目: UTC 2022-12-31T15:00:00 が JST の元日 0 時として表示される
        // given (前提条件):
        let timestamp = 1_672_498_800_123;

        // when (操作):
        let rendered = to_jst_rfc3339(timestamp).unwrap();

        // then (期待する結果):
        assert!(rendered.starts_with("2023-01-01T00:00:00.123"));
        assert!(rendered.ends_with("+09:00"));
    }
}
