use std::sync::Arc;

/// Millisecond wall clock.
///
/// Timers in the viewer (manual-selection cooldown, stuck detection) are deadlines compared
/// against this clock, so tests can drive them with [`ManualClock`].
pub(crate) trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

pub(crate) type SharedClock = Arc<dyn Clock>;

/// Browser clock (`Date.now()`).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }
}

pub(crate) fn browser_clock() -> SharedClock {
    Arc::new(BrowserClock)
}

pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

#[cfg(test)]
pub(crate) use test_clock::ManualClock;

#[cfg(test)]
mod test_clock {
    use super::Clock;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[derive(Debug, Default)]
    pub(crate) struct ManualClock(AtomicI64);

    impl ManualClock {
        pub fn at(ms: i64) -> Self {
            Self(AtomicI64::new(ms))
        }

        pub fn advance(&self, ms: i64) {
            self.0.fetch_add(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }
}

/// Short relative label for an ISO timestamp column, e.g. `2026-10-18`.
pub(crate) fn date_label(ts: Option<&str>) -> Option<String> {
    let day = ts?.trim().get(..10)?;
    if day.as_bytes().get(4) == Some(&b'-') && day.as_bytes().get(7) == Some(&b'-') {
        Some(day.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let c = ManualClock::at(1_000);
        c.advance(250);
        assert_eq!(c.now_ms(), 1_250);
    }

    #[test]
    fn test_date_label() {
        assert_eq!(
            date_label(Some("2026-10-18T09:00:00Z")).as_deref(),
            Some("2026-10-18")
        );
        assert_eq!(date_label(Some("yesterday")), None);
        assert_eq!(date_label(None), None);
    }
}
