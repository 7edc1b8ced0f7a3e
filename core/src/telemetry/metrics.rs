use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Interaction counters for one session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub clicks: usize,
    pub drags: usize,
    pub ignored_drags: usize,
    pub clears: usize,
    pub geocode_successes: usize,
    pub geocode_failures: usize,
    pub stale_geocodes: usize,
}

#[derive(Clone, Copy)]
pub enum Counter {
    Click,
    Drag,
    IgnoredDrag,
    Clear,
    GeocodeSuccess,
    GeocodeFailure,
    StaleGeocode,
}

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record(&self, counter: Counter) {
        if let Ok(mut metrics) = self.inner.lock() {
            let slot = match counter {
                Counter::Click => &mut metrics.clicks,
                Counter::Drag => &mut metrics.drags,
                Counter::IgnoredDrag => &mut metrics.ignored_drags,
                Counter::Clear => &mut metrics.clears,
                Counter::GeocodeSuccess => &mut metrics.geocode_successes,
                Counter::GeocodeFailure => &mut metrics.geocode_failures,
                Counter::StaleGeocode => &mut metrics.stale_geocodes,
            };
            *slot += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
