use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

/// How a single generation request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Fallback,
    UpstreamError,
    Invalid,
    InternalError
}

impl Outcome {

    pub fn as_str(&self) -> &'static str {

        match self {
            Outcome::Generated => "generated",
            Outcome::Fallback => "fallback",
            Outcome::UpstreamError => "upstream_error",
            Outcome::Invalid => "invalid",
            Outcome::InternalError => "internal_error"
        }

    }

}

#[derive(Debug, Default)]
pub struct Metrics {
    pub total_requests: AtomicU64,
    pub generated: AtomicU64,
    pub fallbacks: AtomicU64,
    pub upstream_errors: AtomicU64,
    pub invalid_requests: AtomicU64,
    pub internal_errors: AtomicU64
}

impl Metrics {

    pub fn new() -> Self {

        Self::default()

    }

    pub fn record(&self, outcome: Outcome) {

        let counter = match outcome {
            Outcome::Generated => &self.generated,
            Outcome::Fallback => &self.fallbacks,
            Outcome::UpstreamError => &self.upstream_errors,
            Outcome::Invalid => &self.invalid_requests,
            Outcome::InternalError => &self.internal_errors
        };

        counter.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            generated: self.generated.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            upstream_errors: self.upstream_errors.load(Ordering::Relaxed),
            invalid_requests: self.invalid_requests.load(Ordering::Relaxed),
            internal_errors: self.internal_errors.load(Ordering::Relaxed)
        }

    }

}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub generated: u64,
    pub fallbacks: u64,
    pub upstream_errors: u64,
    pub invalid_requests: u64,
    pub internal_errors: u64
}

impl MetricsSnapshot {

    // percentage of requests answered with the placeholder payload
    pub fn fallback_rate(&self) -> f64 {

        if self.total_requests == 0 {
            return 0.0;
        }
        (self.fallbacks as f64 / self.total_requests as f64) * 100.0

    }

}
