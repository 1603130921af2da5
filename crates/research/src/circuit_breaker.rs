//! Failure isolation for the case-law provider. A run of provider errors
//! opens the circuit so every document analysis does not queue behind a
//! dead upstream; after a cooldown a single probe is let through.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Provider healthy, requests pass.
    Closed,
    /// Too many consecutive failures, requests rejected until cooldown.
    Open,
    /// Cooldown elapsed, a probe request is in flight.
    HalfOpen,
}

pub struct CircuitBreaker {
    name: String,
    consecutive_failures: AtomicU32,
    failure_threshold: u32,
    cooldown: Duration,
    /// std Mutex, never held across an await.
    inner: Mutex<CircuitInner>,
}

struct CircuitInner {
    state: CircuitState,
    last_failure: Option<Instant>,
}

impl CircuitBreaker {
    pub fn new(name: &str, failure_threshold: u32, cooldown_seconds: u64) -> Self {
        Self {
            name: name.to_string(),
            consecutive_failures: AtomicU32::new(0),
            failure_threshold,
            cooldown: Duration::from_secs(cooldown_seconds),
            inner: Mutex::new(CircuitInner {
                state: CircuitState::Closed,
                last_failure: None,
            }),
        }
    }

    /// Whether the next provider request may go out. While open, flips to
    /// half-open once the cooldown has passed and admits one probe.
    pub fn allow(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();

        if inner.state != CircuitState::Open {
            return true;
        }

        let cooled_down = inner
            .last_failure
            .map_or(true, |last| last.elapsed() >= self.cooldown);
        if cooled_down {
            inner.state = CircuitState::HalfOpen;
            tracing::info!(
                circuit = %self.name,
                "Circuit breaker half-open, probing provider"
            );
        }
        cooled_down
    }

    /// A request succeeded: clear the failure streak and close the circuit
    /// if it was open or probing.
    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
        let mut inner = self.inner.lock().unwrap();

        if inner.state != CircuitState::Closed {
            tracing::info!(
                circuit = %self.name,
                previous_state = ?inner.state,
                "Circuit breaker closed, provider recovered"
            );
            inner.state = CircuitState::Closed;
            metrics::counter!("research.circuit.recoveries", "circuit" => self.name.clone())
                .increment(1);
        }
    }

    /// A request failed: extend the streak and open the circuit once the
    /// threshold is reached.
    pub fn record_failure(&self) {
        let streak = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        let mut inner = self.inner.lock().unwrap();

        inner.last_failure = Some(Instant::now());

        if streak >= self.failure_threshold && inner.state != CircuitState::Open {
            tracing::warn!(
                circuit = %self.name,
                failures = streak,
                threshold = self.failure_threshold,
                "Circuit breaker open, rejecting provider requests"
            );
            inner.state = CircuitState::Open;
            metrics::counter!("research.circuit.trips", "circuit" => self.name.clone())
                .increment(1);
        }
    }

    pub fn current_state(&self) -> CircuitState {
        self.inner.lock().unwrap().state
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold_failures() {
        let breaker = CircuitBreaker::new("caselaw", 3, 60);
        assert!(breaker.allow());

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Closed);

        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Open);
        assert!(!breaker.allow());
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new("caselaw", 3, 60);
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
    }

    #[test]
    fn half_open_probe_after_cooldown() {
        let breaker = CircuitBreaker::new("caselaw", 1, 0);
        breaker.record_failure();
        assert_eq!(breaker.current_state(), CircuitState::Open);

        // Zero cooldown: the next allow() probes half-open.
        assert!(breaker.allow());
        assert_eq!(breaker.current_state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.current_state(), CircuitState::Closed);
    }
}
