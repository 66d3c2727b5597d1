//! Per-source circuit breaker.
//!
//! Web sources fail in streaks (rate limiting, outages). A source that
//! fails `failure_threshold` times in a row is skipped until its cooldown
//! expires; then exactly one probe fetch decides whether it is restored
//! or tripped again.
//!
//! ```text
//! ┌────────┐  N failures   ┌────────┐  cooldown   ┌──────────┐
//! │ Closed ├──────────────►│  Open  ├────────────►│ HalfOpen │
//! └───▲────┘               └───▲────┘             └────┬─────┘
//!     │         success        │      failure          │
//!     └────────────────────────┴───────────────────────┘
//! ```

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::LookupConfig;
use crate::types::SourceId;

/// Circuit state for a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Healthy: every fetch is attempted.
    Closed,
    /// Tripped: fetches are skipped until the cooldown expires.
    Open,
    /// Cooling down finished: one probe fetch is allowed.
    HalfOpen,
}

#[derive(Debug, Clone)]
struct SourceHealth {
    state: CircuitState,
    consecutive_failures: u32,
    last_failure_at: Option<Instant>,
    probe_in_flight: bool,
}

impl Default for SourceHealth {
    fn default() -> Self {
        Self {
            state: CircuitState::Closed,
            consecutive_failures: 0,
            last_failure_at: None,
            probe_in_flight: false,
        }
    }
}

/// Tracks consecutive failures per [`SourceId`] and gates fetches.
#[derive(Debug)]
pub struct CircuitBreaker {
    failure_threshold: u32,
    cooldown: Duration,
    sources: HashMap<SourceId, SourceHealth>,
}

impl CircuitBreaker {
    /// Create a breaker tripping after `failure_threshold` consecutive
    /// failures and probing again after `cooldown`.
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cooldown,
            sources: HashMap::new(),
        }
    }

    /// Create a breaker from the thresholds in `config`.
    pub fn from_config(config: &LookupConfig) -> Self {
        Self::new(
            config.failure_threshold,
            Duration::from_secs(config.cooldown_secs),
        )
    }

    /// Record a successful fetch: the source returns to [`CircuitState::Closed`].
    pub fn record_success(&mut self, source: SourceId) {
        let health = self.sources.entry(source).or_default();
        health.state = CircuitState::Closed;
        health.consecutive_failures = 0;
        health.probe_in_flight = false;
    }

    /// Record a failed fetch, tripping the circuit at the threshold.
    ///
    /// A failed half-open probe trips the circuit again immediately.
    pub fn record_failure(&mut self, source: SourceId) {
        let health = self.sources.entry(source).or_default();
        health.consecutive_failures = health.consecutive_failures.saturating_add(1);
        health.last_failure_at = Some(Instant::now());
        health.probe_in_flight = false;

        if health.state == CircuitState::HalfOpen
            || health.consecutive_failures >= self.failure_threshold
        {
            if health.state != CircuitState::Open {
                tracing::warn!(%source, failures = health.consecutive_failures, "source circuit opened");
            }
            health.state = CircuitState::Open;
        }
    }

    /// Whether a fetch from `source` should be attempted now.
    ///
    /// An open circuit whose cooldown has elapsed moves to half-open and
    /// hands out a single probe; further calls return `false` until that
    /// probe's outcome is recorded.
    pub fn should_attempt(&mut self, source: SourceId) -> bool {
        let cooldown = self.cooldown;
        let health = self.sources.entry(source).or_default();

        match health.state {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => {
                if health.probe_in_flight {
                    false
                } else {
                    health.probe_in_flight = true;
                    true
                }
            }
            CircuitState::Open => {
                let cooled = health
                    .last_failure_at
                    .is_none_or(|at| at.elapsed() >= cooldown);
                if cooled {
                    tracing::debug!(%source, "source circuit half-open, probing");
                    health.state = CircuitState::HalfOpen;
                    health.probe_in_flight = true;
                }
                cooled
            }
        }
    }

    /// Give back a half-open probe whose outcome will never be recorded,
    /// so the next [`should_attempt`](Self::should_attempt) can probe again.
    pub fn release_probe(&mut self, source: SourceId) {
        if let Some(health) = self.sources.get_mut(&source) {
            if health.probe_in_flight {
                tracing::debug!(%source, "half-open probe abandoned");
                health.probe_in_flight = false;
            }
        }
    }

    /// Current state for `source`; unseen sources are closed.
    pub fn state(&self, source: SourceId) -> CircuitState {
        self.sources
            .get(&source)
            .map_or(CircuitState::Closed, |h| h.state)
    }

    /// Consecutive failures recorded for `source`.
    pub fn consecutive_failures(&self, source: SourceId) -> u32 {
        self.sources
            .get(&source)
            .map_or(0, |h| h.consecutive_failures)
    }

    /// `(source, state, consecutive failures)` for every source seen so far,
    /// ordered by source.
    pub fn health_report(&self) -> Vec<(SourceId, CircuitState, u32)> {
        let mut report: Vec<_> = self
            .sources
            .iter()
            .map(|(source, h)| (*source, h.state, h.consecutive_failures))
            .collect();
        report.sort_by_key(|(source, _, _)| *source);
        report
    }

    /// Forget all recorded health.
    pub fn reset(&mut self) {
        self.sources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker(threshold: u32, cooldown_secs: u64) -> CircuitBreaker {
        CircuitBreaker::new(threshold, Duration::from_secs(cooldown_secs))
    }

    fn trip(breaker: &mut CircuitBreaker, source: SourceId, times: u32) {
        for _ in 0..times {
            breaker.record_failure(source);
        }
    }

    #[test]
    fn unseen_source_is_closed() {
        let breaker = breaker(3, 60);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Closed);
        assert_eq!(breaker.consecutive_failures(SourceId::Wiktionary), 0);
    }

    #[test]
    fn stays_closed_below_threshold() {
        let mut breaker = breaker(3, 60);
        trip(&mut breaker, SourceId::Etymonline, 2);
        assert_eq!(breaker.state(SourceId::Etymonline), CircuitState::Closed);
        assert!(breaker.should_attempt(SourceId::Etymonline));
    }

    #[test]
    fn opens_at_threshold_and_blocks() {
        let mut breaker = breaker(3, 600);
        trip(&mut breaker, SourceId::Etymonline, 3);
        assert_eq!(breaker.state(SourceId::Etymonline), CircuitState::Open);
        assert!(!breaker.should_attempt(SourceId::Etymonline));
    }

    #[test]
    fn cooldown_allows_single_probe() {
        let mut breaker = breaker(2, 0);
        trip(&mut breaker, SourceId::FreeDictionary, 2);

        assert!(breaker.should_attempt(SourceId::FreeDictionary));
        assert_eq!(breaker.state(SourceId::FreeDictionary), CircuitState::HalfOpen);
        // Probe outstanding: nobody else gets through.
        assert!(!breaker.should_attempt(SourceId::FreeDictionary));
    }

    #[test]
    fn probe_success_closes() {
        let mut breaker = breaker(2, 0);
        trip(&mut breaker, SourceId::Wiktionary, 2);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
        breaker.record_success(SourceId::Wiktionary);

        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Closed);
        assert_eq!(breaker.consecutive_failures(SourceId::Wiktionary), 0);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
    }

    #[test]
    fn probe_failure_reopens() {
        let mut breaker = breaker(3, 0);
        trip(&mut breaker, SourceId::Wiktionary, 3);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
        breaker.record_failure(SourceId::Wiktionary);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Open);
    }

    #[test]
    fn released_probe_can_be_handed_out_again() {
        let mut breaker = breaker(1, 0);
        trip(&mut breaker, SourceId::Wiktionary, 1);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
        assert!(!breaker.should_attempt(SourceId::Wiktionary));

        breaker.release_probe(SourceId::Wiktionary);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::HalfOpen);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
    }

    #[test]
    fn release_without_probe_is_noop() {
        let mut breaker = breaker(3, 60);
        breaker.release_probe(SourceId::Etymonline);
        breaker.record_failure(SourceId::Etymonline);
        breaker.release_probe(SourceId::Etymonline);
        assert_eq!(breaker.state(SourceId::Etymonline), CircuitState::Closed);
        assert_eq!(breaker.consecutive_failures(SourceId::Etymonline), 1);
    }

    #[test]
    fn success_resets_streak() {
        let mut breaker = breaker(3, 60);
        for _ in 0..10 {
            breaker.record_failure(SourceId::Etymonline);
            breaker.record_failure(SourceId::Etymonline);
            breaker.record_success(SourceId::Etymonline);
        }
        assert_eq!(breaker.state(SourceId::Etymonline), CircuitState::Closed);
    }

    #[test]
    fn sources_tracked_independently() {
        let mut breaker = breaker(1, 600);
        breaker.record_failure(SourceId::Etymonline);
        assert_eq!(breaker.state(SourceId::Etymonline), CircuitState::Open);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
    }

    #[test]
    fn health_report_sorted_by_source() {
        let mut breaker = breaker(3, 60);
        breaker.record_failure(SourceId::EtymWordnet);
        breaker.record_success(SourceId::Supplementary);

        let report = breaker.health_report();
        assert_eq!(
            report,
            vec![
                (SourceId::Supplementary, CircuitState::Closed, 0),
                (SourceId::EtymWordnet, CircuitState::Closed, 1),
            ]
        );
    }

    #[test]
    fn reset_clears_state() {
        let mut breaker = breaker(1, 600);
        breaker.record_failure(SourceId::Wiktionary);
        breaker.reset();
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Closed);
        assert!(breaker.health_report().is_empty());
    }

    #[test]
    fn zero_threshold_treated_as_one() {
        let mut breaker = breaker(0, 600);
        assert!(breaker.should_attempt(SourceId::Wiktionary));
        breaker.record_failure(SourceId::Wiktionary);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Open);
    }

    #[test]
    fn from_config_uses_thresholds() {
        let config = LookupConfig {
            failure_threshold: 2,
            cooldown_secs: 600,
            ..Default::default()
        };
        let mut breaker = CircuitBreaker::from_config(&config);
        trip(&mut breaker, SourceId::Wiktionary, 1);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Closed);
        trip(&mut breaker, SourceId::Wiktionary, 1);
        assert_eq!(breaker.state(SourceId::Wiktionary), CircuitState::Open);
    }
}
