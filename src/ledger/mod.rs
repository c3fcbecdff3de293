//! Session-wide collection ledger.
//!
//! One `CollectionLedger` is shared (through `Arc`) by every asset collector
//! of a session. It owns the seen-fingerprint set, the skip counters, the
//! error list and, in verbose mode, the decision log (saves, skips and
//! errors in the order they happened).
//!
//! # Thread Safety
//!
//! `try_claim` does its check and insert under a single lock with no await
//! in between, so concurrent collectors can never both win the same
//! fingerprint. Counters are atomics; the error and decision lists are
//! append-only behind mutexes. No lock is held across an `.await`.

mod decisions;

pub use decisions::{Decision, DecisionKind, SkipReason};

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use strum::IntoEnumIterator;

use crate::utils::sanitize::sanitize_and_truncate_error_message;

/// A failure recorded during the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedError {
    /// Where it happened, e.g. `Crawl error: https://example.com/about`
    pub context: String,
    pub message: String,
}

impl fmt::Display for RecordedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.context, self.message)
    }
}

/// Read-only view of the ledger for reporting.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub skipped: BTreeMap<SkipReason, usize>,
    pub saved: usize,
    pub claimed: usize,
    pub errors: Vec<RecordedError>,
    pub decisions: Vec<Decision>,
}

impl LedgerSnapshot {
    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

pub struct CollectionLedger {
    seen: Mutex<HashSet<String>>,
    skipped: HashMap<SkipReason, AtomicUsize>,
    saved: AtomicUsize,
    errors: Mutex<Vec<RecordedError>>,
    decisions: Option<Mutex<Vec<Decision>>>,
}

impl Default for CollectionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionLedger {
    /// Creates an empty ledger without a decision log.
    pub fn new() -> Self {
        let mut skipped = HashMap::new();
        for reason in SkipReason::iter() {
            skipped.insert(reason, AtomicUsize::new(0));
        }
        Self {
            seen: Mutex::new(HashSet::new()),
            skipped,
            saved: AtomicUsize::new(0),
            errors: Mutex::new(Vec::new()),
            decisions: None,
        }
    }

    /// Creates an empty ledger that also keeps every save/skip decision.
    pub fn with_decision_log() -> Self {
        Self {
            decisions: Some(Mutex::new(Vec::new())),
            ..Self::new()
        }
    }

    /// Claims `fingerprint` for this session.
    ///
    /// Returns true iff this call is the first claimant. A claimed
    /// fingerprint is never released.
    pub fn try_claim(&self, fingerprint: &str) -> bool {
        let mut seen = lock(&self.seen);
        if seen.contains(fingerprint) {
            return false;
        }
        seen.insert(fingerprint.to_string());
        true
    }

    pub fn is_claimed(&self, fingerprint: &str) -> bool {
        lock(&self.seen).contains(fingerprint)
    }

    /// Counts a skipped candidate from `source`.
    pub fn record_skip(&self, reason: SkipReason, source: &str) {
        if let Some(counter) = self.skipped.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!("Skip counter for {:?} missing from ledger", reason);
        }
        self.push_decision(DecisionKind::Skipped(reason), source);
    }

    /// Counts a persisted asset.
    pub fn record_saved(&self, filename: &str, source: &str) {
        self.saved.fetch_add(1, Ordering::Relaxed);
        self.push_decision(
            DecisionKind::Saved {
                filename: filename.to_string(),
            },
            source,
        );
    }

    /// Appends an error. Messages are stripped of control characters and
    /// truncated. The decision log gets a copy.
    pub fn record_error(&self, context: impl Into<String>, message: impl AsRef<str>) {
        let error = RecordedError {
            context: context.into(),
            message: sanitize_and_truncate_error_message(message.as_ref()),
        };
        self.push_decision(
            DecisionKind::Failed {
                message: error.message.clone(),
            },
            &error.context,
        );
        lock(&self.errors).push(error);
    }

    /// A consistent view for reporting. Call after collectors have finished.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let skipped = self
            .skipped
            .iter()
            .map(|(reason, count)| (*reason, count.load(Ordering::SeqCst)))
            .collect();
        LedgerSnapshot {
            skipped,
            saved: self.saved.load(Ordering::SeqCst),
            claimed: lock(&self.seen).len(),
            errors: lock(&self.errors).clone(),
            decisions: self
                .decisions
                .as_ref()
                .map(|d| lock(d).clone())
                .unwrap_or_default(),
        }
    }

    fn push_decision(&self, kind: DecisionKind, source: &str) {
        if let Some(decisions) = &self.decisions {
            lock(decisions).push(Decision {
                at: Utc::now(),
                kind,
                source: source.to_string(),
            });
        }
    }
}

/// Poisoning is ignored: every critical section leaves its data consistent.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_ledger_is_empty() {
        let snapshot = CollectionLedger::new().snapshot();
        for reason in SkipReason::iter() {
            assert_eq!(snapshot.skip_count(reason), 0);
        }
        assert_eq!(snapshot.saved, 0);
        assert_eq!(snapshot.claimed, 0);
        assert!(snapshot.errors.is_empty());
        assert!(snapshot.decisions.is_empty());
    }

    #[test]
    fn test_try_claim_first_claimant_wins() {
        let ledger = CollectionLedger::new();
        assert!(ledger.try_claim("abc"));
        assert!(!ledger.try_claim("abc"));
        assert!(ledger.try_claim("def"));
        assert!(ledger.is_claimed("abc"));
        assert_eq!(ledger.snapshot().claimed, 2);
    }

    #[test]
    fn test_try_claim_is_exclusive_across_threads() {
        let ledger = Arc::new(CollectionLedger::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    (0..100)
                        .filter(|i| ledger.try_claim(&format!("fp-{i}")))
                        .count()
                })
            })
            .collect();
        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().expect("claim thread panicked"))
            .sum();
        assert_eq!(wins, 100);
    }

    #[test]
    fn test_record_skip_counts_per_reason() {
        let ledger = CollectionLedger::new();
        ledger.record_skip(SkipReason::TooSmall, "a");
        ledger.record_skip(SkipReason::TooSmall, "b");
        ledger.record_skip(SkipReason::Duplicate, "c");

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.skip_count(SkipReason::TooSmall), 2);
        assert_eq!(snapshot.skip_count(SkipReason::Duplicate), 1);
        assert_eq!(snapshot.skip_count(SkipReason::Uninteresting), 0);
        assert_eq!(snapshot.total_skipped(), 3);
        // No decision log unless asked for
        assert!(snapshot.decisions.is_empty());
    }

    #[test]
    fn test_record_error_is_ordered_and_sanitized() {
        let ledger = CollectionLedger::new();
        ledger.record_error("first", "boom\x07");
        ledger.record_error("second", "bang");

        let errors = ledger.snapshot().errors;
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].context, "first");
        assert_eq!(errors[0].message, "boom");
        assert_eq!(errors[1].to_string(), "second - bang");
    }

    #[test]
    fn test_decision_log_records_saves_and_skips() {
        let ledger = CollectionLedger::with_decision_log();
        ledger.record_saved("example.com_app_12345678.js", "https://example.com/app.js");
        ledger.record_skip(SkipReason::Uninteresting, "inline:example.com");
        ledger.record_error("Download error: https://example.com/gone.js", "HTTP 500");

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.saved, 1);
        assert_eq!(snapshot.decisions.len(), 3);
        assert!(matches!(
            snapshot.decisions[0].kind,
            DecisionKind::Saved { .. }
        ));
        assert_eq!(
            snapshot.decisions[1].kind,
            DecisionKind::Skipped(SkipReason::Uninteresting)
        );
        assert_eq!(
            snapshot.decisions[2].kind,
            DecisionKind::Failed {
                message: "HTTP 500".into()
            }
        );
        assert_eq!(
            snapshot.decisions[2].source,
            "Download error: https://example.com/gone.js"
        );
    }
}
