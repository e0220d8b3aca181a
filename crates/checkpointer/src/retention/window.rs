//! Bounded rolling window with milestone graduation.

use super::{CheckpointRecord, RetentionOutcome, RetentionPolicy};
use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

/// Keeps the `max_kept` most recent checkpoints and periodically graduates
/// an eviction candidate into a permanent milestone.
///
/// The window tracks records in creation order. When it overflows, the
/// oldest record is the eviction candidate. If a milestone interval is
/// configured and the candidate's save time is at least that interval
/// after the last milestone's save time, the candidate is preserved
/// instead of deleted: it leaves the window but its file stays on disk
/// permanently. The first candidate ever considered graduates
/// unconditionally, anchoring the milestone clock at the start of the run.
///
/// `max_kept == 0` disables retention entirely: nothing is ever pruned.
/// A zero interval graduates every candidate, which degenerates to
/// keeping everything; both are valid configurations.
#[derive(Debug)]
pub struct WindowedRetention {
    max_kept: usize,
    milestone_interval: Option<Duration>,
    kept: VecDeque<CheckpointRecord>,
    last_milestone_at: Option<SystemTime>,
    milestones: Vec<CheckpointRecord>,
}

impl WindowedRetention {
    pub fn new(max_kept: usize, milestone_interval: Option<Duration>) -> Self {
        Self {
            max_kept,
            milestone_interval,
            kept: VecDeque::new(),
            last_milestone_at: None,
            milestones: Vec::new(),
        }
    }

    /// Records currently inside the rolling window, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &CheckpointRecord> {
        self.kept.iter()
    }

    /// Records graduated out of the window, in graduation order.
    pub fn milestones(&self) -> &[CheckpointRecord] {
        &self.milestones
    }

    fn graduates(&self, candidate: &CheckpointRecord) -> bool {
        let Some(interval) = self.milestone_interval else {
            return false;
        };
        match self.last_milestone_at {
            None => true,
            Some(last) => candidate
                .created_at
                .duration_since(last)
                .map_or(false, |since| since >= interval),
        }
    }
}

impl RetentionPolicy for WindowedRetention {
    fn on_saved(&mut self, record: CheckpointRecord) -> RetentionOutcome {
        // Re-saving a stamp overwrites its file; the new record supersedes
        // the old one in the window so the path is never double-counted or
        // evicted out from under it.
        self.kept.retain(|r| r.stamp != record.stamp);
        self.kept.push_back(record);

        let mut outcome = RetentionOutcome::default();
        if self.max_kept == 0 {
            return outcome;
        }

        while self.kept.len() > self.max_kept {
            let Some(candidate) = self.kept.pop_front() else {
                break;
            };

            if self.graduates(&candidate) {
                self.last_milestone_at = Some(candidate.created_at);
                self.milestones.push(candidate.clone());
                outcome.graduated.push(candidate);
            } else {
                // A milestone stamp re-entering the window and getting
                // evicted means the caller re-saved a graduated stamp,
                // which is a programming error in this design.
                debug_assert!(
                    !self.milestones.iter().any(|m| m.stamp == candidate.stamp),
                    "eviction candidate {} is a milestone",
                    candidate.stamp
                );
                outcome.evicted.push(candidate);
            }
        }

        outcome
    }
}
