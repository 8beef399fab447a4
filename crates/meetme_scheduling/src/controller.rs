//! Per-session slot selection state machine.
//!
//! The controller owns the busy set for the range the visitor is looking at, accepts or
//! silently rejects clicked slots, and tracks a single in-flight booking submission.

use chrono::{DateTime, Utc};
use meetme_common::{BoxedError, BusyInterval, CalendarService, SchedulingLink};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use crate::availability::first_conflict;
use crate::error::SchedulingError;
use crate::interval::{slot_end, Interval};
use crate::policy::{BusinessRules, RuleViolation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    id: u64,
    pending: bool,
}

impl SelectedSlot {
    /// A submission for this selection is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(SelectedSlot),
}

/// Why a clicked slot was not selected. The visitor is not shown this; it is for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Overlaps(BusyInterval),
    Rule(RuleViolation),
    /// The slot runs outside the range the busy set was fetched for.
    NotFetched(Interval),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Overlaps(busy) => write!(
                f,
                "slot overlaps '{}' ({} - {})",
                busy.label, busy.start, busy.end
            ),
            Rejection::Rule(violation) => write!(f, "{}", violation),
            Rejection::NotFetched(slot) => write!(
                f,
                "no busy data covers {} - {}",
                slot.start, slot.end
            ),
        }
    }
}

/// Handle for one busy-set fetch. Only the most recently issued request is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub range: Interval,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The busy set was replaced with this many intervals.
    Applied(usize),
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// The fetch failed; the previous busy set is kept.
    Failed(String),
}

/// Proof that a submission was started for a particular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    selection_id: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no slot is selected")]
    NothingSelected,
    #[error("a booking for this slot is already being submitted")]
    SubmissionPending,
}

#[derive(Debug, Clone)]
pub struct SlotSelectionController {
    rules: BusinessRules,
    duration_minutes: i64,
    busy: Vec<BusyInterval>,
    busy_range: Option<Interval>,
    state: SelectionState,
    latest_fetch: u64,
    next_selection_id: u64,
}

impl SlotSelectionController {
    pub fn new(rules: BusinessRules, duration_minutes: i64) -> Self {
        Self {
            rules,
            duration_minutes,
            busy: Vec::new(),
            busy_range: None,
            state: SelectionState::Idle,
            latest_fetch: 0,
            next_selection_id: 0,
        }
    }

    /// A controller whose slot length is the link's duration.
    pub fn for_link(rules: BusinessRules, link: &SchedulingLink) -> Self {
        Self::new(rules, link.duration_minutes)
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected(&self) -> Option<&SelectedSlot> {
        match &self.state {
            SelectionState::Selected(slot) => Some(slot),
            SelectionState::Idle => None,
        }
    }

    pub fn busy(&self) -> &[BusyInterval] {
        &self.busy
    }

    pub fn busy_range(&self) -> Option<Interval> {
        self.busy_range
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_minutes
    }

    pub fn rules(&self) -> &BusinessRules {
        &self.rules
    }

    /// Starts a fetch for the slots starting in `[start, end)`. Any earlier outstanding
    /// request becomes stale.
    ///
    /// The fetched range runs one slot duration past `end` so the last slots are covered.
    pub fn request_busy(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> FetchRequest {
        self.latest_fetch += 1;
        FetchRequest {
            range: Interval::new(start, slot_end(end, self.duration_minutes)),
            generation: self.latest_fetch,
        }
    }

    /// Applies a fetch result if it answers the latest request.
    ///
    /// The busy set is replaced wholesale on success and left untouched on failure.
    pub fn receive_busy<E: fmt::Display>(
        &mut self,
        request: FetchRequest,
        result: Result<Vec<BusyInterval>, E>,
    ) -> FetchOutcome {
        if request.generation != self.latest_fetch {
            debug!(
                "Dropping stale busy response for {} - {}",
                request.range.start, request.range.end
            );
            return FetchOutcome::Stale;
        }
        match result {
            Ok(busy) => {
                let count = busy.len();
                self.busy = busy;
                self.busy_range = Some(request.range);
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                warn!("Busy fetch failed, keeping previous busy set: {}", e);
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Fetches and applies the busy set for slots starting in `[start, end)` in one step.
    pub async fn refresh_busy(
        &mut self,
        calendar: &dyn CalendarService<Error = BoxedError>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FetchOutcome {
        let request = self.request_busy(start, end);
        let result = calendar
            .list_busy(request.range.start, request.range.end)
            .await;
        self.receive_busy(request, result)
    }

    /// Tries to select the slot starting at `start`.
    ///
    /// On success any previous selection is replaced. On rejection the state is unchanged.
    /// A slot not covered by the fetched busy range is rejected.
    pub fn select(
        &mut self,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<SelectedSlot, Rejection> {
        let candidate = Interval::slot(start, self.duration_minutes);
        if !self.busy_range.is_some_and(|range| range.covers(&candidate)) {
            let rejection = Rejection::NotFetched(candidate);
            debug!("Rejected selection at {}: {}", start, rejection);
            return Err(rejection);
        }
        if let Some(conflict) = first_conflict(start, self.duration_minutes, &self.busy) {
            let rejection = Rejection::Overlaps(conflict.clone());
            debug!("Rejected selection at {}: {}", start, rejection);
            return Err(rejection);
        }
        if let Err(violation) = self.rules.evaluate(start, now) {
            debug!("Rejected selection at {}: {}", start, violation);
            return Err(Rejection::Rule(violation));
        }

        self.next_selection_id += 1;
        let slot = SelectedSlot {
            start,
            end: slot_end(start, self.duration_minutes),
            id: self.next_selection_id,
            pending: false,
        };
        self.state = SelectionState::Selected(slot.clone());
        Ok(slot)
    }

    /// Drops the current selection. Results for its submission will be ignored.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Marks the current selection as being submitted.
    ///
    /// Fails while an earlier submission for the same selection has not completed.
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, SubmitError> {
        match &mut self.state {
            SelectionState::Idle => Err(SubmitError::NothingSelected),
            SelectionState::Selected(slot) if slot.pending => Err(SubmitError::SubmissionPending),
            SelectionState::Selected(slot) => {
                slot.pending = true;
                Ok(SubmissionTicket {
                    start: slot.start,
                    end: slot.end,
                    selection_id: slot.id,
                })
            }
        }
    }

    /// Records the outcome of a submission started with `ticket`.
    ///
    /// Success returns to `Idle`. Failure keeps the selection so the visitor can retry.
    /// Outcomes for a selection that was cancelled or replaced are ignored; the return
    /// value says whether the outcome was applied.
    pub fn complete_submission<T>(
        &mut self,
        ticket: SubmissionTicket,
        outcome: &Result<T, SchedulingError>,
    ) -> bool {
        let SelectionState::Selected(slot) = &mut self.state else {
            return false;
        };
        if slot.id != ticket.selection_id || !slot.pending {
            return false;
        }
        match outcome {
            Ok(_) => self.state = SelectionState::Idle,
            Err(e) => {
                debug!("Submission failed, keeping selection: {}", e);
                slot.pending = false;
            }
        }
        true
    }
}
