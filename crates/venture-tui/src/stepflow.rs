//! Guided step-flow machinery shared by the business plan, the pitch deck
//! and the funding application views.
//!
//! A flow owns a local clone of its seed steps (hydrated once, never
//! written back), an accordion with at most one step expanded, a per-step
//! fill-in mode, and the simulated assistant draft: a cancellable deferred
//! write that must be suppressed if its target step is no longer the
//! active one when the timer fires.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use venture_core::drafts::DraftTable;
use venture_core::types::{Step, StepKind, StepStatus};

// ---------------------------------------------------------------------------
// StepMode
// ---------------------------------------------------------------------------

/// How the user is currently filling in a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepMode {
    #[default]
    Idle,
    Manual,
    Assistant,
}

// ---------------------------------------------------------------------------
// PendingDraft
// ---------------------------------------------------------------------------

/// A scheduled assistant draft. The write only lands if, at the deadline,
/// the originating step is still open and still in assistant mode.
#[derive(Debug, Clone)]
pub struct PendingDraft {
    pub step_id: String,
    pub deadline: Instant,
}

// ---------------------------------------------------------------------------
// StepFlow
// ---------------------------------------------------------------------------

pub struct StepFlow {
    steps: Vec<Step>,
    open: Option<String>,
    modes: HashMap<String, StepMode>,
    drafts: DraftTable,
    draft_done: HashSet<String>,
    pending: Option<PendingDraft>,
    delay: Duration,
}

impl StepFlow {
    pub fn new(steps: Vec<Step>, drafts: DraftTable, delay: Duration) -> Self {
        Self {
            steps,
            open: None,
            modes: HashMap::new(),
            drafts,
            draft_done: HashSet::new(),
            pending: None,
            delay,
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn open_step_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.as_deref() == Some(id)
    }

    pub fn mode(&self, id: &str) -> StepMode {
        self.modes.get(id).copied().unwrap_or_default()
    }

    pub fn draft_applied(&self, id: &str) -> bool {
        self.draft_done.contains(id)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Phase labels in first-seen order, for grouped rendering.
    pub fn phases(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for s in &self.steps {
            if !out.iter().any(|p| p == &s.phase) {
                out.push(s.phase.clone());
            }
        }
        out
    }

    pub fn complete_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Complete)
            .count()
    }

    /// Toggle a step's accordion state. Opening a step closes the previous
    /// one (single-expansion) and cancels any draft scheduled for it;
    /// closing a step cancels its own pending draft.
    pub fn toggle(&mut self, id: &str) {
        if self.step(id).is_none() {
            return;
        }
        if self.is_open(id) {
            self.open = None;
            self.cancel_pending_for(id);
        } else {
            if let Some(prev) = self.open.take() {
                self.cancel_pending_for(&prev);
            }
            self.open = Some(id.to_string());
        }
    }

    /// Close whatever is open and drop any in-flight draft. Used when the
    /// surrounding view switches away.
    pub fn close(&mut self) {
        if let Some(p) = self.pending.take() {
            tracing::debug!(step = %p.step_id, "draft cancelled: view closed");
        }
        self.open = None;
    }

    pub fn set_mode(&mut self, id: &str, mode: StepMode) {
        if self.step(id).is_some() {
            self.modes.insert(id.to_string(), mode);
        }
    }

    /// Begin a simulated assistant draft for the open step. Restarting
    /// replaces any previously scheduled draft.
    pub fn start_draft(&mut self, id: &str, now: Instant) -> bool {
        let Some(step) = self.step(id) else {
            return false;
        };
        if step.kind == StepKind::Smart || !self.is_open(id) {
            return false;
        }
        self.modes.insert(id.to_string(), StepMode::Assistant);
        self.draft_done.remove(id);
        self.pending = Some(PendingDraft {
            step_id: id.to_string(),
            deadline: now + self.delay,
        });
        tracing::debug!(step = %id, delay_ms = self.delay.as_millis() as u64, "assistant draft scheduled");
        true
    }

    /// Poll the draft timer. Returns the id of the step a draft was
    /// applied to, if one landed this tick. A draft whose step has been
    /// closed, or whose mode left assistant, is discarded without
    /// touching any field.
    pub fn tick(&mut self, now: Instant) -> Option<String> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        let id = pending.step_id;
        if !self.is_open(&id) || self.mode(&id) != StepMode::Assistant {
            tracing::debug!(step = %id, "draft discarded: step no longer active");
            return None;
        }
        self.apply_draft(&id);
        self.draft_done.insert(id.clone());
        tracing::debug!(step = %id, "assistant draft applied");
        Some(id)
    }

    /// Overwrite fields that have canned text for this step; fields (and
    /// step ids) without a matching record keep their previous value.
    fn apply_draft(&mut self, id: &str) {
        let Some(record) = self.drafts.get(id) else {
            return;
        };
        if let Some(step) = self.steps.iter_mut().find(|s| s.id == id) {
            for field in &mut step.fields {
                if let Some((_, text)) = record.iter().find(|(k, _)| k == &field.key) {
                    field.value = text.clone();
                }
            }
        }
    }

    /// Edit one field of a non-smart step. Puts the step into manual mode
    /// when no mode was picked yet.
    pub fn set_field(&mut self, id: &str, key: &str, value: &str) -> bool {
        let mode = self.mode(id);
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if step.kind == StepKind::Smart {
            return false;
        }
        let Some(field) = step.fields.iter_mut().find(|f| f.key == key) else {
            return false;
        };
        field.value = value.to_string();
        if mode == StepMode::Idle {
            self.modes.insert(id.to_string(), StepMode::Manual);
        }
        true
    }

    /// Mark a step complete.
    pub fn save(&mut self, id: &str) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if step.kind == StepKind::Smart {
            return false;
        }
        step.status = StepStatus::Complete;
        true
    }

    fn cancel_pending_for(&mut self, id: &str) {
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.step_id == id)
        {
            self.pending = None;
            tracing::debug!(step = %id, "draft cancelled: step closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use venture_core::{drafts, seed};

    fn flow() -> StepFlow {
        StepFlow::new(
            seed::plan_steps(),
            drafts::plan_drafts(),
            Duration::from_millis(1200),
        )
    }

    fn field_value(flow: &StepFlow, step: &str, key: &str) -> String {
        flow.step(step)
            .unwrap()
            .fields
            .iter()
            .find(|f| f.key == key)
            .unwrap()
            .value
            .clone()
    }

    #[test]
    fn accordion_single_expansion() {
        let mut f = flow();
        f.toggle("pb-1");
        assert!(f.is_open("pb-1"));
        f.toggle("pb-2");
        assert!(f.is_open("pb-2"));
        assert!(!f.is_open("pb-1"));
        assert_eq!(f.open_step_id(), Some("pb-2"));
    }

    #[test]
    fn toggle_same_step_closes_it() {
        let mut f = flow();
        f.toggle("pb-1");
        f.toggle("pb-1");
        assert_eq!(f.open_step_id(), None);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut f = flow();
        f.toggle("pb-99");
        assert_eq!(f.open_step_id(), None);
    }

    #[test]
    fn draft_applies_after_delay() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-5");
        assert!(f.start_draft("pb-5", t0));

        // Not yet due.
        assert_eq!(f.tick(t0 + Duration::from_millis(500)), None);
        assert_eq!(field_value(&f, "pb-5", "founders"), "");

        // pb-5 has no draft record, so the landing draft changes nothing
        // but still counts as applied.
        assert_eq!(
            f.tick(t0 + Duration::from_millis(1300)),
            Some("pb-5".to_string())
        );
        assert_eq!(field_value(&f, "pb-5", "founders"), "");
    }

    #[test]
    fn draft_overwrites_only_matching_fields() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-8");
        f.set_field("pb-8", "timeline", "File by end of March");
        f.start_draft("pb-8", t0);
        f.tick(t0 + Duration::from_secs(2));

        // The pb-8 record covers only the licensing field.
        assert!(field_value(&f, "pb-8", "licenses").contains("food service permit"));
        assert_eq!(field_value(&f, "pb-8", "timeline"), "File by end of March");
    }

    #[test]
    fn draft_suppressed_when_step_closed() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-1");
        let before = field_value(&f, "pb-1", "icp");
        f.start_draft("pb-1", t0);
        f.toggle("pb-1"); // close before the delay elapses
        assert!(!f.has_pending());
        assert_eq!(f.tick(t0 + Duration::from_secs(2)), None);
        assert_eq!(field_value(&f, "pb-1", "icp"), before);
    }

    #[test]
    fn draft_suppressed_when_other_step_opened() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-1");
        let before = field_value(&f, "pb-1", "icp");
        f.start_draft("pb-1", t0);
        f.toggle("pb-2"); // single-expansion closes pb-1 and cancels its draft
        assert_eq!(f.tick(t0 + Duration::from_secs(2)), None);
        assert_eq!(field_value(&f, "pb-1", "icp"), before);
    }

    #[test]
    fn draft_suppressed_when_view_closes() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-2");
        f.start_draft("pb-2", t0);
        f.close();
        assert!(!f.has_pending());
        assert_eq!(f.tick(t0 + Duration::from_secs(2)), None);
    }

    #[test]
    fn switching_to_manual_mode_discards_landing_draft() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-1");
        let before = field_value(&f, "pb-1", "icp");
        f.start_draft("pb-1", t0);
        f.set_mode("pb-1", StepMode::Manual);
        assert_eq!(f.tick(t0 + Duration::from_secs(2)), None);
        assert_eq!(field_value(&f, "pb-1", "icp"), before);
    }

    #[test]
    fn restarting_draft_replaces_pending() {
        let mut f = flow();
        let t0 = Instant::now();
        f.toggle("pb-1");
        f.start_draft("pb-1", t0);
        f.start_draft("pb-1", t0 + Duration::from_millis(600));
        // Original deadline passes without firing.
        assert_eq!(f.tick(t0 + Duration::from_millis(1300)), None);
        // Replacement deadline fires.
        assert_eq!(
            f.tick(t0 + Duration::from_millis(1900)),
            Some("pb-1".to_string())
        );
    }

    #[test]
    fn smart_steps_reject_edits_and_drafts() {
        let mut f = flow();
        f.toggle("pb-7");
        assert!(!f.start_draft("pb-7", Instant::now()));
        assert!(!f.set_field("pb-7", "anything", "value"));
        assert!(!f.save("pb-7"));
    }

    #[test]
    fn save_marks_complete() {
        let mut f = flow();
        let before = f.complete_count();
        assert!(f.save("pb-5"));
        assert_eq!(f.complete_count(), before + 1);
    }

    #[test]
    fn phases_in_first_seen_order() {
        let f = flow();
        let phases = f.phases();
        assert_eq!(phases[0], "Brand Identity");
        assert_eq!(phases[1], "Customer & Offer");
        assert!(phases.contains(&"Go-to-Market".to_string()));
        // Two "Customer & Offer" steps collapse to one phase label.
        assert_eq!(
            phases.iter().filter(|p| *p == "Customer & Offer").count(),
            1
        );
    }
}
