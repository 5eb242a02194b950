//! Session state container and transition rules.
//!
//! Per mode the lifecycle is Idle → Loading → {Success, Failure} → Idle; a
//! new start re-enters Loading and bumps that mode's sequence number. Every
//! completion event carries the sequence number of the request that produced
//! it, and anything stale is discarded, so only the most recent request's
//! outcome is ever visible.

use crate::model::{DraftResult, EvalResult, Mode, RunEvent};

/// State for the single-draft workflow.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    pub loading: bool,
    pub data: Option<DraftResult>,
    pub error: Option<String>,
    pub finished_at: Option<String>,
    seq: u64,
}

/// State for the batch-evaluation workflow.
#[derive(Debug, Clone, Default)]
pub struct EvalState {
    pub loading: bool,
    pub data: Option<EvalResult>,
    pub error: Option<String>,
    pub finished_at: Option<String>,
    seq: u64,
}

/// The whole dashboard session: the active mode plus both workflows' run
/// state. Both result sets persist independently across mode switches.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Mode,
    pub draft: DraftState,
    pub eval: EvalState,
    pub backend_online: Option<bool>,
    pub info: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            mode: Mode::Draft,
            draft: DraftState::default(),
            eval: EvalState::default(),
            backend_online: None,
            info: None,
        }
    }
}

impl Session {
    /// Pure mode swap; never cancels or clears either mode's run data.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Begin a draft run: clear the prior result and error, enter Loading,
    /// and return the sequence number the request must carry.
    pub fn begin_draft(&mut self) -> u64 {
        self.draft.seq += 1;
        self.draft.loading = true;
        self.draft.data = None;
        self.draft.error = None;
        self.draft.seq
    }

    /// Begin a batch evaluation: clear the prior batch and error, enter
    /// Loading, and return the sequence number the request must carry.
    pub fn begin_eval(&mut self) -> u64 {
        self.eval.seq += 1;
        self.eval.loading = true;
        self.eval.data = None;
        self.eval.error = None;
        self.eval.seq
    }

    /// Apply a controller event. Completions whose sequence number no longer
    /// matches the mode's current one are dropped.
    pub fn apply(&mut self, event: RunEvent) {
        match event {
            RunEvent::DraftCompleted { seq, result } => {
                if seq != self.draft.seq {
                    return;
                }
                self.draft.data = Some(*result);
                self.draft.error = None;
                self.draft.finished_at = Some(crate::model::now_rfc3339());
                self.draft.loading = false;
            }
            RunEvent::DraftFailed { seq, message } => {
                if seq != self.draft.seq {
                    return;
                }
                // Draft failures clear any previous article.
                self.draft.data = None;
                self.draft.error = Some(message);
                self.draft.loading = false;
            }
            RunEvent::EvalCompleted { seq, result } => {
                if seq != self.eval.seq {
                    return;
                }
                self.eval.data = Some(*result);
                self.eval.error = None;
                self.eval.finished_at = Some(crate::model::now_rfc3339());
                self.eval.loading = false;
            }
            RunEvent::EvalFailed { seq, message } => {
                if seq != self.eval.seq {
                    return;
                }
                // Unlike draft mode, a failed batch leaves any stored batch
                // result in place next to the error message.
                self.eval.error = Some(message);
                self.eval.loading = false;
            }
            RunEvent::Health { online } => {
                self.backend_online = Some(online);
            }
            RunEvent::Info(msg) => {
                self.info = Some(msg);
            }
        }
    }

    /// Whether the active mode has a request in flight. The triggering
    /// control must be disabled while this is true; overlapping starts in
    /// one mode are not otherwise prevented.
    pub fn active_loading(&self) -> bool {
        match self.mode {
            Mode::Draft => self.draft.loading,
            Mode::Eval => self.eval.loading,
        }
    }

    /// Articles produced in the active mode, for the header card.
    pub fn articles_produced(&self) -> u32 {
        match self.mode {
            Mode::Draft => u32::from(self.draft.data.is_some()),
            Mode::Eval => self.eval.data.as_ref().map_or(0, |e| e.total_runs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvalRunEntry, Verdict};

    fn draft_result(game_id: &str) -> DraftResult {
        DraftResult {
            game_id: game_id.into(),
            draft: "Warriors by twelve.".into(),
            execution_time: 45.2,
            status: Verdict::Pass,
            revisions: 0,
            errors: Vec::new(),
            stats_context: None,
        }
    }

    fn eval_result() -> EvalResult {
        EvalResult {
            total_runs: 1,
            total_duration: 40.0,
            results: vec![EvalRunEntry {
                game_id: "a".into(),
                iteration: 1,
                status: Verdict::Pass,
                revisions: 0,
                duration: 40.0,
                cost_est: None,
            }],
            games_processed: vec!["a".into()],
        }
    }

    #[test]
    fn draft_success_path() {
        let mut s = Session::default();
        let seq = s.begin_draft();
        assert!(s.draft.loading);
        assert!(s.draft.data.is_none() && s.draft.error.is_none());

        s.apply(RunEvent::DraftCompleted {
            seq,
            result: Box::new(draft_result("22200477")),
        });
        assert!(!s.draft.loading);
        assert!(s.draft.data.is_some());
        assert!(s.draft.error.is_none());
    }

    #[test]
    fn draft_failure_clears_previous_article() {
        let mut s = Session::default();
        let seq = s.begin_draft();
        s.apply(RunEvent::DraftCompleted {
            seq,
            result: Box::new(draft_result("1")),
        });

        let seq = s.begin_draft();
        // Old result already gone the moment the new run starts.
        assert!(s.draft.data.is_none());
        s.apply(RunEvent::DraftFailed {
            seq,
            message: "invalid game_id".into(),
        });
        assert_eq!(s.draft.error.as_deref(), Some("invalid game_id"));
        assert!(s.draft.data.is_none());
        assert!(!s.draft.loading);
    }

    #[test]
    fn never_both_old_result_and_new_error() {
        let mut s = Session::default();
        let seq = s.begin_draft();
        s.apply(RunEvent::DraftFailed {
            seq,
            message: "boom".into(),
        });
        let _ = s.begin_draft();
        // Starting again clears the error before anything new lands.
        assert!(s.draft.error.is_none());
        assert!(s.draft.data.is_none());
        assert!(s.draft.loading);
    }

    #[test]
    fn eval_failure_preserves_stored_batch() {
        let mut s = Session::default();
        // A batch result is on screen while a retry fails mid-flight.
        s.eval.data = Some(eval_result());
        s.eval.loading = true;
        s.apply(RunEvent::EvalFailed {
            seq: 0,
            message: "backend busy".into(),
        });
        assert!(s.eval.data.is_some());
        assert_eq!(s.eval.error.as_deref(), Some("backend busy"));
        assert!(!s.eval.loading);
    }

    #[test]
    fn stale_draft_completion_is_discarded() {
        let mut s = Session::default();
        let old_seq = s.begin_draft();
        let new_seq = s.begin_draft();
        assert_ne!(old_seq, new_seq);

        // The older request resolves after the newer one was issued.
        s.apply(RunEvent::DraftCompleted {
            seq: old_seq,
            result: Box::new(draft_result("stale")),
        });
        assert!(s.draft.data.is_none());
        assert!(s.draft.loading);

        s.apply(RunEvent::DraftCompleted {
            seq: new_seq,
            result: Box::new(draft_result("fresh")),
        });
        assert_eq!(s.draft.data.as_ref().unwrap().game_id, "fresh");
        assert!(!s.draft.loading);
    }

    #[test]
    fn stale_eval_failure_is_discarded() {
        let mut s = Session::default();
        let old_seq = s.begin_eval();
        let new_seq = s.begin_eval();
        s.apply(RunEvent::EvalFailed {
            seq: old_seq,
            message: "late transport error".into(),
        });
        assert!(s.eval.error.is_none());
        assert!(s.eval.loading);

        s.apply(RunEvent::EvalCompleted {
            seq: new_seq,
            result: Box::new(eval_result()),
        });
        assert!(s.eval.data.is_some());
    }

    #[test]
    fn mode_switch_touches_neither_result() {
        let mut s = Session::default();
        let dseq = s.begin_draft();
        s.apply(RunEvent::DraftCompleted {
            seq: dseq,
            result: Box::new(draft_result("1")),
        });
        let eseq = s.begin_eval();
        s.apply(RunEvent::EvalCompleted {
            seq: eseq,
            result: Box::new(eval_result()),
        });

        s.set_mode(Mode::Eval);
        s.set_mode(Mode::Draft);
        s.set_mode(Mode::Eval);
        assert!(s.draft.data.is_some());
        assert!(s.eval.data.is_some());
        assert!(s.draft.error.is_none() && s.eval.error.is_none());
    }

    #[test]
    fn loading_flags_are_independent_across_modes() {
        let mut s = Session::default();
        let _ = s.begin_draft();
        assert!(s.draft.loading && !s.eval.loading);
        let _ = s.begin_eval();
        assert!(s.draft.loading && s.eval.loading);
        assert!(s.active_loading());
        s.set_mode(Mode::Eval);
        assert!(s.active_loading());
    }

    #[test]
    fn articles_produced_follows_active_mode() {
        let mut s = Session::default();
        assert_eq!(s.articles_produced(), 0);
        let dseq = s.begin_draft();
        s.apply(RunEvent::DraftCompleted {
            seq: dseq,
            result: Box::new(draft_result("1")),
        });
        assert_eq!(s.articles_produced(), 1);
        s.set_mode(Mode::Eval);
        assert_eq!(s.articles_produced(), 0);
        let eseq = s.begin_eval();
        s.apply(RunEvent::EvalCompleted {
            seq: eseq,
            result: Box::new(eval_result()),
        });
        assert_eq!(s.articles_produced(), 1);
    }
}
