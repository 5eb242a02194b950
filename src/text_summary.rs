//! Text summary builder for CLI output.
//!
//! Formats a completed run and its derived ROI as human-readable lines for
//! text mode; the TUI renders the same information with widgets instead.

use crate::metrics;
use crate::model::{DraftResult, EvalResult};

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

fn fmt_rate(rate: Option<u32>) -> String {
    match rate {
        Some(p) => format!("{p}%"),
        None => "N/A".into(),
    }
}

/// Build a text summary for a single draft run.
pub(crate) fn build_draft_summary(result: &DraftResult) -> TextSummary {
    let roi = metrics::draft_roi(result);
    let mut lines = Vec::new();

    if !result.game_id.is_empty() {
        lines.push(format!("Game: {}", result.game_id));
    }
    lines.push(format!("Verdict: {}", result.status.as_str()));
    lines.push(format!("Revisions: {}", result.revisions));
    if result.errors.is_empty() {
        lines.push("Jury feedback: unanimous pass".into());
    } else {
        lines.push("Jury feedback:".into());
        for err in &result.errors {
            lines.push(format!("  - {err}"));
        }
    }
    lines.push(format!("Execution time: {:.2}s", result.execution_time));
    lines.push(format!(
        "Time saved vs human: {:.1} min",
        roi.time_saved_seconds / 60.0
    ));
    lines.push(format!("Est. cost saved: ${:.2}", roi.cost_saved_dollars));
    lines.push(String::new());
    lines.push(result.draft.clone());

    TextSummary { lines }
}

/// Build a text summary for a batch evaluation run.
pub(crate) fn build_eval_summary(result: &EvalResult) -> TextSummary {
    let roi = metrics::eval_roi(result);
    let mut lines = Vec::new();

    lines.push(format!(
        "Batch: {} run(s) in {:.1}s",
        result.total_runs, result.total_duration
    ));
    lines.push(format!("Pass rate:   {}", fmt_rate(roi.pass_rate_percent)));
    lines.push(format!("Safety rate: {}", fmt_rate(roi.safety_rate_percent)));
    lines.push(format!(
        "Throughput:  {}",
        match roi.throughput_per_minute {
            Some(t) => format!("{t:.1} art/min"),
            None => "N/A".into(),
        }
    ));
    lines.push(format!(
        "Time saved vs human: {:.1} min",
        roi.time_saved_seconds / 60.0
    ));
    lines.push(format!("Est. cost saved: ${:.2}", roi.cost_saved_dollars));
    lines.push(String::new());
    lines.push(format!(
        "{:<12} {:>4} {:>7} {:>9} {:>8}",
        "Game ID", "Iter", "Verdict", "Revisions", "Time"
    ));
    for r in &result.results {
        lines.push(format!(
            "{:<12} {:>4} {:>7} {:>9} {:>7.1}s",
            r.game_id,
            r.iteration,
            r.status.as_str(),
            r.revisions,
            r.duration
        ));
    }

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EvalRunEntry, Verdict};

    #[test]
    fn draft_summary_reports_unanimous_pass() {
        let r = DraftResult {
            game_id: "22200477".into(),
            draft: "Nuggets cruise at altitude.".into(),
            execution_time: 45.2,
            status: Verdict::Pass,
            revisions: 0,
            errors: Vec::new(),
            stats_context: None,
        };
        let summary = build_draft_summary(&r);
        assert!(summary.lines.contains(&"Verdict: PASS".to_string()));
        assert!(summary
            .lines
            .contains(&"Jury feedback: unanimous pass".to_string()));
        assert!(summary
            .lines
            .contains(&"Est. cost saved: $15.00".to_string()));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.starts_with("Time saved vs human: 14.2")));
    }

    #[test]
    fn draft_summary_lists_jury_feedback() {
        let r = DraftResult {
            game_id: "1".into(),
            draft: "x".into(),
            execution_time: 10.0,
            status: Verdict::Fail,
            revisions: 2,
            errors: vec!["wrong final score".into(), "hallucinated player".into()],
            stats_context: None,
        };
        let summary = build_draft_summary(&r);
        assert!(summary.lines.contains(&"  - wrong final score".to_string()));
        assert!(!summary
            .lines
            .contains(&"Jury feedback: unanimous pass".to_string()));
    }

    #[test]
    fn eval_summary_uses_na_sentinels() {
        let r = EvalResult {
            total_runs: 0,
            total_duration: 0.0,
            results: vec![],
            games_processed: vec![],
        };
        let summary = build_eval_summary(&r);
        assert!(summary.lines.contains(&"Pass rate:   N/A".to_string()));
        assert!(summary.lines.contains(&"Safety rate: N/A".to_string()));
        assert!(summary.lines.contains(&"Throughput:  N/A".to_string()));
    }

    #[test]
    fn eval_summary_has_one_row_per_run() {
        let r = EvalResult {
            total_runs: 2,
            total_duration: 90.0,
            results: vec![
                EvalRunEntry {
                    game_id: "a".into(),
                    iteration: 1,
                    status: Verdict::Pass,
                    revisions: 0,
                    duration: 40.0,
                    cost_est: None,
                },
                EvalRunEntry {
                    game_id: "b".into(),
                    iteration: 1,
                    status: Verdict::Fail,
                    revisions: 2,
                    duration: 50.0,
                    cost_est: None,
                },
            ],
            games_processed: vec![],
        };
        let summary = build_eval_summary(&r);
        let rows: Vec<_> = summary
            .lines
            .iter()
            .filter(|l| l.starts_with("a ") || l.starts_with("b "))
            .collect();
        assert_eq!(rows.len(), 2);
    }
}
