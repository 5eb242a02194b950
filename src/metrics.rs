//! ROI and batch-statistics derivation.
//!
//! Everything here is a pure function of a completed result plus the fixed
//! human-baseline cost model; derived values are recomputed on every access
//! rather than cached.

use crate::model::{DraftResult, EvalResult, Verdict};
use serde::Serialize;

/// Baseline time for a human to write one article: 15 minutes.
pub const HUMAN_TIME_SECONDS: f64 = 900.0;
/// Baseline hourly rate for that human.
pub const HUMAN_COST_PER_HOUR: f64 = 60.0;

/// ROI for a single draft run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DraftRoi {
    /// Baseline minus actual; negative when automation was slower.
    pub time_saved_seconds: f64,
    /// Fixed human labor avoided per article, independent of execution time.
    pub cost_saved_dollars: f64,
}

/// ROI plus aggregate statistics for a batch evaluation.
///
/// Rates and throughput are `None` when their denominator is zero; callers
/// render that as "N/A" instead of propagating infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalRoi {
    pub total_human_time_seconds: f64,
    pub time_saved_seconds: f64,
    pub cost_saved_dollars: f64,
    /// Share of runs needing zero revisions, rounded to the nearest percent.
    pub safety_rate_percent: Option<u32>,
    /// Share of runs with a PASS verdict, rounded to the nearest percent.
    pub pass_rate_percent: Option<u32>,
    pub throughput_per_minute: Option<f64>,
}

pub fn draft_roi(d: &DraftResult) -> DraftRoi {
    DraftRoi {
        time_saved_seconds: HUMAN_TIME_SECONDS - d.execution_time,
        cost_saved_dollars: (HUMAN_TIME_SECONDS / 3600.0) * HUMAN_COST_PER_HOUR,
    }
}

pub fn eval_roi(e: &EvalResult) -> EvalRoi {
    let total_human_time_seconds = e.total_runs as f64 * HUMAN_TIME_SECONDS;
    let rate = |count: usize| -> Option<u32> {
        if e.total_runs == 0 {
            None
        } else {
            Some((100.0 * count as f64 / e.total_runs as f64).round() as u32)
        }
    };
    let safe = e.results.iter().filter(|r| r.revisions == 0).count();
    let passed = e
        .results
        .iter()
        .filter(|r| r.status == Verdict::Pass)
        .count();
    let throughput_per_minute = if e.total_duration == 0.0 {
        None
    } else {
        Some(e.total_runs as f64 / (e.total_duration / 60.0))
    };

    EvalRoi {
        total_human_time_seconds,
        time_saved_seconds: total_human_time_seconds - e.total_duration,
        cost_saved_dollars: (total_human_time_seconds / 3600.0) * HUMAN_COST_PER_HOUR,
        safety_rate_percent: rate(safe),
        pass_rate_percent: rate(passed),
        throughput_per_minute,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EvalRunEntry;

    fn draft(execution_time: f64) -> DraftResult {
        DraftResult {
            game_id: "22200477".into(),
            draft: "The Celtics held on in the fourth.".into(),
            execution_time,
            status: Verdict::Pass,
            revisions: 0,
            errors: Vec::new(),
            stats_context: None,
        }
    }

    fn entry(game_id: &str, status: Verdict, revisions: u32, duration: f64) -> EvalRunEntry {
        EvalRunEntry {
            game_id: game_id.into(),
            iteration: 1,
            status,
            revisions,
            duration,
            cost_est: None,
        }
    }

    #[test]
    fn fast_draft_saves_time() {
        let roi = draft_roi(&draft(45.2));
        assert!((roi.time_saved_seconds - 854.8).abs() < 1e-9);
        assert!(roi.time_saved_seconds > 0.0);
    }

    #[test]
    fn slow_draft_goes_negative_unclamped() {
        let roi = draft_roi(&draft(1000.0));
        assert!((roi.time_saved_seconds - (-100.0)).abs() < 1e-9);
    }

    #[test]
    fn draft_cost_saved_is_always_fifteen_dollars() {
        for t in [0.0, 45.2, 900.0, 5000.0] {
            assert!((draft_roi(&draft(t)).cost_saved_dollars - 15.0).abs() < 1e-9);
        }
    }

    #[test]
    fn eval_batch_rates_and_throughput() {
        // Three runs in 120s wall-clock: 2/3 pass, 2/3 untouched by revisions.
        let e = EvalResult {
            total_runs: 3,
            total_duration: 120.0,
            results: vec![
                entry("a", Verdict::Pass, 0, 40.0),
                entry("b", Verdict::Fail, 2, 50.0),
                entry("c", Verdict::Pass, 0, 30.0),
            ],
            games_processed: vec!["a".into(), "b".into(), "c".into()],
        };
        let roi = eval_roi(&e);
        assert_eq!(roi.safety_rate_percent, Some(67));
        assert_eq!(roi.pass_rate_percent, Some(67));
        assert!((roi.throughput_per_minute.unwrap() - 1.5).abs() < 1e-9);
        assert!((roi.total_human_time_seconds - 2700.0).abs() < 1e-9);
        assert!((roi.time_saved_seconds - 2580.0).abs() < 1e-9);
        assert!((roi.cost_saved_dollars - 45.0).abs() < 1e-9);
    }

    #[test]
    fn zero_runs_yields_na_rates() {
        let e = EvalResult {
            total_runs: 0,
            total_duration: 0.0,
            results: vec![],
            games_processed: vec![],
        };
        let roi = eval_roi(&e);
        assert_eq!(roi.safety_rate_percent, None);
        assert_eq!(roi.pass_rate_percent, None);
        assert_eq!(roi.throughput_per_minute, None);
        assert_eq!(roi.time_saved_seconds, 0.0);
    }

    #[test]
    fn zero_duration_guards_throughput_only() {
        let e = EvalResult {
            total_runs: 2,
            total_duration: 0.0,
            results: vec![
                entry("a", Verdict::Pass, 0, 0.0),
                entry("b", Verdict::Pass, 1, 0.0),
            ],
            games_processed: vec![],
        };
        let roi = eval_roi(&e);
        assert_eq!(roi.throughput_per_minute, None);
        assert_eq!(roi.safety_rate_percent, Some(50));
        assert_eq!(roi.pass_rate_percent, Some(100));
    }

    #[test]
    fn rates_stay_within_percent_bounds() {
        let e = EvalResult {
            total_runs: 4,
            total_duration: 10.0,
            results: vec![
                entry("a", Verdict::Fail, 1, 2.0),
                entry("b", Verdict::Fail, 3, 3.0),
                entry("c", Verdict::Fail, 1, 2.0),
                entry("d", Verdict::Fail, 2, 3.0),
            ],
            games_processed: vec![],
        };
        let roi = eval_roi(&e);
        assert_eq!(roi.safety_rate_percent, Some(0));
        assert_eq!(roi.pass_rate_percent, Some(0));
    }
}
