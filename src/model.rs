use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client-side configuration for talking to the SportsEdit backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// No timeout by default: a hung request stays in flight until the
    /// transport gives up on its own.
    #[serde(default, with = "humantime_serde")]
    pub request_timeout: Option<Duration>,
}

/// Which workflow the dashboard is showing. Lives for the whole session;
/// switching never touches the other mode's stored results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Draft,
    Eval,
}

impl Mode {
    pub fn title(self) -> &'static str {
        match self {
            Mode::Draft => "Newsroom",
            Mode::Eval => "Evaluation Lab",
        }
    }
}

/// Game category filter for batch evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    All,
    Regular,
    Playoff,
}

impl GameType {
    pub fn label(self) -> &'static str {
        match self {
            GameType::All => "Mixed (All)",
            GameType::Regular => "Regular Season",
            GameType::Playoff => "Playoffs (High Stakes)",
        }
    }

    /// Cycle through the variants in UI order.
    pub fn next(self) -> Self {
        match self {
            GameType::All => GameType::Regular,
            GameType::Regular => GameType::Playoff,
            GameType::Playoff => GameType::All,
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GameType::All => "all",
            GameType::Regular => "regular",
            GameType::Playoff => "playoff",
        })
    }
}

/// Jury verdict on a drafted article. The backend sends "PASS"/"FAIL";
/// anything else (including a missing field) decodes as Unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[default]
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "PASS" => Verdict::Pass,
            "FAIL" => Verdict::Fail,
            _ => Verdict::Unknown,
        })
    }
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

/// Body for `POST /draft`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRequest {
    pub game_id: String,
}

/// Body for `POST /evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRequest {
    pub batch_size: u32,
    pub iterations: u32,
    pub game_type: GameType,
}

/// One completed single-draft run as returned by the backend.
///
/// `status` is authoritative regardless of how many `errors` entries are
/// present; an empty `errors` with a Pass verdict is a unanimous pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResult {
    #[serde(default)]
    pub game_id: String,
    pub draft: String,
    pub execution_time: f64,
    #[serde(default)]
    pub status: Verdict,
    #[serde(default)]
    pub revisions: u32,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub stats_context: Option<String>,
}

/// One row of a batch evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRunEntry {
    pub game_id: String,
    pub iteration: u32,
    pub status: Verdict,
    #[serde(default)]
    pub revisions: u32,
    pub duration: f64,
    #[serde(default)]
    pub cost_est: Option<f64>,
}

/// A fully-formed batch evaluation result.
///
/// `total_duration` is wall-clock time for the whole batch, not the sum of
/// per-run durations; upstream may overlap runs, so it is treated as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalResult {
    pub total_runs: u32,
    pub total_duration: f64,
    pub results: Vec<EvalRunEntry>,
    #[serde(default)]
    pub games_processed: Vec<String>,
}

/// Events emitted by the run controller and consumed by presentation layers.
///
/// Each completion carries the sequence number of the request that produced
/// it so the session state can discard anything stale.
#[derive(Debug, Clone)]
pub enum RunEvent {
    DraftCompleted { seq: u64, result: Box<DraftResult> },
    DraftFailed { seq: u64, message: String },
    EvalCompleted { seq: u64, result: Box<EvalResult> },
    EvalFailed { seq: u64, message: String },
    Health { online: bool },
    Info(String),
}

/// RFC3339 timestamp for stamping completed runs.
pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "now".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_decodes_pass_fail_and_unknown() {
        assert_eq!(
            serde_json::from_str::<Verdict>("\"PASS\"").unwrap(),
            Verdict::Pass
        );
        assert_eq!(
            serde_json::from_str::<Verdict>("\"FAIL\"").unwrap(),
            Verdict::Fail
        );
        assert_eq!(
            serde_json::from_str::<Verdict>("\"REVISE\"").unwrap(),
            Verdict::Unknown
        );
    }

    #[test]
    fn draft_result_tolerates_missing_optional_fields() {
        let r: DraftResult = serde_json::from_str(
            r#"{"draft": "Lakers win.", "execution_time": 45.2}"#,
        )
        .unwrap();
        assert_eq!(r.status, Verdict::Unknown);
        assert_eq!(r.revisions, 0);
        assert!(r.errors.is_empty());
        assert!(r.stats_context.is_none());
    }

    #[test]
    fn game_type_wire_strings_are_lowercase() {
        assert_eq!(serde_json::to_string(&GameType::Playoff).unwrap(), "\"playoff\"");
        assert_eq!(serde_json::to_string(&GameType::All).unwrap(), "\"all\"");
    }
}
