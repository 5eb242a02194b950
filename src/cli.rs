use crate::api::NewsroomClient;
use crate::controller::Session;
use crate::model::{ClientConfig, DraftRequest, EvalRequest, GameType, Mode, RunEvent};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sportsedit-cli",
    version,
    about = "SportsEdit newsroom dashboard with optional TUI"
)]
pub struct Cli {
    /// Base URL for the SportsEdit backend
    #[arg(long, default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Game ID to draft an article for
    #[arg(long, default_value = "22200477")]
    pub game_id: String,

    /// Run the batch evaluation workflow instead of a single draft
    #[arg(long)]
    pub eval: bool,

    /// Games per evaluation batch
    #[arg(long, default_value_t = 3)]
    pub batch_size: u32,

    /// Repetitions per game in an evaluation batch
    #[arg(long, default_value_t = 1)]
    pub iterations: u32,

    /// Game category filter for evaluation batches
    #[arg(long, value_enum, default_value_t = GameType::All)]
    pub game_type: GameType,

    /// Optional per-request timeout (e.g. 5m). Off by default: a hung
    /// request stays in flight until the transport fails.
    #[arg(long)]
    pub request_timeout: Option<humantime::Duration>,

    /// Print JSON result and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Run silently: suppress all output except errors (for cron usage)
    #[arg(long)]
    pub silent: bool,

    /// Probe the backend health endpoint and exit
    #[arg(long)]
    pub check: bool,
}

pub async fn run(args: Cli) -> Result<()> {
    // Validate that --silent can only be used with --json
    if args.silent && !args.json {
        return Err(anyhow::anyhow!(
            "--silent can only be used with --json. Use --silent --json together."
        ));
    }
    if !args.eval && args.game_id.trim().is_empty() {
        return Err(anyhow::anyhow!("--game-id must not be empty"));
    }

    if args.check {
        return run_check(&args).await;
    }

    if !args.json && !args.text && !args.silent {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_once(args).await;
        }
    }

    run_once(args).await
}

/// Build a `ClientConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> ClientConfig {
    ClientConfig {
        base_url: args.base_url.clone(),
        user_agent: format!("sportsedit-cli/{}", env!("CARGO_PKG_VERSION")),
        request_timeout: args.request_timeout.map(Into::into),
    }
}

/// Probe `GET /health` and report.
async fn run_check(args: &Cli) -> Result<()> {
    let cfg = build_config(args);
    let client = NewsroomClient::new(&cfg)?;
    if client.health().await {
        if !args.silent {
            println!("Backend online: {}", cfg.base_url);
        }
        Ok(())
    } else {
        Err(anyhow::anyhow!("backend unreachable: {}", cfg.base_url))
    }
}

/// Run a single workflow (draft or eval) to completion and print the result.
///
/// Non-TUI modes drive the backend client directly; the session state
/// container still owns the lifecycle so the transition rules are identical
/// to the dashboard's.
async fn run_once(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let client = NewsroomClient::new(&cfg)?;
    let mut session = Session::default();

    if args.eval {
        session.set_mode(Mode::Eval);
        let seq = session.begin_eval();
        let request = EvalRequest {
            batch_size: args.batch_size,
            iterations: args.iterations,
            game_type: args.game_type,
        };
        let event = match client.evaluate(&request).await {
            Ok(result) => RunEvent::EvalCompleted {
                seq,
                result: Box::new(result),
            },
            Err(e) => RunEvent::EvalFailed {
                seq,
                message: e.to_string(),
            },
        };
        session.apply(event);

        if let Some(msg) = session.eval.error.as_deref() {
            return Err(anyhow::anyhow!("evaluation failed: {msg}"));
        }
        let result = session
            .eval
            .data
            .as_ref()
            .context("evaluation finished without a result")?;
        if args.json {
            print_json(result, &serde_json::to_value(crate::metrics::eval_roi(result))?)?;
        } else if !args.silent {
            for line in crate::text_summary::build_eval_summary(result).lines {
                println!("{line}");
            }
        }
    } else {
        let seq = session.begin_draft();
        let request = DraftRequest {
            game_id: args.game_id.clone(),
        };
        let event = match client.draft(&request).await {
            Ok(result) => RunEvent::DraftCompleted {
                seq,
                result: Box::new(result),
            },
            Err(e) => RunEvent::DraftFailed {
                seq,
                message: e.to_string(),
            },
        };
        session.apply(event);

        if let Some(msg) = session.draft.error.as_deref() {
            return Err(anyhow::anyhow!("draft failed: {msg}"));
        }
        let result = session
            .draft
            .data
            .as_ref()
            .context("draft finished without a result")?;
        if args.json {
            print_json(result, &serde_json::to_value(crate::metrics::draft_roi(result))?)?;
        } else if !args.silent {
            for line in crate::text_summary::build_draft_summary(result).lines {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Print a result payload together with its derived ROI as pretty JSON.
fn print_json<T: serde::Serialize>(result: &T, roi: &serde_json::Value) -> Result<()> {
    let out = serde_json::json!({
        "result": result,
        "roi": roi,
        "completed_at": crate::model::now_rfc3339(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
