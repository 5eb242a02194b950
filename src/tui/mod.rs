mod draw;
mod help;
mod state;

use crate::cli::Cli;
use crate::controller::{self, UiCommand};
use crate::model::{EvalRequest, Mode, RunEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::UiState;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the
    // controller task.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<RunEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let cfg = crate::cli::build_config(&args);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = controller::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<RunEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut ui = UiState::new(
        args.game_id.clone(),
        args.batch_size,
        args.iterations,
        args.game_type,
    );
    if args.eval {
        ui.session.set_mode(Mode::Eval);
    }

    // Probe the backend once on launch for the header indicator.
    let _ = cmd_tx.send(UiCommand::CheckHealth);

    let res = ui_loop(&mut terminal, &mut ui, &mut event_rx, &cmd_tx);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ui: &mut UiState,
    event_rx: &mut UnboundedReceiver<RunEvent>,
    cmd_tx: &UnboundedSender<UiCommand>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        // Drain controller events without blocking to keep the UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            ui.session.apply(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw::draw(f.area(), f, ui)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if ui.editing_game_id {
                    handle_edit_key(ui, k.code);
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Tab) => {
                        let next = match ui.session.mode {
                            Mode::Draft => Mode::Eval,
                            Mode::Eval => Mode::Draft,
                        };
                        ui.session.set_mode(next);
                    }
                    (_, KeyCode::Char('1')) => ui.session.set_mode(Mode::Draft),
                    (_, KeyCode::Char('2')) => ui.session.set_mode(Mode::Eval),
                    (_, KeyCode::Enter) => start_run(ui, cmd_tx),
                    (_, KeyCode::Char('g')) => {
                        if ui.session.mode == Mode::Draft {
                            ui.editing_game_id = true;
                            ui.info = "Editing game id (Enter to finish)".into();
                        }
                    }
                    (_, KeyCode::Char('t')) => {
                        if ui.session.mode == Mode::Eval {
                            ui.game_type = ui.game_type.next();
                        }
                    }
                    (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => {
                        if ui.session.mode == Mode::Eval {
                            ui.batch_size = ui.batch_size.saturating_add(1);
                        }
                    }
                    (_, KeyCode::Char('-')) => {
                        if ui.session.mode == Mode::Eval && ui.batch_size > 1 {
                            ui.batch_size -= 1;
                        }
                    }
                    (_, KeyCode::Char('i')) => {
                        if ui.session.mode == Mode::Eval {
                            ui.iterations = ui.iterations.saturating_add(1);
                        }
                    }
                    (_, KeyCode::Char('I')) => {
                        if ui.session.mode == Mode::Eval && ui.iterations > 1 {
                            ui.iterations -= 1;
                        }
                    }
                    (_, KeyCode::Char('y')) => {
                        if let Some(d) = ui.session.draft.data.as_ref() {
                            match copy_to_clipboard(&d.draft) {
                                Ok(()) => ui.info = "Draft copied to clipboard".into(),
                                Err(e) => ui.info = format!("Clipboard copy failed: {e:#}"),
                            }
                        } else {
                            ui.info = "No draft to copy yet.".into();
                        }
                    }
                    (_, KeyCode::Char('h')) => {
                        let _ = cmd_tx.send(UiCommand::CheckHealth);
                        ui.info = "Checking backend…".into();
                    }
                    (_, KeyCode::Char('?')) => ui.show_help = !ui.show_help,
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        ui.draft_scroll = ui.draft_scroll.saturating_sub(1);
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        ui.draft_scroll = ui.draft_scroll.saturating_add(1);
                    }
                    (_, KeyCode::Esc) => ui.show_help = false,
                    _ => {}
                }
            }
        }
    }
}

fn handle_edit_key(ui: &mut UiState, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Esc => {
            ui.editing_game_id = false;
            ui.info.clear();
        }
        KeyCode::Backspace => {
            ui.game_id.pop();
        }
        KeyCode::Char(c) if !c.is_control() => ui.game_id.push(c),
        _ => {}
    }
}

/// Start the active mode's run, if its control is enabled.
fn start_run(ui: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>) {
    if !ui.can_start() {
        ui.info = if ui.session.active_loading() {
            "A run is already in flight for this mode.".into()
        } else {
            "Enter a game id first (press 'g').".into()
        };
        return;
    }
    match ui.session.mode {
        Mode::Draft => {
            let seq = ui.session.begin_draft();
            let _ = cmd_tx.send(UiCommand::StartDraft {
                seq,
                game_id: ui.game_id.trim().to_string(),
            });
            ui.draft_scroll = 0;
            ui.info = "Agents at work…".into();
        }
        Mode::Eval => {
            let seq = ui.session.begin_eval();
            let _ = cmd_tx.send(UiCommand::StartEval {
                seq,
                request: EvalRequest {
                    batch_size: ui.batch_size,
                    iterations: ui.iterations,
                    game_type: ui.game_type,
                },
            });
            ui.info = "Running batch…".into();
        }
    }
}

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::Sender<String>> = OnceLock::new();

/// Copy text to the clipboard via a dedicated thread that keeps each
/// clipboard instance alive long enough for Linux clipboard managers to
/// read it. Returns after queuing, without blocking the UI loop.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let sender = CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::channel::<String>();
        std::thread::spawn(move || {
            use arboard::Clipboard;
            for text in rx {
                if let Ok(mut clipboard) = Clipboard::new() {
                    if clipboard.set_text(&text).is_ok() {
                        std::thread::sleep(Duration::from_secs(2));
                    }
                }
            }
        });
        tx
    });
    sender
        .send(text.to_string())
        .map_err(|_| anyhow::anyhow!("clipboard manager channel closed"))?;
    Ok(())
}
