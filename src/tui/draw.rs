use super::help;
use super::state::UiState;
use crate::metrics;
use crate::model::{Mode, Verdict};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

fn verdict_color(v: Verdict) -> Color {
    match v {
        Verdict::Pass => Color::Green,
        Verdict::Fail => Color::Red,
        Verdict::Unknown => Color::Yellow,
    }
}

fn card(f: &mut Frame, area: Rect, label: &str, value: Line<'_>) {
    let lines = vec![
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Gray),
        )),
        value,
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

pub(super) fn draw(area: Rect, f: &mut Frame, ui: &UiState) {
    if ui.show_help {
        help::draw_help(area, f);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    draw_header(f, rows[0], ui);
    draw_metric_cards(f, rows[1], ui);
    match ui.mode() {
        Mode::Draft => draw_newsroom(f, rows[2], ui),
        Mode::Eval => draw_eval_lab(f, rows[2], ui),
    }
    draw_footer(f, rows[3], ui);
}

fn draw_header(f: &mut Frame, area: Rect, ui: &UiState) {
    let selected = match ui.mode() {
        Mode::Draft => 0,
        Mode::Eval => 1,
    };
    let tabs = Tabs::new(vec![Mode::Draft.title(), Mode::Eval.title()])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("SportsEdit — Agentic Newsroom"),
        );
    f.render_widget(tabs, area);
}

fn draw_metric_cards(f: &mut Frame, area: Rect, ui: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    card(f, cols[0], "Jury Systems", Line::from("Active (3 Agents)"));
    card(
        f,
        cols[1],
        "Total Articles",
        Line::from(ui.session.articles_produced().to_string()),
    );

    let savings = match ui.mode() {
        Mode::Draft => ui
            .session
            .draft
            .data
            .as_ref()
            .map(|d| metrics::draft_roi(d).cost_saved_dollars),
        Mode::Eval => ui
            .session
            .eval
            .data
            .as_ref()
            .map(|e| metrics::eval_roi(e).cost_saved_dollars),
    };
    card(
        f,
        cols[2],
        "Est. Savings",
        Line::from(Span::styled(
            format!("${:.2}", savings.unwrap_or(0.0)),
            Style::default().fg(Color::Green),
        )),
    );

    let backend = match ui.session.backend_online {
        Some(true) => Span::styled("online", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("offline", Style::default().fg(Color::Red)),
        None => Span::styled("—", Style::default().fg(Color::Gray)),
    };
    card(f, cols[3], "Backend", Line::from(backend));
}

fn draw_newsroom(f: &mut Frame, area: Rect, ui: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32),
            Constraint::Min(30),
            Constraint::Length(34),
        ])
        .split(area);

    draw_mission_control(f, cols[0], ui);
    draw_latest_draft(f, cols[1], ui);
    draw_jury_verdict(f, cols[2], ui);
}

fn draw_mission_control(f: &mut Frame, area: Rect, ui: &UiState) {
    let state = &ui.session.draft;
    let mut lines: Vec<Line> = Vec::new();

    let id_style = if ui.editing_game_id {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let id_text = if ui.editing_game_id {
        format!("{}_", ui.game_id)
    } else {
        ui.game_id.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Game ID: ", Style::default().fg(Color::Gray)),
        Span::styled(id_text, id_style),
    ]));
    lines.push(Line::from(""));

    if state.loading {
        lines.push(Line::from(Span::styled(
            "Agents working…",
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(err) = state.error.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(d) = state.data.as_ref() {
        let roi = metrics::draft_roi(d);
        lines.push(Line::from(format!("Time: {:.2}s", d.execution_time)));
        lines.push(Line::from(Span::styled(
            format!("Saved: {:.1} min", roi.time_saved_seconds / 60.0),
            Style::default().fg(Color::Green),
        )));
        if let Some(ts) = state.finished_at.as_deref() {
            lines.push(Line::from(Span::styled(
                format!("Completed: {ts}"),
                Style::default().fg(Color::Gray),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Enter: draft article",
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Mission Control")),
        area,
    );
}

fn draw_latest_draft(f: &mut Frame, area: Rect, ui: &UiState) {
    let state = &ui.session.draft;
    let block = Block::default().borders(Borders::ALL).title("Latest Draft");

    let paragraph = if state.loading {
        Paragraph::new(Line::from(Span::styled(
            "Writing…",
            Style::default().fg(Color::Yellow),
        )))
    } else if let Some(d) = state.data.as_ref() {
        Paragraph::new(d.draft.clone())
            .wrap(Wrap { trim: false })
            .scroll((ui.draft_scroll, 0))
    } else {
        Paragraph::new(Span::styled(
            "Select a game and press Enter to begin.",
            Style::default().fg(Color::Gray),
        ))
    };
    f.render_widget(paragraph.block(block), area);
}

fn draw_jury_verdict(f: &mut Frame, area: Rect, ui: &UiState) {
    let state = &ui.session.draft;
    let mut lines: Vec<Line> = Vec::new();

    if let Some(d) = state.data.as_ref() {
        lines.push(Line::from(Span::styled(
            d.status.as_str(),
            Style::default()
                .fg(verdict_color(d.status))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Revisions: {}", d.revisions)));
        lines.push(Line::from(""));
        if d.errors.is_empty() {
            lines.push(Line::from(Span::styled(
                "Unanimous pass.",
                Style::default().fg(Color::Green),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Jury feedback:",
                Style::default().fg(Color::Gray),
            )));
            for err in &d.errors {
                lines.push(Line::from(Span::styled(
                    format!("- {err}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }
    } else {
        lines.push(Line::from(Span::styled(
            "Waiting for jury…",
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Jury Verdict")),
        area,
    );
}

fn draw_eval_lab(f: &mut Frame, area: Rect, ui: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(5),
        ])
        .split(area);

    let state = &ui.session.eval;
    let mut controls = vec![
        Span::styled("Game Type: ", Style::default().fg(Color::Gray)),
        Span::raw(ui.game_type.label()),
        Span::styled("   Batch: ", Style::default().fg(Color::Gray)),
        Span::raw(ui.batch_size.to_string()),
        Span::styled("   Iterations: ", Style::default().fg(Color::Gray)),
        Span::raw(ui.iterations.to_string()),
    ];
    if state.loading {
        controls.push(Span::styled(
            "   Running batch…",
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(ts) = state.finished_at.as_deref() {
        controls.push(Span::styled(
            format!("   Completed: {ts}"),
            Style::default().fg(Color::Gray),
        ));
    } else {
        controls.push(Span::styled(
            "   Enter: run benchmark",
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(controls)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Batch Evaluation"),
        ),
        rows[0],
    );

    draw_eval_cards(f, rows[1], ui);
    draw_eval_table(f, rows[2], ui);
}

fn draw_eval_cards(f: &mut Frame, area: Rect, ui: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let roi = ui.session.eval.data.as_ref().map(metrics::eval_roi);
    let dash = || Line::from(Span::styled("—", Style::default().fg(Color::Gray)));
    let rate_line = |r: Option<Option<u32>>| match r {
        Some(Some(p)) => Line::from(format!("{p}%")),
        Some(None) => Line::from("N/A"),
        None => dash(),
    };

    card(
        f,
        cols[0],
        "Total Duration",
        match ui.session.eval.data.as_ref() {
            Some(e) => Line::from(format!("{:.1}s", e.total_duration)),
            None => dash(),
        },
    );
    card(
        f,
        cols[1],
        "Safety Rate",
        rate_line(roi.map(|r| r.safety_rate_percent)),
    );
    card(
        f,
        cols[2],
        "Pass Rate",
        rate_line(roi.map(|r| r.pass_rate_percent)),
    );
    card(
        f,
        cols[3],
        "Throughput",
        match roi.map(|r| r.throughput_per_minute) {
            Some(Some(t)) => Line::from(format!("{t:.1} art/min")),
            Some(None) => Line::from("N/A"),
            None => dash(),
        },
    );
}

fn draw_eval_table(f: &mut Frame, area: Rect, ui: &UiState) {
    let state = &ui.session.eval;
    let mut title = String::from("Results");
    // A failed retry keeps the previous batch on screen next to the error.
    if let Some(err) = state.error.as_deref() {
        title = format!("Results — last run failed: {err}");
    }

    let block = Block::default().borders(Borders::ALL).title(title);
    let Some(e) = state.data.as_ref() else {
        let hint = if state.loading {
            Span::styled("Running batch…", Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                "Run a benchmark to see per-game results.",
                Style::default().fg(Color::Gray),
            )
        };
        f.render_widget(Paragraph::new(Line::from(hint)).block(block), area);
        return;
    };

    let header = Row::new(vec!["Game ID", "Iter", "Verdict", "Revisions", "Time"])
        .style(Style::default().fg(Color::Gray));
    let rows: Vec<Row> = e
        .results
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.game_id.clone()),
                Cell::from(r.iteration.to_string()),
                Cell::from(Span::styled(
                    r.status.as_str(),
                    Style::default().fg(verdict_color(r.status)),
                )),
                Cell::from(r.revisions.to_string()),
                Cell::from(format!("{:.1}s", r.duration)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

fn draw_footer(f: &mut Frame, area: Rect, ui: &UiState) {
    let info = if !ui.info.is_empty() {
        ui.info.clone()
    } else if let Some(msg) = ui.session.info.as_deref() {
        msg.to_string()
    } else {
        String::new()
    };
    let line = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Magenta)),
        Span::raw(": switch mode  "),
        Span::styled("Enter", Style::default().fg(Color::Magenta)),
        Span::raw(": run  "),
        Span::styled("?", Style::default().fg(Color::Magenta)),
        Span::raw(": help  "),
        Span::styled("q", Style::default().fg(Color::Magenta)),
        Span::raw(": quit   "),
        Span::styled(info, Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
