use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_help(area: Rect, f: &mut Frame) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Magenta));
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            key("q"),
            Span::raw(" / "),
            key("Ctrl-C"),
            Span::raw("  Quit"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("tab"),
            Span::raw(" / "),
            key("1"),
            Span::raw("/"),
            key("2"),
            Span::raw("   Switch between Newsroom and Evaluation Lab"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("Enter"),
            Span::raw("       Start the current mode's run"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("h"),
            Span::raw("           Check backend health"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("?"),
            Span::raw("           Toggle this help"),
        ]),
        Line::from(""),
        Line::from("Newsroom:"),
        Line::from(vec![
            Span::raw("  "),
            key("g"),
            Span::raw("           Edit game id"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("↑/↓"),
            Span::raw(" or "),
            key("j/k"),
            Span::raw("  Scroll the draft"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("y"),
            Span::raw("           Copy draft text to clipboard"),
        ]),
        Line::from(""),
        Line::from("Evaluation Lab:"),
        Line::from(vec![
            Span::raw("  "),
            key("t"),
            Span::raw("           Cycle game type filter"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("+/-"),
            Span::raw("         Adjust batch size"),
        ]),
        Line::from(vec![
            Span::raw("  "),
            key("i/I"),
            Span::raw("         Adjust iterations"),
        ]),
        Line::from(""),
        Line::from("A run in flight cannot be cancelled; re-running supersedes"),
        Line::from("it and any late response is discarded."),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
