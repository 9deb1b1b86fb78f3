use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use countday::app::AppState;

use super::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let help_area = centered(f.size(), 56, 19);
    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("CountDay Help", section)]),
        Line::from(""),
        Line::from(vec![Span::styled("Navigation:", section)]),
        Line::from("  j/k      - Next/previous day (row in grid)"),
        Line::from("  h/l      - Previous/next item"),
        Line::from("  g/G      - First/last item"),
        Line::from(""),
        Line::from(vec![Span::styled("Display:", section)]),
        Line::from("  v        - Cycle list/card/grid view"),
        Line::from("  f        - Cycle all/upcoming/past filter"),
        Line::from(""),
        Line::from(vec![Span::styled("Days:", section)]),
        Line::from("  x        - Delete selected day"),
        Line::from("  r        - Reload from shared storage"),
        Line::from("  q/Esc    - Quit"),
        Line::from(""),
        Line::from("Add and edit days with `countday add` / `countday edit`."),
    ];

    let help = Paragraph::new(help_text)
        .block(Block::default().borders(Borders::ALL).title(" Help (q to close) "))
        .alignment(Alignment::Left);

    f.render_widget(help, help_area);
}
