use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use countday::{app::AppState, presentation::EmptyState};

pub fn render(f: &mut Frame, app: &AppState, area: Rect, empty: Option<&EmptyState>) {
    let mut lines = vec![Line::from("")];

    if let Some(empty) = empty {
        lines.push(Line::from(Span::styled(
            empty.headline.clone(),
            Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(empty.message.clone(), Style::default().fg(app.theme.muted))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{}: countday add <title> <YYYY-MM-DD>", empty.action),
            Style::default().fg(app.theme.text),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(paragraph, area);
}
