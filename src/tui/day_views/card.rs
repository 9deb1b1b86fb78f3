use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use countday::{
    app::AppState,
    ui::{layout::{icon_glyph, ItemCell}, theme::accent},
};

use super::count_style;

pub fn render(f: &mut Frame, app: &AppState, area: Rect, cell: &ItemCell, position: usize, total: usize) {
    let item = &cell.item;
    let color = accent(&item.color);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  {}", icon_glyph(item.icon), item.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(item.count.magnitude().to_string(), Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(item.count_label.clone(), count_style(app, cell))),
        Line::from(""),
        Line::from(Span::styled(item.date_text.clone(), Style::default().fg(app.theme.muted))),
    ];

    if let Some(notes) = &item.notes {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notes.clone(), Style::default().fg(app.theme.text))));
    }

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" {}/{} (h/l) ", position + 1, total)),
        );
    f.render_widget(card, area);
}
