use std::ops::Range;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use countday::{
    app::AppState,
    ui::{layout::{icon_glyph, ItemCell}, theme::accent},
};

use super::count_style;

pub fn render(f: &mut Frame, app: &AppState, area: Rect, rows: &[ItemCell], window: Range<usize>) {
    let mut lines = Vec::new();

    for cell in &rows[window] {
        let item = &cell.item;
        let cursor = if cell.is_selected { ">" } else { " " };
        let title_style = if cell.is_selected {
            Style::default()
                .fg(app.theme.selected_fg)
                .bg(app.theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };

        lines.push(Line::from(vec![
            Span::styled(cursor, Style::default().fg(app.theme.selected_bg)),
            Span::styled(format!("{} ", icon_glyph(item.icon)), Style::default().fg(accent(&item.color))),
            Span::styled(item.title.clone(), title_style),
            Span::raw("  "),
            Span::styled(item.count_label.clone(), count_style(app, cell)),
            Span::raw("  "),
            Span::styled(item.date_text.clone(), Style::default().fg(app.theme.muted)),
        ]));
    }

    let content = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(app.theme.border)));
    f.render_widget(content, area);
}
