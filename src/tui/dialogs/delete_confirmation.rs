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
    let Some(record_id) = app.delete_confirmation_id else {
        return;
    };

    let title = app
        .records
        .iter()
        .find(|r| r.id() == record_id)
        .map(|r| r.title())
        .unwrap_or("this day");

    let dialog_area = centered(f.size(), 60, 10);
    f.render_widget(Clear, dialog_area);

    let dialog_text = vec![
        Line::from(vec![Span::styled("Delete Special Day?", Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Are you sure you want to delete "),
            Span::styled(title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD)),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from("This action cannot be undone."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Y", Style::default().fg(app.theme.success)),
            Span::raw(" = Yes, delete | "),
            Span::styled("N", Style::default().fg(app.theme.error)),
            Span::raw(" = No, cancel"),
        ]),
    ];

    let dialog = Paragraph::new(dialog_text)
        .block(Block::default().borders(Borders::ALL).title(" Confirm Delete "))
        .alignment(Alignment::Center);

    f.render_widget(dialog, dialog_area);
}
