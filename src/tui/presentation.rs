use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use countday::{
    app::{AppState, StatusMessage},
    ui::layout::{calculate_layout, ScreenLayout},
};
use crate::tui::{day_views, dialogs};

pub fn ui(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    let description = app.description();

    let title_text = format!("CountDay - {} - {}", description.title, description.view_mode.title());
    let title = Paragraph::new(title_text)
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let body = chunks[1];
    let visible_rows = match description.view_mode {
        countday::ViewMode::Grid => (body.height / day_views::grid::CELL_HEIGHT) as usize,
        _ => body.height.saturating_sub(2) as usize,
    };

    match calculate_layout(app, &description, visible_rows) {
        ScreenLayout::Empty => day_views::empty::render(f, app, body, description.empty_state.as_ref()),
        ScreenLayout::List { rows, window } => day_views::list::render(f, app, body, &rows, window),
        ScreenLayout::Grid { columns, rows, window } => day_views::grid::render(f, app, body, columns, &rows, window),
        ScreenLayout::Card { cell, position, total } => day_views::card::render(f, app, body, &cell, position, total),
    }

    let (status_text, status_color) = match &app.status {
        Some(StatusMessage::Error(message)) => (message.clone(), app.theme.error),
        Some(StatusMessage::Info(message)) => (message.clone(), app.theme.status_bar),
        None => (
            "v: view | f: filter | x: delete | r: reload | ?: help | q: quit".to_string(),
            app.theme.status_bar,
        ),
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.delete_confirmation_id.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }
}
