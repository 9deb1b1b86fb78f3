use std::ops::Range;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
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

pub const CELL_HEIGHT: u16 = 5;

pub fn render(f: &mut Frame, app: &AppState, area: Rect, columns: usize, rows: &[Vec<ItemCell>], window: Range<usize>) {
    let visible = &rows[window];
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            visible
                .iter()
                .map(|_| Constraint::Length(CELL_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (row, row_area) in visible.iter().zip(row_areas.iter()) {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (cell, cell_area) in row.iter().zip(cell_areas.iter()) {
            render_cell(f, app, *cell_area, cell);
        }
    }
}

fn render_cell(f: &mut Frame, app: &AppState, area: Rect, cell: &ItemCell) {
    let item = &cell.item;
    let border = if cell.is_selected {
        Style::default().fg(accent(&item.color)).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.border)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{} ", icon_glyph(item.icon)), Style::default().fg(accent(&item.color))),
            Span::styled(item.title.clone(), Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(item.count_label.clone(), count_style(app, cell))),
        Line::from(Span::styled(item.date_text.clone(), Style::default().fg(app.theme.muted))),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(paragraph, area);
}
