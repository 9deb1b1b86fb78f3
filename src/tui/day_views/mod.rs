pub mod card;
pub mod empty;
pub mod grid;
pub mod list;

use ratatui::style::{Modifier, Style};
use countday::{app::AppState, ui::layout::ItemCell, CountDirection};

pub(crate) fn count_style(app: &AppState, cell: &ItemCell) -> Style {
    let base = if cell.item.count.direction == CountDirection::Backward {
        Style::default().fg(app.theme.success)
    } else {
        Style::default().fg(app.theme.muted)
    };
    if cell.is_selected {
        base.bg(app.theme.selected_bg).add_modifier(Modifier::BOLD)
    } else {
        base
    }
}
