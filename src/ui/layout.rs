use std::ops::Range;

use crate::app::AppState;
use crate::presentation::{RenderDescription, RenderItem, RenderLayout};

#[derive(Debug, Clone, PartialEq)]
pub struct ItemCell {
    pub item: RenderItem,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenLayout {
    Empty,
    List { rows: Vec<ItemCell>, window: Range<usize> },
    Grid { columns: usize, rows: Vec<Vec<ItemCell>>, window: Range<usize> },
    Card { cell: ItemCell, position: usize, total: usize },
}

/// Resolves the description against the current selection and the number of
/// rows the body can show.
pub fn calculate_layout(state: &AppState, description: &RenderDescription, visible_rows: usize) -> ScreenLayout {
    if description.layout.is_empty() {
        return ScreenLayout::Empty;
    }
    let selected = state.selected_index;

    match &description.layout {
        RenderLayout::List(items) => ScreenLayout::List {
            rows: mark(items, 0, selected),
            window: scroll_window(selected, items.len(), visible_rows),
        },
        RenderLayout::Grid { columns, rows } => {
            let cells = rows
                .iter()
                .enumerate()
                .map(|(row, items)| mark(items, row * columns, selected))
                .collect::<Vec<_>>();
            let (selected_row, _) = grid_position(selected, *columns);
            ScreenLayout::Grid {
                columns: *columns,
                window: scroll_window(selected_row, cells.len(), visible_rows),
                rows: cells,
            }
        }
        RenderLayout::Cards(items) => {
            let position = selected.min(items.len() - 1);
            ScreenLayout::Card {
                cell: ItemCell {
                    item: items[position].clone(),
                    is_selected: true,
                },
                position,
                total: items.len(),
            }
        }
    }
}

fn mark(items: &[RenderItem], first_index: usize, selected: usize) -> Vec<ItemCell> {
    items
        .iter()
        .enumerate()
        .map(|(offset, item)| ItemCell {
            item: item.clone(),
            is_selected: first_index + offset == selected,
        })
        .collect()
}

pub fn grid_position(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index / columns, index % columns)
}

/// Keeps `selected` inside a window of at most `visible` entries.
pub fn scroll_window(selected: usize, total: usize, visible: usize) -> Range<usize> {
    if visible == 0 || total == 0 {
        return 0..0;
    }
    if total <= visible {
        return 0..total;
    }
    let start = selected.saturating_sub(visible - 1).min(total - visible);
    start..start + visible
}

pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "birthday.cake" => "🎂",
        "heart.circle" | "heart" => "♥",
        "rings" => "💍",
        "heart.text.square" => "✚",
        "graduationcap" => "🎓",
        "moon.stars" => "☪",
        "sparkles" => "✨",
        "figure.wave" => "👋",
        "smoke" => "🚭",
        "scalemass" => "⚖",
        "figure.run" => "🏃",
        "pills" => "💊",
        _ => "★",
    }
}
