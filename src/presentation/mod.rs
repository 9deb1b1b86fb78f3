//! Pure description of what the front end should draw for a list of records.
//!
//! Nothing here talks to storage; callers pass the output of
//! [`SharedStore::list`](crate::storage::SharedStore::list) and the current
//! calendar date.

pub mod text;
pub mod widget;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::Language;
use crate::special_day::{CountDirection, DayCount, Record, ThemeColor};

pub use widget::WidgetSnapshot;

pub const GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Cards,
    Grid,
}

impl ViewMode {
    pub fn next(&self) -> Self {
        match self {
            ViewMode::List => ViewMode::Cards,
            ViewMode::Cards => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::List => "List View",
            ViewMode::Cards => "Card View",
            ViewMode::Grid => "Grid View",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewMode::List => "list.bullet",
            ViewMode::Cards => "square.stack",
            ViewMode::Grid => "square.grid.2x2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "list" => Some(ViewMode::List),
            "cards" | "card" => Some(ViewMode::Cards),
            "grid" => Some(ViewMode::Grid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    All,
    Upcoming,
    Past,
}

impl FilterMode {
    pub fn next(&self) -> Self {
        match self {
            FilterMode::All => FilterMode::Upcoming,
            FilterMode::Upcoming => FilterMode::Past,
            FilterMode::Past => FilterMode::All,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FilterMode::All => "calendar",
            FilterMode::Upcoming => "arrow.forward.circle",
            FilterMode::Past => "arrow.backward.circle",
        }
    }

    pub fn matches(&self, count: DayCount) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Upcoming => count.direction == CountDirection::Backward,
            FilterMode::Past => count.direction == CountDirection::Forward,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "all" => Some(FilterMode::All),
            "upcoming" => Some(FilterMode::Upcoming),
            "past" => Some(FilterMode::Past),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub id: Uuid,
    pub title: String,
    pub count: DayCount,
    pub count_label: String,
    pub date_text: String,
    pub icon: &'static str,
    pub color: ThemeColor,
    pub notes: Option<String>,
}

impl RenderItem {
    pub fn from_record(record: &Record, today: NaiveDate, language: Language) -> Self {
        let count = record.day_count(today);
        Self {
            id: record.id(),
            title: record.title().to_string(),
            count,
            count_label: text::count_label(count, language),
            date_text: text::long_date(record.date(), language),
            icon: record.day_type().icon(),
            color: record.theme_color().clone(),
            notes: record.notes().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderLayout {
    List(Vec<RenderItem>),
    Grid { columns: usize, rows: Vec<Vec<RenderItem>> },
    Cards(Vec<RenderItem>),
}

impl RenderLayout {
    pub fn items(&self) -> Vec<&RenderItem> {
        match self {
            RenderLayout::List(items) | RenderLayout::Cards(items) => items.iter().collect(),
            RenderLayout::Grid { rows, .. } => rows.iter().flatten().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmptyState {
    pub headline: String,
    pub message: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescription {
    pub title: String,
    pub view_mode: ViewMode,
    pub filter: FilterMode,
    pub layout: RenderLayout,
    pub empty_state: Option<EmptyState>,
}

pub fn render(
    records: &[Record],
    today: NaiveDate,
    view_mode: ViewMode,
    filter: FilterMode,
    language: Language,
) -> RenderDescription {
    let mut visible: Vec<&Record> = records
        .iter()
        .filter(|record| filter.matches(record.day_count(today)))
        .collect();
    visible.sort_by_key(|record| (record.date(), record.created_at()));

    let items: Vec<RenderItem> = visible
        .into_iter()
        .map(|record| RenderItem::from_record(record, today, language))
        .collect();

    let title = format!("{} ({})", text::filter_title(filter, language), items.len());
    let empty_state = items.is_empty().then(|| {
        let copy = text::empty_state(language);
        EmptyState {
            headline: copy.headline.to_string(),
            message: copy.message.to_string(),
            action: copy.action.to_string(),
        }
    });

    let layout = match view_mode {
        ViewMode::List => RenderLayout::List(items),
        ViewMode::Cards => RenderLayout::Cards(items),
        ViewMode::Grid => RenderLayout::Grid {
            columns: GRID_COLUMNS,
            rows: items.chunks(GRID_COLUMNS).map(<[RenderItem]>::to_vec).collect(),
        },
    };

    RenderDescription {
        title,
        view_mode,
        filter,
        layout,
        empty_state,
    }
}
