use chrono::NaiveDate;
use uuid::Uuid;

use crate::session::Session;
use crate::presentation::{self, FilterMode, RenderDescription, RenderItem, ViewMode, GRID_COLUMNS};
use crate::settings::Language;
use crate::special_day::Record;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct AppState {
    pub records: Vec<Record>,
    pub today: NaiveDate,
    pub language: Language,
    pub view_mode: ViewMode,
    pub filter: FilterMode,
    pub selected_index: usize,
    pub theme: Theme,
    pub show_help: bool,
    pub delete_confirmation_id: Option<Uuid>,
    pub status: Option<StatusMessage>,
    pub session: Session,
}

impl AppState {
    pub fn new(today: NaiveDate, language: Language) -> Self {
        Self {
            records: Vec::new(),
            today,
            language,
            view_mode: ViewMode::Cards,
            filter: FilterMode::All,
            selected_index: 0,
            theme: Theme::default(),
            show_help: false,
            delete_confirmation_id: None,
            status: None,
            session: Session::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_modes(mut self, view_mode: ViewMode, filter: FilterMode) -> Self {
        self.view_mode = view_mode;
        self.filter = filter;
        self
    }

    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.clamp_selection();
    }

    pub fn description(&self) -> RenderDescription {
        presentation::render(&self.records, self.today, self.view_mode, self.filter, self.language)
    }

    pub fn visible_count(&self) -> usize {
        self.description().layout.len()
    }

    pub fn selected_item(&self) -> Option<RenderItem> {
        self.description()
            .layout
            .items()
            .get(self.selected_index)
            .map(|item| (*item).clone())
    }

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            self.selected_index = 0;
            return;
        }
        let target = self.selected_index as isize + delta;
        self.selected_index = target.clamp(0, count as isize - 1) as usize;
    }

    /// Vertical step: a whole row in the grid, one item elsewhere.
    pub fn move_selection_down(&mut self) {
        let step = if self.view_mode == ViewMode::Grid { GRID_COLUMNS } else { 1 };
        self.move_selection(step as isize);
    }

    pub fn move_selection_up(&mut self) {
        let step = if self.view_mode == ViewMode::Grid { GRID_COLUMNS } else { 1 };
        self.move_selection(-(step as isize));
    }

    pub fn cycle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
        self.selected_index = 0;
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Info(message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Error(message.into()));
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
    }
}
