pub mod special_day;
pub mod storage;
pub mod settings;
pub mod session;
pub mod auth;
pub mod premium;
pub mod presentation;
pub mod input;
pub mod ui;
pub mod app;

pub use special_day::{Clock, CountDirection, DayCount, Record, RecordUpdate, SpecialDayType, SystemClock, ThemeColor};
pub use storage::{SharedDefaults, SharedStore};
pub use settings::{AppSettings, Language, SettingsStore, ThemeMode};
pub use session::Session;
pub use presentation::{render, FilterMode, RenderDescription, ViewMode, WidgetSnapshot};
pub use app::AppState;
