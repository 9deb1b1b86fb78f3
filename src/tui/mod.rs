mod authentication;
mod day_views;
mod dialogs;
mod presentation;
mod session;

pub use authentication::{check_or_setup_auth, read_passcode};
pub use session::run_tui;
