use std::io;

use crossterm::{
    event::{self, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use countday::{
    app::AppState,
    input::normal_mode::{self, Action},
    settings::AppSettings,
    storage::config::Config,
    ui::theme::Theme,
    Clock, Session, SharedStore,
};

use crate::tui::presentation::ui;

pub async fn run_tui(config: &Config, settings: &AppSettings, session: Session, store: SharedStore) -> io::Result<()> {
    if session.requires_authentication {
        return Err(io::Error::other("Session is locked"));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::resolve(&config.ui.theme, settings.theme, settings);
    let mut app = AppState::new(store.clock().today(), settings.language)
        .with_theme(theme)
        .with_session(session)
        .with_modes(config.ui.default_view, config.ui.default_filter);
    app.set_records(store.list().await);

    let res = run_app(&mut terminal, &mut app, &store).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("TUI exited with error: {}", err);
    }

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    store: &SharedStore,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.status = None;
            match normal_mode::handle_key(key.code, app) {
                Action::None => {}
                Action::Quit => return Ok(()),
                Action::Reload => {
                    reload(app, store).await;
                    app.set_info(format!("Loaded {} days", app.records.len()));
                }
                Action::Delete(id) => {
                    store.remove(id).await;
                    reload(app, store).await;
                    app.set_info("Special day deleted");
                }
            }
        }
    }
}

/// Picks up writes made by other processes sharing the app group and rolls
/// the date over when the TUI stays open past midnight.
async fn reload(app: &mut AppState, store: &SharedStore) {
    app.today = store.clock().today();
    app.set_records(store.list().await);
}
