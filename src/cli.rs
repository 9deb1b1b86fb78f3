use std::{
    collections::{HashMap, HashSet},
    env,
    sync::Arc,
};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use countday::{
    premium::{EntitlementSource, PremiumFeature},
    presentation::{RenderItem, RenderLayout},
    session::Session,
    settings::{AppSettings, Language, SettingsStore, ThemeMode},
    special_day::{Record, RecordUpdate, SpecialDayType, ThemeColor},
    storage::config::Config,
    ui::theme::Theme,
    Clock, FilterMode, RenderDescription, SharedDefaults, SharedStore, ViewMode, WidgetSnapshot,
};

use crate::tui::read_passcode;

pub const USAGE: &str = "\
Usage: countday [COMMAND]

Without a command the terminal browser starts.

Commands:
  list [--filter all|upcoming|past] [--view list|cards|grid]
  show <id>
  add <title> <YYYY-MM-DD> [--type TYPE] [--color HEX] [--notes TEXT] [--remind YYYY-MM-DD]
  edit <id> [--title T] [--date D] [--type TYPE] [--color HEX] [--notes TEXT] [--remind D] [--no-remind]
  remove <id>
  widget [--pin <id>] [--limit N]
  settings [--language en|tr] [--theme system|light|dark] [--palette NAME]
           [--notifications on|off] [--biometric on|off] [--passcode-lock on|off] [--reset-appearance]
  passcode
  onboard [--reset]
  premium [--unlock|--lock]";

const DEFAULT_WIDGET_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum CliMode {
    Tui,
    Help,
    List { filter: Option<FilterMode>, view: Option<ViewMode> },
    Show(Uuid),
    Add(NewDay),
    Edit(Uuid, RecordUpdate),
    Remove(Uuid),
    Widget { pinned: Option<Uuid>, limit: usize },
    Settings(SettingsChange),
    Passcode,
    Onboard { reset: bool },
    Premium { unlock: Option<bool> },
}

impl CliMode {
    /// Widgets run without the lock screen, like a home-screen extension.
    pub fn needs_authentication(&self) -> bool {
        !matches!(self, CliMode::Help | CliMode::Widget { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDay {
    pub title: String,
    pub date: NaiveDate,
    pub day_type: SpecialDayType,
    pub color: Option<ThemeColor>,
    pub notes: Option<String>,
    pub reminder: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsChange {
    pub language: Option<Language>,
    pub theme: Option<ThemeMode>,
    pub palette: Option<String>,
    pub notifications: Option<bool>,
    pub biometric: Option<bool>,
    pub passcode_lock: Option<bool>,
    pub reset_appearance: bool,
}

struct ParsedArgs {
    positional: Vec<String>,
    values: HashMap<String, String>,
    switches: HashSet<String>,
}

impl ParsedArgs {
    fn value(&self, flag: &str) -> Option<&str> {
        self.values.get(flag).map(String::as_str)
    }

    fn has(&self, flag: &str) -> bool {
        self.switches.contains(flag)
    }

    fn expect_positional(&self, count: usize, usage: &str) -> Result<(), String> {
        if self.positional.len() != count {
            return Err(format!("Usage: countday {}", usage));
        }
        Ok(())
    }
}

fn parse_flags(rest: Vec<String>, with_value: &[&str], switches: &[&str]) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs {
        positional: Vec::new(),
        values: HashMap::new(),
        switches: HashSet::new(),
    };
    let mut args = rest.into_iter();

    while let Some(arg) = args.next() {
        if !arg.starts_with("--") {
            parsed.positional.push(arg);
        } else if with_value.contains(&arg.as_str()) {
            let Some(value) = args.next() else {
                return Err(format!("Missing value for {}", arg));
            };
            parsed.values.insert(arg, value);
        } else if switches.contains(&arg.as_str()) {
            parsed.switches.insert(arg);
        } else {
            return Err(format!("Unknown argument: {}", arg));
        }
    }

    Ok(parsed)
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliMode, String> {
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(CliMode::Tui);
    };
    let rest: Vec<String> = args.collect();

    match command.as_str() {
        "--help" | "-h" | "help" => Ok(CliMode::Help),
        "list" => {
            let parsed = parse_flags(rest, &["--filter", "--view"], &[])?;
            parsed.expect_positional(0, "list [--filter F] [--view V]")?;
            Ok(CliMode::List {
                filter: parsed.value("--filter").map(parse_filter).transpose()?,
                view: parsed.value("--view").map(parse_view).transpose()?,
            })
        }
        "show" => {
            let parsed = parse_flags(rest, &[], &[])?;
            parsed.expect_positional(1, "show <id>")?;
            Ok(CliMode::Show(parse_id(&parsed.positional[0])?))
        }
        "add" => {
            let parsed = parse_flags(rest, &["--type", "--color", "--notes", "--remind"], &[])?;
            parsed.expect_positional(2, "add <title> <YYYY-MM-DD>")?;
            Ok(CliMode::Add(NewDay {
                title: parsed.positional[0].clone(),
                date: parse_date(&parsed.positional[1])?,
                day_type: parsed.value("--type").map(parse_type).transpose()?.unwrap_or(SpecialDayType::Custom),
                color: parsed.value("--color").map(parse_color).transpose()?,
                notes: parsed.value("--notes").map(str::to_string),
                reminder: parsed.value("--remind").map(parse_date).transpose()?,
            }))
        }
        "edit" => {
            let parsed = parse_flags(
                rest,
                &["--title", "--date", "--type", "--color", "--notes", "--remind"],
                &["--no-remind"],
            )?;
            parsed.expect_positional(1, "edit <id> [flags]")?;
            let id = parse_id(&parsed.positional[0])?;

            let reminder_date = parsed.value("--remind").map(parse_date).transpose()?;
            let reminder_enabled = match (reminder_date.is_some(), parsed.has("--no-remind")) {
                (true, true) => return Err("--remind and --no-remind cannot be combined".to_string()),
                (true, false) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            };

            Ok(CliMode::Edit(
                id,
                RecordUpdate {
                    title: parsed.value("--title").map(str::to_string),
                    date: parsed.value("--date").map(parse_date).transpose()?,
                    day_type: parsed.value("--type").map(parse_type).transpose()?,
                    theme_color: parsed.value("--color").map(parse_color).transpose()?,
                    notes: parsed.value("--notes").map(str::to_string),
                    reminder_enabled,
                    reminder_date,
                },
            ))
        }
        "remove" => {
            let parsed = parse_flags(rest, &[], &[])?;
            parsed.expect_positional(1, "remove <id>")?;
            Ok(CliMode::Remove(parse_id(&parsed.positional[0])?))
        }
        "widget" => {
            let parsed = parse_flags(rest, &["--pin", "--limit"], &[])?;
            parsed.expect_positional(0, "widget [--pin <id>] [--limit N]")?;
            let limit = match parsed.value("--limit") {
                Some(value) => value
                    .parse()
                    .map_err(|_| format!("Invalid limit '{}'", value))?,
                None => DEFAULT_WIDGET_LIMIT,
            };
            Ok(CliMode::Widget {
                pinned: parsed.value("--pin").map(parse_id).transpose()?,
                limit,
            })
        }
        "settings" => {
            let parsed = parse_flags(
                rest,
                &["--language", "--theme", "--palette", "--notifications", "--biometric", "--passcode-lock"],
                &["--reset-appearance"],
            )?;
            parsed.expect_positional(0, "settings [flags]")?;
            Ok(CliMode::Settings(SettingsChange {
                language: parsed
                    .value("--language")
                    .map(|code| Language::from_code(code).ok_or_else(|| format!("Unknown language '{}'", code)))
                    .transpose()?,
                theme: parsed
                    .value("--theme")
                    .map(|name| ThemeMode::from_name(name).ok_or_else(|| format!("Unknown theme '{}'", name)))
                    .transpose()?,
                palette: parsed.value("--palette").map(parse_palette).transpose()?,
                notifications: parsed.value("--notifications").map(parse_toggle).transpose()?,
                biometric: parsed.value("--biometric").map(parse_toggle).transpose()?,
                passcode_lock: parsed.value("--passcode-lock").map(parse_toggle).transpose()?,
                reset_appearance: parsed.has("--reset-appearance"),
            }))
        }
        "passcode" => {
            parse_flags(rest, &[], &[])?.expect_positional(0, "passcode")?;
            Ok(CliMode::Passcode)
        }
        "onboard" => {
            let parsed = parse_flags(rest, &[], &["--reset"])?;
            parsed.expect_positional(0, "onboard [--reset]")?;
            Ok(CliMode::Onboard { reset: parsed.has("--reset") })
        }
        "premium" => {
            let parsed = parse_flags(rest, &[], &["--unlock", "--lock"])?;
            parsed.expect_positional(0, "premium [--unlock|--lock]")?;
            let unlock = match (parsed.has("--unlock"), parsed.has("--lock")) {
                (true, true) => return Err("--unlock and --lock cannot be combined".to_string()),
                (true, false) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            };
            Ok(CliMode::Premium { unlock })
        }
        _ => Err(format!("Unknown command: {}", command)),
    }
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value).map_err(|_| format!("Invalid id '{}'", value))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD.", value))
}

fn parse_type(value: &str) -> Result<SpecialDayType, String> {
    SpecialDayType::from_name(value).ok_or_else(|| format!("Unknown day type '{}'", value))
}

fn parse_color(value: &str) -> Result<ThemeColor, String> {
    ThemeColor::parse(value).map_err(|e| e.to_string())
}

fn parse_filter(value: &str) -> Result<FilterMode, String> {
    FilterMode::from_name(value).ok_or_else(|| format!("Unknown filter '{}'", value))
}

fn parse_view(value: &str) -> Result<ViewMode, String> {
    ViewMode::from_name(value).ok_or_else(|| format!("Unknown view '{}'", value))
}

fn parse_palette(value: &str) -> Result<String, String> {
    let name = value.to_lowercase();
    if Theme::available_palettes().contains(&name.as_str()) {
        Ok(name)
    } else {
        Err(format!("Unknown palette '{}'", value))
    }
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("Expected on/off, got '{}'", value)),
    }
}

pub async fn run_command(
    mode: CliMode,
    config: &Config,
    mut settings: AppSettings,
    defaults: Arc<dyn SharedDefaults>,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let store = SharedStore::with_clock(defaults.clone(), clock.clone());
    let today = store.clock().today();

    match mode {
        CliMode::Tui | CliMode::Help => println!("{}", USAGE),
        CliMode::List { filter, view } => {
            let description = countday::render(
                &store.list().await,
                today,
                view.unwrap_or(config.ui.default_view),
                filter.unwrap_or(config.ui.default_filter),
                settings.language,
            );
            println!("{}", format_description(&description));
        }
        CliMode::Show(id) => {
            let Some(record) = store.get(id).await else {
                bail!("No special day with id {}", id);
            };
            println!("{}", format_record(&record, today, settings.language));
        }
        CliMode::Add(new_day) => {
            let mut builder = Record::builder(new_day.title, new_day.date, new_day.day_type);
            if let Some(color) = new_day.color {
                builder = builder.theme_color(color);
            }
            if let Some(notes) = new_day.notes {
                builder = builder.notes(notes);
            }
            if let Some(reminder) = new_day.reminder {
                builder = builder.reminder(reminder);
            }
            let record = builder.build(store.clock().now())?;
            store.add(record.clone()).await;
            println!("Added {} ({})", record.title(), record.id());
        }
        CliMode::Edit(id, update) => {
            if update.is_empty() {
                bail!("Nothing to change");
            }
            match store.update(id, update).await? {
                Some(record) => println!("{}", format_record(&record, today, settings.language)),
                None => bail!("No special day with id {}", id),
            }
        }
        CliMode::Remove(id) => {
            let Some(record) = store.get(id).await else {
                bail!("No special day with id {}", id);
            };
            store.remove(id).await;
            println!("Removed {}", record.title());
        }
        CliMode::Widget { pinned, limit } => {
            if !settings.is_unlocked(PremiumFeature::Widgets) {
                bail!("{} is a premium feature. Run `countday premium --unlock`.", PremiumFeature::Widgets.title());
            }
            let widget_store = SharedStore::read_only(defaults, clock);
            let snapshot = WidgetSnapshot::build(&widget_store.list().await, today, pinned, limit, settings.language);
            println!("{}", format_widget(&snapshot));
        }
        CliMode::Settings(change) => {
            let settings_store = SettingsStore::new(defaults);
            let mut config = config.clone();
            if change != SettingsChange::default() {
                let palette_changed = apply_settings_change(&mut settings, &mut config, change)?;
                settings_store.save(&settings).await?;
                if palette_changed {
                    config.save()?;
                }
                tracing::info!("Settings updated");
            }
            println!("{}", format_settings(&settings, &config));
        }
        CliMode::Passcode => {
            let settings_store = SettingsStore::new(defaults);
            let current = if settings.passcode.is_some() {
                read_passcode("Current passcode: ")?
            } else {
                String::new()
            };
            let new = read_passcode("New passcode: ")?;
            let confirm = read_passcode("Confirm new passcode: ")?;

            settings.change_passcode(&current, &new, &confirm)?;
            settings_store.save(&settings).await?;
            println!("Passcode updated");
        }
        CliMode::Onboard { reset } => {
            let mut session = Session::load(defaults.as_ref(), &settings).await;
            if reset {
                session.reset(defaults.as_ref()).await?;
                println!("Onboarding will be shown on next launch");
            } else {
                println!("Onboarding completed: {}", session.has_completed_onboarding);
            }
        }
        CliMode::Premium { unlock } => {
            if let Some(unlock) = unlock {
                settings.is_premium = unlock;
                SettingsStore::new(defaults).save(&settings).await?;
                tracing::info!("Premium set to {}", unlock);
            }
            println!("{}", format_premium(&settings));
        }
    }

    Ok(())
}

/// Returns whether the palette in `config` changed and needs saving.
fn apply_settings_change(settings: &mut AppSettings, config: &mut Config, change: SettingsChange) -> Result<bool> {
    let locks_on = change.biometric == Some(true) || change.passcode_lock == Some(true);
    if locks_on && settings.passcode.is_none() {
        bail!("Set a passcode first with `countday passcode`");
    }

    if change.reset_appearance {
        settings.reset_appearance();
    }
    if let Some(language) = change.language {
        settings.language = language;
    }
    if let Some(theme) = change.theme {
        settings.theme = theme;
    }
    if let Some(enabled) = change.notifications {
        settings.notifications_enabled = enabled;
    }
    if let Some(enabled) = change.biometric {
        settings.use_biometric_auth = enabled;
    }
    if let Some(enabled) = change.passcode_lock {
        settings.use_passcode_auth = enabled;
    }
    let palette_changed = match change.palette {
        Some(palette) if palette != config.ui.theme => {
            config.ui.theme = palette;
            true
        }
        _ => false,
    };

    Ok(palette_changed)
}

fn item_line(item: &RenderItem) -> String {
    format!("{}  {:<28} {:<18} {}", item.id, item.title, item.count_label, item.date_text)
}

pub fn format_description(description: &RenderDescription) -> String {
    let mut lines = vec![description.title.clone(), String::new()];

    if let Some(empty) = &description.empty_state {
        lines.push(empty.headline.clone());
        lines.push(empty.message.clone());
        return lines.join("\n");
    }

    match &description.layout {
        RenderLayout::List(items) => lines.extend(items.iter().map(item_line)),
        RenderLayout::Grid { rows, .. } => {
            for row in rows {
                let cells: Vec<String> = row
                    .iter()
                    .map(|item| format!("{:<24} {:<16}", item.title, item.count_label))
                    .collect();
                lines.push(cells.join(" | "));
            }
        }
        RenderLayout::Cards(items) => {
            for item in items {
                lines.push(format!("[{}] {}", item.id, item.title));
                lines.push(format!("    {}", item.count_label));
                lines.push(format!("    {}", item.date_text));
                if let Some(notes) = &item.notes {
                    lines.push(format!("    {}", notes));
                }
                lines.push(String::new());
            }
        }
    }

    lines.join("\n")
}

fn format_record(record: &Record, today: NaiveDate, language: Language) -> String {
    let item = RenderItem::from_record(record, today, language);
    let mut lines = vec![
        format!("{} ({})", item.title, item.id),
        format!("  Type:     {}", record.day_type().title()),
        format!("  Date:     {}", item.date_text),
        format!("  Count:    {}", item.count_label),
        format!("  Color:    {}", record.theme_color()),
    ];
    if let Some(notes) = record.notes() {
        lines.push(format!("  Notes:    {}", notes));
    }
    if let Some(reminder) = record.reminder_date() {
        lines.push(format!("  Reminder: {}", reminder));
    }
    lines.push(format!("  Modified: {}", record.last_modified_at().format("%Y-%m-%d %H:%M:%S")));
    lines.join("\n")
}

fn format_widget(snapshot: &WidgetSnapshot) -> String {
    let Some(featured) = &snapshot.featured else {
        return "No special days".to_string();
    };

    let mut lines = vec![
        featured.title.clone(),
        format!("  {}", featured.count_label),
        format!("  {}", featured.date_text),
    ];
    if !snapshot.upcoming.is_empty() {
        lines.push(String::new());
        lines.extend(
            snapshot
                .upcoming
                .iter()
                .map(|item| format!("{:<24} {}", item.title, item.count_label)),
        );
    }
    lines.join("\n")
}

fn format_settings(settings: &AppSettings, config: &Config) -> String {
    let on_off = |value: bool| if value { "on" } else { "off" };
    [
        format!("Language:      {}", settings.language.code()),
        format!("Theme:         {}", settings.theme.title()),
        format!("Palette:       {}", config.ui.theme),
        format!("Notifications: {}", on_off(settings.notifications_enabled)),
        format!("Biometric:     {}", on_off(settings.use_biometric_auth)),
        format!("Passcode lock: {}", on_off(settings.use_passcode_auth)),
        format!("Passcode set:  {}", on_off(settings.passcode.is_some())),
        format!("Premium:       {}", on_off(settings.is_premium)),
    ]
    .join("\n")
}

fn format_premium(settings: &AppSettings) -> String {
    PremiumFeature::ALL
        .iter()
        .map(|feature| {
            let state = if settings.is_unlocked(*feature) { "unlocked" } else { "locked" };
            format!("{:<24} {:<9} {}", feature.title(), state, feature.description())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
