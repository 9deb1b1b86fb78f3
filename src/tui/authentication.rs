use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Result};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use countday::{
    auth::{initial_gate, unlock, AuthError, NoBiometrics, UnlockMethod},
    premium::PremiumFeature,
    settings::AppSettings,
    storage::SharedDefaults,
    Session,
};

const MAX_PASSCODE_ATTEMPTS: usize = 3;

/// Runs onboarding on first launch, then the lock screen when authentication
/// is configured. Returns the unlocked session.
pub async fn check_or_setup_auth(defaults: &dyn SharedDefaults, settings: &AppSettings) -> Result<Session> {
    let mut session = Session::load(defaults, settings).await;

    if !session.has_completed_onboarding {
        print_onboarding();
        prompt_line("Press Enter to start...")?;
        session.complete_onboarding(defaults).await?;
        tracing::info!("Onboarding completed");
    }

    if !initial_gate(&mut session, settings, &NoBiometrics) {
        return Ok(session);
    }

    for attempt in 1..=MAX_PASSCODE_ATTEMPTS {
        let entered = read_passcode("Enter passcode: ")?;
        match unlock(&mut session, settings, UnlockMethod::Passcode(entered.trim()), &NoBiometrics) {
            Ok(()) => return Ok(session),
            Err(AuthError::Passcode(e)) => {
                eprintln!("{} ({}/{})", e, attempt, MAX_PASSCODE_ATTEMPTS);
            }
            Err(e) => bail!(e),
        }
    }

    bail!("Too many failed passcode attempts")
}

fn print_onboarding() {
    println!("Welcome to CountDay\n");
    println!("Track the days since and until the moments that matter.");
    println!("Add birthdays, anniversaries, habits and more, then watch the count.\n");
    println!("Premium features:");
    for feature in PremiumFeature::ALL {
        println!("  - {}: {}", feature.title(), feature.description());
    }
    println!();
}

pub fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SecretInput {
    Pending,
    Submitted,
    Cancelled,
}

fn apply_secret_key(buffer: &mut String, key: KeyEvent) -> SecretInput {
    match key.code {
        KeyCode::Enter => SecretInput::Submitted,
        KeyCode::Esc => SecretInput::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => SecretInput::Cancelled,
        KeyCode::Backspace => {
            buffer.pop();
            SecretInput::Pending
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            SecretInput::Pending
        }
        _ => SecretInput::Pending,
    }
}

/// Reads a passcode in raw mode so the typed characters are not echoed.
pub fn read_passcode(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    enable_raw_mode()?;
    let entered = read_secret_keys();
    disable_raw_mode()?;
    println!();

    entered?.ok_or_else(|| anyhow!("Passcode entry cancelled"))
}

fn read_secret_keys() -> io::Result<Option<String>> {
    let mut buffer = String::new();
    loop {
        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match apply_secret_key(&mut buffer, key) {
                SecretInput::Pending => {}
                SecretInput::Submitted => return Ok(Some(buffer)),
                SecretInput::Cancelled => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_keys(keys: &[KeyEvent]) -> (String, SecretInput) {
        let mut buffer = String::new();
        let mut state = SecretInput::Pending;
        for key in keys {
            state = apply_secret_key(&mut buffer, *key);
            if state != SecretInput::Pending {
                break;
            }
        }
        (buffer, state)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn typed_digits_are_collected_until_enter() {
        let keys = [
            key(KeyCode::Char('1')),
            key(KeyCode::Char('2')),
            key(KeyCode::Char('9')),
            key(KeyCode::Backspace),
            key(KeyCode::Char('3')),
            key(KeyCode::Enter),
        ];

        assert_eq!(type_keys(&keys), ("123".to_string(), SecretInput::Submitted));
    }

    #[test]
    fn ctrl_c_and_esc_cancel_entry() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(type_keys(&[key(KeyCode::Char('1')), ctrl_c]).1, SecretInput::Cancelled);
        assert_eq!(type_keys(&[key(KeyCode::Esc)]).1, SecretInput::Cancelled);
    }
}
