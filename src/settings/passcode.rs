use thiserror::Error;

use super::AppSettings;

pub const MIN_PASSCODE_LENGTH: usize = 4;

#[derive(Debug, Error, PartialEq)]
pub enum PasscodeError {
    #[error("Current passcode is incorrect")]
    IncorrectCurrent,
    #[error("Passcode must be at least 4 digits")]
    TooShort,
    #[error("New passcodes do not match")]
    Mismatch,
    #[error("No passcode set")]
    NotSet,
    #[error("Invalid passcode")]
    Invalid,
}

impl AppSettings {
    /// Whether the change form is complete enough to submit.
    pub fn can_save_passcode(&self, current: &str, new: &str, confirm: &str) -> bool {
        if self.passcode.is_some() && current.is_empty() {
            return false;
        }
        new.chars().count() >= MIN_PASSCODE_LENGTH && new == confirm
    }

    pub fn change_passcode(&mut self, current: &str, new: &str, confirm: &str) -> Result<(), PasscodeError> {
        if let Some(existing) = &self.passcode {
            if current != existing {
                return Err(PasscodeError::IncorrectCurrent);
            }
        }
        if new.chars().count() < MIN_PASSCODE_LENGTH {
            return Err(PasscodeError::TooShort);
        }
        if new != confirm {
            return Err(PasscodeError::Mismatch);
        }

        self.passcode = Some(new.to_string());
        tracing::info!("Passcode changed");
        Ok(())
    }

    pub fn verify_passcode(&self, attempt: &str) -> Result<(), PasscodeError> {
        match &self.passcode {
            None => Err(PasscodeError::NotSet),
            Some(passcode) if passcode == attempt => Ok(()),
            Some(_) => Err(PasscodeError::Invalid),
        }
    }
}
