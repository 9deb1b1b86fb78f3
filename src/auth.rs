use thiserror::Error;

use crate::session::Session;
use crate::settings::{AppSettings, PasscodeError};

pub const UNLOCK_REASON: &str = "Unlock CountDay";

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Biometric authentication not available")]
    BiometricsUnavailable,
    #[error("Authentication failed")]
    BiometricFailed,
    #[error("{0}")]
    Passcode(#[from] PasscodeError),
}

/// Platform biometric check, treated as an opaque yes/no gate.
#[cfg_attr(test, mockall::automock)]
pub trait BiometricAuthenticator: Send + Sync {
    fn can_evaluate(&self) -> bool;
    fn evaluate(&self, reason: &str) -> bool;
}

/// Used where the platform offers no biometric hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiometrics;

impl BiometricAuthenticator for NoBiometrics {
    fn can_evaluate(&self) -> bool {
        false
    }

    fn evaluate(&self, _reason: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy)]
pub enum UnlockMethod<'a> {
    Biometric,
    Passcode(&'a str),
}

pub fn unlock(
    session: &mut Session,
    settings: &AppSettings,
    method: UnlockMethod<'_>,
    authenticator: &dyn BiometricAuthenticator,
) -> Result<(), AuthError> {
    match method {
        UnlockMethod::Biometric => {
            if !authenticator.can_evaluate() {
                return Err(AuthError::BiometricsUnavailable);
            }
            if !authenticator.evaluate(UNLOCK_REASON) {
                tracing::warn!("Biometric authentication failed");
                return Err(AuthError::BiometricFailed);
            }
        }
        UnlockMethod::Passcode(attempt) => {
            settings.verify_passcode(attempt).inspect_err(|_| {
                tracing::warn!("Passcode authentication failed");
            })?;
        }
    }

    session.requires_authentication = false;
    Ok(())
}

/// Launch-time gate: opens the session when no authentication is configured
/// and tries biometrics first when enabled. Returns whether the session is
/// still locked.
pub fn initial_gate(
    session: &mut Session,
    settings: &AppSettings,
    authenticator: &dyn BiometricAuthenticator,
) -> bool {
    if !settings.requires_authentication() {
        session.requires_authentication = false;
        return false;
    }

    if settings.use_biometric_auth {
        if let Err(e) = unlock(session, settings, UnlockMethod::Biometric, authenticator) {
            tracing::info!("Biometric unlock unavailable at launch: {}", e);
        }
    }

    session.requires_authentication
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_session() -> Session {
        Session {
            has_completed_onboarding: true,
            requires_authentication: true,
        }
    }

    fn passcode_settings() -> AppSettings {
        AppSettings {
            use_passcode_auth: true,
            passcode: Some("1234".to_string()),
            ..AppSettings::default()
        }
    }

    #[test]
    fn correct_passcode_unlocks() {
        let mut session = locked_session();

        unlock(&mut session, &passcode_settings(), UnlockMethod::Passcode("1234"), &NoBiometrics).unwrap();

        assert!(!session.requires_authentication);
    }

    #[test]
    fn wrong_passcode_keeps_session_locked() {
        let mut session = locked_session();

        let result = unlock(&mut session, &passcode_settings(), UnlockMethod::Passcode("0000"), &NoBiometrics);

        assert_eq!(result, Err(AuthError::Passcode(PasscodeError::Invalid)));
        assert!(session.requires_authentication);
    }

    #[test]
    fn biometric_success_unlocks() {
        let mut authenticator = MockBiometricAuthenticator::new();
        authenticator.expect_can_evaluate().return_const(true);
        authenticator
            .expect_evaluate()
            .withf(|reason| reason == UNLOCK_REASON)
            .times(1)
            .return_const(true);
        let mut session = locked_session();

        unlock(&mut session, &AppSettings::default(), UnlockMethod::Biometric, &authenticator).unwrap();

        assert!(!session.requires_authentication);
    }

    #[test]
    fn biometric_unavailable_is_reported() {
        let mut session = locked_session();

        let result = unlock(&mut session, &AppSettings::default(), UnlockMethod::Biometric, &NoBiometrics);

        assert_eq!(result, Err(AuthError::BiometricsUnavailable));
    }

    #[test]
    fn biometric_rejection_is_reported() {
        let mut authenticator = MockBiometricAuthenticator::new();
        authenticator.expect_can_evaluate().return_const(true);
        authenticator.expect_evaluate().return_const(false);
        let mut session = locked_session();

        let result = unlock(&mut session, &AppSettings::default(), UnlockMethod::Biometric, &authenticator);

        assert_eq!(result, Err(AuthError::BiometricFailed));
        assert!(session.requires_authentication);
    }

    #[test]
    fn gate_opens_without_configured_auth() {
        let mut session = locked_session();

        let locked = initial_gate(&mut session, &AppSettings::default(), &NoBiometrics);

        assert!(!locked);
        assert!(!session.requires_authentication);
    }

    #[test]
    fn gate_tries_biometrics_when_enabled() {
        let mut authenticator = MockBiometricAuthenticator::new();
        authenticator.expect_can_evaluate().return_const(true);
        authenticator.expect_evaluate().times(1).return_const(true);
        let settings = AppSettings {
            use_biometric_auth: true,
            ..AppSettings::default()
        };
        let mut session = locked_session();

        assert!(!initial_gate(&mut session, &settings, &authenticator));
    }

    #[test]
    fn gate_stays_locked_for_passcode_only() {
        let mut session = locked_session();

        assert!(initial_gate(&mut session, &passcode_settings(), &NoBiometrics));
    }
}
