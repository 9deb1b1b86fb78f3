use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),
}

/// Hex color in `#RRGGBB` or `#AARRGGBB` form, always upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ThemeColor(String);

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$")
            .expect("color pattern is valid")
    })
}

impl ThemeColor {
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let trimmed = value.trim();
        let digits = hex_pattern()
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_ascii_uppercase())
            .ok_or_else(|| ColorError::InvalidHex(value.to_string()))?;

        let expanded = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits
        };

        Ok(Self(format!("#{}", expanded)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let digits = &self.0[1..];
        let offset = if digits.len() == 8 { 2 } else { 0 };
        let channel = |start: usize| {
            u8::from_str_radix(&digits[offset + start..offset + start + 2], 16).unwrap_or(0)
        };
        (channel(0), channel(2), channel(4))
    }

    pub fn alpha(&self) -> u8 {
        let digits = &self.0[1..];
        if digits.len() == 8 {
            u8::from_str_radix(&digits[0..2], 16).unwrap_or(255)
        } else {
            255
        }
    }
}

impl FromStr for ThemeColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ThemeColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ThemeColor> for String {
    fn from(color: ThemeColor) -> Self {
        color.0
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
