use ratatui::style::Color;

use crate::premium::{EntitlementSource, PremiumFeature};
use crate::settings::ThemeMode;
use crate::special_day::ThemeColor;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub text: Color,
    pub muted: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub border: Color,
    pub status_bar: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            title: Color::Cyan,
            text: Color::White,
            muted: Color::DarkGray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            border: Color::Gray,
            status_bar: Color::White,
            error: Color::Red,
            success: Color::Green,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            title: Color::Blue,
            text: Color::Black,
            muted: Color::Gray,
            selected_bg: Color::Rgb(210, 225, 250),
            selected_fg: Color::Black,
            border: Color::DarkGray,
            status_bar: Color::Black,
            error: Color::Red,
            success: Color::Rgb(0, 128, 0),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            text: Color::Rgb(236, 239, 244),
            muted: Color::Rgb(76, 86, 106),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            border: Color::Rgb(129, 161, 193),
            status_bar: Color::Rgb(216, 222, 233),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            text: Color::Rgb(235, 219, 178),
            muted: Color::Rgb(146, 131, 116),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            border: Color::Rgb(254, 128, 25),
            status_bar: Color::Rgb(235, 219, 178),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    /// Terminals give no reliable light/dark signal, so System means dark.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark | ThemeMode::System => Self::dark(),
        }
    }

    /// Resolves a named palette. Palettes beyond light/dark are a premium
    /// feature and fall back to the mode palette without the entitlement.
    pub fn resolve(name: &str, mode: ThemeMode, entitlements: &dyn EntitlementSource) -> Self {
        let premium = match name.to_lowercase().as_str() {
            "nord" => Some(Self::nord()),
            "gruvbox" => Some(Self::gruvbox()),
            _ => None,
        };

        match premium {
            Some(theme) if entitlements.is_unlocked(PremiumFeature::Themes) => theme,
            Some(_) => {
                tracing::info!("Palette '{}' needs premium, using {}", name, mode.title());
                Self::for_mode(mode)
            }
            None => Self::for_mode(mode),
        }
    }

    pub fn available_palettes() -> Vec<&'static str> {
        vec!["default", "nord", "gruvbox"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

pub fn accent(color: &ThemeColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}
