use crate::settings::AppSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumFeature {
    Unlimited,
    Themes,
    Widgets,
    Backup,
    Notifications,
}

impl PremiumFeature {
    pub const ALL: [PremiumFeature; 5] = [
        PremiumFeature::Unlimited,
        PremiumFeature::Themes,
        PremiumFeature::Widgets,
        PremiumFeature::Backup,
        PremiumFeature::Notifications,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            PremiumFeature::Unlimited => "Unlimited Special Days",
            PremiumFeature::Themes => "Custom Themes",
            PremiumFeature::Widgets => "Home Screen Widgets",
            PremiumFeature::Backup => "Cloud Backup",
            PremiumFeature::Notifications => "Advanced Notifications",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PremiumFeature::Unlimited => "infinity.circle.fill",
            PremiumFeature::Themes => "paintbrush.fill",
            PremiumFeature::Widgets => "apps.iphone.fill",
            PremiumFeature::Backup => "icloud.fill",
            PremiumFeature::Notifications => "bell.badge.fill",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PremiumFeature::Unlimited => "Track as many special days as you want",
            PremiumFeature::Themes => "Personalize your special days with custom themes",
            PremiumFeature::Widgets => "Add beautiful widgets to your home screen",
            PremiumFeature::Backup => "Keep your data safe with automatic backups",
            PremiumFeature::Notifications => "Get reminded with custom notification settings",
        }
    }
}

/// Source of the premium entitlement. Billing lives outside this crate.
pub trait EntitlementSource {
    fn is_premium(&self) -> bool;

    fn is_unlocked(&self, _feature: PremiumFeature) -> bool {
        self.is_premium()
    }
}

impl EntitlementSource for AppSettings {
    fn is_premium(&self) -> bool {
        self.is_premium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_settings_unlock_nothing() {
        let settings = AppSettings::default();
        assert!(PremiumFeature::ALL.iter().all(|f| !settings.is_unlocked(*f)));
    }

    #[test]
    fn premium_settings_unlock_everything() {
        let settings = AppSettings {
            is_premium: true,
            ..AppSettings::default()
        };
        assert!(PremiumFeature::ALL.iter().all(|f| settings.is_unlocked(*f)));
    }
}
