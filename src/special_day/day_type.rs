use serde::{Deserialize, Serialize};

use super::theme_color::ThemeColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecialDayType {
    Birthday,
    Anniversary,
    Wedding,
    HealthCheckup,
    Graduation,
    Religious,
    NewYear,
    MothersDay,
    FathersDay,
    QuitSmoking,
    DietTracking,
    SportsRoutine,
    Medication,
    Custom,
}

impl SpecialDayType {
    pub const ALL: [SpecialDayType; 14] = [
        SpecialDayType::Birthday,
        SpecialDayType::Anniversary,
        SpecialDayType::Wedding,
        SpecialDayType::HealthCheckup,
        SpecialDayType::Graduation,
        SpecialDayType::Religious,
        SpecialDayType::NewYear,
        SpecialDayType::MothersDay,
        SpecialDayType::FathersDay,
        SpecialDayType::QuitSmoking,
        SpecialDayType::DietTracking,
        SpecialDayType::SportsRoutine,
        SpecialDayType::Medication,
        SpecialDayType::Custom,
    ];

    /// Display title, also the persisted name.
    pub fn title(&self) -> &'static str {
        match self {
            SpecialDayType::Birthday => "Birthday",
            SpecialDayType::Anniversary => "Anniversary",
            SpecialDayType::Wedding => "Wedding",
            SpecialDayType::HealthCheckup => "Health Checkup",
            SpecialDayType::Graduation => "Graduation",
            SpecialDayType::Religious => "Religious",
            SpecialDayType::NewYear => "New Year",
            SpecialDayType::MothersDay => "Mother's Day",
            SpecialDayType::FathersDay => "Father's Day",
            SpecialDayType::QuitSmoking => "Quit Smoking",
            SpecialDayType::DietTracking => "Diet Tracking",
            SpecialDayType::SportsRoutine => "Sports Routine",
            SpecialDayType::Medication => "Medication",
            SpecialDayType::Custom => "Custom",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SpecialDayType::Birthday => "birthday.cake",
            SpecialDayType::Anniversary => "heart.circle",
            SpecialDayType::Wedding => "rings",
            SpecialDayType::HealthCheckup => "heart.text.square",
            SpecialDayType::Graduation => "graduationcap",
            SpecialDayType::Religious => "moon.stars",
            SpecialDayType::NewYear => "sparkles",
            SpecialDayType::MothersDay => "heart",
            SpecialDayType::FathersDay => "figure.wave",
            SpecialDayType::QuitSmoking => "smoke",
            SpecialDayType::DietTracking => "scalemass",
            SpecialDayType::SportsRoutine => "figure.run",
            SpecialDayType::Medication => "pills",
            SpecialDayType::Custom => "star",
        }
    }

    fn default_hex(&self) -> &'static str {
        match self {
            SpecialDayType::Birthday => "#FF69B4",
            SpecialDayType::Anniversary => "#FF0000",
            SpecialDayType::Wedding => "#96CEB4",
            SpecialDayType::HealthCheckup => "#4169E1",
            SpecialDayType::Graduation => "#800080",
            SpecialDayType::Religious => "#228B22",
            SpecialDayType::NewYear => "#FFA500",
            SpecialDayType::MothersDay => "#FF69B4",
            SpecialDayType::FathersDay => "#4169E1",
            SpecialDayType::QuitSmoking => "#808080",
            SpecialDayType::DietTracking => "#32CD32",
            SpecialDayType::SportsRoutine => "#FF8C00",
            SpecialDayType::Medication => "#4169E1",
            SpecialDayType::Custom => "#FFD700",
        }
    }

    pub fn default_color(&self) -> ThemeColor {
        ThemeColor::parse(self.default_hex()).expect("built-in colors are valid hex")
    }

    /// Case-insensitive lookup by title, accepting `health-checkup` style
    /// spellings as well.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|day_type| normalize(day_type.title()) == wanted)
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

impl From<String> for SpecialDayType {
    fn from(value: String) -> Self {
        Self::from_name(&value).unwrap_or(SpecialDayType::Custom)
    }
}

impl From<SpecialDayType> for String {
    fn from(day_type: SpecialDayType) -> Self {
        day_type.title().to_string()
    }
}
