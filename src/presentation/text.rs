use chrono::{Datelike, NaiveDate};

use crate::settings::Language;
use crate::special_day::{CountDirection, DayCount};
use super::FilterMode;

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const TURKISH_MONTHS: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran",
    "Temmuz", "Ağustos", "Eylül", "Ekim", "Kasım", "Aralık",
];

pub fn count_label(count: DayCount, language: Language) -> String {
    let days = count.magnitude();
    match (language, count.direction) {
        (Language::English, _) if days == 0 => "Today".to_string(),
        (Language::Turkish, _) if days == 0 => "Bugün".to_string(),
        (Language::English, CountDirection::Backward) if days == 1 => "1 day left".to_string(),
        (Language::English, CountDirection::Forward) if days == 1 => "1 day passed".to_string(),
        (Language::English, CountDirection::Backward) => format!("{} days left", days),
        (Language::English, CountDirection::Forward) => format!("{} days passed", days),
        (Language::Turkish, CountDirection::Backward) => format!("{} gün kaldı", days),
        (Language::Turkish, CountDirection::Forward) => format!("{} gün geçti", days),
    }
}

pub fn long_date(date: NaiveDate, language: Language) -> String {
    let month = date.month0() as usize;
    match language {
        Language::English => format!("{} {}, {}", ENGLISH_MONTHS[month], date.day(), date.year()),
        Language::Turkish => format!("{} {} {}", date.day(), TURKISH_MONTHS[month], date.year()),
    }
}

pub fn filter_title(filter: FilterMode, language: Language) -> &'static str {
    match (language, filter) {
        (Language::English, FilterMode::All) => "All Events",
        (Language::English, FilterMode::Upcoming) => "Upcoming Events",
        (Language::English, FilterMode::Past) => "Past Events",
        (Language::Turkish, FilterMode::All) => "Tüm Etkinlikler",
        (Language::Turkish, FilterMode::Upcoming) => "Yaklaşan Etkinlikler",
        (Language::Turkish, FilterMode::Past) => "Geçmiş Etkinlikler",
    }
}

pub struct EmptyStateText {
    pub headline: &'static str,
    pub message: &'static str,
    pub action: &'static str,
}

pub fn empty_state(language: Language) -> EmptyStateText {
    match language {
        Language::English => EmptyStateText {
            headline: "No Special Days Yet",
            message: "Start tracking by adding your special days",
            action: "Add Special Day",
        },
        Language::Turkish => EmptyStateText {
            headline: "Henüz Hiç Özel Gün Eklenmemiş",
            message: "Özel günlerinizi ekleyerek takip etmeye başlayın",
            action: "Özel Gün Ekle",
        },
    }
}
