use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::clock::Clock;
use super::day_count::DayCount;
use super::day_type::SpecialDayType;
use super::theme_color::ThemeColor;

pub const SAMPLE_RECORD_ID: Uuid = Uuid::from_u128(0x5a1e_d0c5_0000_4000_8000_000000000001);
const UNTITLED: &str = "Untitled";

#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("Title must not be empty")]
    EmptyTitle,
}

/// A tracked special day.
///
/// Fields are private so the reminder and identity invariants can only be
/// changed through [`Record::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct Record {
    id: Uuid,
    title: String,
    date: NaiveDate,
    #[serde(rename = "type")]
    day_type: SpecialDayType,
    theme_color: ThemeColor,
    notes: Option<String>,
    reminder_enabled: bool,
    reminder_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecordBuilder {
    title: String,
    date: NaiveDate,
    day_type: SpecialDayType,
    theme_color: Option<ThemeColor>,
    notes: Option<String>,
    reminder_date: Option<NaiveDate>,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub day_type: Option<SpecialDayType>,
    pub theme_color: Option<ThemeColor>,
    /// An empty string clears the notes.
    pub notes: Option<String>,
    pub reminder_enabled: Option<bool>,
    pub reminder_date: Option<NaiveDate>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        *self == RecordUpdate::default()
    }
}

impl RecordBuilder {
    pub fn theme_color(mut self, color: ThemeColor) -> Self {
        self.theme_color = Some(color);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = normalize_notes(notes.into());
        self
    }

    pub fn reminder(mut self, date: NaiveDate) -> Self {
        self.reminder_date = Some(date);
        self
    }

    pub fn build(self, now: DateTime<Utc>) -> Result<Record, RecordError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(RecordError::EmptyTitle);
        }

        Ok(Record {
            id: Uuid::new_v4(),
            title,
            date: self.date,
            day_type: self.day_type,
            theme_color: self
                .theme_color
                .unwrap_or_else(|| self.day_type.default_color()),
            notes: self.notes,
            reminder_enabled: self.reminder_date.is_some(),
            reminder_date: self.reminder_date,
            created_at: now,
            last_modified_at: now,
        })
    }
}

impl Record {
    pub fn builder(title: impl Into<String>, date: NaiveDate, day_type: SpecialDayType) -> RecordBuilder {
        RecordBuilder {
            title: title.into(),
            date,
            day_type,
            theme_color: None,
            notes: None,
            reminder_date: None,
        }
    }

    /// The record shown when nothing has been stored yet.
    pub fn sample(clock: &dyn Clock) -> Record {
        let today = clock.today();
        let stamp = today
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| clock.now());

        Record {
            id: SAMPLE_RECORD_ID,
            title: "Windsurf Event".to_string(),
            date: today.succ_opt().unwrap_or(today),
            day_type: SpecialDayType::Custom,
            theme_color: SpecialDayType::Custom.default_color(),
            notes: Some("Windsurf event in Alaçatı".to_string()),
            reminder_enabled: false,
            reminder_date: None,
            created_at: stamp,
            last_modified_at: stamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn day_type(&self) -> SpecialDayType {
        self.day_type
    }

    pub fn theme_color(&self) -> &ThemeColor {
        &self.theme_color
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn reminder_enabled(&self) -> bool {
        self.reminder_enabled
    }

    pub fn reminder_date(&self) -> Option<NaiveDate> {
        self.reminder_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    pub fn day_count(&self, today: NaiveDate) -> DayCount {
        DayCount::between(self.date, today)
    }

    /// Signed days since the date; negative while it is still ahead.
    pub fn days_count(&self, today: NaiveDate) -> i64 {
        self.day_count(today).days
    }

    pub fn remaining_days(&self, today: NaiveDate) -> i64 {
        self.day_count(today).remaining_days()
    }

    pub fn is_counting_forward(&self, today: NaiveDate) -> bool {
        self.day_count(today).is_counting_forward()
    }

    pub fn apply(&mut self, update: RecordUpdate, now: DateTime<Utc>) -> Result<(), RecordError> {
        let title = match update.title {
            Some(title) if title.trim().is_empty() => return Err(RecordError::EmptyTitle),
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(day_type) = update.day_type {
            self.day_type = day_type;
            if update.theme_color.is_none() {
                self.theme_color = day_type.default_color();
            }
        }
        if let Some(color) = update.theme_color {
            self.theme_color = color;
        }
        if let Some(notes) = update.notes {
            self.notes = normalize_notes(notes);
        }
        if let Some(enabled) = update.reminder_enabled {
            self.reminder_enabled = enabled;
        }
        if let Some(reminder_date) = update.reminder_date {
            self.reminder_date = Some(reminder_date);
        }
        if !self.reminder_enabled {
            self.reminder_date = None;
        }

        self.touch(now);
        Ok(())
    }

    // Strictly monotonic even when the clock has not moved.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified_at = if now > self.last_modified_at {
            now
        } else {
            self.last_modified_at + Duration::microseconds(1)
        };
    }
}

fn normalize_notes(notes: String) -> Option<String> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Persisted shape of a record. Every field is optional and a value of the
/// wrong shape reads as missing, so one damaged field never fails the
/// surrounding collection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredRecord {
    #[serde(deserialize_with = "lenient")]
    id: Option<Uuid>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    date: Option<StoredDate>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    day_type: Option<SpecialDayType>,
    #[serde(deserialize_with = "lenient")]
    theme_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    notes: Option<String>,
    #[serde(deserialize_with = "lenient")]
    reminder_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    reminder_date: Option<StoredDate>,
    #[serde(deserialize_with = "lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient")]
    last_modified_at: Option<DateTime<Utc>>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredDate {
    Date(NaiveDate),
    Timestamp(DateTime<FixedOffset>),
}

impl StoredDate {
    fn date(&self) -> NaiveDate {
        match self {
            StoredDate::Date(date) => *date,
            StoredDate::Timestamp(timestamp) => timestamp.date_naive(),
        }
    }
}

impl From<StoredRecord> for Record {
    fn from(stored: StoredRecord) -> Self {
        let decoded_at = Utc::now();
        let created_at = stored.created_at.unwrap_or(decoded_at);
        let day_type = stored.day_type.unwrap_or(SpecialDayType::Custom);
        let theme_color = stored
            .theme_color
            .and_then(|hex| ThemeColor::parse(&hex).ok())
            .unwrap_or_else(|| day_type.default_color());
        let date = stored
            .date
            .map(|date| date.date())
            .or_else(|| stored.created_at.map(|at| at.with_timezone(&Local).date_naive()))
            .unwrap_or_else(|| Local::now().date_naive());
        let reminder_enabled = stored.reminder_enabled.unwrap_or(false);

        Record {
            id: stored.id.unwrap_or_else(Uuid::new_v4),
            title: stored
                .title
                .map(|title| title.trim().to_string())
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            date,
            day_type,
            theme_color,
            notes: stored.notes.and_then(normalize_notes),
            reminder_enabled,
            reminder_date: stored
                .reminder_date
                .filter(|_| reminder_enabled)
                .map(|date| date.date()),
            created_at,
            last_modified_at: stored.last_modified_at.unwrap_or(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special_day::clock::FixedClock;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn create_test_record() -> Record {
        Record::builder("Anniversary dinner", date(2024, 6, 1), SpecialDayType::Anniversary)
            .notes("Book the table")
            .reminder(date(2024, 5, 30))
            .build(at(1_000))
            .unwrap()
    }

    #[test]
    fn builder_defaults_color_from_type() {
        let record = Record::builder("Mom", date(2024, 5, 12), SpecialDayType::MothersDay)
            .build(at(0))
            .unwrap();

        assert_eq!(record.theme_color(), &SpecialDayType::MothersDay.default_color());
        assert!(!record.reminder_enabled());
        assert_eq!(record.created_at(), record.last_modified_at());
    }

    #[test]
    fn builder_keeps_explicit_color() {
        let color = ThemeColor::parse("#123456").unwrap();
        let record = Record::builder("Quit", date(2024, 1, 1), SpecialDayType::QuitSmoking)
            .theme_color(color.clone())
            .build(at(0))
            .unwrap();

        assert_eq!(record.theme_color(), &color);
    }

    #[test]
    fn builder_rejects_blank_title() {
        let result = Record::builder("   ", date(2024, 1, 1), SpecialDayType::Custom).build(at(0));
        assert_eq!(result, Err(RecordError::EmptyTitle));
    }

    #[test]
    fn title_only_update_leaves_other_fields() {
        let mut record = create_test_record();
        let before = record.clone();

        record
            .apply(
                RecordUpdate {
                    title: Some("Dinner at eight".to_string()),
                    ..Default::default()
                },
                at(2_000),
            )
            .unwrap();

        assert_eq!(record.title(), "Dinner at eight");
        assert_eq!(record.date(), before.date());
        assert_eq!(record.day_type(), before.day_type());
        assert_eq!(record.notes(), before.notes());
        assert_eq!(record.reminder_date(), before.reminder_date());
        assert_eq!(record.created_at(), before.created_at());
        assert!(record.last_modified_at() > before.last_modified_at());
    }

    #[test]
    fn update_advances_timestamp_when_clock_stalls() {
        let mut record = create_test_record();
        let before = record.last_modified_at();

        record.apply(RecordUpdate::default(), before).unwrap();

        assert!(record.last_modified_at() > before);
    }

    #[test]
    fn disabling_reminder_clears_date_even_if_one_is_passed() {
        let mut record = create_test_record();

        record
            .apply(
                RecordUpdate {
                    reminder_enabled: Some(false),
                    reminder_date: Some(date(2024, 5, 31)),
                    ..Default::default()
                },
                at(2_000),
            )
            .unwrap();

        assert!(!record.reminder_enabled());
        assert_eq!(record.reminder_date(), None);
    }

    #[test]
    fn changing_type_resets_color_unless_given() {
        let mut record = create_test_record();

        record
            .apply(
                RecordUpdate {
                    day_type: Some(SpecialDayType::Graduation),
                    ..Default::default()
                },
                at(2_000),
            )
            .unwrap();
        assert_eq!(record.theme_color(), &SpecialDayType::Graduation.default_color());

        let custom = ThemeColor::parse("#ABCDEF").unwrap();
        record
            .apply(
                RecordUpdate {
                    day_type: Some(SpecialDayType::Birthday),
                    theme_color: Some(custom.clone()),
                    ..Default::default()
                },
                at(3_000),
            )
            .unwrap();
        assert_eq!(record.theme_color(), &custom);
    }

    #[test]
    fn blank_title_update_is_rejected_without_changes() {
        let mut record = create_test_record();
        let before = record.clone();

        let result = record.apply(
            RecordUpdate {
                title: Some(" ".to_string()),
                date: Some(date(2030, 1, 1)),
                ..Default::default()
            },
            at(2_000),
        );

        assert_eq!(result, Err(RecordError::EmptyTitle));
        assert_eq!(record, before);
    }

    #[test]
    fn empty_notes_update_clears_notes() {
        let mut record = create_test_record();

        record
            .apply(
                RecordUpdate {
                    notes: Some(String::new()),
                    ..Default::default()
                },
                at(2_000),
            )
            .unwrap();

        assert_eq!(record.notes(), None);
    }

    #[test]
    fn json_round_trip_preserves_record() {
        let record = create_test_record();

        let json = serde_json::to_string(&record).unwrap();
        let decoded: Record = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, record);
        assert!(json.contains("\"themeColor\""));
        assert!(json.contains("\"type\":\"Anniversary\""));
    }

    #[test]
    fn decodes_timestamp_dates_and_missing_fields() {
        let json = r##"{
            "id": "0b7c6c1e-9a4e-4c8e-9d8b-1f0e6d1b2a3c",
            "title": "Graduation",
            "date": "2024-06-15T09:30:00+03:00",
            "type": "Graduation",
            "themeColor": "not a color",
            "reminderDate": "2024-06-14",
            "futureField": 42
        }"##;

        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.date(), date(2024, 6, 15));
        assert_eq!(record.theme_color(), &SpecialDayType::Graduation.default_color());
        assert!(!record.reminder_enabled());
        assert_eq!(record.reminder_date(), None);
        assert_eq!(record.notes(), None);
    }

    #[test]
    fn decodes_empty_object_with_defaults() {
        let record: Record = serde_json::from_str("{}").unwrap();

        assert_eq!(record.title(), "Untitled");
        assert_eq!(record.day_type(), SpecialDayType::Custom);
        assert_eq!(record.created_at(), record.last_modified_at());
    }

    #[test]
    fn wrongly_shaped_fields_fall_back_to_defaults() {
        let json = r#"{
            "title": "Trip",
            "date": "15/06/2024",
            "type": 7,
            "themeColor": false,
            "reminderEnabled": "yes",
            "reminderDate": [],
            "createdAt": "2024-06-01T08:00:00Z",
            "lastModifiedAt": "yesterday"
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();

        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert_eq!(record.title(), "Trip");
        assert_eq!(record.date(), created_at.with_timezone(&Local).date_naive());
        assert_eq!(record.day_type(), SpecialDayType::Custom);
        assert_eq!(record.theme_color(), &SpecialDayType::Custom.default_color());
        assert!(!record.reminder_enabled());
        assert_eq!(record.reminder_date(), None);
        assert_eq!(record.last_modified_at(), created_at);
    }

    #[test]
    fn sample_is_tomorrow_with_fixed_id() {
        let clock = FixedClock::on(date(2024, 11, 20));
        let sample = Record::sample(&clock);

        assert_eq!(sample.id(), SAMPLE_RECORD_ID);
        assert_eq!(sample.date(), date(2024, 11, 21));
        assert_eq!(sample, Record::sample(&clock));
        assert_eq!(sample.remaining_days(clock.today()), 1);
    }
}
