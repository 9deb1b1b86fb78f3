use chrono::NaiveDate;
use uuid::Uuid;

use crate::settings::Language;
use crate::special_day::{CountDirection, Record};
use super::RenderItem;

/// What a home-screen widget shows on one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub generated_on: NaiveDate,
    pub featured: Option<RenderItem>,
    pub upcoming: Vec<RenderItem>,
}

impl WidgetSnapshot {
    /// Features the pinned record when present, otherwise the nearest upcoming
    /// day, otherwise the most recent past one.
    pub fn build(
        records: &[Record],
        today: NaiveDate,
        pinned: Option<Uuid>,
        upcoming_limit: usize,
        language: Language,
    ) -> Self {
        let mut upcoming: Vec<&Record> = records
            .iter()
            .filter(|r| r.day_count(today).direction == CountDirection::Backward)
            .collect();
        upcoming.sort_by_key(|r| r.date());

        let featured = pinned
            .and_then(|id| records.iter().find(|r| r.id() == id))
            .or_else(|| upcoming.first().copied())
            .or_else(|| records.iter().max_by_key(|r| r.date()));

        Self {
            generated_on: today,
            featured: featured.map(|r| RenderItem::from_record(r, today, language)),
            upcoming: upcoming
                .into_iter()
                .take(upcoming_limit)
                .map(|r| RenderItem::from_record(r, today, language))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::special_day::SpecialDayType;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
    }

    fn record(title: &str, offset_days: i64) -> Record {
        let date = today() + chrono::Duration::days(offset_days);
        Record::builder(title, date, SpecialDayType::Custom)
            .build(Utc::now())
            .unwrap()
    }

    #[test]
    fn features_nearest_upcoming_day() {
        let records = vec![record("Far", 30), record("Past", -3), record("Near", 2)];

        let snapshot = WidgetSnapshot::build(&records, today(), None, 5, Language::English);

        assert_eq!(snapshot.featured.map(|i| i.title), Some("Near".to_string()));
        assert_eq!(snapshot.upcoming.len(), 2);
    }

    #[test]
    fn falls_back_to_most_recent_past_day() {
        let records = vec![record("Old", -30), record("Recent", -1)];

        let snapshot = WidgetSnapshot::build(&records, today(), None, 5, Language::English);

        assert_eq!(snapshot.featured.map(|i| i.title), Some("Recent".to_string()));
        assert!(snapshot.upcoming.is_empty());
    }

    #[test]
    fn pinned_record_wins() {
        let records = vec![record("Near", 2), record("Pinned", -100)];
        let pinned = records[1].id();

        let snapshot = WidgetSnapshot::build(&records, today(), Some(pinned), 1, Language::English);

        assert_eq!(snapshot.featured.map(|i| i.id), Some(pinned));
        assert_eq!(snapshot.upcoming.len(), 1);
    }

    #[test]
    fn empty_records_feature_nothing() {
        let snapshot = WidgetSnapshot::build(&[], today(), None, 3, Language::English);
        assert!(snapshot.featured.is_none());
    }
}
