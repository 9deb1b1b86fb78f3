use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDirection {
    /// The date has arrived or passed; days are counted up since it.
    Forward,
    /// The date is still ahead; days are counted down to it.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCount {
    pub days: i64,
    pub direction: CountDirection,
}

/// Whole calendar days from `from` to `to`. Negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

impl DayCount {
    pub fn between(date: NaiveDate, today: NaiveDate) -> Self {
        let days = days_between(date, today);
        let direction = if date <= today {
            CountDirection::Forward
        } else {
            CountDirection::Backward
        };
        Self { days, direction }
    }

    pub fn remaining_days(&self) -> i64 {
        -self.days
    }

    pub fn magnitude(&self) -> u64 {
        self.days.unsigned_abs()
    }

    pub fn is_counting_forward(&self) -> bool {
        self.direction == CountDirection::Forward
    }
}
