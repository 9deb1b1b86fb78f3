pub mod clock;
pub mod day_count;
pub mod day_type;
pub mod record;
pub mod theme_color;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day_count::{days_between, CountDirection, DayCount};
pub use day_type::SpecialDayType;
pub use record::{Record, RecordBuilder, RecordError, RecordUpdate, SAMPLE_RECORD_ID};
pub use theme_color::{ColorError, ThemeColor};
