use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A daily work-time template. Split shifts fill both intervals; night
/// shifts may have an end time clock-earlier than the start, which is
/// read as wrapping past midnight.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub start_time_1: NaiveTime,
    pub end_time_1: NaiveTime,
    pub start_time_2: Option<NaiveTime>,
    pub end_time_2: Option<NaiveTime>,
    pub allowed_log_start_time: NaiveTime,
    pub float_duration_minutes: i64,
    pub is_night_shift: bool,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Shift {
    /// End of the working day: the second interval's end when the shift is
    /// split, the first interval's end otherwise.
    pub fn expected_end(&self) -> NaiveTime {
        self.end_time_2.unwrap_or(self.end_time_1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftInput {
    pub name: String,
    pub start_time_1: NaiveTime,
    pub end_time_1: NaiveTime,
    pub start_time_2: Option<NaiveTime>,
    pub end_time_2: Option<NaiveTime>,
    pub allowed_log_start_time: NaiveTime,
    pub float_duration_minutes: i64,
    pub is_night_shift: bool,
    pub description: Option<String>,
}
