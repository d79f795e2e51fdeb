use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Calendar {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInput {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Holiday {
    pub id: i64,
    pub calendar_id: i64,
    pub date: NaiveDate,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayInput {
    pub calendar_id: i64,
    pub date: NaiveDate,
    pub name: String,
    pub description: Option<String>,
}

/// A cyclic shift rotation anchored at `start_date` and repeating every
/// `repetition_period_days` days.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkGroup {
    pub id: i64,
    pub name: String,
    pub calendar_id: i64,
    pub start_date: NaiveDate,
    pub repetition_period_days: i64,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkGroupInput {
    pub name: String,
    pub calendar_id: i64,
    pub start_date: NaiveDate,
    pub repetition_period_days: i64,
    pub description: Option<String>,
}

/// Maps one day of a work group's cycle (1-based) to a shift. Days of the
/// cycle with no row mean "no shift that day".
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkGroupShift {
    pub id: i64,
    pub work_group_id: i64,
    pub day_of_cycle: i64,
    pub shift_id: i64,
    pub created_at: NaiveDateTime,
}
