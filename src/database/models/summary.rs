use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum DayStatus {
        Ok => "OK",
        Absent => "Absent",
        IncompleteLog => "IncompleteLog",
        Holiday => "Holiday",
        OnLeave => "OnLeave",
        PartialLeave => "PartialLeave",
        OnMission => "OnMission",
        PartialMission => "PartialMission",
        NoShift => "NoShift",
    }
}

impl Default for DayStatus {
    fn default() -> Self {
        DayStatus::Ok
    }
}

/// The reconciled attendance record for one person on one date. At most one
/// row exists per (personnel_id, date); reprocessing overwrites in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailySummary {
    pub id: i64,
    pub personnel_id: i64,
    pub date: NaiveDate,
    pub shift_id: Option<i64>,
    pub presence_duration: i64,
    pub tardiness_duration: i64,
    pub overtime_duration: i64,
    pub undertime_duration: i64,
    pub expected_work_duration: i64,
    pub absent: bool,
    pub status: DayStatus,
    pub first_entry_time: Option<NaiveDateTime>,
    pub last_exit_time: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Upsert payload for a daily summary; everything except identity and
/// bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummaryInput {
    pub personnel_id: i64,
    pub date: NaiveDate,
    pub shift_id: Option<i64>,
    pub presence_duration: i64,
    pub tardiness_duration: i64,
    pub overtime_duration: i64,
    pub undertime_duration: i64,
    pub expected_work_duration: i64,
    pub absent: bool,
    pub status: DayStatus,
    pub first_entry_time: Option<NaiveDateTime>,
    pub last_exit_time: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

impl DailySummaryInput {
    /// A zero-duration summary with the given status, used for the holiday
    /// and no-shift day classifications.
    pub fn blank(personnel_id: i64, date: NaiveDate, status: DayStatus, notes: Option<String>) -> Self {
        DailySummaryInput {
            personnel_id,
            date,
            shift_id: None,
            presence_duration: 0,
            tardiness_duration: 0,
            overtime_duration: 0,
            undertime_duration: 0,
            expected_work_duration: 0,
            absent: false,
            status,
            first_entry_time: None,
            last_exit_time: None,
            notes,
        }
    }
}
