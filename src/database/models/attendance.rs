use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum LogType {
        In => "IN",
        Out => "OUT",
    }
}

/// A single card swipe. `log_type` is captured from the device when it
/// reports one, but default pairing does not rely on it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceLog {
    pub id: i64,
    pub personnel_id: i64,
    pub timestamp: NaiveDateTime,
    pub device_id: Option<String>,
    pub log_type: Option<LogType>,
    pub is_processed: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceLogInput {
    pub personnel_id: i64,
    pub timestamp: NaiveDateTime,
    pub device_id: Option<String>,
    pub log_type: Option<LogType>,
}
