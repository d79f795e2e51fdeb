use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        RequestStatus::Pending
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub counts_as_work: bool,
    pub requires_approval: bool,
    pub max_days_per_year: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveTypeInput {
    pub name: String,
    pub description: Option<String>,
    pub counts_as_work: bool,
    pub requires_approval: bool,
    pub max_days_per_year: Option<i64>,
}

/// A leave request over a date range. Hourly leaves additionally carry a
/// time-of-day range and cover only part of each day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRequest {
    pub id: i64,
    pub personnel_id: i64,
    pub leave_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_hourly: bool,
    pub status: RequestStatus,
    pub requester_notes: Option<String>,
    pub approver_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestInput {
    pub personnel_id: i64,
    pub leave_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_hourly: bool,
    pub requester_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MissionType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub counts_as_work: bool,
    pub requires_approval: bool,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionTypeInput {
    pub name: String,
    pub description: Option<String>,
    pub counts_as_work: bool,
    pub requires_approval: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MissionRequest {
    pub id: i64,
    pub personnel_id: i64,
    pub mission_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_hourly: bool,
    pub status: RequestStatus,
    pub destination: Option<String>,
    pub purpose: Option<String>,
    pub requester_notes: Option<String>,
    pub approver_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRequestInput {
    pub personnel_id: i64,
    pub mission_type_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_hourly: bool,
    pub destination: Option<String>,
    pub purpose: Option<String>,
    pub requester_notes: Option<String>,
}
