use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A card-holding employee. `start_date`/`end_date` bound the employment
/// window outside of which attendance is never evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Personnel {
    pub id: i64,
    pub card_number: String,
    pub personnel_number: String,
    pub first_name: String,
    pub last_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub unit_id: i64,
    pub work_group_id: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelInput {
    pub card_number: String,
    pub personnel_number: String,
    pub first_name: String,
    pub last_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub unit_id: i64,
    pub work_group_id: Option<i64>,
}
