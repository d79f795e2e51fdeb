use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::database::models::{
    LeaveRequest, LeaveRequestInput, LeaveType, LeaveTypeInput, MissionRequest,
    MissionRequestInput, MissionType, MissionTypeInput, RequestStatus,
};
use crate::error::AppError;

const LEAVE_REQUEST_COLUMNS: &str = "id, personnel_id, leave_type_id, start_date, end_date, \
     start_time, end_time, is_hourly, status, requester_notes, approver_notes, created_at, updated_at";

const MISSION_REQUEST_COLUMNS: &str = "id, personnel_id, mission_type_id, start_date, end_date, \
     start_time, end_time, is_hourly, status, destination, purpose, requester_notes, approver_notes, \
     created_at, updated_at";

/// Leave and mission requests plus their type catalogs. Creation enforces
/// the invariants the reconciliation engine relies on: valid date/time
/// ranges and no overlapping pending/approved requests per person.
#[derive(Clone)]
pub struct RequestRepository {
    pool: SqlitePool,
}

impl RequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_leave_type(&self, input: LeaveTypeInput) -> Result<LeaveType> {
        let now = Utc::now().naive_utc();
        let leave_type = sqlx::query_as::<_, LeaveType>(
            r#"
            INSERT INTO leave_types (name, description, counts_as_work, requires_approval, max_days_per_year, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING id, name, description, counts_as_work, requires_approval, max_days_per_year, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.counts_as_work)
        .bind(input.requires_approval)
        .bind(input.max_days_per_year)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(leave_type)
    }

    pub async fn get_leave_type(&self, id: i64) -> Result<LeaveType> {
        let leave_type = sqlx::query_as::<_, LeaveType>(
            "SELECT id, name, description, counts_as_work, requires_approval, max_days_per_year, is_active, created_at, updated_at FROM leave_types WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Leave type {} not found", id)))?;

        Ok(leave_type)
    }

    pub async fn create_mission_type(&self, input: MissionTypeInput) -> Result<MissionType> {
        let now = Utc::now().naive_utc();
        let mission_type = sqlx::query_as::<_, MissionType>(
            r#"
            INSERT INTO mission_types (name, description, counts_as_work, requires_approval, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, 1, ?, ?)
            RETURNING id, name, description, counts_as_work, requires_approval, is_active, created_at, updated_at
            "#,
        )
        .bind(input.name)
        .bind(input.description)
        .bind(input.counts_as_work)
        .bind(input.requires_approval)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(mission_type)
    }

    pub async fn get_mission_type(&self, id: i64) -> Result<MissionType> {
        let mission_type = sqlx::query_as::<_, MissionType>(
            "SELECT id, name, description, counts_as_work, requires_approval, is_active, created_at, updated_at FROM mission_types WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mission type {} not found", id)))?;

        Ok(mission_type)
    }

    pub async fn create_leave_request(&self, input: LeaveRequestInput) -> Result<LeaveRequest> {
        self.validate_range(
            input.start_date,
            input.end_date,
            input.is_hourly,
            input.start_time.is_some() && input.end_time.is_some(),
            input.start_time.zip(input.end_time).is_none_or(|(s, e)| s < e),
        )?;
        self.ensure_no_overlap("leave_requests", input.personnel_id, input.start_date, input.end_date)
            .await?;

        let now = Utc::now().naive_utc();
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            r#"
            INSERT INTO leave_requests (personnel_id, leave_type_id, start_date, end_date, start_time, end_time, is_hourly, status, requester_notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {LEAVE_REQUEST_COLUMNS}
            "#
        ))
        .bind(input.personnel_id)
        .bind(input.leave_type_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.is_hourly)
        .bind(RequestStatus::Pending)
        .bind(input.requester_notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn create_mission_request(
        &self,
        input: MissionRequestInput,
    ) -> Result<MissionRequest> {
        self.validate_range(
            input.start_date,
            input.end_date,
            input.is_hourly,
            input.start_time.is_some() && input.end_time.is_some(),
            input.start_time.zip(input.end_time).is_none_or(|(s, e)| s < e),
        )?;
        self.ensure_no_overlap("mission_requests", input.personnel_id, input.start_date, input.end_date)
            .await?;

        let now = Utc::now().naive_utc();
        let request = sqlx::query_as::<_, MissionRequest>(&format!(
            r#"
            INSERT INTO mission_requests (personnel_id, mission_type_id, start_date, end_date, start_time, end_time, is_hourly, status, destination, purpose, requester_notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {MISSION_REQUEST_COLUMNS}
            "#
        ))
        .bind(input.personnel_id)
        .bind(input.mission_type_id)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.start_time)
        .bind(input.end_time)
        .bind(input.is_hourly)
        .bind(RequestStatus::Pending)
        .bind(input.destination)
        .bind(input.purpose)
        .bind(input.requester_notes)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn set_leave_status(&self, id: i64, status: RequestStatus) -> Result<bool> {
        let now = Utc::now().naive_utc();
        let result =
            sqlx::query("UPDATE leave_requests SET status = ?, updated_at = ? WHERE id = ?")
                .bind(status)
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_mission_status(&self, id: i64, status: RequestStatus) -> Result<bool> {
        let now = Utc::now().naive_utc();
        let result =
            sqlx::query("UPDATE mission_requests SET status = ?, updated_at = ? WHERE id = ?")
                .bind(status)
                .bind(now)
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The approved leave request covering `date` for this person, if any.
    pub async fn approved_leave_on(
        &self,
        personnel_id: i64,
        date: NaiveDate,
    ) -> Result<Option<LeaveRequest>> {
        let request = sqlx::query_as::<_, LeaveRequest>(&format!(
            "SELECT {LEAVE_REQUEST_COLUMNS} FROM leave_requests WHERE personnel_id = ? AND status = ? AND start_date <= ? AND end_date >= ? ORDER BY id LIMIT 1"
        ))
        .bind(personnel_id)
        .bind(RequestStatus::Approved)
        .bind(date)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// The approved mission request covering `date` for this person, if any.
    pub async fn approved_mission_on(
        &self,
        personnel_id: i64,
        date: NaiveDate,
    ) -> Result<Option<MissionRequest>> {
        let request = sqlx::query_as::<_, MissionRequest>(&format!(
            "SELECT {MISSION_REQUEST_COLUMNS} FROM mission_requests WHERE personnel_id = ? AND status = ? AND start_date <= ? AND end_date >= ? ORDER BY id LIMIT 1"
        ))
        .bind(personnel_id)
        .bind(RequestStatus::Approved)
        .bind(date)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    fn validate_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_hourly: bool,
        has_times: bool,
        times_ordered: bool,
    ) -> Result<()> {
        if start_date > end_date {
            return Err(
                AppError::Validation("Start date cannot be after end date".to_string()).into(),
            );
        }
        if is_hourly {
            if !has_times {
                return Err(AppError::Validation(
                    "Start and end times are required for hourly requests".to_string(),
                )
                .into());
            }
            if !times_ordered {
                return Err(AppError::Validation(
                    "Start time cannot be after end time".to_string(),
                )
                .into());
            }
        }
        Ok(())
    }

    async fn ensure_no_overlap(
        &self,
        table: &str,
        personnel_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<()> {
        let existing: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE personnel_id = ? AND status IN ('pending', 'approved') AND start_date <= ? AND end_date >= ?"
        ))
        .bind(personnel_id)
        .bind(end_date)
        .bind(start_date)
        .fetch_one(&self.pool)
        .await?;

        if existing > 0 {
            return Err(AppError::Validation(format!(
                "Overlapping request exists for personnel {}",
                personnel_id
            ))
            .into());
        }
        Ok(())
    }
}
