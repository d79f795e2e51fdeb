use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Shift, WorkGroup, WorkGroupInput, WorkGroupShift};
use crate::error::AppError;

const WORK_GROUP_COLUMNS: &str = "id, name, calendar_id, start_date, repetition_period_days, \
     description, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct WorkGroupRepository {
    pool: SqlitePool,
}

impl WorkGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: WorkGroupInput) -> Result<WorkGroup> {
        if input.repetition_period_days < 1 {
            return Err(AppError::Validation(
                "Repetition period must be at least one day".to_string(),
            )
            .into());
        }

        let now = Utc::now().naive_utc();
        let group = sqlx::query_as::<_, WorkGroup>(&format!(
            r#"
            INSERT INTO work_groups (name, calendar_id, start_date, repetition_period_days, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING {WORK_GROUP_COLUMNS}
            "#
        ))
        .bind(input.name)
        .bind(input.calendar_id)
        .bind(input.start_date)
        .bind(input.repetition_period_days)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(group)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<WorkGroup>> {
        let group = sqlx::query_as::<_, WorkGroup>(&format!(
            "SELECT {WORK_GROUP_COLUMNS} FROM work_groups WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Assign a shift to one day of the group's cycle. A day of the cycle
    /// holds at most one shift (UNIQUE constraint backs this up).
    pub async fn assign_shift(
        &self,
        work_group_id: i64,
        day_of_cycle: i64,
        shift_id: i64,
    ) -> Result<WorkGroupShift> {
        let group = self
            .get_by_id(work_group_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work group {} not found", work_group_id)))?;

        if day_of_cycle < 1 || day_of_cycle > group.repetition_period_days {
            return Err(AppError::Validation(format!(
                "Day of cycle {} is outside 1..={}",
                day_of_cycle, group.repetition_period_days
            ))
            .into());
        }

        let now = Utc::now().naive_utc();
        let assignment = sqlx::query_as::<_, WorkGroupShift>(
            r#"
            INSERT INTO work_group_shifts (work_group_id, day_of_cycle, shift_id, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, work_group_id, day_of_cycle, shift_id, created_at
            "#,
        )
        .bind(work_group_id)
        .bind(day_of_cycle)
        .bind(shift_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(assignment)
    }

    /// The shift assigned to the given day of the cycle, if any.
    pub async fn shift_for_day_of_cycle(
        &self,
        work_group_id: i64,
        day_of_cycle: i64,
    ) -> Result<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            SELECT s.id, s.name, s.start_time_1, s.end_time_1, s.start_time_2, s.end_time_2,
                   s.allowed_log_start_time, s.float_duration_minutes, s.is_night_shift,
                   s.description, s.is_active, s.created_at, s.updated_at
            FROM shifts s
            INNER JOIN work_group_shifts wgs ON wgs.shift_id = s.id
            WHERE wgs.work_group_id = ? AND wgs.day_of_cycle = ?
            "#,
        )
        .bind(work_group_id)
        .bind(day_of_cycle)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }
}
