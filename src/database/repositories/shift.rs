use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Shift, ShiftInput};

const SHIFT_COLUMNS: &str = "id, name, start_time_1, end_time_1, start_time_2, end_time_2, \
     allowed_log_start_time, float_duration_minutes, is_night_shift, description, is_active, \
     created_at, updated_at";

#[derive(Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: ShiftInput) -> Result<Shift> {
        let now = Utc::now().naive_utc();
        let shift = sqlx::query_as::<_, Shift>(&format!(
            r#"
            INSERT INTO shifts (name, start_time_1, end_time_1, start_time_2, end_time_2, allowed_log_start_time, float_duration_minutes, is_night_shift, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING {SHIFT_COLUMNS}
            "#
        ))
        .bind(input.name)
        .bind(input.start_time_1)
        .bind(input.end_time_1)
        .bind(input.start_time_2)
        .bind(input.end_time_2)
        .bind(input.allowed_log_start_time)
        .bind(input.float_duration_minutes)
        .bind(input.is_night_shift)
        .bind(input.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(shift)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Shift>> {
        let shift =
            sqlx::query_as::<_, Shift>(&format!("SELECT {SHIFT_COLUMNS} FROM shifts WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(shift)
    }
}
