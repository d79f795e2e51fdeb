use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::models::{Personnel, PersonnelInput};

const PERSONNEL_COLUMNS: &str = "id, card_number, personnel_number, first_name, last_name, \
     start_date, end_date, unit_id, work_group_id, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PersonnelRepository {
    pool: SqlitePool,
}

impl PersonnelRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: PersonnelInput) -> Result<Personnel> {
        let now = Utc::now().naive_utc();
        let person = sqlx::query_as::<_, Personnel>(&format!(
            r#"
            INSERT INTO personnel (card_number, personnel_number, first_name, last_name, start_date, end_date, unit_id, work_group_id, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
            RETURNING {PERSONNEL_COLUMNS}
            "#
        ))
        .bind(input.card_number)
        .bind(input.personnel_number)
        .bind(input.first_name)
        .bind(input.last_name)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(input.unit_id)
        .bind(input.work_group_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(person)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Personnel>> {
        let person = sqlx::query_as::<_, Personnel>(&format!(
            "SELECT {PERSONNEL_COLUMNS} FROM personnel WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(person)
    }

    /// Active personnel, optionally narrowed to an id list. Ids that do not
    /// match an active person are silently dropped from the result.
    pub async fn get_active(&self, ids: Option<&[i64]>) -> Result<Vec<Personnel>> {
        let rows = match ids {
            Some(ids) if !ids.is_empty() => {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let sql = format!(
                    "SELECT {PERSONNEL_COLUMNS} FROM personnel WHERE is_active = 1 AND id IN ({placeholders}) ORDER BY id"
                );
                let mut query = sqlx::query_as::<_, Personnel>(&sql);
                for id in ids {
                    query = query.bind(*id);
                }
                query.fetch_all(&self.pool).await?
            }
            _ => {
                sqlx::query_as::<_, Personnel>(&format!(
                    "SELECT {PERSONNEL_COLUMNS} FROM personnel WHERE is_active = 1 ORDER BY id"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows)
    }

    pub async fn deactivate(&self, id: i64) -> Result<bool> {
        let now = Utc::now().naive_utc();
        let result = sqlx::query("UPDATE personnel SET is_active = 0, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
