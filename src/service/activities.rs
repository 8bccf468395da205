//! Activity persistence.

use super::crud::{activity_graph, activity_graphs, exists, fetch_activity};
use crate::error::AppError;
use crate::model::{Activity, ActivityGraph, EntityKind, NewActivity};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

pub struct ActivityService;

impl ActivityService {
    /// Activities with their signups. Callers must not depend on the order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<ActivityGraph>, AppError> {
        let mut conn = pool.acquire().await?;
        activity_graphs(&mut conn).await
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<ActivityGraph>, AppError> {
        let mut conn = pool.acquire().await?;
        match fetch_activity(&mut conn, id).await? {
            Some(activity) => Ok(Some(activity_graph(&mut conn, activity).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(pool: &SqlitePool, new: NewActivity) -> Result<ActivityGraph, AppError> {
        let mut tx = pool.begin().await?;
        let id = sqlx::query("INSERT INTO activities (name, difficulty) VALUES (?, ?)")
            .bind(&new.name)
            .bind(new.difficulty)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        tx.commit().await?;
        tracing::info!(id, name = %new.name, "created activity");
        Ok(ActivityGraph {
            activity: Activity {
                id,
                name: new.name,
                difficulty: new.difficulty,
            },
            signups: Vec::new(),
        })
    }

    pub async fn update(pool: &SqlitePool, id: i64, attrs: &Map<String, Value>) -> Result<ActivityGraph, AppError> {
        let mut tx = pool.begin().await?;
        let mut activity = fetch_activity(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Activity))?;
        activity.apply(attrs)?;
        sqlx::query("UPDATE activities SET name = ?, difficulty = ? WHERE id = ?")
            .bind(&activity.name)
            .bind(activity.difficulty)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let graph = activity_graph(&mut tx, activity).await?;
        tx.commit().await?;
        tracing::info!(id, "updated activity");
        Ok(graph)
    }

    /// Delete an activity and all of its signups in one transaction. Returns the number of signups removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        if !exists(&mut tx, EntityKind::Activity, id).await? {
            return Err(AppError::NotFound(EntityKind::Activity));
        }
        let removed = sqlx::query("DELETE FROM signups WHERE activity_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(id, signups = removed, "deleted activity");
        Ok(removed)
    }
}
