//! Signup persistence. Both parents must exist when a signup is written.

use super::crud::{ensure_signup_parents, fetch_signup, signup_graph, signup_graphs};
use crate::error::AppError;
use crate::model::{EntityKind, NewSignup, SignupGraph};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

pub struct SignupService;

impl SignupService {
    pub async fn list(pool: &SqlitePool) -> Result<Vec<SignupGraph>, AppError> {
        let mut conn = pool.acquire().await?;
        signup_graphs(&mut conn).await
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<SignupGraph>, AppError> {
        let mut conn = pool.acquire().await?;
        signup_graph(&mut conn, id).await
    }

    pub async fn create(pool: &SqlitePool, new: NewSignup) -> Result<SignupGraph, AppError> {
        let mut tx = pool.begin().await?;
        ensure_signup_parents(&mut tx, new.camper_id, new.activity_id).await?;
        let id = sqlx::query("INSERT INTO signups (time, camper_id, activity_id) VALUES (?, ?, ?)")
            .bind(new.time)
            .bind(new.camper_id)
            .bind(new.activity_id)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        let graph = signup_graph(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::Persistence(format!("signup {} vanished after insert", id)))?;
        tx.commit().await?;
        tracing::info!(id, camper_id = new.camper_id, activity_id = new.activity_id, "created signup");
        Ok(graph)
    }

    pub async fn update(pool: &SqlitePool, id: i64, attrs: &Map<String, Value>) -> Result<SignupGraph, AppError> {
        let mut tx = pool.begin().await?;
        let mut signup = fetch_signup(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Signup))?;
        signup.apply(attrs)?;
        ensure_signup_parents(&mut tx, signup.camper_id, signup.activity_id).await?;
        sqlx::query("UPDATE signups SET time = ?, camper_id = ?, activity_id = ? WHERE id = ?")
            .bind(signup.time)
            .bind(signup.camper_id)
            .bind(signup.activity_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let graph = signup_graph(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Signup))?;
        tx.commit().await?;
        tracing::info!(id, "updated signup");
        Ok(graph)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM signups WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(AppError::NotFound(EntityKind::Signup));
        }
        tx.commit().await?;
        tracing::info!(id, "deleted signup");
        Ok(())
    }
}
