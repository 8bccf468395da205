//! Camper persistence.

use super::crud::{camper_graph, exists, fetch_camper};
use crate::error::AppError;
use crate::model::{Camper, CamperGraph, EntityKind, NewCamper};
use serde_json::{Map, Value};
use sqlx::SqlitePool;

pub struct CamperService;

impl CamperService {
    /// Campers without their signups. Callers must not depend on the order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Camper>, AppError> {
        let mut conn = pool.acquire().await?;
        Ok(sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers ORDER BY id")
            .fetch_all(&mut *conn)
            .await?)
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<CamperGraph>, AppError> {
        let mut conn = pool.acquire().await?;
        match fetch_camper(&mut conn, id).await? {
            Some(camper) => Ok(Some(camper_graph(&mut conn, camper).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(pool: &SqlitePool, new: NewCamper) -> Result<CamperGraph, AppError> {
        let mut tx = pool.begin().await?;
        let id = sqlx::query("INSERT INTO campers (name, age) VALUES (?, ?)")
            .bind(&new.name)
            .bind(new.age)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();
        tx.commit().await?;
        tracing::info!(id, name = %new.name, "created camper");
        Ok(CamperGraph {
            camper: Camper {
                id,
                name: new.name,
                age: new.age,
            },
            signups: Vec::new(),
        })
    }

    /// Apply a partial update through the validated setters. Nothing is written unless every attribute passes.
    pub async fn update(pool: &SqlitePool, id: i64, attrs: &Map<String, Value>) -> Result<CamperGraph, AppError> {
        let mut tx = pool.begin().await?;
        let mut camper = fetch_camper(&mut tx, id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Camper))?;
        camper.apply(attrs)?;
        sqlx::query("UPDATE campers SET name = ?, age = ? WHERE id = ?")
            .bind(&camper.name)
            .bind(camper.age)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let graph = camper_graph(&mut tx, camper).await?;
        tx.commit().await?;
        tracing::info!(id, "updated camper");
        Ok(graph)
    }

    /// Delete a camper and all of its signups. Returns the number of signups removed.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let mut tx = pool.begin().await?;
        if !exists(&mut tx, EntityKind::Camper, id).await? {
            return Err(AppError::NotFound(EntityKind::Camper));
        }
        let removed = sqlx::query("DELETE FROM signups WHERE camper_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM campers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(id, signups = removed, "deleted camper");
        Ok(removed)
    }
}
