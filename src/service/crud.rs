//! Row loading shared by the entity services. Every helper runs on a caller-owned
//! connection so reads and writes of one request stay inside one transaction.

use crate::error::AppError;
use crate::model::{Activity, ActivityGraph, Camper, CamperGraph, EntityKind, Signup, SignupGraph};
use sqlx::SqliteConnection;
use std::collections::HashMap;

/// A signup joined with both of its parents.
#[derive(sqlx::FromRow)]
struct SignupRow {
    id: i64,
    time: i64,
    camper_id: i64,
    activity_id: i64,
    camper_name: String,
    camper_age: i64,
    activity_name: String,
    activity_difficulty: i64,
}

impl SignupRow {
    fn signup(&self) -> Signup {
        Signup {
            id: self.id,
            time: self.time,
            camper_id: self.camper_id,
            activity_id: self.activity_id,
        }
    }

    fn camper(&self) -> Camper {
        Camper {
            id: self.camper_id,
            name: self.camper_name.clone(),
            age: self.camper_age,
        }
    }

    fn activity(&self) -> Activity {
        Activity {
            id: self.activity_id,
            name: self.activity_name.clone(),
            difficulty: self.activity_difficulty,
        }
    }
}

const SIGNUP_ROWS: &str = r#"
    SELECT s.id, s.time, s.camper_id, s.activity_id,
           c.name AS camper_name, c.age AS camper_age,
           a.name AS activity_name, a.difficulty AS activity_difficulty
    FROM signups s
    JOIN campers c ON c.id = s.camper_id
    JOIN activities a ON a.id = s.activity_id
"#;

async fn signup_rows(
    conn: &mut SqliteConnection,
    filter: Option<(&str, i64)>,
) -> Result<Vec<SignupRow>, AppError> {
    let sql = match filter {
        Some((column, _)) => format!("{} WHERE s.{} = ? ORDER BY s.id", SIGNUP_ROWS, column),
        None => format!("{} ORDER BY s.id", SIGNUP_ROWS),
    };
    tracing::debug!(sql = %sql, filter = ?filter, "query");
    let mut query = sqlx::query_as::<_, SignupRow>(&sql);
    if let Some((_, value)) = filter {
        query = query.bind(value);
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

pub(crate) async fn exists(conn: &mut SqliteConnection, kind: EntityKind, id: i64) -> Result<bool, AppError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", kind.table());
    let found: Option<i64> = sqlx::query_scalar(&sql).bind(id).fetch_optional(&mut *conn).await?;
    Ok(found.is_some())
}

pub(crate) async fn fetch_camper(conn: &mut SqliteConnection, id: i64) -> Result<Option<Camper>, AppError> {
    Ok(sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?)
}

pub(crate) async fn fetch_activity(conn: &mut SqliteConnection, id: i64) -> Result<Option<Activity>, AppError> {
    Ok(
        sqlx::query_as::<_, Activity>("SELECT id, name, difficulty FROM activities WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?,
    )
}

pub(crate) async fn fetch_signup(conn: &mut SqliteConnection, id: i64) -> Result<Option<Signup>, AppError> {
    Ok(sqlx::query_as::<_, Signup>(
        "SELECT id, time, camper_id, activity_id FROM signups WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?)
}

pub(crate) async fn camper_graph(conn: &mut SqliteConnection, camper: Camper) -> Result<CamperGraph, AppError> {
    let rows = signup_rows(conn, Some(("camper_id", camper.id))).await?;
    Ok(CamperGraph {
        camper,
        signups: rows.iter().map(|r| (r.signup(), r.activity())).collect(),
    })
}

pub(crate) async fn activity_graph(
    conn: &mut SqliteConnection,
    activity: Activity,
) -> Result<ActivityGraph, AppError> {
    let rows = signup_rows(conn, Some(("activity_id", activity.id))).await?;
    Ok(ActivityGraph {
        activity,
        signups: rows.iter().map(|r| (r.signup(), r.camper())).collect(),
    })
}

/// All activities with their signups, batch-loaded with one signup query.
pub(crate) async fn activity_graphs(conn: &mut SqliteConnection) -> Result<Vec<ActivityGraph>, AppError> {
    let activities = sqlx::query_as::<_, Activity>("SELECT id, name, difficulty FROM activities ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    let mut by_activity: HashMap<i64, Vec<(Signup, Camper)>> = HashMap::new();
    for r in signup_rows(conn, None).await? {
        by_activity.entry(r.activity_id).or_default().push((r.signup(), r.camper()));
    }
    Ok(activities
        .into_iter()
        .map(|activity| ActivityGraph {
            signups: by_activity.remove(&activity.id).unwrap_or_default(),
            activity,
        })
        .collect())
}

pub(crate) async fn signup_graph(conn: &mut SqliteConnection, id: i64) -> Result<Option<SignupGraph>, AppError> {
    let rows = signup_rows(conn, Some(("id", id))).await?;
    Ok(rows.first().map(|r| SignupGraph {
        signup: r.signup(),
        camper: r.camper(),
        activity: r.activity(),
    }))
}

pub(crate) async fn signup_graphs(conn: &mut SqliteConnection) -> Result<Vec<SignupGraph>, AppError> {
    let rows = signup_rows(conn, None).await?;
    Ok(rows
        .iter()
        .map(|r| SignupGraph {
            signup: r.signup(),
            camper: r.camper(),
            activity: r.activity(),
        })
        .collect())
}

/// Fail with a persistence error unless both parents of a signup exist.
pub(crate) async fn ensure_signup_parents(
    conn: &mut SqliteConnection,
    camper_id: i64,
    activity_id: i64,
) -> Result<(), AppError> {
    if !exists(conn, EntityKind::Camper, camper_id).await? {
        return Err(AppError::Persistence(format!("camper {} does not exist", camper_id)));
    }
    if !exists(conn, EntityKind::Activity, activity_id).await? {
        return Err(AppError::Persistence(format!("activity {} does not exist", activity_id)));
    }
    Ok(())
}
