//! Demo data for an empty store.

use super::{ActivityService, CamperService, SignupService};
use crate::error::AppError;
use crate::model::{NewActivity, NewCamper, NewSignup};
use sqlx::SqlitePool;

const ACTIVITIES: &[(&str, i64)] = &[("Archery", 2), ("Canoeing", 3), ("Rock Climbing", 5)];
const CAMPERS: &[(&str, i64)] = &[("Caitlin", 8), ("Nicholas", 11), ("Ashley", 14)];
/// (camper index, activity index, hour)
const SIGNUPS: &[(usize, usize, i64)] = &[(0, 0, 9), (1, 1, 11), (1, 2, 14), (2, 2, 16)];

/// Insert demo campers, activities and signups unless campers or activities already exist.
/// Returns whether anything was inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<bool, AppError> {
    let populated: i64 = sqlx::query_scalar("SELECT (SELECT COUNT(*) FROM campers) + (SELECT COUNT(*) FROM activities)")
        .fetch_one(pool)
        .await?;
    if populated > 0 {
        tracing::info!("store already populated; skipping demo data");
        return Ok(false);
    }
    let mut activity_ids = Vec::with_capacity(ACTIVITIES.len());
    for (name, difficulty) in ACTIVITIES {
        let g = ActivityService::create(pool, NewActivity::new(*name, *difficulty)?).await?;
        activity_ids.push(g.activity.id());
    }
    let mut camper_ids = Vec::with_capacity(CAMPERS.len());
    for (name, age) in CAMPERS {
        let g = CamperService::create(pool, NewCamper::new(*name, *age)?).await?;
        camper_ids.push(g.camper.id());
    }
    for (c, a, time) in SIGNUPS {
        SignupService::create(pool, NewSignup::new(camper_ids[*c], activity_ids[*a], *time)?).await?;
    }
    tracing::info!(
        campers = CAMPERS.len(),
        activities = ACTIVITIES.len(),
        signups = SIGNUPS.len(),
        "seeded demo data"
    );
    Ok(true)
}
