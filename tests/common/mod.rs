#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use camp_signups::{
    app, connect, ensure_tables, ActivityService, AppState, CamperService, NewActivity, NewCamper, NewSignup,
    SignupService,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:", 1).await.expect("connect");
    ensure_tables(&pool).await.expect("tables");
    pool
}

pub fn router(pool: &SqlitePool) -> Router {
    app(AppState::new(pool.clone()), 64 * 1024)
}

pub async fn camper(pool: &SqlitePool, name: &str, age: i64) -> i64 {
    CamperService::create(pool, NewCamper::new(name, age).unwrap())
        .await
        .unwrap()
        .camper
        .id()
}

pub async fn activity(pool: &SqlitePool, name: &str, difficulty: i64) -> i64 {
    ActivityService::create(pool, NewActivity::new(name, difficulty).unwrap())
        .await
        .unwrap()
        .activity
        .id()
}

pub async fn signup(pool: &SqlitePool, camper_id: i64, activity_id: i64, time: i64) -> i64 {
    SignupService::create(pool, NewSignup::new(camper_id, activity_id, time).unwrap())
        .await
        .unwrap()
        .signup
        .id()
}

/// Send one request; returns status and parsed JSON body (`Null` when the body is empty or not JSON).
pub async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(req.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Send a raw body with an optional content type; returns status and parsed JSON body.
pub async fn send_raw(
    router: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        req = req.header("content-type", ct);
    }
    let response = router.oneshot(req.body(Body::from(body.to_string())).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
