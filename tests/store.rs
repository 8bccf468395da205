#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Entity store contract: validation before persistence, all-or-nothing updates,
//! foreign-key integrity and cascading deletes.

mod common;

use camp_signups::{
    seed_demo_data, serialize, ActivityService, AppError, CamperService, EntityKind, NewCamper, NewSignup,
    SignupService,
};
use common::{activity, camper, signup, test_pool};
use serde_json::json;

#[tokio::test]
async fn create_camper_assigns_id_and_round_trips() {
    let pool = test_pool().await;
    let id = camper(&pool, "Alex", 12).await;
    let graph = CamperService::get(&pool, id).await.unwrap().expect("camper");
    assert_eq!(graph.camper.name(), "Alex");
    assert_eq!(graph.camper.age(), 12);
    assert!(graph.signups.is_empty());
}

#[tokio::test]
async fn camper_age_outside_range_never_persists() {
    let pool = test_pool().await;
    for age in [0, 7, 19, 30] {
        assert!(NewCamper::new("Alex", age).is_err());
    }
    for age in [8, 13, 18] {
        CamperService::create(&pool, NewCamper::new("Alex", age).unwrap()).await.unwrap();
    }
    assert_eq!(CamperService::list(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn get_missing_returns_none() {
    let pool = test_pool().await;
    assert!(CamperService::get(&pool, 42).await.unwrap().is_none());
    assert!(ActivityService::get(&pool, 42).await.unwrap().is_none());
    assert!(SignupService::get(&pool, 42).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_update_leaves_row_unchanged() {
    let pool = test_pool().await;
    let id = camper(&pool, "Alex", 12).await;

    let attrs = json!({"name": "Sam", "age": 5});
    let err = CamperService::update(&pool, id, attrs.as_object().unwrap()).await.unwrap_err();
    match err {
        AppError::Validation(e) => assert_eq!(e.message, "Incorrect age"),
        other => panic!("unexpected error: {:?}", other),
    }

    let graph = CamperService::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(graph.camper.name(), "Alex");
    assert_eq!(graph.camper.age(), 12);
}

#[tokio::test]
async fn update_applies_every_valid_attribute() {
    let pool = test_pool().await;
    let id = camper(&pool, "Alex", 12).await;
    let attrs = json!({"name": "Sam", "age": 15});
    let graph = CamperService::update(&pool, id, attrs.as_object().unwrap()).await.unwrap();
    assert_eq!(graph.camper.name(), "Sam");
    assert_eq!(graph.camper.age(), 15);
    let stored = CamperService::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.camper, graph.camper);
}

#[tokio::test]
async fn update_missing_camper_is_not_found() {
    let pool = test_pool().await;
    let attrs = json!({"age": 10});
    let err = CamperService::update(&pool, 7, attrs.as_object().unwrap()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(EntityKind::Camper)));
}

#[tokio::test]
async fn signup_requires_existing_parents() {
    let pool = test_pool().await;
    let c = camper(&pool, "Alex", 12).await;
    let err = SignupService::create(&pool, NewSignup::new(c, 99, 10).unwrap()).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    let a = activity(&pool, "Archery", 2).await;
    let err = SignupService::create(&pool, NewSignup::new(99, a, 10).unwrap()).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    assert!(SignupService::list(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn signup_update_revalidates_time_and_parents() {
    let pool = test_pool().await;
    let c = camper(&pool, "Alex", 12).await;
    let a = activity(&pool, "Archery", 2).await;
    let s = signup(&pool, c, a, 9).await;

    let bad_time = json!({"time": 24});
    assert!(matches!(
        SignupService::update(&pool, s, bad_time.as_object().unwrap()).await,
        Err(AppError::Validation(_))
    ));
    let bad_parent = json!({"activity_id": 404});
    assert!(matches!(
        SignupService::update(&pool, s, bad_parent.as_object().unwrap()).await,
        Err(AppError::Persistence(_))
    ));

    let stored = SignupService::get(&pool, s).await.unwrap().unwrap();
    assert_eq!(stored.signup.time(), 9);
    assert_eq!(stored.signup.activity_id(), a);

    let good = json!({"time": 23});
    let graph = SignupService::update(&pool, s, good.as_object().unwrap()).await.unwrap();
    assert_eq!(graph.signup.time(), 23);
}

#[tokio::test]
async fn deleting_activity_cascades_to_its_signups() {
    let pool = test_pool().await;
    let alex = camper(&pool, "Alex", 12).await;
    let sam = camper(&pool, "Sam", 10).await;
    let archery = activity(&pool, "Archery", 2).await;
    let canoe = activity(&pool, "Canoeing", 3).await;
    signup(&pool, alex, archery, 9).await;
    signup(&pool, sam, archery, 10).await;
    let kept = signup(&pool, alex, canoe, 11).await;

    let removed = ActivityService::delete(&pool, archery).await.unwrap();
    assert_eq!(removed, 2);

    assert!(ActivityService::get(&pool, archery).await.unwrap().is_none());
    let remaining = SignupService::list(&pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].signup.id(), kept);
    let alex_graph = CamperService::get(&pool, alex).await.unwrap().unwrap();
    assert!(alex_graph.signups.iter().all(|(s, _)| s.activity_id() != archery));
    assert!(CamperService::get(&pool, sam).await.unwrap().unwrap().signups.is_empty());
}

#[tokio::test]
async fn deleting_camper_cascades_to_its_signups() {
    let pool = test_pool().await;
    let alex = camper(&pool, "Alex", 12).await;
    let sam = camper(&pool, "Sam", 10).await;
    let archery = activity(&pool, "Archery", 2).await;
    signup(&pool, alex, archery, 9).await;
    signup(&pool, sam, archery, 10).await;

    assert_eq!(CamperService::delete(&pool, alex).await.unwrap(), 1);
    let graph = ActivityService::get(&pool, archery).await.unwrap().unwrap();
    assert_eq!(graph.signups.len(), 1);
    assert_eq!(graph.signups[0].1.id(), sam);
}

#[tokio::test]
async fn deleting_missing_rows_is_not_found() {
    let pool = test_pool().await;
    assert!(matches!(
        ActivityService::delete(&pool, 1).await,
        Err(AppError::NotFound(EntityKind::Activity))
    ));
    assert!(matches!(CamperService::delete(&pool, 1).await, Err(AppError::NotFound(EntityKind::Camper))));
    assert!(matches!(SignupService::delete(&pool, 1).await, Err(AppError::NotFound(EntityKind::Signup))));
}

#[tokio::test]
async fn store_foreign_keys_back_up_the_service_checks() {
    let pool = test_pool().await;
    let err = sqlx::query("INSERT INTO signups (time, camper_id, activity_id) VALUES (1, 123, 456)")
        .execute(&pool)
        .await
        .unwrap_err();
    let db = err.as_database_error().expect("database error");
    assert!(db.is_foreign_key_violation());
}

#[tokio::test]
async fn serialized_camper_graph_breaks_the_cycle() {
    let pool = test_pool().await;
    let alex = camper(&pool, "Alex", 12).await;
    let archery = activity(&pool, "Archery", 2).await;
    signup(&pool, alex, archery, 9).await;
    signup(&pool, alex, archery, 15).await;

    let v = serialize(&CamperService::get(&pool, alex).await.unwrap().unwrap()).unwrap();
    let signups = v["signups"].as_array().unwrap();
    assert_eq!(signups.len(), 2);
    for s in signups {
        assert!(s.get("camper").is_none());
        assert_eq!(s["activity"]["name"], "Archery");
        assert!(s["activity"].get("signups").is_none());
    }
}

#[tokio::test]
async fn seed_only_fills_an_empty_store() {
    let pool = test_pool().await;
    assert!(seed_demo_data(&pool).await.unwrap());
    let campers = CamperService::list(&pool).await.unwrap().len();
    let signups = SignupService::list(&pool).await.unwrap().len();
    assert!(campers > 0);
    assert!(signups > 0);

    assert!(!seed_demo_data(&pool).await.unwrap());
    assert_eq!(CamperService::list(&pool).await.unwrap().len(), campers);
}

#[tokio::test]
async fn failed_activity_update_leaves_row_unchanged() {
    let pool = test_pool().await;
    let id = activity(&pool, "Archery", 2).await;

    let attrs = json!({"name": "X", "difficulty": "hard"});
    let err = ActivityService::update(&pool, id, attrs.as_object().unwrap()).await.unwrap_err();
    match err {
        AppError::Validation(e) => {
            assert_eq!(e.kind, EntityKind::Activity);
            assert_eq!(e.field, "difficulty");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let graph = ActivityService::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(graph.activity.name(), "Archery");
    assert_eq!(graph.activity.difficulty(), 2);
}

#[tokio::test]
async fn activity_update_keeps_its_signups() {
    let pool = test_pool().await;
    let alex = camper(&pool, "Alex", 12).await;
    let id = activity(&pool, "Archery", 2).await;
    signup(&pool, alex, id, 9).await;

    let attrs = json!({"name": "Field Archery", "difficulty": 4});
    let graph = ActivityService::update(&pool, id, attrs.as_object().unwrap()).await.unwrap();
    assert_eq!(graph.activity.name(), "Field Archery");
    assert_eq!(graph.activity.difficulty(), 4);
    assert_eq!(graph.signups.len(), 1);

    let stored = ActivityService::get(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored, graph);

    let missing = json!({"difficulty": 1});
    assert!(matches!(
        ActivityService::update(&pool, id + 1, missing.as_object().unwrap()).await,
        Err(AppError::NotFound(EntityKind::Activity))
    ));
}
