//! Camp signups: campers, activities and signups over HTTP, backed by SQLite.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod serialize;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, ValidationError};
pub use model::{
    Activity, ActivityGraph, Camper, CamperGraph, EntityKind, NewActivity, NewCamper, NewSignup, Signup,
    SignupGraph,
};
pub use routes::{app, camp_routes, common_routes};
pub use serialize::{serialize, ToJson};
pub use service::{seed_demo_data, ActivityService, CamperService, SignupService};
pub use state::AppState;
pub use store::{connect, ensure_tables};
