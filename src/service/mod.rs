//! Entity store: one service per entity kind. Reads use one pooled connection,
//! writes run in one transaction that commits only on success.

mod activities;
mod campers;
mod crud;
mod seed;
mod signups;
pub mod validation;

pub use activities::ActivityService;
pub use campers::CamperService;
pub use seed::seed_demo_data;
pub use signups::SignupService;
