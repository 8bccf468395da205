//! Campers, activities and signups. Drafts validate on construction; rows validate on every assignment.

use crate::error::ValidationError;
use crate::service::validation::{int_field, text_field, validate_int, validate_text};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Camper,
    Activity,
    Signup,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Camper => "Camper",
            EntityKind::Activity => "Activity",
            EntityKind::Signup => "Signup",
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Camper => "campers",
            EntityKind::Activity => "activities",
            EntityKind::Signup => "signups",
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.label())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn required<'a>(
    kind: EntityKind,
    body: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, ValidationError> {
    body.get(field)
        .ok_or_else(|| ValidationError::new(kind, field, format!("{} is required", field)))
}

fn ignored(kind: EntityKind, field: &str) -> Result<(), ValidationError> {
    tracing::debug!(entity = %kind, field, "ignoring attribute");
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Camper {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) age: i64,
}

impl Camper {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_text(EntityKind::Camper, "name", name.into())?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> Result<(), ValidationError> {
        self.age = validate_int(EntityKind::Camper, "age", age)?;
        Ok(())
    }

    /// Assign one JSON attribute through its validated setter. `id` and unknown attributes are ignored.
    pub fn assign(&mut self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let kind = EntityKind::Camper;
        match field {
            "name" => self.set_name(text_field(kind, field, value)?),
            "age" => self.set_age(int_field(kind, field, value)?),
            _ => ignored(kind, field),
        }
    }

    /// Apply a partial update. Stops at the first invalid attribute; callers discard the row on error.
    pub fn apply(&mut self, attrs: &Map<String, Value>) -> Result<(), ValidationError> {
        for (field, value) in attrs {
            self.assign(field, value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCamper {
    pub(crate) name: String,
    pub(crate) age: i64,
}

impl NewCamper {
    pub fn new(name: impl Into<String>, age: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_text(EntityKind::Camper, "name", name.into())?,
            age: validate_int(EntityKind::Camper, "age", age)?,
        })
    }

    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let kind = EntityKind::Camper;
        // Missing name reads as null so it fails with the non-empty message.
        let name = text_field(kind, "name", body.get("name").unwrap_or(&Value::Null))?;
        let age = int_field(kind, "age", required(kind, body, "age")?)?;
        Ok(Self { name, age })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Activity {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) difficulty: i64,
}

impl Activity {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn difficulty(&self) -> i64 {
        self.difficulty
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = validate_text(EntityKind::Activity, "name", name.into())?;
        Ok(())
    }

    pub fn set_difficulty(&mut self, difficulty: i64) -> Result<(), ValidationError> {
        self.difficulty = validate_int(EntityKind::Activity, "difficulty", difficulty)?;
        Ok(())
    }

    pub fn assign(&mut self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let kind = EntityKind::Activity;
        match field {
            "name" => self.set_name(text_field(kind, field, value)?),
            "difficulty" => self.set_difficulty(int_field(kind, field, value)?),
            _ => ignored(kind, field),
        }
    }

    pub fn apply(&mut self, attrs: &Map<String, Value>) -> Result<(), ValidationError> {
        for (field, value) in attrs {
            self.assign(field, value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewActivity {
    pub(crate) name: String,
    pub(crate) difficulty: i64,
}

impl NewActivity {
    pub fn new(name: impl Into<String>, difficulty: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_text(EntityKind::Activity, "name", name.into())?,
            difficulty: validate_int(EntityKind::Activity, "difficulty", difficulty)?,
        })
    }

    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let kind = EntityKind::Activity;
        let name = text_field(kind, "name", required(kind, body, "name")?)?;
        let difficulty = int_field(kind, "difficulty", required(kind, body, "difficulty")?)?;
        Ok(Self { name, difficulty })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Signup {
    pub(crate) id: i64,
    pub(crate) time: i64,
    pub(crate) camper_id: i64,
    pub(crate) activity_id: i64,
}

impl Signup {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn camper_id(&self) -> i64 {
        self.camper_id
    }

    pub fn activity_id(&self) -> i64 {
        self.activity_id
    }

    pub fn set_time(&mut self, time: i64) -> Result<(), ValidationError> {
        self.time = validate_int(EntityKind::Signup, "time", time)?;
        Ok(())
    }

    pub fn set_camper_id(&mut self, camper_id: i64) -> Result<(), ValidationError> {
        self.camper_id = validate_int(EntityKind::Signup, "camper_id", camper_id)?;
        Ok(())
    }

    pub fn set_activity_id(&mut self, activity_id: i64) -> Result<(), ValidationError> {
        self.activity_id = validate_int(EntityKind::Signup, "activity_id", activity_id)?;
        Ok(())
    }

    pub fn assign(&mut self, field: &str, value: &Value) -> Result<(), ValidationError> {
        let kind = EntityKind::Signup;
        match field {
            "time" => self.set_time(int_field(kind, field, value)?),
            "camper_id" => self.set_camper_id(int_field(kind, field, value)?),
            "activity_id" => self.set_activity_id(int_field(kind, field, value)?),
            _ => ignored(kind, field),
        }
    }

    pub fn apply(&mut self, attrs: &Map<String, Value>) -> Result<(), ValidationError> {
        for (field, value) in attrs {
            self.assign(field, value)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSignup {
    pub(crate) camper_id: i64,
    pub(crate) activity_id: i64,
    pub(crate) time: i64,
}

impl NewSignup {
    pub fn new(camper_id: i64, activity_id: i64, time: i64) -> Result<Self, ValidationError> {
        let kind = EntityKind::Signup;
        Ok(Self {
            camper_id: validate_int(kind, "camper_id", camper_id)?,
            activity_id: validate_int(kind, "activity_id", activity_id)?,
            time: validate_int(kind, "time", time)?,
        })
    }

    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let kind = EntityKind::Signup;
        let camper_id = int_field(kind, "camper_id", required(kind, body, "camper_id")?)?;
        let activity_id = int_field(kind, "activity_id", required(kind, body, "activity_id")?)?;
        let time = int_field(kind, "time", required(kind, body, "time")?)?;
        Ok(Self {
            camper_id,
            activity_id,
            time,
        })
    }
}

/// A camper with its signups, each paired with the signed-up activity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CamperGraph {
    pub camper: Camper,
    pub signups: Vec<(Signup, Activity)>,
}

/// An activity with its signups, each paired with the signed-up camper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityGraph {
    pub activity: Activity,
    pub signups: Vec<(Signup, Camper)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupGraph {
    pub signup: Signup,
    pub camper: Camper,
    pub activity: Activity,
}
