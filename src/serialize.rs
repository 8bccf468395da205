//! JSON views of entity graphs. Each kind has a fixed exclusion rule that breaks the
//! camper <-> signup <-> activity back-references:
//! - camper: signups omit `camper`
//! - activity: signups omit `activity`
//! - signup: nested camper and activity omit `signups`

use crate::model::{Activity, ActivityGraph, Camper, CamperGraph, Signup, SignupGraph};
use serde::Serialize;
use serde_json::Value;

/// Camper without its signups. Used by the camper listing and inside signups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CamperSummary {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivitySummary {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CamperJson {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub signups: Vec<CamperSignupJson>,
}

/// A signup seen from its camper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CamperSignupJson {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub activity: ActivitySummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityJson {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
    pub signups: Vec<ActivitySignupJson>,
}

/// A signup seen from its activity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivitySignupJson {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub camper: CamperSummary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignupJson {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
    pub camper: CamperSummary,
    pub activity: ActivitySummary,
}

impl From<&Camper> for CamperSummary {
    fn from(c: &Camper) -> Self {
        Self {
            id: c.id(),
            name: c.name().to_string(),
            age: c.age(),
        }
    }
}

impl From<&Activity> for ActivitySummary {
    fn from(a: &Activity) -> Self {
        Self {
            id: a.id(),
            name: a.name().to_string(),
            difficulty: a.difficulty(),
        }
    }
}

impl From<&CamperGraph> for CamperJson {
    fn from(g: &CamperGraph) -> Self {
        Self {
            id: g.camper.id(),
            name: g.camper.name().to_string(),
            age: g.camper.age(),
            signups: g
                .signups
                .iter()
                .map(|(s, a)| CamperSignupJson {
                    id: s.id(),
                    time: s.time(),
                    camper_id: s.camper_id(),
                    activity_id: s.activity_id(),
                    activity: a.into(),
                })
                .collect(),
        }
    }
}

impl From<&ActivityGraph> for ActivityJson {
    fn from(g: &ActivityGraph) -> Self {
        Self {
            id: g.activity.id(),
            name: g.activity.name().to_string(),
            difficulty: g.activity.difficulty(),
            signups: g
                .signups
                .iter()
                .map(|(s, c)| ActivitySignupJson {
                    id: s.id(),
                    time: s.time(),
                    camper_id: s.camper_id(),
                    activity_id: s.activity_id(),
                    camper: c.into(),
                })
                .collect(),
        }
    }
}

impl From<&SignupGraph> for SignupJson {
    fn from(g: &SignupGraph) -> Self {
        let s: &Signup = &g.signup;
        Self {
            id: s.id(),
            time: s.time(),
            camper_id: s.camper_id(),
            activity_id: s.activity_id(),
            camper: (&g.camper).into(),
            activity: (&g.activity).into(),
        }
    }
}

/// Anything with a fixed JSON view.
pub trait ToJson {
    type View: Serialize;

    fn to_view(&self) -> Self::View;
}

impl ToJson for Camper {
    type View = CamperSummary;

    fn to_view(&self) -> CamperSummary {
        self.into()
    }
}

impl ToJson for CamperGraph {
    type View = CamperJson;

    fn to_view(&self) -> CamperJson {
        self.into()
    }
}

impl ToJson for ActivityGraph {
    type View = ActivityJson;

    fn to_view(&self) -> ActivityJson {
        self.into()
    }
}

impl ToJson for SignupGraph {
    type View = SignupJson;

    fn to_view(&self) -> SignupJson {
        self.into()
    }
}

pub fn serialize<T: ToJson>(entity: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(entity.to_view())
}
