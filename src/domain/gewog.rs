use serde::{Deserialize, Serialize};

use super::Dzongkhag;
use crate::resource::{FromPayload, Resource};

/// The dzongkhag a gewog belongs to.
///
/// The backend returns either the bare id or the populated document,
/// depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DzongkhagRef {
    Id(String),
    Populated(Box<Dzongkhag>),
}

impl DzongkhagRef {
    pub fn id(&self) -> &str {
        match self {
            DzongkhagRef::Id(id) => id,
            DzongkhagRef::Populated(dzongkhag) => &dzongkhag.id,
        }
    }

    /// The name, when the reference came back populated.
    pub fn name(&self) -> Option<&str> {
        match self {
            DzongkhagRef::Id(_) => None,
            DzongkhagRef::Populated(dzongkhag) => Some(&dzongkhag.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A second-level administrative sub-district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gewog {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_dzongkha: Option<String>,
    pub dzongkhag: DzongkhagRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    /// Area in km².
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Gewog {
    pub fn belongs_to(&self, dzongkhag_id: &str) -> bool {
        self.dzongkhag.id() == dzongkhag_id
    }
}

/// Create/update payload for a [`Gewog`]. Carries the dzongkhag id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GewogPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_dzongkha: Option<String>,
    pub dzongkhag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl GewogPayload {
    pub fn new(name: impl Into<String>, dzongkhag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_in_dzongkha: None,
            dzongkhag: dzongkhag.into(),
            population: None,
            area: None,
            coordinates: None,
        }
    }
}

impl From<&Gewog> for GewogPayload {
    fn from(gewog: &Gewog) -> Self {
        Self {
            name: gewog.name.clone(),
            name_in_dzongkha: gewog.name_in_dzongkha.clone(),
            dzongkhag: gewog.dzongkhag.id().to_string(),
            population: gewog.population,
            area: gewog.area,
            coordinates: gewog.coordinates,
        }
    }
}

impl Resource for Gewog {
    const NAME: &'static str = "gewog";
    const COLLECTION: &'static str = "gewogs";
    type Payload = GewogPayload;

    fn id(&self) -> &str {
        &self.id
    }
}

impl FromPayload for Gewog {
    fn from_payload(id: String, payload: &GewogPayload) -> Self {
        Gewog {
            id,
            name: payload.name.clone(),
            name_in_dzongkha: payload.name_in_dzongkha.clone(),
            dzongkhag: DzongkhagRef::Id(payload.dzongkhag.clone()),
            population: payload.population,
            area: payload.area,
            coordinates: payload.coordinates,
        }
    }
}
