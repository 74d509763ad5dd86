use serde::{Deserialize, Serialize};

use crate::resource::{FromPayload, Resource};

/// Geographic region a dzongkhag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[default]
    Western,
    Central,
    Eastern,
    Southern,
}

/// A first-level administrative district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dzongkhag {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_dzongkha: Option<String>,
    pub code: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create/update payload for a [`Dzongkhag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DzongkhagPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_in_dzongkha: Option<String>,
    pub code: String,
    pub region: Region,
}

impl DzongkhagPayload {
    pub fn new(name: impl Into<String>, code: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            name_in_dzongkha: None,
            code: code.into(),
            region,
        }
    }

    pub fn name_in_dzongkha(mut self, name: impl Into<String>) -> Self {
        self.name_in_dzongkha = Some(name.into());
        self
    }
}

impl From<&Dzongkhag> for DzongkhagPayload {
    fn from(dzongkhag: &Dzongkhag) -> Self {
        Self {
            name: dzongkhag.name.clone(),
            name_in_dzongkha: dzongkhag.name_in_dzongkha.clone(),
            code: dzongkhag.code.clone(),
            region: dzongkhag.region,
        }
    }
}

impl Resource for Dzongkhag {
    const NAME: &'static str = "dzongkhag";
    const COLLECTION: &'static str = "dzongkhags";
    type Payload = DzongkhagPayload;

    fn id(&self) -> &str {
        &self.id
    }
}

impl FromPayload for Dzongkhag {
    fn from_payload(id: String, payload: &DzongkhagPayload) -> Self {
        Dzongkhag {
            id,
            name: payload.name.clone(),
            name_in_dzongkha: payload.name_in_dzongkha.clone(),
            code: payload.code.clone(),
            region: payload.region,
            created_at: None,
            updated_at: None,
        }
    }
}
