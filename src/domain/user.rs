use serde::{Deserialize, Serialize};

use crate::resource::{FromPayload, Resource};

/// Role of a dashboard user, with the backend's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "super_admin")]
    SuperAdmin,
    #[serde(rename = "dzongkhag_admin")]
    DzongkhagAdmin,
    #[serde(rename = "gewog_operator")]
    GewogOperator,
    #[serde(rename = "meter_reader")]
    MeterReader,
    #[serde(rename = "technician")]
    Technician,
    #[serde(rename = "quality_inspector")]
    QualityInspector,
    #[serde(rename = "financial_officer")]
    FinancialOfficer,
    #[serde(rename = "viewer")]
    Viewer,
    #[serde(rename = "consumer")]
    Consumer,
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl UserRole {
    /// Only super admins may add, edit or delete users.
    pub fn can_manage_users(self) -> bool {
        self == UserRole::SuperAdmin
    }
}

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// Citizenship id number.
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl User {
    pub fn can_manage_users(&self) -> bool {
        self.role.is_some_and(UserRole::can_manage_users)
    }
}

/// Create/update payload for a [`User`]. `password` is only sent when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cid: cid.into(),
            phone: None,
            password: None,
            role: None,
        }
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const COLLECTION: &'static str = "users";
    type Payload = UserPayload;

    fn id(&self) -> &str {
        &self.id
    }
}

impl FromPayload for User {
    fn from_payload(id: String, payload: &UserPayload) -> Self {
        User {
            id,
            name: payload.name.clone(),
            cid: payload.cid.clone(),
            phone: payload.phone.clone(),
            role: payload.role,
        }
    }
}
