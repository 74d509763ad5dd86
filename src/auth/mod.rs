//! Auth - thin token pass-through for the dashboard's login flow.
//!
//! The session only keeps the token and the signed-in user the backend hands
//! back. It does not interpret or refresh tokens.

mod gateway;
mod session;

use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Login form input. `identifier` is a CID or phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Current token and user; both empty when signed out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

pub use gateway::AuthGateway;
#[cfg(feature = "http")]
pub use gateway::RestAuthGateway;
pub use session::AuthSession;
