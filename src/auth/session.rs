use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::{AuthGateway, AuthState, Credentials, LoginResponse};
use crate::domain::User;
use crate::error::{StoreError, TransportError};
use crate::notify::Notifier;

/// Signed-in state of the dashboard, observable like a resource store.
#[derive(Clone)]
pub struct AuthSession {
    gateway: Arc<dyn AuthGateway>,
    notifier: Arc<dyn Notifier>,
    state: Arc<watch::Sender<AuthState>>,
}

impl AuthSession {
    pub fn new(gateway: Arc<dyn AuthGateway>, notifier: Arc<dyn Notifier>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            gateway,
            notifier,
            state: Arc::new(state),
        }
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Route guards let the user through only when this is true.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Sign in. Failures are notified and returned so the login form can
    /// stay on screen.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, StoreError> {
        match self.gateway.login(credentials).await {
            Ok(LoginResponse { token, user }) => {
                self.state.send_replace(AuthState {
                    token: Some(token),
                    user: Some(user.clone()),
                });
                info!(user = %user.id, "signed in");
                self.notifier.notify_success("Login successful");
                Ok(user)
            }
            Err(err) => {
                let error = StoreError::classify(&err, "Authentication failed");
                warn!(cause = %err, "{}", error.message());
                self.notifier.notify_failure(error.message());
                Err(error)
            }
        }
    }

    /// Refresh the signed-in user from the backend.
    ///
    /// Returns `None` when signed out or on failure. A 401 means the token
    /// is no longer accepted and signs the session out.
    pub async fn fetch_current_user(&self) -> Option<User> {
        let token = self.token()?;

        match self.gateway.current_user(&token).await {
            Ok(user) => {
                self.state.send_if_modified(|state| {
                    // a logout may have raced the request
                    if state.token.as_deref() != Some(token.as_str()) {
                        return false;
                    }
                    state.user = Some(user.clone());
                    true
                });
                Some(user)
            }
            Err(TransportError::Status { code: 401, .. }) => {
                warn!("token rejected, signing out");
                self.gateway.logout();
                self.state.send_replace(AuthState::default());
                None
            }
            Err(err) => {
                warn!(cause = %err, "could not fetch current user");
                None
            }
        }
    }

    pub fn logout(&self) {
        self.gateway.logout();
        self.state.send_replace(AuthState::default());
        info!("signed out");
        self.notifier.notify_success("Logged out successfully");
    }
}
