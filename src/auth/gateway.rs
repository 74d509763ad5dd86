use async_trait::async_trait;

use super::{Credentials, LoginResponse};
use crate::domain::User;
use crate::error::TransportError;

/// Backend endpoints the auth session talks to.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError>;

    async fn current_user(&self, token: &str) -> Result<User, TransportError>;

    /// Drop any token the gateway passes on to other requests.
    fn logout(&self) {}
}

#[cfg(feature = "http")]
mod rest {
    use async_trait::async_trait;
    use reqwest::Method;

    use super::AuthGateway;
    use crate::auth::{Credentials, LoginResponse};
    use crate::domain::User;
    use crate::error::TransportError;
    use crate::http::RestClient;

    /// `POST {base}/auth/login` and `GET {base}/auth/me`.
    ///
    /// On login the token is handed to the shared [`RestClient`], so the
    /// resource collections built from it start sending it.
    pub struct RestAuthGateway {
        client: RestClient,
    }

    impl RestAuthGateway {
        pub fn new(client: RestClient) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl AuthGateway for RestAuthGateway {
        async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, TransportError> {
            let url = self.client.endpoint("auth/login", None);
            let response: LoginResponse = self
                .client
                .send_json(self.client.request(Method::POST, url).json(credentials))
                .await?;
            self.client.set_bearer_token(response.token.clone());
            Ok(response)
        }

        async fn current_user(&self, token: &str) -> Result<User, TransportError> {
            let url = self.client.endpoint("auth/me", None);
            self.client
                .send_json(self.client.request_with_token(Method::GET, url, Some(token)))
                .await
        }

        fn logout(&self) {
            self.client.clear_bearer_token();
        }
    }
}

#[cfg(feature = "http")]
pub use rest::RestAuthGateway;
