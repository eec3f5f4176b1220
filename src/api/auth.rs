use crate::catalog::Endpoint;
use crate::session::Session;
use crate::transport::{RequestDescriptor, RequestGateway};
use crate::types::{AuthResponse, Credentials, Registration};
use crate::Result;
use serde_json::Value;

pub struct AuthApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// Log in and keep the returned token as the current session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let request = Endpoint::Login.call().json(credentials)?.into_request()?;
        let response = self.send_auth(request).await?;
        self.remember(&response).await?;
        Ok(response)
    }

    /// Register and keep the returned token as the current session.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        let request = Endpoint::Register.call().json(registration)?.into_request()?;
        let response = self.send_auth(request).await?;
        self.remember(&response).await?;
        Ok(response)
    }

    /// Log out. The local session is dropped even if the server call fails.
    pub async fn logout(&self) -> Result<Value> {
        let result = self
            .gateway
            .send(Endpoint::Logout.call().into_request()?)
            .await;
        if let Err(e) = self.gateway.session().clear().await {
            tracing::warn!("Failed to clear session on logout: {}", e);
        }
        result
    }

    pub async fn refresh_token(&self) -> Result<AuthResponse> {
        let request = Endpoint::RefreshToken.call().into_request()?;
        let response = self.send_auth(request).await?;
        self.remember(&response).await?;
        Ok(response)
    }

    /// An empty 2xx body decodes as a response with no token.
    async fn send_auth(&self, request: RequestDescriptor) -> Result<AuthResponse> {
        match self.gateway.send(request).await? {
            Value::Null => Ok(AuthResponse::default()),
            body => Ok(serde_json::from_value(body)?),
        }
    }

    async fn remember(&self, response: &AuthResponse) -> Result<()> {
        match response.token.as_deref() {
            Some(token) if !token.is_empty() => {
                self.gateway.session().save(&Session::new(token)).await
            }
            _ => Ok(()),
        }
    }
}
