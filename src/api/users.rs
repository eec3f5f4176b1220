use crate::catalog::Endpoint;
use crate::transport::RequestGateway;
use crate::types::{ProfileUpdate, Upload};
use crate::Result;
use serde_json::Value;

pub struct UsersApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    /// The signed-in user and their matching preferences.
    pub async fn me(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::CurrentUser.call().into_request()?)
            .await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value> {
        let request = Endpoint::UpdateProfile.call().json(update)?.into_request()?;
        self.gateway.send(request).await
    }

    pub async fn upload_profile_picture(&self, picture: Upload) -> Result<Value> {
        let request = Endpoint::UploadProfilePicture
            .call()
            .multipart(picture.into_form("file")?)
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn get(&self, user_id: u64) -> Result<Value> {
        let request = Endpoint::UserById.call().id(user_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn block(&self, user_id: u64) -> Result<Value> {
        let request = Endpoint::BlockUser.call().id(user_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn unblock(&self, user_id: u64) -> Result<Value> {
        let request = Endpoint::UnblockUser.call().id(user_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn blocked(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::BlockedUsers.call().into_request()?)
            .await
    }

    pub async fn verify_account(&self, document: Upload) -> Result<Value> {
        let request = Endpoint::VerifyAccount
            .call()
            .multipart(document.into_form("file")?)
            .into_request()?;
        self.gateway.send(request).await
    }
}
