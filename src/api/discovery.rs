use crate::catalog::Endpoint;
use crate::transport::RequestGateway;
use crate::types::LikeRequest;
use crate::Result;
use serde_json::Value;

/// Discovery feed, likes and matches.
pub struct DiscoveryApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> DiscoveryApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn discover(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::Discover.call().into_request()?)
            .await
    }

    pub async fn like(&self, user_id: u64, is_super_like: bool) -> Result<Value> {
        let request = Endpoint::LikeUser
            .call()
            .id(user_id)
            .json(&LikeRequest { is_super_like })?
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn dislike(&self, user_id: u64) -> Result<Value> {
        let request = Endpoint::DislikeUser.call().id(user_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn matches(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::Matches.call().into_request()?)
            .await
    }

    pub async fn get_match(&self, match_id: u64) -> Result<Value> {
        let request = Endpoint::MatchById.call().id(match_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn unmatch(&self, match_id: u64) -> Result<Value> {
        let request = Endpoint::Unmatch.call().id(match_id).into_request()?;
        self.gateway.send(request).await
    }
}
