use crate::catalog::Endpoint;
use crate::transport::RequestGateway;
use crate::types::{NewComment, NewReel, ReelQuery, ReelReport};
use crate::Result;
use serde_json::Value;

pub struct ReelsApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> ReelsApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, query: &ReelQuery) -> Result<Value> {
        let mut call = Endpoint::Reels.call().page(query.page.unwrap_or(1));
        if let Some(user_id) = query.user_id {
            call = call.query("user_id", user_id);
        }
        if let Some(tag) = &query.hashtag {
            call = call.query("hashtag", tag);
        }
        self.gateway.send(call.into_request()?).await
    }

    pub async fn get(&self, reel_id: u64) -> Result<Value> {
        let request = Endpoint::ReelById.call().id(reel_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn create(&self, reel: NewReel) -> Result<Value> {
        let request = Endpoint::CreateReel
            .call()
            .multipart(reel.into_form()?)
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn delete(&self, reel_id: u64) -> Result<Value> {
        let request = Endpoint::DeleteReel.call().id(reel_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn like(&self, reel_id: u64) -> Result<Value> {
        let request = Endpoint::LikeReel.call().id(reel_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn unlike(&self, reel_id: u64) -> Result<Value> {
        let request = Endpoint::UnlikeReel.call().id(reel_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn comments(&self, reel_id: u64, page: u32) -> Result<Value> {
        let request = Endpoint::ReelComments
            .call()
            .id(reel_id)
            .page(page)
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn add_comment(
        &self,
        reel_id: u64,
        content: impl Into<String>,
        parent_id: Option<u64>,
    ) -> Result<Value> {
        let body = NewComment {
            content: content.into(),
            parent_id,
        };
        let request = Endpoint::AddComment
            .call()
            .id(reel_id)
            .json(&body)?
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn delete_comment(&self, comment_id: u64) -> Result<Value> {
        let request = Endpoint::DeleteComment.call().id(comment_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn report(&self, reel_id: u64, report: &ReelReport) -> Result<Value> {
        let request = Endpoint::ReportReel
            .call()
            .id(reel_id)
            .json(report)?
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn trending(&self, page: u32) -> Result<Value> {
        let request = Endpoint::TrendingReels.call().page(page).into_request()?;
        self.gateway.send(request).await
    }
}
