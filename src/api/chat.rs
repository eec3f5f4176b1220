use crate::catalog::Endpoint;
use crate::transport::RequestGateway;
use crate::types::{Attachment, MessageBody, UnreadCount};
use crate::Result;
use serde_json::Value;

pub struct ChatApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn messages(&self, match_id: u64, page: u32) -> Result<Value> {
        let request = Endpoint::Messages
            .call()
            .id(match_id)
            .page(page)
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn send_message(&self, match_id: u64, content: impl Into<String>) -> Result<Value> {
        let request = Endpoint::SendMessage
            .call()
            .id(match_id)
            .json(&MessageBody {
                content: content.into(),
            })?
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn send_attachment(&self, match_id: u64, attachment: Attachment) -> Result<Value> {
        let request = Endpoint::SendAttachment
            .call()
            .id(match_id)
            .multipart(attachment.into_form()?)
            .into_request()?;
        self.gateway.send(request).await
    }

    pub async fn mark_read(&self, message_id: u64) -> Result<Value> {
        let request = Endpoint::MarkMessageRead.call().id(message_id).into_request()?;
        self.gateway.send(request).await
    }

    /// Plain POST; there is no socket behind it.
    pub async fn typing(&self, match_id: u64) -> Result<Value> {
        let request = Endpoint::TypingIndicator.call().id(match_id).into_request()?;
        self.gateway.send(request).await
    }

    pub async fn unread_count(&self) -> Result<UnreadCount> {
        self.gateway
            .send_as(Endpoint::UnreadCount.call().into_request()?)
            .await
    }
}
