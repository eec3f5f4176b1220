//! Endpoint catalog.
//!
//! One declarative row per API operation: method, path template, body shape
//! and whether the endpoint takes a `page` query parameter. Bindings in
//! [`crate::api`] only pick a row and fill it in.

use crate::transport::{RequestBody, RequestDescriptor};
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyShape {
    Empty,
    Json,
    Multipart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSpec {
    pub method: Method,
    /// Path template; `{id}` is the only placeholder.
    pub path: &'static str,
    pub body: BodyShape,
    pub paginated: bool,
}

impl EndpointSpec {
    fn new(method: Method, path: &'static str, body: BodyShape, paginated: bool) -> Self {
        Self {
            method,
            path,
            body,
            paginated,
        }
    }

    pub fn has_id(&self) -> bool {
        self.path.contains(ID_PLACEHOLDER)
    }
}

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    // auth
    Login,
    Register,
    Logout,
    RefreshToken,
    // users
    CurrentUser,
    UpdateProfile,
    UploadProfilePicture,
    UserById,
    BlockUser,
    UnblockUser,
    BlockedUsers,
    VerifyAccount,
    // discovery
    Discover,
    LikeUser,
    DislikeUser,
    Matches,
    MatchById,
    Unmatch,
    // chat
    Messages,
    SendMessage,
    SendAttachment,
    MarkMessageRead,
    TypingIndicator,
    UnreadCount,
    // reels
    Reels,
    ReelById,
    CreateReel,
    DeleteReel,
    LikeReel,
    UnlikeReel,
    ReelComments,
    AddComment,
    DeleteComment,
    ReportReel,
    TrendingReels,
    // subscriptions
    SubscriptionPlans,
    CurrentSubscription,
    Transactions,
}

impl Endpoint {
    pub const ALL: &'static [Endpoint] = &[
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::Logout,
        Endpoint::RefreshToken,
        Endpoint::CurrentUser,
        Endpoint::UpdateProfile,
        Endpoint::UploadProfilePicture,
        Endpoint::UserById,
        Endpoint::BlockUser,
        Endpoint::UnblockUser,
        Endpoint::BlockedUsers,
        Endpoint::VerifyAccount,
        Endpoint::Discover,
        Endpoint::LikeUser,
        Endpoint::DislikeUser,
        Endpoint::Matches,
        Endpoint::MatchById,
        Endpoint::Unmatch,
        Endpoint::Messages,
        Endpoint::SendMessage,
        Endpoint::SendAttachment,
        Endpoint::MarkMessageRead,
        Endpoint::TypingIndicator,
        Endpoint::UnreadCount,
        Endpoint::Reels,
        Endpoint::ReelById,
        Endpoint::CreateReel,
        Endpoint::DeleteReel,
        Endpoint::LikeReel,
        Endpoint::UnlikeReel,
        Endpoint::ReelComments,
        Endpoint::AddComment,
        Endpoint::DeleteComment,
        Endpoint::ReportReel,
        Endpoint::TrendingReels,
        Endpoint::SubscriptionPlans,
        Endpoint::CurrentSubscription,
        Endpoint::Transactions,
    ];

    pub fn spec(self) -> EndpointSpec {
        use BodyShape::{Empty, Json, Multipart};
        use Endpoint::*;
        match self {
            Login => EndpointSpec::new(Method::POST, "/auth/login", Json, false),
            Register => EndpointSpec::new(Method::POST, "/auth/register", Json, false),
            Logout => EndpointSpec::new(Method::POST, "/auth/logout", Empty, false),
            RefreshToken => EndpointSpec::new(Method::POST, "/auth/refresh-token", Empty, false),

            CurrentUser => EndpointSpec::new(Method::GET, "/users/me", Empty, false),
            UpdateProfile => EndpointSpec::new(Method::PUT, "/user/profile", Json, false),
            UploadProfilePicture => {
                EndpointSpec::new(Method::POST, "/user/profile/picture", Multipart, false)
            }
            UserById => EndpointSpec::new(Method::GET, "/users/{id}", Empty, false),
            BlockUser => EndpointSpec::new(Method::POST, "/user/block/{id}", Empty, false),
            UnblockUser => EndpointSpec::new(Method::DELETE, "/user/block/{id}", Empty, false),
            BlockedUsers => EndpointSpec::new(Method::GET, "/user/blocked", Empty, false),
            VerifyAccount => EndpointSpec::new(Method::POST, "/user/verify", Multipart, false),

            Discover => EndpointSpec::new(Method::GET, "/match/discover", Empty, false),
            LikeUser => EndpointSpec::new(Method::POST, "/match/like/{id}", Json, false),
            DislikeUser => EndpointSpec::new(Method::POST, "/match/dislike/{id}", Empty, false),
            Matches => EndpointSpec::new(Method::GET, "/matches", Empty, false),
            MatchById => EndpointSpec::new(Method::GET, "/matches/{id}", Empty, false),
            Unmatch => EndpointSpec::new(Method::POST, "/matches/{id}/unmatch", Empty, false),

            Messages => EndpointSpec::new(Method::GET, "/matches/{id}/messages", Empty, true),
            SendMessage => EndpointSpec::new(Method::POST, "/matches/{id}/messages", Json, false),
            SendAttachment => {
                EndpointSpec::new(Method::POST, "/matches/{id}/messages", Multipart, false)
            }
            MarkMessageRead => EndpointSpec::new(Method::POST, "/messages/{id}/read", Empty, false),
            TypingIndicator => {
                EndpointSpec::new(Method::POST, "/matches/{id}/typing", Empty, false)
            }
            UnreadCount => EndpointSpec::new(Method::GET, "/messages/unread", Empty, false),

            Reels => EndpointSpec::new(Method::GET, "/reels", Empty, true),
            ReelById => EndpointSpec::new(Method::GET, "/reels/{id}", Empty, false),
            CreateReel => EndpointSpec::new(Method::POST, "/reels", Multipart, false),
            DeleteReel => EndpointSpec::new(Method::DELETE, "/reels/{id}", Empty, false),
            LikeReel => EndpointSpec::new(Method::POST, "/reels/{id}/like", Empty, false),
            UnlikeReel => EndpointSpec::new(Method::DELETE, "/reels/{id}/like", Empty, false),
            ReelComments => EndpointSpec::new(Method::GET, "/reels/{id}/comments", Empty, true),
            AddComment => EndpointSpec::new(Method::POST, "/reels/{id}/comments", Json, false),
            DeleteComment => {
                EndpointSpec::new(Method::DELETE, "/reels/comments/{id}", Empty, false)
            }
            ReportReel => EndpointSpec::new(Method::POST, "/reels/{id}/report", Json, false),
            TrendingReels => EndpointSpec::new(Method::GET, "/reels/trending", Empty, true),

            SubscriptionPlans => {
                EndpointSpec::new(Method::GET, "/subscriptions/plans", Empty, false)
            }
            CurrentSubscription => {
                EndpointSpec::new(Method::GET, "/subscriptions/current", Empty, false)
            }
            Transactions => EndpointSpec::new(Method::GET, "/transactions", Empty, true),
        }
    }

    pub fn call(self) -> EndpointCall {
        EndpointCall::new(self)
    }
}

/// A catalog row being filled in with path id, page, extra query and body.
#[derive(Debug)]
pub struct EndpointCall {
    endpoint: Endpoint,
    id: Option<String>,
    page: Option<u32>,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl EndpointCall {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            id: None,
            page: None,
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn into_request(self) -> Result<RequestDescriptor> {
        let spec = self.endpoint.spec();
        let ctx = || ErrorContext::new().with_source(format!("{:?}", self.endpoint));

        let path = match (spec.has_id(), &self.id) {
            (true, Some(id)) => {
                if id.is_empty() || id.contains(['/', '?', '#']) {
                    return Err(Error::validation_with_context(
                        format!("Invalid path id '{}'", id),
                        ctx().with_field_path("endpoint.id"),
                    ));
                }
                spec.path.replace(ID_PLACEHOLDER, id)
            }
            (true, None) => {
                return Err(Error::validation_with_context(
                    format!("Missing path id for {}", spec.path),
                    ctx().with_field_path("endpoint.id"),
                ))
            }
            (false, Some(_)) => {
                return Err(Error::validation_with_context(
                    format!("{} takes no path id", spec.path),
                    ctx().with_field_path("endpoint.id"),
                ))
            }
            (false, None) => spec.path.to_string(),
        };

        let shape = match &self.body {
            RequestBody::Empty => BodyShape::Empty,
            RequestBody::Json(_) => BodyShape::Json,
            RequestBody::Multipart(_) => BodyShape::Multipart,
        };
        if shape != spec.body {
            return Err(Error::validation_with_context(
                format!("{} expects a {:?} body, got {:?}", spec.path, spec.body, shape),
                ctx().with_field_path("endpoint.body"),
            ));
        }

        if !spec.paginated && self.page.is_some() {
            return Err(Error::validation_with_context(
                format!("{} is not paginated", spec.path),
                ctx().with_field_path("endpoint.page"),
            ));
        }

        let mut request = RequestDescriptor::new(spec.method, path);
        if spec.paginated {
            request = request.query("page", self.page.unwrap_or(1));
        }
        for (k, v) in self.query {
            request = request.query(k, v);
        }
        if spec.body == BodyShape::Multipart {
            request = request.clear_header("content-type");
        }
        request.body = self.body;
        Ok(request)
    }
}
