use crate::catalog::Endpoint;
use crate::transport::RequestGateway;
use crate::Result;
use serde_json::Value;

pub struct SubscriptionsApi<'a> {
    gateway: &'a RequestGateway,
}

impl<'a> SubscriptionsApi<'a> {
    pub(crate) fn new(gateway: &'a RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn plans(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::SubscriptionPlans.call().into_request()?)
            .await
    }

    /// `{"subscription": null}` when the user has no active plan.
    pub async fn current(&self) -> Result<Value> {
        self.gateway
            .send(Endpoint::CurrentSubscription.call().into_request()?)
            .await
    }

    pub async fn transactions(&self, page: u32) -> Result<Value> {
        let request = Endpoint::Transactions.call().page(page).into_request()?;
        self.gateway.send(request).await
    }
}
