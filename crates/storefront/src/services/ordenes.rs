//! Client for the ordenes (orders) service.

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use crate::models::{NewOrder, Order};

use super::{ServiceError, decode, expect_success};

/// Client for the orders collection.
///
/// | Operation | Request |
/// |---|---|
/// | list      | `GET {base}`  |
/// | create    | `POST {base}` |
///
/// Orders are immutable once created; the service exposes no update or
/// delete.
#[derive(Clone)]
pub struct OrdenesClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base: Url,
}

impl OrdenesClient {
    /// Create a new orders client.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self {
            inner: Arc::new(Inner { client, base }),
        }
    }

    /// Fetch all orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ServiceError> {
        let response = self
            .inner
            .client
            .get(self.inner.base.as_str())
            .send()
            .await?;
        decode(response).await
    }

    /// Submit one order document.
    ///
    /// The POST carries no idempotency key; the caller must not retry it.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the order.
    #[instrument(skip(self, order), fields(total = %order.total))]
    pub async fn create(&self, order: &NewOrder) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .post(self.inner.base.as_str())
            .json(order)
            .send()
            .await?;
        expect_success(response).await
    }
}
