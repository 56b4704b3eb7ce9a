//! Client for the carrito (cart) service.

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use autotienda_core::{LineId, UserId};

use crate::models::{CartLine, NewCartLine, UpdateCantidad};

use super::{ServiceError, decode, expect_success, item_url};

/// Client for the cart collection.
///
/// | Operation        | Request |
/// |---|---|
/// | lines for user   | `GET {base}/{userId}`            |
/// | add line         | `POST {base}`                    |
/// | update quantity  | `PUT {base}/{lineId}`            |
/// | remove line      | `DELETE {base}/{lineId}`         |
/// | clear            | `DELETE {base}/vaciar/{userId}`  |
#[derive(Clone)]
pub struct CarritoClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base: Url,
}

impl CarritoClient {
    /// Create a new cart client.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self {
            inner: Arc::new(Inner { client, base }),
        }
    }

    /// Fetch the cart lines of one user.
    ///
    /// A user with no cart yet answers 404; that is an empty cart, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, ServiceError> {
        let response = self
            .inner
            .client
            .get(item_url(&self.inner.base, &user_id))
            .send()
            .await?;

        match decode(response).await {
            Err(ServiceError::NotFound) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Add a line to a user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the line.
    #[instrument(skip(self, line), fields(user_id = %line.user_id, auto_id = %line.auto_id))]
    pub async fn add_line(&self, line: &NewCartLine) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .post(self.inner.base.as_str())
            .json(line)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Update the quantity of one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the update.
    #[instrument(skip(self), fields(line_id = %line_id, cantidad))]
    pub async fn update_quantity(
        &self,
        line_id: LineId,
        cantidad: u32,
    ) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .put(item_url(&self.inner.base, &line_id))
            .json(&UpdateCantidad { cantidad })
            .send()
            .await?;
        expect_success(response).await
    }

    /// Remove one line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion is rejected; the line is then still
    /// part of the cart.
    #[instrument(skip(self), fields(line_id = %line_id))]
    pub async fn remove_line(&self, line_id: LineId) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .delete(item_url(&self.inner.base, &line_id))
            .send()
            .await?;
        expect_success(response).await
    }

    /// Drop every line of a user's cart (`DELETE /vaciar/{userId}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the clear.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn clear(&self, user_id: UserId) -> Result<(), ServiceError> {
        let url = format!(
            "{}/vaciar/{user_id}",
            self.inner.base.as_str().trim_end_matches('/')
        );
        let response = self.inner.client.delete(url).send().await?;
        expect_success(response).await
    }
}
