//! Client for the autos (catalog) service.

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use autotienda_core::ProductId;

use crate::models::{NewProduct, Product};

use super::{ServiceError, decode, expect_success, item_url};

/// Client for the catalog collection.
///
/// | Operation | Request |
/// |---|---|
/// | list      | `GET {base}`         |
/// | get       | `GET {base}/{id}`    |
/// | create    | `POST {base}`        |
/// | update    | `PUT {base}/{id}`    |
/// | delete    | `DELETE {base}/{id}` |
#[derive(Clone)]
pub struct AutosClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base: Url,
}

impl AutosClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self {
            inner: Arc::new(Inner { client, base }),
        }
    }

    /// Fetch the full product collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product array.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let response = self
            .inner
            .client
            .get(self.inner.base.as_str())
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the catalog has no such product.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ServiceError> {
        let response = self
            .inner
            .client
            .get(item_url(&self.inner.base, &id))
            .send()
            .await?;
        decode(response).await
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the product.
    #[instrument(skip(self, product), fields(marca = %product.marca, modelo = %product.modelo))]
    pub async fn create(&self, product: &NewProduct) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .post(self.inner.base.as_str())
            .json(product)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Replace a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the update.
    #[instrument(skip(self, product), fields(id = %id))]
    pub async fn update(&self, id: ProductId, product: &NewProduct) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .put(item_url(&self.inner.base, &id))
            .json(product)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion is rejected.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .delete(item_url(&self.inner.base, &id))
            .send()
            .await?;
        expect_success(response).await
    }
}
