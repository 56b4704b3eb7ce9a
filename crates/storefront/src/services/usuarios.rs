//! Client for the usuarios (users) service.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;
use url::Url;

use autotienda_core::UserId;

use crate::models::{NewUser, User};

use super::{ServiceError, decode, expect_success, item_url};

/// Login request body.
#[derive(Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Client for the users collection.
///
/// | Operation | Request |
/// |---|---|
/// | list      | `GET {base}`             |
/// | register  | `POST {base}/registrar`  |
/// | login     | `POST {base}/login`      |
/// | update    | `PUT {base}/{id}`        |
/// | delete    | `DELETE {base}/{id}`     |
#[derive(Clone)]
pub struct UsuariosClient {
    inner: Arc<Inner>,
}

struct Inner {
    client: reqwest::Client,
    base: Url,
}

impl UsuariosClient {
    /// Create a new users client.
    #[must_use]
    pub fn new(client: reqwest::Client, base: Url) -> Self {
        Self {
            inner: Arc::new(Inner { client, base }),
        }
    }

    /// Fetch all registered users.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let response = self
            .inner
            .client
            .get(self.inner.base.as_str())
            .send()
            .await?;
        decode(response).await
    }

    /// Register a new user and return the stored record (with id and rol).
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the registration; a duplicate
    /// email surfaces as a [`ServiceError::Status`] with the service's 4xx.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &NewUser) -> Result<User, ServiceError> {
        let response = self
            .inner
            .client
            .post(item_url(&self.inner.base, &"registrar"))
            .json(user)
            .send()
            .await?;
        decode(response).await
    }

    /// Authenticate a user against the service.
    ///
    /// # Errors
    ///
    /// Bad credentials surface as a [`ServiceError::Status`] carrying 401;
    /// callers match on [`ServiceError::status`] to distinguish them from
    /// server failures.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ServiceError> {
        let response = self
            .inner
            .client
            .post(item_url(&self.inner.base, &"login"))
            .json(credentials)
            .send()
            .await?;
        decode(response).await
    }

    /// Replace a user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the update.
    #[instrument(skip(self, user), fields(id = %id))]
    pub async fn update(&self, id: UserId, user: &User) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .put(item_url(&self.inner.base, &id))
            .json(user)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the deletion is rejected.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete(&self, id: UserId) -> Result<(), ServiceError> {
        let response = self
            .inner
            .client
            .delete(item_url(&self.inner.base, &id))
            .send()
            .await?;
        expect_success(response).await
    }
}
