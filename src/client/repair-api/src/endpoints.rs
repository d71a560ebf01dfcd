//! Domain operations.
//!
//! Thin typed wrappers over [`ApiClient::request`]. Authorization is the
//! backend's job; nothing here checks roles.

use serde::{Deserialize, Serialize};

use repair_model::{AccessRole, ClientRecord, Identity, Machine, PasswordChange};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::paths;

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text.
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    old_password: &'a str,
    new_password: &'a str,
    confirm_password: &'a str,
}

impl ApiClient {
    /// Machines owned by `client_id`.
    pub async fn client_machines(&self, client_id: i64) -> Result<Vec<Machine>, ApiError> {
        self.get(&paths::client_machines(client_id)).await
    }

    /// Every machine in the shop.
    pub async fn all_machines(&self) -> Result<Vec<Machine>, ApiError> {
        self.get(paths::ADMIN_MACHINES).await
    }

    /// Every registered client.
    pub async fn all_clients(&self) -> Result<Vec<ClientRecord>, ApiError> {
        self.get(paths::ADMIN_CLIENTS).await
    }

    /// Profile of the signed-in client.
    pub async fn current_client(&self) -> Result<ClientRecord, ApiError> {
        self.get(paths::CLIENT_ME).await
    }

    /// One client record.
    pub async fn client(&self, client_id: i64) -> Result<ClientRecord, ApiError> {
        self.get(&paths::client(client_id)).await
    }

    /// Machines in the viewer's scope: everything for an admin, their own
    /// otherwise.
    pub async fn machines_for<R: AccessRole>(
        &self,
        viewer: &Identity<R>,
    ) -> Result<Vec<Machine>, ApiError> {
        if viewer.is_admin() {
            self.all_machines().await
        } else {
            self.client_machines(viewer.id).await
        }
    }

    /// Clients and machines for the admin overview, fetched concurrently.
    pub async fn admin_overview(&self) -> Result<(Vec<ClientRecord>, Vec<Machine>), ApiError> {
        tokio::try_join!(self.all_clients(), self.all_machines())
    }

    /// Changes the signed-in client's password.
    ///
    /// All three fields are forwarded; backend validation errors come back
    /// unchanged as [`ApiError::Server`].
    pub async fn change_password(
        &self,
        change: &PasswordChange,
    ) -> Result<MessageResponse, ApiError> {
        let req = ChangePasswordRequest {
            old_password: change.old_password(),
            new_password: change.new_password(),
            confirm_password: change.confirm_password(),
        };

        self.post(paths::CHANGE_PASSWORD, &req).await
    }
}
