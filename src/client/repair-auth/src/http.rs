//! HTTP authentication gateway.
//!
//! Talks to the backend through a shared [`ApiClient`], so the session
//! cookie set by login is the one the data layer sends afterwards.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info, warn};

use repair_api::client::extract_error_message;
use repair_api::{paths, ApiClient};
use repair_model::{AccessRole, Credentials, Identity};

use crate::error::DEFAULT_LOGIN_ERROR;
use crate::{AuthError, AuthGateway, Realm};

/// Login request body; the handle field name depends on the realm.
struct LoginBody<'a> {
    handle_field: &'static str,
    handle: &'a str,
    password: &'a str,
}

impl Serialize for LoginBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.handle_field, self.handle)?;
        map.serialize_entry("password", self.password)?;
        map.end()
    }
}

/// Profile fields shared by the verify and login responses.
#[derive(Debug, Default, Deserialize)]
struct ProfilePayload {
    #[serde(default)]
    authenticated: Option<bool>,
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    nom: Option<String>,
    #[serde(default)]
    prenom: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    identifiant: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Why a payload could not become an identity.
#[derive(Debug, PartialEq, Eq)]
enum ProfileError {
    MissingField(&'static str),
    UnknownRole(String),
}

impl ProfilePayload {
    fn into_identity<R: Realm>(self) -> Result<Identity<R::Role>, ProfileError> {
        let id = self.id.ok_or(ProfileError::MissingField("id"))?;
        let role_name = self.role.ok_or(ProfileError::MissingField("role"))?;
        let role = R::Role::parse(&role_name).map_err(|_| ProfileError::UnknownRole(role_name))?;

        let email = self.email.unwrap_or_default();
        let identifiant = self
            .identifiant
            .filter(|h| !h.is_empty())
            .or_else(|| {
                (R::HANDLE_FALLS_BACK_TO_EMAIL && !email.is_empty()).then(|| email.clone())
            });

        Ok(Identity {
            id,
            nom: self.nom.unwrap_or_default(),
            prenom: self.prenom.unwrap_or_default(),
            email,
            identifiant,
            role,
        })
    }
}

/// [`AuthGateway`] over the repair-shop REST backend.
pub struct HttpAuthGateway<R> {
    api: ApiClient,
    _realm: PhantomData<fn() -> R>,
}

impl<R: Realm> HttpAuthGateway<R> {
    /// Creates a gateway sharing `api`'s cookie jar.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _realm: PhantomData,
        }
    }

    /// The data client bound to the same session.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl<R> Clone for HttpAuthGateway<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _realm: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Realm> AuthGateway for HttpAuthGateway<R> {
    type Role = R::Role;

    async fn verify(&self) -> Option<Identity<R::Role>> {
        let resp = match self.api.builder(Method::GET, paths::VERIFY).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(realm = R::NAME, error = %e, "session verification failed");
                return None;
            },
        };

        let status = resp.status();
        if !status.is_success() {
            debug!(realm = R::NAME, status = status.as_u16(), "no active session");
            return None;
        }

        let payload: ProfilePayload = match resp.json().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(realm = R::NAME, error = %e, "unreadable verify response");
                return None;
            },
        };

        if payload.authenticated != Some(true) {
            debug!(realm = R::NAME, "backend reports no session");
            return None;
        }

        match payload.into_identity::<R>() {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(realm = R::NAME, reason = ?e, "verified profile rejected");
                None
            },
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<Identity<R::Role>, AuthError> {
        let body = LoginBody {
            handle_field: R::HANDLE_FIELD,
            handle: credentials.identifiant(),
            password: credentials.password(),
        };

        let resp = self
            .api
            .builder(Method::POST, R::LOGIN_PATH)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let raw = resp.bytes().await.unwrap_or_default();
            let message =
                extract_error_message(&raw).unwrap_or_else(|| DEFAULT_LOGIN_ERROR.to_string());
            debug!(realm = R::NAME, status = status.as_u16(), "login rejected");
            return Err(AuthError::InvalidCredentials(message));
        }

        let payload: ProfilePayload = resp
            .json()
            .await
            .map_err(|e| AuthError::UnexpectedResponse(e.to_string()))?;

        match payload.into_identity::<R>() {
            Ok(identity) => {
                info!(realm = R::NAME, id = identity.id, role = %identity.role, "logged in");
                Ok(identity)
            },
            Err(ProfileError::UnknownRole(role)) => {
                // The backend opened a session we cannot represent; close it.
                warn!(realm = R::NAME, %role, "role not served by this application");
                self.logout().await;
                Err(AuthError::RoleNotAllowed(role))
            },
            Err(ProfileError::MissingField(field)) => Err(AuthError::UnexpectedResponse(
                format!("missing field `{}`", field),
            )),
        }
    }

    async fn logout(&self) {
        match self.api.builder(Method::POST, paths::LOGOUT).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!(realm = R::NAME, "logged out");
            },
            Ok(resp) => {
                warn!(
                    realm = R::NAME,
                    status = resp.status().as_u16(),
                    "logout rejected by backend, clearing local session anyway"
                );
            },
            Err(e) => {
                warn!(
                    realm = R::NAME,
                    error = %e,
                    "logout request failed, clearing local session anyway"
                );
            },
        }
    }

    fn name(&self) -> &'static str {
        R::NAME
    }
}
