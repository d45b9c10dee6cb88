//! Optional cloud replication of the tracker document.
//!
//! The remote side is a plain document store keyed by an authenticated
//! user id, plus an identity provider that turns a login into that id.
//! Reconciliation is last-writer-wins: an existing remote document
//! replaces local state wholesale; there is no field-level merge.

use crate::{Error, Result, TrackerState};
use serde::Deserialize;

/// Identity returned by a successful interactive login
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
}

/// External identity provider; failures surface as [`Error::Auth`]
pub trait IdentityProvider {
    fn login(&self) -> Result<Identity>;
}

/// Remote document store keyed by user id
pub trait RemoteStore {
    /// Fetch the user's document, or None if the user has none yet
    fn fetch(&self, user_id: &str) -> Result<Option<TrackerState>>;

    /// Replace the user's document wholesale
    fn replace(&self, user_id: &str, state: &TrackerState) -> Result<()>;
}

/// What the login-time reconciliation did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote document existed and replaced local state
    RemoteApplied,
    /// No remote document; existing local state was uploaded verbatim
    LocalUploaded,
    /// Brand-new user; an empty-state document was created
    CreatedEmpty,
}

/// Run the login-time sync policy.
///
/// `local_existed` says whether a local document was present before this
/// session (as opposed to freshly defaulted state). On any error the
/// caller keeps `local` authoritative; there is no retry loop.
pub fn reconcile(
    local: TrackerState,
    local_existed: bool,
    user_id: &str,
    store: &dyn RemoteStore,
) -> Result<(TrackerState, SyncOutcome)> {
    match store.fetch(user_id)? {
        Some(remote) => {
            tracing::info!("Remote document found for {}, replacing local state", user_id);
            Ok((remote, SyncOutcome::RemoteApplied))
        }
        None => {
            store.replace(user_id, &local)?;
            let outcome = if local_existed {
                tracing::info!("No remote document for {}, uploaded local state", user_id);
                SyncOutcome::LocalUploaded
            } else {
                tracing::info!("New user {}, created empty remote document", user_id);
                SyncOutcome::CreatedEmpty
            };
            Ok((local, outcome))
        }
    }
}

// ============================================================================
// HTTP implementations
// ============================================================================

/// Document store over HTTP: `GET`/`PUT {base}/users/{id}`
pub struct HttpRemoteStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpRemoteStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn document_url(&self, user_id: &str) -> String {
        format!("{}/users/{}", self.base_url.trim_end_matches('/'), user_id)
    }
}

impl RemoteStore for HttpRemoteStore {
    fn fetch(&self, user_id: &str) -> Result<Option<TrackerState>> {
        let response = self
            .client
            .get(self.document_url(user_id))
            .send()
            .map_err(|e| Error::RemoteSync(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::RemoteSync(format!(
                "fetch failed with status {}",
                response.status()
            )));
        }

        let state = response
            .json::<TrackerState>()
            .map_err(|e| Error::RemoteSync(e.to_string()))?;
        Ok(Some(state))
    }

    fn replace(&self, user_id: &str, state: &TrackerState) -> Result<()> {
        let response = self
            .client
            .put(self.document_url(user_id))
            .json(state)
            .send()
            .map_err(|e| Error::RemoteSync(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::RemoteSync(format!(
                "replace failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Identity provider over HTTP: `POST {base}/login` with a device token
pub struct HttpIdentityProvider {
    base_url: String,
    token: String,
    client: reqwest::blocking::Client,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl IdentityProvider for HttpIdentityProvider {
    fn login(&self) -> Result<Identity> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url.trim_end_matches('/')))
            .json(&serde_json::json!({ "token": self.token }))
            .send()
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Auth(format!(
                "login rejected with status {}",
                response.status()
            )));
        }

        response.json::<Identity>().map_err(|e| Error::Auth(e.to_string()))
    }
}
