use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::{
    config::ClientCredentials,
    error::{BandsError, Result},
    info,
    spotify::SpotifyApi,
    types::Credential,
    utils::{self, TOKEN_EXPIRY_MARGIN_SECS},
    warning,
};

/// Owns the app access token and renews it when it runs out.
///
/// Expiry is detected lazily on [`TokenManager::ensure_valid`]; there is no
/// background timer. The credential sits behind an async mutex that stays
/// locked for the whole refresh, so callers arriving while a refresh is in
/// flight wait for it and reuse its outcome, token or failure, instead of
/// requesting their own.
pub struct TokenManager {
    api: Arc<dyn SpotifyApi>,
    credentials: ClientCredentials,
    state: Mutex<TokenState>,
    // Completed refresh attempts. Only bumped while `state` is locked.
    attempts: AtomicU64,
}

#[derive(Default)]
struct TokenState {
    credential: Option<Credential>,
    last_failure: Option<String>,
}

impl TokenManager {
    pub fn new(api: Arc<dyn SpotifyApi>, credentials: ClientCredentials) -> Self {
        TokenManager {
            api,
            credentials,
            state: Mutex::new(TokenState::default()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Starts from an already issued credential.
    pub fn with_credential(
        api: Arc<dyn SpotifyApi>,
        credentials: ClientCredentials,
        credential: Credential,
    ) -> Self {
        TokenManager {
            api,
            credentials,
            state: Mutex::new(TokenState {
                credential: Some(credential),
                last_failure: None,
            }),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns an access token that is valid right now.
    ///
    /// Refreshes first when no credential exists yet or the current one has
    /// reached its expiry instant. A valid credential is returned without any
    /// remote call.
    ///
    /// # Errors
    ///
    /// [`BandsError::Auth`] when the refresh fails. The previous credential,
    /// if any, is kept as it was. Callers that were queued behind a failed
    /// refresh get the same error without a grant of their own.
    pub async fn ensure_valid(&self) -> Result<String> {
        let seen = self.attempts.load(Ordering::SeqCst);
        let mut state = self.state.lock().await;

        if let Some(credential) = state.credential.as_ref() {
            if !Self::is_expired(credential, Utc::now()) {
                return Ok(credential.access_token.clone());
            }
        }

        // A refresh finished while we waited for the lock and it failed.
        if self.attempts.load(Ordering::SeqCst) != seen {
            if let Some(reason) = state.last_failure.as_ref() {
                return Err(BandsError::Auth(reason.clone()));
            }
        }

        let outcome = self.refresh().await;
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match outcome {
            Ok(fresh) => {
                let token = fresh.access_token.clone();
                state.credential = Some(fresh);
                state.last_failure = None;
                Ok(token)
            }
            Err(e) => {
                state.last_failure = Some(match &e {
                    BandsError::Auth(reason) => reason.clone(),
                    other => other.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Requests a new credential from the accounts service.
    ///
    /// Does not install it; [`TokenManager::ensure_valid`] does that while
    /// holding the lock.
    async fn refresh(&self) -> Result<Credential> {
        let granted = self
            .api
            .grant_client_credentials(&self.credentials.client_id, &self.credentials.client_secret)
            .await
            .map_err(|e| {
                warning!("Failed to get new Spotify token: {}", e);
                match e {
                    BandsError::Auth(_) => e,
                    other => BandsError::Auth(other.to_string()),
                }
            })?;

        info!("The access token expires in {}s", granted.expires_in);

        Ok(Credential {
            access_token: granted.access_token,
            expires_at: utils::token_expiry(
                Utc::now(),
                granted.expires_in,
                TOKEN_EXPIRY_MARGIN_SECS,
            ),
        })
    }

    fn is_expired(credential: &Credential, now: DateTime<Utc>) -> bool {
        now >= credential.expires_at
    }

    /// Expiry instant of the installed credential, if any.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .await
            .credential
            .as_ref()
            .map(|c| c.expires_at)
    }
}
