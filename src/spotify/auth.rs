use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    error::ApiError,
    types::{Token, TokenResponse},
};

/// Tokens are refreshed this many seconds before their reported expiry.
const EXPIRY_BUFFER_SECS: u64 = 240;

/// Explicit session object for the Spotify client-credentials flow.
///
/// Owns the in-memory bearer token together with its validity window. The
/// session is created once per run and passed by mutable reference into
/// every API call; callers never touch the token directly. There is no
/// on-disk token cache: the client-credentials grant is cheap enough to
/// repeat once per process.
///
/// # Example
///
/// ```
/// use discotrack::spotify::Session;
///
/// let mut session = Session::new();
/// let artist = discotrack::spotify::fetch_artist(&mut session, "16SiO2DZeffJZAKlppdOAw").await?;
/// ```
pub struct Session {
    token: Option<Token>,
}

impl Session {
    pub fn new() -> Self {
        Session { token: None }
    }

    /// Returns a valid bearer token, authenticating first when the cached
    /// token is missing or about to expire.
    ///
    /// # Errors
    ///
    /// - `ApiError::Auth` - the token endpoint answered non-2xx
    /// - `ApiError::Transient` - the token endpoint was unreachable
    pub async fn bearer(&mut self) -> Result<String, ApiError> {
        match &self.token {
            Some(token) if !is_expired(token) => Ok(token.access_token.clone()),
            _ => {
                let token = authenticate().await?;
                let bearer = token.access_token.clone();
                self.token = Some(token);
                Ok(bearer)
            }
        }
    }

    /// Drops the cached token so the next [`Session::bearer`] call
    /// re-authenticates. Called by the client after a 401 response.
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn is_expired(token: &Token) -> bool {
    let now = Utc::now().timestamp() as u64;
    now >= (token.obtained_at + token.expires_in).saturating_sub(EXPIRY_BUFFER_SECS)
}

/// Exchanges the configured client credentials for a bearer token.
///
/// Sends the client-credentials grant as form fields to the configured token
/// endpoint. Any non-2xx answer is an authentication failure by contract;
/// only an unreachable endpoint maps to a transient error.
async fn authenticate() -> Result<Token, ApiError> {
    let client = Client::new();
    let response = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "client_credentials".to_string()),
            ("client_id", config::spotify_client_id()),
            ("client_secret", config::spotify_client_secret()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Auth(format!(
            "token endpoint returned {status}",
            status = response.status()
        )));
    }

    let json = response.json::<TokenResponse>().await?;
    Ok(Token {
        access_token: json.access_token,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
