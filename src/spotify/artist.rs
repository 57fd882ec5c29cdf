use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::ApiError,
    spotify::{Session, transient_from_response},
    types::{Artist, ArtistResponse},
};

/// Retrieves one artist's metadata from the Spotify Web API.
///
/// Fetches the artist identified by `artist_id` and maps the raw response
/// onto the persisted [`Artist`] record (name, canonical URL and URI, the
/// three image sizes).
///
/// # Arguments
///
/// * `session` - Authenticated session; re-used and refreshed as needed
/// * `artist_id` - Spotify ID of the artist to fetch
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Artist)` - The mapped artist record
/// - `Err(ApiError)` - Authentication, not-found or transient failure
///
/// # Error Mapping
///
/// - 401 triggers one session re-authentication and retry; a second 401 is
///   an `ApiError::Auth`
/// - 404 maps to `ApiError::NotFound`
/// - 429/5xx/network map to `ApiError::Transient`; the caller decides
///   whether to retry
///
/// # Example
///
/// ```
/// let mut session = Session::new();
/// let artist = fetch_artist(&mut session, "16SiO2DZeffJZAKlppdOAw").await?;
/// println!("Tracking {}", artist.name);
/// ```
pub async fn fetch_artist(session: &mut Session, artist_id: &str) -> Result<Artist, ApiError> {
    let mut reauthenticated = false;

    loop {
        let token = session.bearer().await?;
        let api_url = format!(
            "{uri}/artists/{id}",
            uri = &config::spotify_apiurl(),
            id = artist_id
        );

        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED if !reauthenticated => {
                session.invalidate();
                reauthenticated = true;
                continue;
            }
            StatusCode::UNAUTHORIZED => {
                return Err(ApiError::Auth(format!(
                    "artist {artist_id}: token rejected after re-authentication"
                )));
            }
            StatusCode::NOT_FOUND => {
                return Err(ApiError::NotFound(format!("artist {artist_id}")));
            }
            status if status.is_success() => {
                let json = response.json::<ArtistResponse>().await?;
                return Ok(Artist::from_api(json));
            }
            _ => return Err(transient_from_response(&format!("artist {artist_id}"), &response)),
        }
    }
}
