use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config,
    error::ApiError,
    spotify::{Session, transient_from_response},
    types::{Album, AlbumItem, Paging, Track, TrackItem},
    utils,
};

/// Page size requested from the listing endpoints (the API maximum).
const PAGE_LIMIT: u32 = 50;

/// Release groups included in the album listing.
const INCLUDE_GROUPS: &str = "album,single,compilation";

/// Retrieves the complete album listing for an artist.
///
/// Walks the artist-albums endpoint by following the pagination cursor:
/// each page carries a `next` URL which is fetched until it is null or a
/// page comes back empty. Albums are produced in the order the API returned
/// them (provider-defined, typically most recent first).
///
/// # Arguments
///
/// * `session` - Authenticated session; re-used and refreshed as needed
/// * `artist_id` - Spotify ID of the artist whose albums are listed
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Album>)` - All albums, singles and compilations of the artist
/// - `Err(ApiError)` - Authentication, not-found or transient failure
///
/// # Duplicate Removal
///
/// Some providers repeat albums across pages (observed with compilations).
/// The listing is de-duplicated by album id before it is handed to the
/// caller, keeping the first occurrence.
///
/// # Rate Limiting
///
/// A 429 response maps to `ApiError::Transient` with the `Retry-After`
/// hint in the message. This function never sleeps; backoff is the
/// caller's concern.
///
/// # Example
///
/// ```
/// let albums = fetch_all_albums(&mut session, artist_id).await?;
/// println!("Found {} releases", albums.len());
/// ```
pub async fn fetch_all_albums(
    session: &mut Session,
    artist_id: &str,
) -> Result<Vec<Album>, ApiError> {
    let mut albums: Vec<Album> = Vec::new();
    let mut next_url = Some(format!(
        "{uri}/artists/{id}/albums?include_groups={include_groups}&limit={limit}&offset=0",
        uri = &config::spotify_apiurl(),
        id = artist_id,
        include_groups = INCLUDE_GROUPS,
        limit = PAGE_LIMIT
    ));

    while let Some(api_url) = next_url {
        let context = format!("albums of artist {artist_id}");
        let page: Paging<AlbumItem> = fetch_page(session, &api_url, &context).await?;

        if page.items.is_empty() {
            break;
        }
        albums.extend(
            page.items
                .into_iter()
                .map(|item| Album::from_api(item, artist_id)),
        );
        next_url = page.next;
    }

    utils::dedup_albums(&mut albums);
    Ok(albums)
}

/// Retrieves the complete track listing for one album.
///
/// Pages through the album-tracks endpoint exactly like
/// [`fetch_all_albums`] pages through albums, following the `next` cursor
/// until exhaustion. Tracks are returned in the order the API produced
/// them, which is track-number order.
///
/// # Arguments
///
/// * `session` - Authenticated session; re-used and refreshed as needed
/// * `album_id` - Spotify ID of the album whose tracks are listed
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - All tracks of the album, mapped onto persisted
///   records (duration formatting and scan-code URL applied)
/// - `Err(ApiError)` - Authentication, not-found or transient failure
pub async fn fetch_album_tracks(
    session: &mut Session,
    album_id: &str,
) -> Result<Vec<Track>, ApiError> {
    let mut tracks: Vec<Track> = Vec::new();
    let mut next_url = Some(format!(
        "{uri}/albums/{id}/tracks?limit={limit}&offset=0",
        uri = &config::spotify_apiurl(),
        id = album_id,
        limit = PAGE_LIMIT
    ));

    while let Some(api_url) = next_url {
        let context = format!("tracks of album {album_id}");
        let page: Paging<TrackItem> = fetch_page(session, &api_url, &context).await?;

        if page.items.is_empty() {
            break;
        }
        tracks.extend(
            page.items
                .into_iter()
                .map(|item| Track::from_api(item, album_id)),
        );
        next_url = page.next;
    }

    Ok(tracks)
}

/// Fetches one page of a paginated listing, handling the shared status
/// mapping: one re-authentication on 401, 404 to NotFound, everything else
/// non-2xx to Transient.
async fn fetch_page<T: DeserializeOwned>(
    session: &mut Session,
    api_url: &str,
    context: &str,
) -> Result<Paging<T>, ApiError> {
    let mut reauthenticated = false;

    loop {
        let token = session.bearer().await?;
        let client = Client::new();
        let response = client.get(api_url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED if !reauthenticated => {
                session.invalidate();
                reauthenticated = true;
                continue;
            }
            StatusCode::UNAUTHORIZED => {
                return Err(ApiError::Auth(format!(
                    "{context}: token rejected after re-authentication"
                )));
            }
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound(context.to_string())),
            status if status.is_success() => {
                return Ok(response.json::<Paging<T>>().await?);
            }
            _ => return Err(transient_from_response(context, &response)),
        }
    }
}
