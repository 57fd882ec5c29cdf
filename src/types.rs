use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

/// Bearer token obtained through the client-credentials grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Generic Spotify paging envelope shared by the album and track listings.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistResponse {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumItem {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub album_type: String,
    pub total_tracks: u32,
    pub uri: String,
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    pub track_number: u32,
    pub duration_ms: u64,
    pub uri: String,
    pub external_urls: ExternalUrls,
}

/// Persisted artist record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub spotify_url: String,
    pub spotify_uri: String,
    pub image_large_uri: String,
    pub image_medium_uri: String,
    pub image_thumb_uri: String,
}

impl Artist {
    pub fn from_api(response: ArtistResponse) -> Self {
        Artist {
            id: response.id,
            name: response.name,
            spotify_url: response.external_urls.spotify,
            spotify_uri: response.uri.clone(),
            image_large_uri: image_url(&response.images, 0),
            image_medium_uri: image_url(&response.images, 1),
            image_thumb_uri: image_url(&response.images, 2),
        }
    }
}

/// Persisted album record. Owned by exactly one artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub artist_id: String,
    pub name: String,
    pub release_date: String,
    pub track_count: u32,
    pub album_type: String,
    pub spotify_url: String,
    pub spotify_uri: String,
    pub qr_code_url: String,
    pub image_large_uri: String,
    pub image_medium_uri: String,
    pub image_thumb_uri: String,
}

impl Album {
    pub fn from_api(item: AlbumItem, artist_id: &str) -> Self {
        Album {
            id: item.id,
            artist_id: artist_id.to_string(),
            name: item.name,
            release_date: item.release_date,
            track_count: item.total_tracks,
            album_type: item.album_type,
            spotify_url: item.external_urls.spotify,
            qr_code_url: utils::scannable_url(&item.uri),
            spotify_uri: item.uri,
            image_large_uri: image_url(&item.images, 0),
            image_medium_uri: image_url(&item.images, 1),
            image_thumb_uri: image_url(&item.images, 2),
        }
    }
}

/// Persisted track record. Belongs to exactly one album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub album_id: String,
    pub name: String,
    pub track_number: u32,
    pub duration_ms: u64,
    pub duration: String,
    pub spotify_url: String,
    pub spotify_uri: String,
    pub qr_code_url: String,
}

impl Track {
    pub fn from_api(item: TrackItem, album_id: &str) -> Self {
        Track {
            id: item.id,
            album_id: album_id.to_string(),
            name: item.name,
            track_number: item.track_number,
            duration_ms: item.duration_ms,
            duration: utils::format_duration(item.duration_ms),
            spotify_url: item.external_urls.spotify,
            qr_code_url: utils::scannable_url(&item.uri),
            spotify_uri: item.uri,
        }
    }
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub released: String,
    pub title: String,
    pub kind: String,
    pub tracks: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub album: String,
    pub nr: String,
    pub title: String,
    pub duration: String,
}

fn image_url(images: &[ApiImage], index: usize) -> String {
    images.get(index).map(|i| i.url.clone()).unwrap_or_default()
}
