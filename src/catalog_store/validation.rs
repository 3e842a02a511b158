//! Validation of untyped album requests.
//!
//! Request bodies arrive as arbitrary JSON. They are checked field by field
//! so that every structural problem maps to a `BadRequest` with a message
//! the caller can act on, instead of a generic deserialization failure.

use super::error::{CatalogError, CatalogResult};
use super::models::{Artist, NewAlbum, NewSong};
use serde_json::{Map, Value};
use tracing::debug;

const REQUIRED_ALBUM_FIELDS: &[&str] = &[
    "album_id",
    "album_name",
    "release_year",
    "artists",
    "songs",
];

fn bad_request<S: Into<String>>(message: S) -> CatalogError {
    CatalogError::BadRequest(message.into())
}

fn integer_field(body: &Map<String, Value>, field: &'static str) -> CatalogResult<i64> {
    body.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| bad_request(format!("Field '{}' must be an integer", field)))
}

fn string_field(body: &Map<String, Value>, field: &'static str) -> CatalogResult<String> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| bad_request(format!("Field '{}' must be a string", field)))
}

fn parse_artist(value: &Value) -> CatalogResult<Artist> {
    serde_json::from_value(value.clone()).map_err(|e| {
        debug!("Rejecting artist {}: {}", value, e);
        bad_request("bad artist")
    })
}

fn parse_song(value: &Value) -> CatalogResult<NewSong> {
    serde_json::from_value(value.clone()).map_err(|e| {
        debug!("Rejecting song {}: {}", value, e);
        bad_request("bad song")
    })
}

/// Parse an album request body into a [`NewAlbum`].
///
/// Fails with `BadRequest` when the body is not an object, when any of the
/// album fields or the `artists`/`songs` lists is missing, when the lists are
/// not arrays, or when an artist or song entry has missing or extra keys.
pub fn parse_new_album(body: &Value) -> CatalogResult<NewAlbum> {
    let body = body
        .as_object()
        .ok_or_else(|| bad_request("Request body must be a JSON object"))?;

    if REQUIRED_ALBUM_FIELDS
        .iter()
        .any(|field| !body.contains_key(*field))
    {
        return Err(bad_request("Required attribute is missing"));
    }

    let (artists, songs) = match (&body["artists"], &body["songs"]) {
        (Value::Array(artists), Value::Array(songs)) => (artists, songs),
        _ => return Err(bad_request("artists or songs are not lists")),
    };

    let album_id = integer_field(body, "album_id")?;
    let album_name = string_field(body, "album_name")?;
    let release_year = i32::try_from(integer_field(body, "release_year")?)
        .map_err(|_| bad_request("Field 'release_year' is out of range"))?;

    let artists = artists
        .iter()
        .map(parse_artist)
        .collect::<CatalogResult<Vec<_>>>()?;
    let songs = songs
        .iter()
        .map(parse_song)
        .collect::<CatalogResult<Vec<_>>>()?;

    Ok(NewAlbum {
        album_id,
        album_name,
        release_year,
        artists,
        songs,
    })
}
