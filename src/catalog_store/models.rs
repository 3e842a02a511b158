//! Catalog models.
//!
//! Entity and association rows mirror the tables one to one. Request and
//! result records are what the store accepts and returns; they serialize to
//! the flat key/value shape the HTTP layer exposes.

use serde::{Deserialize, Serialize};

pub type AlbumId = i64;
pub type ArtistId = i64;
pub type SongId = i64;

// =============================================================================
// Entity rows
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub album_id: AlbumId,
    pub album_name: String,
    pub release_year: i32,
}

/// Artist row. Also the shape of each entry of an album request's `artists`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Artist {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub song_id: SongId,
    pub song_name: String,
    /// Length in seconds, fractions allowed.
    pub length: f64,
}

// =============================================================================
// Association rows
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongArtist {
    pub song_id: SongId,
    pub artist_id: ArtistId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongAlbum {
    pub song_id: SongId,
    pub album_id: AlbumId,
    /// 1-based position of the song within the album.
    pub order_in_album: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistAlbum {
    pub artist_id: ArtistId,
    pub album_id: AlbumId,
}

// =============================================================================
// Requests
// =============================================================================

/// A song as listed in an album request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewSong {
    pub song_id: SongId,
    pub song_name: String,
    pub length: f64,
    pub artist_ids: Vec<ArtistId>,
}

impl NewSong {
    pub fn song(&self) -> Song {
        Song {
            song_id: self.song_id,
            song_name: self.song_name.clone(),
            length: self.length,
        }
    }

    /// One `song_artist` row per credited artist, in request order.
    pub fn song_artist_rows(&self) -> Vec<SongArtist> {
        self.artist_ids
            .iter()
            .map(|artist_id| SongArtist {
                song_id: self.song_id,
                artist_id: *artist_id,
            })
            .collect()
    }
}

/// An album together with its artists and its songs in album order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub album_id: AlbumId,
    pub album_name: String,
    pub release_year: i32,
    pub artists: Vec<Artist>,
    pub songs: Vec<NewSong>,
}

impl NewAlbum {
    pub fn album(&self) -> Album {
        Album {
            album_id: self.album_id,
            album_name: self.album_name.clone(),
            release_year: self.release_year,
        }
    }

    pub fn artist_album_rows(&self) -> Vec<ArtistAlbum> {
        self.artists
            .iter()
            .map(|artist| ArtistAlbum {
                artist_id: artist.artist_id,
                album_id: self.album_id,
            })
            .collect()
    }

    /// The `song_album` rows this album produces, numbering songs from 1.
    pub fn song_album_rows(&self) -> Vec<SongAlbum> {
        self.songs
            .iter()
            .enumerate()
            .map(|(index, song)| SongAlbum {
                song_id: song.song_id,
                album_id: self.album_id,
                order_in_album: index as i64 + 1,
            })
            .collect()
    }
}

// =============================================================================
// Results
// =============================================================================

/// Plain acknowledgment returned by write operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgment {
    pub message: String,
}

impl Acknowledgment {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Acknowledgment {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SongDetails {
    pub song_id: SongId,
    pub song_name: String,
    pub length: f64,
    pub artist_ids: Vec<ArtistId>,
    pub album_ids: Vec<AlbumId>,
}

/// A song as listed within an album, in album order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlbumSong {
    pub song_id: SongId,
    pub song_name: String,
    pub length: f64,
    pub album_name: String,
    pub artist_ids: Vec<ArtistId>,
}

/// A song as listed for an artist. `artist_ids` holds every artist on the
/// song, not only the one that was queried.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtistSong {
    pub song_id: SongId,
    pub song_name: String,
    pub length: f64,
    pub artist_ids: Vec<ArtistId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDetails {
    pub album_id: AlbumId,
    pub album_name: String,
    pub release_year: i32,
    pub artist_ids: Vec<ArtistId>,
    /// Ordered by position in the album.
    pub song_ids: Vec<SongId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtistAverageLength {
    pub artist_id: ArtistId,
    /// `None` when the artist has no songs.
    pub avg_length: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtistTotalLength {
    pub artist_id: ArtistId,
    pub artist_name: String,
    pub total_length: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCounts {
    pub albums: usize,
    pub artists: usize,
    pub songs: usize,
}
