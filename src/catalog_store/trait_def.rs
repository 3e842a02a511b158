//! CatalogStore trait definition.
//!
//! The HTTP layer only talks to this trait, so handlers can be exercised
//! against any backend that honours the same error contract.

use super::error::CatalogResult;
use super::models::*;

/// Trait for catalog storage backends.
///
/// Lookups fail with `CatalogError::KeyNotFound` when the referenced entity
/// does not exist. Song listings by album or by artist also fail with
/// `KeyNotFound` when the entity exists but has no songs.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Insert an album with its artists and songs in a single transaction.
    /// Rows that already exist are left untouched.
    fn add_album(&self, album: &NewAlbum) -> CatalogResult<Acknowledgment>;

    // =========================================================================
    // Entity Lookups
    // =========================================================================

    fn find_song(&self, song_id: SongId) -> CatalogResult<SongDetails>;

    fn find_album(&self, album_id: AlbumId) -> CatalogResult<AlbumDetails>;

    fn find_artist(&self, artist_id: ArtistId) -> CatalogResult<Artist>;

    // =========================================================================
    // Listings
    // =========================================================================

    /// Songs of an album, in album order.
    fn find_songs_by_album(&self, album_id: AlbumId) -> CatalogResult<Vec<AlbumSong>>;

    /// Songs an artist appears on, ordered by song id.
    fn find_songs_by_artist(&self, artist_id: ArtistId) -> CatalogResult<Vec<ArtistSong>>;

    /// Albums an artist is credited on. Empty when the artist has none.
    fn find_albums_by_artist(&self, artist_id: ArtistId) -> CatalogResult<Vec<Album>>;

    // =========================================================================
    // Aggregates
    // =========================================================================

    fn avg_song_length(&self, artist_id: ArtistId) -> CatalogResult<ArtistAverageLength>;

    /// The `n` artists with the greatest total song length.
    fn top_length(&self, n: usize) -> CatalogResult<Vec<ArtistTotalLength>>;

    fn counts(&self) -> CatalogResult<CatalogCounts>;
}
