//! SQLite-backed catalog store.
//!
//! `SqliteCatalogStore` owns a single connection to a catalog database whose
//! schema was created beforehand (see the `cli-init-db` binary). Every
//! operation runs inside its own transaction; an early return drops the
//! transaction, which rolls it back.

use super::error::{CatalogError, CatalogResult};
use super::models::*;
use super::schema::latest_catalog_schema;
use super::trait_def::CatalogStore;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// SQLite-backed catalog store.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

impl SqliteCatalogStore {
    /// Open an existing catalog database.
    ///
    /// The file must already exist and carry the catalog schema; this store
    /// never creates or drops tables.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open catalog database at {:?}", db_path))?;
        Self::from_connection(conn)
    }

    /// Wrap an already opened connection, e.g. an in-memory database.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", true)?;
        latest_catalog_schema().validate(&conn).context(
            "Catalog database does not carry the expected schema, initialize it with cli-init-db",
        )?;

        let store = SqliteCatalogStore {
            conn: Mutex::new(conn),
        };
        let counts = store.counts()?;
        info!(
            "Opened music catalog: {} albums, {} artists, {} songs",
            counts.albums, counts.artists, counts.songs
        );
        Ok(store)
    }

    fn lock(&self) -> CatalogResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CatalogError::Internal("catalog connection lock poisoned".to_string()))
    }

    /// Run `f` inside a transaction and commit if it succeeds.
    fn with_transaction<T, F>(&self, behavior: TransactionBehavior, f: F) -> CatalogResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> CatalogResult<T>,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(behavior)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // =========================================================================
    // Internal Helper Methods
    // =========================================================================

    fn exists(conn: &Connection, sql: &str, id: i64) -> rusqlite::Result<bool> {
        conn.prepare_cached(sql)?.query_row(params![id], |r| r.get(0))
    }

    fn album_exists(conn: &Connection, album_id: AlbumId) -> rusqlite::Result<bool> {
        Self::exists(
            conn,
            "SELECT EXISTS(SELECT 1 FROM album WHERE album_id = ?1)",
            album_id,
        )
    }

    fn artist_exists(conn: &Connection, artist_id: ArtistId) -> rusqlite::Result<bool> {
        Self::exists(
            conn,
            "SELECT EXISTS(SELECT 1 FROM artist WHERE artist_id = ?1)",
            artist_id,
        )
    }

    /// Collect the first column of a single-parameter query.
    fn query_ids(conn: &Connection, sql: &str, id: i64) -> rusqlite::Result<Vec<i64>> {
        let mut stmt = conn.prepare_cached(sql)?;
        let ids = stmt
            .query_map(params![id], |r| r.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    fn song_artist_ids(conn: &Connection, song_id: SongId) -> rusqlite::Result<Vec<ArtistId>> {
        Self::query_ids(
            conn,
            "SELECT artist_id FROM song_artist WHERE song_id = ?1 ORDER BY artist_id",
            song_id,
        )
    }

    fn require_artist(conn: &Connection, artist_id: ArtistId) -> CatalogResult<()> {
        if Self::artist_exists(conn, artist_id)? {
            Ok(())
        } else {
            Err(CatalogError::KeyNotFound(format!(
                "Artist {} not found",
                artist_id
            )))
        }
    }

    fn parse_song_row(row: &rusqlite::Row) -> rusqlite::Result<Song> {
        Ok(Song {
            song_id: row.get(0)?,
            song_name: row.get(1)?,
            length: row.get(2)?,
        })
    }

    fn parse_album_row(row: &rusqlite::Row) -> rusqlite::Result<Album> {
        Ok(Album {
            album_id: row.get(0)?,
            album_name: row.get(1)?,
            release_year: row.get(2)?,
        })
    }

    fn insert_album(tx: &Transaction<'_>, album: &Album) -> CatalogResult<()> {
        let inserted = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO album (album_id, album_name, release_year) VALUES (?1, ?2, ?3)",
            )?
            .execute(params![album.album_id, &album.album_name, album.release_year])?;
        if inserted == 0 {
            debug!("Album {} already present, keeping it", album.album_id);
        }
        Ok(())
    }

    fn insert_artist(tx: &Transaction<'_>, artist: &Artist, credit: &ArtistAlbum) -> CatalogResult<()> {
        let inserted = tx
            .prepare_cached(
                "INSERT OR IGNORE INTO artist (artist_id, artist_name, country) VALUES (?1, ?2, ?3)",
            )?
            .execute(params![artist.artist_id, &artist.artist_name, &artist.country])?;
        if inserted == 0 {
            debug!("Artist {} already present, keeping it", artist.artist_id);
        }
        tx.prepare_cached("INSERT OR IGNORE INTO artist_album (artist_id, album_id) VALUES (?1, ?2)")?
            .execute(params![credit.artist_id, credit.album_id])?;
        Ok(())
    }

    fn insert_song(
        tx: &Transaction<'_>,
        song: &Song,
        credits: &[SongArtist],
        placement: &SongAlbum,
    ) -> CatalogResult<()> {
        let inserted = tx
            .prepare_cached("INSERT OR IGNORE INTO song (song_id, song_name, length) VALUES (?1, ?2, ?3)")?
            .execute(params![song.song_id, &song.song_name, song.length])?;
        if inserted == 0 {
            debug!("Song {} already present, keeping it", song.song_id);
        }

        for credit in credits {
            if !Self::artist_exists(tx, credit.artist_id)? {
                return Err(CatalogError::BadRequest(format!(
                    "Song {} references unknown artist {}",
                    credit.song_id, credit.artist_id
                )));
            }
            tx.prepare_cached("INSERT OR IGNORE INTO song_artist (song_id, artist_id) VALUES (?1, ?2)")?
                .execute(params![credit.song_id, credit.artist_id])?;
        }

        tx.prepare_cached(
            "INSERT OR IGNORE INTO song_album (song_id, album_id, order_in_album) VALUES (?1, ?2, ?3)",
        )?
        .execute(params![
            placement.song_id,
            placement.album_id,
            placement.order_in_album
        ])?;
        Ok(())
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn add_album(&self, album: &NewAlbum) -> CatalogResult<Acknowledgment> {
        self.with_transaction(TransactionBehavior::Immediate, |tx| {
            Self::insert_album(tx, &album.album())?;

            for (artist, credit) in album.artists.iter().zip(album.artist_album_rows()) {
                Self::insert_artist(tx, artist, &credit)?;
            }

            for (song, placement) in album.songs.iter().zip(album.song_album_rows()) {
                Self::insert_song(tx, &song.song(), &song.song_artist_rows(), &placement)?;
            }
            Ok(())
        })?;

        info!(
            "Inserted album {} with {} artists and {} songs",
            album.album_id,
            album.artists.len(),
            album.songs.len()
        );
        Ok(Acknowledgment::new("album inserted"))
    }

    fn find_song(&self, song_id: SongId) -> CatalogResult<SongDetails> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let song = tx
                .prepare_cached("SELECT song_id, song_name, length FROM song WHERE song_id = ?1")?
                .query_row(params![song_id], Self::parse_song_row)
                .optional()?
                .ok_or_else(|| CatalogError::KeyNotFound(format!("Song {} not found", song_id)))?;

            let artist_ids = Self::song_artist_ids(tx, song_id)?;
            let album_ids = Self::query_ids(
                tx,
                "SELECT album_id FROM song_album WHERE song_id = ?1 ORDER BY album_id",
                song_id,
            )?;

            Ok(SongDetails {
                song_id: song.song_id,
                song_name: song.song_name,
                length: song.length,
                artist_ids,
                album_ids,
            })
        })
    }

    fn find_album(&self, album_id: AlbumId) -> CatalogResult<AlbumDetails> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let album = tx
                .prepare_cached(
                    "SELECT album_id, album_name, release_year FROM album WHERE album_id = ?1",
                )?
                .query_row(params![album_id], Self::parse_album_row)
                .optional()?
                .ok_or_else(|| {
                    CatalogError::KeyNotFound(format!("Album {} not found", album_id))
                })?;

            let artist_ids = Self::query_ids(
                tx,
                "SELECT artist_id FROM artist_album WHERE album_id = ?1 ORDER BY artist_id",
                album_id,
            )?;
            let song_ids = Self::query_ids(
                tx,
                "SELECT song_id FROM song_album WHERE album_id = ?1 ORDER BY order_in_album",
                album_id,
            )?;

            Ok(AlbumDetails {
                album_id: album.album_id,
                album_name: album.album_name,
                release_year: album.release_year,
                artist_ids,
                song_ids,
            })
        })
    }

    fn find_artist(&self, artist_id: ArtistId) -> CatalogResult<Artist> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            tx.prepare_cached(
                "SELECT artist_id, artist_name, country FROM artist WHERE artist_id = ?1",
            )?
            .query_row(params![artist_id], |row| {
                Ok(Artist {
                    artist_id: row.get(0)?,
                    artist_name: row.get(1)?,
                    country: row.get(2)?,
                })
            })
            .optional()?
            .ok_or_else(|| CatalogError::KeyNotFound(format!("Artist {} not found", artist_id)))
        })
    }

    fn find_songs_by_album(&self, album_id: AlbumId) -> CatalogResult<Vec<AlbumSong>> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            if !Self::album_exists(tx, album_id)? {
                return Err(CatalogError::KeyNotFound(format!(
                    "Album {} not found",
                    album_id
                )));
            }

            let mut stmt = tx.prepare_cached(
                "SELECT s.song_id, s.song_name, s.length, a.album_name
                 FROM song_album sa
                 JOIN song s ON s.song_id = sa.song_id
                 JOIN album a ON a.album_id = sa.album_id
                 WHERE sa.album_id = ?1
                 ORDER BY sa.order_in_album",
            )?;
            let rows = stmt
                .query_map(params![album_id], |row| {
                    Ok((Self::parse_song_row(row)?, row.get::<_, String>(3)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            if rows.is_empty() {
                return Err(CatalogError::KeyNotFound(format!(
                    "Album {} has no songs",
                    album_id
                )));
            }

            rows.into_iter()
                .map(|(song, album_name)| -> CatalogResult<AlbumSong> {
                    Ok(AlbumSong {
                        artist_ids: Self::song_artist_ids(tx, song.song_id)?,
                        song_id: song.song_id,
                        song_name: song.song_name,
                        length: song.length,
                        album_name,
                    })
                })
                .collect()
        })
    }

    fn find_songs_by_artist(&self, artist_id: ArtistId) -> CatalogResult<Vec<ArtistSong>> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            Self::require_artist(tx, artist_id)?;

            let mut stmt = tx.prepare_cached(
                "SELECT s.song_id, s.song_name, s.length
                 FROM song s
                 JOIN song_artist sa ON sa.song_id = s.song_id
                 WHERE sa.artist_id = ?1
                 ORDER BY s.song_id",
            )?;
            let songs = stmt
                .query_map(params![artist_id], Self::parse_song_row)?
                .collect::<Result<Vec<_>, _>>()?;

            if songs.is_empty() {
                return Err(CatalogError::KeyNotFound(format!(
                    "Artist {} has no songs",
                    artist_id
                )));
            }

            songs
                .into_iter()
                .map(|song| -> CatalogResult<ArtistSong> {
                    Ok(ArtistSong {
                        artist_ids: Self::song_artist_ids(tx, song.song_id)?,
                        song_id: song.song_id,
                        song_name: song.song_name,
                        length: song.length,
                    })
                })
                .collect()
        })
    }

    fn find_albums_by_artist(&self, artist_id: ArtistId) -> CatalogResult<Vec<Album>> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            Self::require_artist(tx, artist_id)?;

            let mut stmt = tx.prepare_cached(
                "SELECT al.album_id, al.album_name, al.release_year
                 FROM album al
                 JOIN artist_album aa ON aa.album_id = al.album_id
                 WHERE aa.artist_id = ?1
                 ORDER BY al.release_year, al.album_id",
            )?;
            let albums = stmt
                .query_map(params![artist_id], Self::parse_album_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(albums)
        })
    }

    fn avg_song_length(&self, artist_id: ArtistId) -> CatalogResult<ArtistAverageLength> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            Self::require_artist(tx, artist_id)?;

            let avg_length: Option<f64> = tx
                .prepare_cached(
                    "SELECT AVG(s.length)
                     FROM song s
                     JOIN song_artist sa ON sa.song_id = s.song_id
                     WHERE sa.artist_id = ?1",
                )?
                .query_row(params![artist_id], |r| r.get(0))?;

            Ok(ArtistAverageLength {
                artist_id,
                avg_length,
            })
        })
    }

    fn top_length(&self, n: usize) -> CatalogResult<Vec<ArtistTotalLength>> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            // Artists without songs take part with a total of 0
            let mut stmt = tx.prepare_cached(
                "SELECT a.artist_id, a.artist_name, COALESCE(SUM(s.length), 0.0) AS total_length
                 FROM artist a
                 LEFT JOIN song_artist sa ON sa.artist_id = a.artist_id
                 LEFT JOIN song s ON s.song_id = sa.song_id
                 GROUP BY a.artist_id, a.artist_name
                 ORDER BY total_length DESC, a.artist_id ASC
                 LIMIT ?1",
            )?;
            let artists = stmt
                .query_map(params![limit], |row| {
                    Ok(ArtistTotalLength {
                        artist_id: row.get(0)?,
                        artist_name: row.get(1)?,
                        total_length: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(artists)
        })
    }

    fn counts(&self) -> CatalogResult<CatalogCounts> {
        self.with_transaction(TransactionBehavior::Deferred, |tx| {
            let count = |sql: &str| -> rusqlite::Result<usize> {
                tx.query_row(sql, [], |r| r.get::<_, i64>(0))
                    .map(|c| c as usize)
            };
            Ok(CatalogCounts {
                albums: count("SELECT COUNT(*) FROM album")?,
                artists: count("SELECT COUNT(*) FROM artist")?,
                songs: count("SELECT COUNT(*) FROM song")?,
            })
        })
    }
}
