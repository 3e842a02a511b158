//! SQLite schema definitions for the music catalog database.
//!
//! Three entity tables keyed by caller-supplied integer ids, and three
//! association tables with composite primary keys. `song_album` carries
//! the position of each song within its album.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

// =============================================================================
// Entity Tables
// =============================================================================

const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &[
        sqlite_column!("album_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("album_name", &SqlType::Text, non_null = true),
        sqlite_column!("release_year", &SqlType::Integer, non_null = true),
    ],
    indices: &[],
};

const ARTIST_TABLE: Table = Table {
    name: "artist",
    columns: &[
        sqlite_column!("artist_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("artist_name", &SqlType::Text, non_null = true),
        sqlite_column!("country", &SqlType::Text, non_null = true),
    ],
    indices: &[],
};

const SONG_TABLE: Table = Table {
    name: "song",
    columns: &[
        sqlite_column!("song_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("song_name", &SqlType::Text, non_null = true),
        sqlite_column!("length", &SqlType::Real, non_null = true), // seconds
    ],
    indices: &[],
};

// =============================================================================
// Association Tables
// =============================================================================

const SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "song",
    foreign_column: "song_id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artist",
    foreign_column: "artist_id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const ALBUM_FK: ForeignKey = ForeignKey {
    foreign_table: "album",
    foreign_column: "album_id",
    on_delete: ForeignKeyOnChange::Cascade,
};

/// Song <-> Artist
const SONG_ARTIST_TABLE: Table = Table {
    name: "song_artist",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&SONG_FK)
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
    ],
    indices: &[("idx_song_artist_artist", "artist_id")],
};

/// Song <-> Album, with the 1-based position of the song in the album
const SONG_ALBUM_TABLE: Table = Table {
    name: "song_album",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&SONG_FK)
        ),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&ALBUM_FK)
        ),
        sqlite_column!("order_in_album", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_song_album_album", "album_id")],
};

/// Artist <-> Album
const ARTIST_ALBUM_TABLE: Table = Table {
    name: "artist_album",
    columns: &[
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            is_primary_key = true,
            non_null = true,
            foreign_key = Some(&ALBUM_FK)
        ),
    ],
    indices: &[("idx_artist_album_album", "album_id")],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

/// Music catalog schema. Entity tables come first so that association
/// tables can reference them on creation.
pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ALBUM_TABLE,
        ARTIST_TABLE,
        SONG_TABLE,
        SONG_ARTIST_TABLE,
        SONG_ALBUM_TABLE,
        ARTIST_ALBUM_TABLE,
    ],
}];

/// The schema a catalog database is expected to carry.
pub fn latest_catalog_schema() -> &'static VersionedSchema {
    &CATALOG_VERSIONED_SCHEMAS[CATALOG_VERSIONED_SCHEMAS.len() - 1]
}
