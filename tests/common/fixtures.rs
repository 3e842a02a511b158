//! Test fixture creation for the catalog database
//!
//! The database file is initialized with the same SQL script an operator
//! would run, then populated through the store's own write path.

use super::constants::*;
use anyhow::Result;
use music_catalog_server::catalog_store::{
    parse_new_album, CatalogStore, NewAlbum, SqliteCatalogStore,
};
use music_catalog_server::sqlite_persistence::run_sql_script;
use rusqlite::Connection;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_catalog_script_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("create_catalog.sql")
}

/// Creates an empty catalog database initialized from the fixture script.
/// Returns (temp_dir, catalog_db_path)
pub fn create_empty_catalog_db() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("catalog.db");

    let conn = Connection::open(&db_path)?;
    run_sql_script(&conn, create_catalog_script_path())?;
    drop(conn);

    Ok((dir, db_path))
}

/// Creates a catalog database holding both test albums.
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let (dir, db_path) = create_empty_catalog_db()?;

    let store = SqliteCatalogStore::open(&db_path)?;
    store.add_album(&album_1())?;
    store.add_album(&album_2())?;

    Ok((dir, db_path))
}

pub fn album_1_json() -> Value {
    json!({
        "album_id": ALBUM_1_ID,
        "album_name": ALBUM_1_NAME,
        "release_year": ALBUM_1_YEAR,
        "artists": [
            {"artist_id": ARTIST_1_ID, "artist_name": ARTIST_1_NAME, "country": "IE"},
            {"artist_id": ARTIST_2_ID, "artist_name": ARTIST_2_NAME, "country": "SE"}
        ],
        "songs": [
            {"song_id": SONG_103_ID, "song_name": "Dawn", "length": 200, "artist_ids": [ARTIST_1_ID]},
            {"song_id": SONG_101_ID, "song_name": "Morning", "length": 100, "artist_ids": [ARTIST_1_ID]},
            {"song_id": SONG_102_ID, "song_name": "Crossing", "length": 300, "artist_ids": [ARTIST_1_ID, ARTIST_2_ID]}
        ]
    })
}

pub fn album_2_json() -> Value {
    json!({
        "album_id": ALBUM_2_ID,
        "album_name": ALBUM_2_NAME,
        "release_year": ALBUM_2_YEAR,
        "artists": [
            {"artist_id": ARTIST_2_ID, "artist_name": ARTIST_2_NAME, "country": "SE"},
            {"artist_id": ARTIST_3_ID, "artist_name": ARTIST_3_NAME, "country": "US"}
        ],
        "songs": [
            {"song_id": SONG_201_ID, "song_name": "Gale", "length": 240, "artist_ids": [ARTIST_2_ID]},
            {"song_id": SONG_102_ID, "song_name": "Crossing", "length": 300, "artist_ids": [ARTIST_1_ID, ARTIST_2_ID]}
        ]
    })
}

pub fn album_1() -> NewAlbum {
    parse_new_album(&album_1_json()).expect("album 1 fixture is valid")
}

pub fn album_2() -> NewAlbum {
    parse_new_album(&album_2_json()).expect("album 2 fixture is valid")
}
