//! Shared constants for end-to-end tests
//!
//! The test catalog holds two albums sharing one song:
//!
//! - album 10 "First Light" (1998), artists 1 and 2, songs 103, 101, 102
//! - album 20 "Second Wind" (2004), artists 2 and 3, songs 201, 102
//!
//! Song 102 is credited to artists 1 and 2. Artist 3 has no songs.

#![allow(dead_code)]

// ============================================================================
// Test Catalog IDs
// ============================================================================

pub const ARTIST_1_ID: i64 = 1;
pub const ARTIST_1_NAME: &str = "The Rivers";
pub const ARTIST_2_ID: i64 = 2;
pub const ARTIST_2_NAME: &str = "Nova";
pub const ARTIST_3_ID: i64 = 3;
pub const ARTIST_3_NAME: &str = "Guest Choir";

pub const ALBUM_1_ID: i64 = 10;
pub const ALBUM_1_NAME: &str = "First Light";
pub const ALBUM_1_YEAR: i32 = 1998;
pub const ALBUM_2_ID: i64 = 20;
pub const ALBUM_2_NAME: &str = "Second Wind";
pub const ALBUM_2_YEAR: i32 = 2004;

pub const SONG_101_ID: i64 = 101;
pub const SONG_102_ID: i64 = 102;
pub const SONG_103_ID: i64 = 103;
pub const SONG_201_ID: i64 = 201;

pub const UNKNOWN_ID: i64 = 9999;

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
