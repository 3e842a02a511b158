use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::{error, info};

use super::extract::{CatalogPath, CatalogQuery};
use super::log_requests;
use super::state::{GuardedCatalogStore, ServerState};
use super::ServerConfig;
use crate::catalog_store::{
    parse_new_album, Acknowledgment, Album, AlbumDetails, AlbumId, AlbumSong, Artist,
    ArtistAverageLength, ArtistId, ArtistSong, ArtistTotalLength, CatalogError, SongDetails,
    SongId,
};

type CatalogResponse<T> = std::result::Result<Json<T>, CatalogError>;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Storage(_) | CatalogError::Internal(_) => {
                error!("Catalog operation failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(self.to_payload())).into_response()
    }
}

async fn post_album(
    State(catalog_store): State<GuardedCatalogStore>,
    body: Bytes,
) -> std::result::Result<(StatusCode, Json<Acknowledgment>), CatalogError> {
    let body: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| CatalogError::BadRequest("Request body is not valid JSON".to_string()))?;
    let album = parse_new_album(&body)?;
    let ack = catalog_store.add_album(&album)?;
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn get_album(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<AlbumId>,
) -> CatalogResponse<AlbumDetails> {
    Ok(Json(catalog_store.find_album(id)?))
}

async fn get_album_songs(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<AlbumId>,
) -> CatalogResponse<Vec<AlbumSong>> {
    Ok(Json(catalog_store.find_songs_by_album(id)?))
}

async fn get_song(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<SongId>,
) -> CatalogResponse<SongDetails> {
    Ok(Json(catalog_store.find_song(id)?))
}

async fn get_artist(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<ArtistId>,
) -> CatalogResponse<Artist> {
    Ok(Json(catalog_store.find_artist(id)?))
}

async fn get_artist_songs(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<ArtistId>,
) -> CatalogResponse<Vec<ArtistSong>> {
    Ok(Json(catalog_store.find_songs_by_artist(id)?))
}

async fn get_artist_albums(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<ArtistId>,
) -> CatalogResponse<Vec<Album>> {
    Ok(Json(catalog_store.find_albums_by_artist(id)?))
}

async fn get_artist_avg_length(
    State(catalog_store): State<GuardedCatalogStore>,
    CatalogPath(id): CatalogPath<ArtistId>,
) -> CatalogResponse<ArtistAverageLength> {
    Ok(Json(catalog_store.avg_song_length(id)?))
}

#[derive(Deserialize)]
struct TopLengthParams {
    n: Option<usize>,
}

async fn get_top_length(
    State(state): State<ServerState>,
    CatalogQuery(params): CatalogQuery<TopLengthParams>,
) -> CatalogResponse<Vec<ArtistTotalLength>> {
    let n = params.n.unwrap_or(state.config.default_top_length);
    Ok(Json(state.catalog_store.top_length(n)?))
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Router {
    let state = ServerState {
        config,
        catalog_store,
    };

    let catalog_routes: Router = Router::new()
        .route("/albums", post(post_album))
        .route("/albums/{id}", get(get_album))
        .route("/albums/{id}/songs", get(get_album_songs))
        .route("/songs/{id}", get(get_song))
        .route("/artists/{id}", get(get_artist))
        .route("/artists/{id}/songs", get(get_artist_songs))
        .route("/artists/{id}/albums", get(get_artist_albums))
        .route("/artists/{id}/avg-length", get(get_artist_avg_length))
        .route("/stats/top-length", get(get_top_length))
        .with_state(state.clone());

    Router::new()
        .nest("/v1", catalog_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Result<()> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let app = make_app(config, catalog_store);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Ready to serve at {}!", address);

    Ok(axum::serve(listener, app).await?)
}
