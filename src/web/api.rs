use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use super::AppState;
use crate::cache::{keys, CacheStats};
use crate::errors::AppError;
use crate::models::{CatalogItem, CreateItemResponse, DeleteItemResponse, MediaUpload, NewCatalogItem};

#[derive(Debug, Deserialize)]
pub struct CatalogQueryParams {
    pub category: Option<String>,
}

fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// Health

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// Catalog API

pub async fn list_catalog_items(
    State(state): State<AppState>,
    Query(params): Query<CatalogQueryParams>,
) -> Result<Json<Vec<CatalogItem>>, StatusCode> {
    match state.catalog.list_items(params.category.as_deref()).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            error!("Failed to list catalog items: {}", e);
            Err(status_for(&e))
        }
    }
}

pub async fn get_catalog_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CatalogItem>, StatusCode> {
    match state.catalog.get_item(&id).await {
        Ok(item) => Ok(Json(item)),
        Err(e) => {
            if !matches!(e, AppError::NotFound { .. }) {
                error!("Failed to get catalog item ({}): {}", id, e);
            }
            Err(status_for(&e))
        }
    }
}

pub async fn create_catalog_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CreateItemResponse>, StatusCode> {
    let mut request = NewCatalogItem::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                error!("Invalid multipart payload: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        };
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => request.title = read_text_field(field).await?,
            "description" => request.description = read_text_field(field).await?,
            "category" => request.category = read_text_field(field).await?,
            "type" => request.kind = Some(read_text_field(field).await?),
            "tags" => request.tags = Some(read_text_field(field).await?),
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        error!("Failed to read uploaded file: {}", e);
                        return Err(StatusCode::BAD_REQUEST);
                    }
                };
                request.media = Some(MediaUpload {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    if request.title.is_empty() || request.description.is_empty() || request.category.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    match state.catalog.create_item(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Failed to create catalog item: {}", e);
            Err(status_for(&e))
        }
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, StatusCode> {
    field.text().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        StatusCode::BAD_REQUEST
    })
}

pub async fn accept_item_by_title(
    Path(title): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<CatalogItem>, StatusCode> {
    match state.catalog.accept_by_title(&title).await {
        Ok(item) => Ok(Json(item)),
        Err(e) => {
            if !matches!(e, AppError::NotFound { .. }) {
                error!("Failed to accept catalog item '{}': {}", title, e);
            }
            Err(status_for(&e))
        }
    }
}

pub async fn delete_item_by_title(
    Path(title): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteItemResponse>, StatusCode> {
    match state.catalog.delete_by_title(&title).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            if !matches!(e, AppError::NotFound { .. }) {
                error!("Failed to delete catalog item '{}': {}", title, e);
            }
            Err(status_for(&e))
        }
    }
}

// Cache maintenance API

pub async fn clear_cache(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    match state.cache.flush_all().await {
        Ok(()) => Ok(Json(json!({ "ok": true, "message": "Cache cleared" }))),
        Err(e) => {
            error!("Failed to flush cache: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn clear_catalog_cache(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    match state.cache.delete_prefix(keys::CATALOG_PREFIX).await {
        Ok(removed) => Ok(Json(json!({
            "ok": true,
            "message": "Catalog cache cleared",
            "removed": removed,
        }))),
        Err(e) => {
            error!("Failed to clear catalog cache: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn cache_stats(State(state): State<AppState>) -> Result<Json<CacheStats>, StatusCode> {
    match state.cache.stats().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            error!("Failed to read cache stats: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
