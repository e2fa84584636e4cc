use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockroom_core::{DomainError, ItemFilter};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Item routes. Collection paths are served with and without a trailing slash.
pub fn router() -> Router {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/", post(create_item).get(list_items))
        .route("/items/search", get(search_items))
        .route("/items/search/", get(search_items))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.store().create(body.into_fields()).await {
        Ok(item) => {
            tracing::info!(item_id = %item.id, "item created");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ListItemsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match services.store().list(query.page()).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store().get(id).await {
        Ok(Some(item)) => (StatusCode::OK, Json(item)).into_response(),
        Ok(None) => errors::domain_error_to_response(DomainError::not_found()),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.store().update(id, body.into_fields()).await {
        Ok(Some(item)) => {
            tracing::info!(item_id = %id, "item updated");
            (StatusCode::OK, Json(item)).into_response()
        }
        Ok(None) => errors::domain_error_to_response(DomainError::not_found()),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.store().delete(id).await {
        Ok(Some(item)) => {
            tracing::info!(item_id = %id, "item deleted");
            (StatusCode::OK, Json(item)).into_response()
        }
        Ok(None) => errors::domain_error_to_response(DomainError::not_found()),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::SearchItemsQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let filter = match ItemFilter::try_from(query) {
        Ok(f) => f,
        Err(msg) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_query", msg);
        }
    };
    match services.store().search(&filter).await {
        Ok(items) => {
            tracing::debug!(matches = items.len(), unbounded = filter.is_unbounded(), "item search");
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
