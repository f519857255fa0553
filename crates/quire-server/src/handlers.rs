//! Request handlers for the `/api/*` routes.
//!
//! Create / read / update / delete are written once, generic over the stored
//! kind. Listing and slug lookups differ per kind and are written out.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use quire_shared::{Category, Content, ContentStatus, FromJsonBody};
use quire_store::{Entity, Stored};

use crate::api::AppState;
use crate::error::ServerError;

/// A stored kind that can be served over HTTP.
pub trait Resource: Stored + Serialize {}

impl<E: Stored + Serialize> Resource for E {}

/// Ids that are not well-formed UUIDs can never match a record.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// A request sent without a JSON `Content-Type` carries an empty object.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ServerError> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(Value::Object(Default::default())),
        Err(rejection) => Err(rejection.into()),
    }
}

// ---------------------------------------------------------------------------
// Generic CRUD
// ---------------------------------------------------------------------------

pub async fn get_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E>, ServerError> {
    let store = state.store.lock().await;
    parse_id(&id)
        .and_then(|id| E::collection(&store).get(id))
        .map(Json)
        .ok_or(ServerError::NotFound(E::KIND))
}

pub async fn list_entities<E: Resource>(State(state): State<AppState>) -> Json<Vec<E>> {
    let store = state.store.lock().await;
    Json(E::collection(&store).all())
}

pub async fn create_entity<E: Resource>(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<E>), ServerError> {
    let body = json_body(body)?;
    let new = E::Insert::from_json_body(&body).map_err(|errors| {
        warn!(kind = E::KIND, issues = errors.len(), "Create rejected by schema");
        errors
    })?;

    let created = {
        let mut store = state.store.lock().await;
        E::collection_mut(&mut store).insert(new)
    };

    info!(kind = E::KIND, id = %created.id(), "Created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<E>, ServerError> {
    let body = json_body(body)?;
    let patch = E::Patch::from_json_body(&body).map_err(|errors| {
        warn!(kind = E::KIND, issues = errors.len(), "Update rejected by schema");
        errors
    })?;

    let Some(id) = parse_id(&id) else {
        warn!(kind = E::KIND, id = %id, "Update of malformed id");
        return Err(ServerError::NotFound(E::KIND));
    };

    let updated = {
        let mut store = state.store.lock().await;
        E::collection_mut(&mut store).update(id, patch)
    }
    .map_err(|e| {
        warn!(kind = E::KIND, id = %id, "Update of unknown id");
        e
    })?;

    info!(kind = E::KIND, id = %id, "Updated");
    Ok(Json(updated))
}

/// Always `204 No Content`, whether or not the id existed.
pub async fn delete_entity<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    if let Some(id) = parse_id(&id) {
        let removed = E::collection_mut(&mut *state.store.lock().await).remove(id);
        info!(kind = E::KIND, id = %id, removed, "Deleted");
    }
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// `GET /api/content`. At most one filter applies, in the order
/// search, category, status. Empty values count as absent.
pub async fn list_content(
    State(state): State<AppState>,
    query: Result<Query<ContentQuery>, QueryRejection>,
) -> Result<Json<Vec<Content>>, ServerError> {
    let Query(query) = query?;
    let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
    let store = state.store.lock().await;

    let items = if let Some(search) = non_empty(query.search) {
        store.search_content(&search)
    } else if let Some(category) = non_empty(query.category) {
        store.content_by_category(&category)
    } else if let Some(status) = non_empty(query.status) {
        match status.parse::<ContentStatus>() {
            Ok(status) => store.content_by_status(status),
            // No item can carry an unknown status.
            Err(_) => Vec::new(),
        }
    } else {
        store.collection::<Content>().all()
    };

    Ok(Json(items))
}

pub async fn content_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Content>, ServerError> {
    let store = state.store.lock().await;
    store
        .content_by_slug(&slug)
        .map(Json)
        .ok_or(ServerError::NotFound(Content::KIND))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub async fn category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, ServerError> {
    let store = state.store.lock().await;
    store
        .category_by_slug(&slug)
        .map(Json)
        .ok_or(ServerError::NotFound(Category::KIND))
}
