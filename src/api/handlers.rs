use crate::api::AppState;
use crate::discovery::{DiscoveryRequest, PageLinkBuilder, PagedResource};
use crate::error::{AppError, Result};
use crate::harvest::CollectionSource;
use crate::models::*;
use crate::search::PersonHit;
use crate::state::NamedRepo;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use validator::Validate;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let stats = state.search.get_stats().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        indexed_documents: stats.total_documents,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub indexed_documents: u64,
}

/// Plain paged listing of every indexed person
pub async fn list_persons(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PagedResource<PersonHit>>> {
    let request = DiscoveryRequest::parse(&params, &state.limits)?;
    let page = state.search.find_all(request.pageable).await?;

    // Search parameters do not apply here, so links carry only the page
    let links = PageLinkBuilder::for_path(state.href("/persons"));
    Ok(Json(state.assembler.to_resource(page, &links)))
}

/// Faceted discovery search
pub async fn faceted_search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PagedResource<PersonHit>>> {
    let request = DiscoveryRequest::parse(&params, &state.limits)?;
    let page = state.search.search(&request.to_search_query()).await?;

    let links = PageLinkBuilder::new(state.href("/persons/search/faceted"), params);
    Ok(Json(state.assembler.to_resource(page, &links)))
}

/// Index a batch of persons
pub async fn index_persons(
    State(state): State<AppState>,
    Json(persons): Json<Vec<Person>>,
) -> Result<(StatusCode, Json<IndexResponse>)> {
    for person in &persons {
        person.validate()?;
    }

    let indexed = state.search.index_persons(&persons).await?;
    tracing::info!(count = indexed, "Persons indexed");

    Ok((StatusCode::CREATED, Json(IndexResponse { indexed })))
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub indexed: usize,
}

/// Remove a person from the index
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.search.delete_person(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_named<E: DefaultEntity>(repo: &dyn NamedRepo<E>, name: &str) -> Result<E> {
    repo.find_by_name(name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} '{}'", E::KIND, name)))
}

pub async fn list_themes(State(state): State<AppState>) -> Result<Json<Vec<Theme>>> {
    Ok(Json(state.repos.themes.find_all().await?))
}

pub async fn get_theme(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Theme>> {
    find_named(&*state.repos.themes, &name).await.map(Json)
}

pub async fn list_directory_views(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectoryView>>> {
    Ok(Json(state.repos.directory_views.find_all().await?))
}

pub async fn get_directory_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DirectoryView>> {
    find_named(&*state.repos.directory_views, &name).await.map(Json)
}

pub async fn list_discovery_views(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiscoveryView>>> {
    Ok(Json(state.repos.discovery_views.find_all().await?))
}

pub async fn get_discovery_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DiscoveryView>> {
    find_named(&*state.repos.discovery_views, &name).await.map(Json)
}

/// Every harvest source keyed by entity type
pub async fn list_harvest_sources(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, CollectionSource>> {
    Json(
        state
            .harvest
            .iter()
            .map(|(entity_type, source)| (entity_type.to_string(), source.clone()))
            .collect(),
    )
}

pub async fn get_harvest_source(
    State(state): State<AppState>,
    Path(entity_type): Path<String>,
) -> Result<Json<CollectionSource>> {
    state
        .harvest
        .get(&entity_type)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("harvest source '{}'", entity_type)))
}
