//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog::filter::{filter, FacetSelection};
use crate::catalog::FacetVocabulary;
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::recommend::ranker::{rank, Recommendation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// User text: extracted resume text or typed skills. When both exist the
    /// presentation layer sends the resume text.
    pub text: String,
    #[serde(default)]
    pub facets: FacetSelection,
    /// Overrides the configured default when present.
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<Recommendation>,
    /// Size of the filtered subset the ranking ran over.
    pub considered: usize,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub chars: usize,
}

#[derive(Debug, Serialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize)]
pub struct FacetsResponse {
    pub facets: FacetVocabulary,
    pub salary_range: Option<SalaryRange>,
    pub total_jobs: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommend
///
/// Filter the catalog by the requested facets, then rank the remainder
/// against the user text. An empty subset surfaces as `NO_MATCH`, not a 500.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let subset = filter(state.catalog.jobs(), &request.facets)?;
    let considered = subset.len();
    let top_k = request.top_k.unwrap_or(state.config.top_k);

    let recommendations = rank(state.embedder.as_ref(), &request.text, &subset, top_k).await?;

    Ok(Json(RecommendResponse {
        recommendations,
        considered,
    }))
}

/// POST /api/v1/resume/extract
///
/// Multipart upload, field `file`: raw PDF bytes. Returns the concatenated
/// page text so the presentation layer can echo it back to the user before
/// recommending against it.
pub async fn handle_extract_resume(
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        let text = extract_text(&bytes)?;
        let chars = text.chars().count();

        return Ok(Json(ExtractResponse { text, chars }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// GET /api/v1/catalog/facets
///
/// The discovered facet vocabularies and salary range, for populating the
/// presentation layer's selectors and slider.
pub async fn handle_catalog_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    Json(FacetsResponse {
        facets: state.catalog.facets().clone(),
        salary_range: state
            .catalog
            .salary_range()
            .map(|(min, max)| SalaryRange { min, max }),
        total_jobs: state.catalog.len(),
    })
}
