use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use engine::{Catalog, FieldType, SemanticTag};
use serde::Serialize;
use std::sync::Arc;

/// One stored template as the catalog sees it
#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: String,
    pub field_count: usize,
    pub fields: Vec<FieldSummary>,
}

/// One compiled field requirement
#[derive(Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub value_type: FieldType,
    pub semantic: SemanticTag,
}

/// Response for the template listing
#[derive(Debug, Serialize)]
pub struct ListTemplatesResponse {
    pub count: usize,
    pub templates: Vec<TemplateSummary>,
}

/// Response for the seed endpoint
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub status: String,
    pub templates: usize,
}

/// List stored templates in catalog rank order.
///
/// Templates are shown compiled: each field carries the structural type
/// and semantic tag the validator will actually enforce. Unusable
/// documents are absent here for the same reason they never match.
pub async fn list_templates(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let stored = state.store.list()?;
    let catalog = Catalog::load(&stored);

    let templates: Vec<TemplateSummary> = catalog
        .validators()
        .iter()
        .map(|validator| TemplateSummary {
            name: validator.name().to_string(),
            field_count: validator.field_count(),
            fields: validator
                .fields()
                .iter()
                .map(|spec| FieldSummary {
                    name: spec.name.clone(),
                    value_type: spec.value_type,
                    semantic: spec.semantic,
                })
                .collect(),
        })
        .collect();

    Ok(Json(ListTemplatesResponse {
        count: templates.len(),
        templates,
    }))
}

/// Seed the built-in mock templates.
///
/// Documents are keyed by name, so calling this repeatedly upserts the
/// same five templates.
pub async fn seed_templates(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let inserted = store::mock::seed_templates(&state.store)?;

    tracing::info!(templates = inserted, "mock_templates_seeded");

    Ok(Json(SeedResponse {
        status: "created".to_string(),
        templates: inserted,
    }))
}
