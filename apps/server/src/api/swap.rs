use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use rwaswap_core::{CommandBuffer, TokenSelectionEvent};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{SelectionRequest, SelectionResponse},
};

/// Resolve a token selection into the widget commands it implies.
///
/// The commands are also applied to the supplied form state so callers see
/// the resulting form.
#[utoipa::path(
    post,
    path = "/api/v1/swap/selection",
    request_body = SelectionRequest,
    responses(
        (
            status = 200,
            description = "Commands in the order the widget must apply them",
            body = SelectionResponse
        ),
        (status = 400, description = "Malformed request", body = crate::error::ErrorBody)
    )
)]
pub async fn resolve_selection(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SelectionRequest>, JsonRejection>,
) -> ApiResult<Json<SelectionResponse>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let event = TokenSelectionEvent::new(request.role, request.token);
    let category = state.resolver.classifier().classify(&event.token);

    let buffer = CommandBuffer::new();
    state.resolver.dispatch(&event, Some(&buffer));
    let commands = buffer.into_commands();

    let mut form = request.state.unwrap_or_default();
    form.apply_all(&commands);

    Ok(Json(SelectionResponse {
        category,
        commands,
        state: form,
    }))
}
