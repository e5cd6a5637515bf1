//! Routes for treatments, prescriptions and clinical history entries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use api_shared::dto;

use crate::{error_response, ApiResult, AppState};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/treatments", get(list_treatments).post(create_treatment))
        .route(
            "/treatments/:id",
            get(get_treatment)
                .put(replace_treatment)
                .patch(update_treatment)
                .delete(delete_treatment),
        )
        .route(
            "/prescriptions",
            get(list_prescriptions).post(create_prescription),
        )
        .route(
            "/prescriptions/:id",
            get(get_prescription)
                .put(replace_prescription)
                .patch(update_prescription)
                .delete(delete_prescription),
        )
        .route(
            "/history-entries",
            get(list_history_entries).post(create_history_entry),
        )
        .route(
            "/history-entries/:id",
            get(get_history_entry)
                .put(replace_history_entry)
                .patch(update_history_entry)
                .delete(delete_history_entry),
        )
}

#[utoipa::path(
    get,
    path = "/treatments",
    params(dto::TreatmentFilter),
    responses(
        (status = 200, description = "List of treatments", body = [dto::TreatmentRecord])
    )
)]
pub(crate) async fn list_treatments(
    State(state): State<AppState>,
    Query(filter): Query<dto::TreatmentFilter>,
) -> Json<Vec<dto::TreatmentRecord>> {
    Json(state.services.treatments.list(&filter))
}

#[utoipa::path(
    post,
    path = "/treatments",
    request_body = dto::CreateTreatmentReq,
    responses(
        (status = 201, description = "Treatment created", body = dto::TreatmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Consultation does not exist", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_treatment(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateTreatmentReq>,
) -> Result<(StatusCode, Json<dto::TreatmentRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .treatments
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/treatments/{id}",
    responses(
        (status = 200, description = "Treatment", body = dto::TreatmentRecord),
        (status = 404, description = "No such treatment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_treatment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::TreatmentRecord> {
    state.services.treatments.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/treatments/{id}",
    request_body = dto::CreateTreatmentReq,
    responses(
        (status = 200, description = "Treatment replaced", body = dto::TreatmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such treatment or consultation", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_treatment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateTreatmentReq>,
) -> ApiResult<dto::TreatmentRecord> {
    state
        .services
        .treatments
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/treatments/{id}",
    request_body = dto::UpdateTreatmentReq,
    responses(
        (status = 200, description = "Treatment updated", body = dto::TreatmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such treatment or consultation", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_treatment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateTreatmentReq>,
) -> ApiResult<dto::TreatmentRecord> {
    state
        .services
        .treatments
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/treatments/{id}",
    responses(
        (status = 200, description = "Treatment deleted; its prescriptions cascade", body = dto::DeleteRes),
        (status = 404, description = "No such treatment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_treatment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.treatments.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/prescriptions",
    params(dto::PrescriptionFilter),
    responses(
        (status = 200, description = "List of prescriptions", body = [dto::PrescriptionRecord])
    )
)]
pub(crate) async fn list_prescriptions(
    State(state): State<AppState>,
    Query(filter): Query<dto::PrescriptionFilter>,
) -> Json<Vec<dto::PrescriptionRecord>> {
    Json(state.services.prescriptions.list(&filter))
}

#[utoipa::path(
    post,
    path = "/prescriptions",
    request_body = dto::CreatePrescriptionReq,
    responses(
        (status = 201, description = "Prescription created", body = dto::PrescriptionRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Treatment or medication does not exist", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_prescription(
    State(state): State<AppState>,
    Json(req): Json<dto::CreatePrescriptionReq>,
) -> Result<(StatusCode, Json<dto::PrescriptionRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .prescriptions
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription", body = dto::PrescriptionRecord),
        (status = 404, description = "No such prescription", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_prescription(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::PrescriptionRecord> {
    state.services.prescriptions.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/prescriptions/{id}",
    request_body = dto::CreatePrescriptionReq,
    responses(
        (status = 200, description = "Prescription replaced", body = dto::PrescriptionRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such prescription or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_prescription(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreatePrescriptionReq>,
) -> ApiResult<dto::PrescriptionRecord> {
    state
        .services
        .prescriptions
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/prescriptions/{id}",
    request_body = dto::UpdatePrescriptionReq,
    responses(
        (status = 200, description = "Prescription updated", body = dto::PrescriptionRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such prescription or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_prescription(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdatePrescriptionReq>,
) -> ApiResult<dto::PrescriptionRecord> {
    state
        .services
        .prescriptions
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/prescriptions/{id}",
    responses(
        (status = 200, description = "Prescription deleted", body = dto::DeleteRes),
        (status = 404, description = "No such prescription", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_prescription(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.prescriptions.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/history-entries",
    params(dto::HistoryEntryFilter),
    responses(
        (status = 200, description = "List of history entries", body = [dto::HistoryEntryRecord])
    )
)]
pub(crate) async fn list_history_entries(
    State(state): State<AppState>,
    Query(filter): Query<dto::HistoryEntryFilter>,
) -> Json<Vec<dto::HistoryEntryRecord>> {
    Json(state.services.history.list(&filter))
}

#[utoipa::path(
    post,
    path = "/history-entries",
    request_body = dto::CreateHistoryEntryReq,
    responses(
        (status = 201, description = "History entry created", body = dto::HistoryEntryRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Patient or doctor does not exist", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_history_entry(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateHistoryEntryReq>,
) -> Result<(StatusCode, Json<dto::HistoryEntryRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .history
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/history-entries/{id}",
    responses(
        (status = 200, description = "History entry", body = dto::HistoryEntryRecord),
        (status = 404, description = "No such entry", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_history_entry(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::HistoryEntryRecord> {
    state.services.history.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/history-entries/{id}",
    request_body = dto::CreateHistoryEntryReq,
    responses(
        (status = 200, description = "History entry replaced", body = dto::HistoryEntryRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such entry or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_history_entry(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateHistoryEntryReq>,
) -> ApiResult<dto::HistoryEntryRecord> {
    state
        .services
        .history
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/history-entries/{id}",
    request_body = dto::UpdateHistoryEntryReq,
    responses(
        (status = 200, description = "History entry updated", body = dto::HistoryEntryRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such entry or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_history_entry(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateHistoryEntryReq>,
) -> ApiResult<dto::HistoryEntryRecord> {
    state
        .services
        .history
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/history-entries/{id}",
    responses(
        (status = 200, description = "History entry deleted", body = dto::DeleteRes),
        (status = 404, description = "No such entry", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_history_entry(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.history.delete(id).map(Json).map_err(error_response)
}
