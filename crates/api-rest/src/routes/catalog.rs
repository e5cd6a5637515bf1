//! Routes for the catalog entities: specialties and medications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use api_shared::dto;

use crate::{error_response, ApiResult, AppState};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/specialties", get(list_specialties).post(create_specialty))
        .route(
            "/specialties/:id",
            get(get_specialty)
                .put(replace_specialty)
                .patch(update_specialty)
                .delete(delete_specialty),
        )
        .route("/medications", get(list_medications).post(create_medication))
        .route(
            "/medications/:id",
            get(get_medication)
                .put(replace_medication)
                .patch(update_medication)
                .delete(delete_medication),
        )
}

#[utoipa::path(
    get,
    path = "/specialties",
    params(dto::SpecialtyFilter),
    responses(
        (status = 200, description = "List of specialties", body = [dto::SpecialtyRecord])
    )
)]
/// Lists specialties, optionally filtered by a name search.
pub(crate) async fn list_specialties(
    State(state): State<AppState>,
    Query(filter): Query<dto::SpecialtyFilter>,
) -> Json<Vec<dto::SpecialtyRecord>> {
    Json(state.services.specialties.list(&filter))
}

#[utoipa::path(
    post,
    path = "/specialties",
    request_body = dto::CreateSpecialtyReq,
    responses(
        (status = 201, description = "Specialty created", body = dto::SpecialtyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_specialty(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateSpecialtyReq>,
) -> Result<(StatusCode, Json<dto::SpecialtyRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .specialties
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/specialties/{id}",
    responses(
        (status = 200, description = "Specialty", body = dto::SpecialtyRecord),
        (status = 404, description = "No such specialty", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_specialty(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::SpecialtyRecord> {
    state.services.specialties.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/specialties/{id}",
    request_body = dto::CreateSpecialtyReq,
    responses(
        (status = 200, description = "Specialty replaced", body = dto::SpecialtyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such specialty", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_specialty(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateSpecialtyReq>,
) -> ApiResult<dto::SpecialtyRecord> {
    state
        .services
        .specialties
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/specialties/{id}",
    request_body = dto::UpdateSpecialtyReq,
    responses(
        (status = 200, description = "Specialty updated", body = dto::SpecialtyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such specialty", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_specialty(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateSpecialtyReq>,
) -> ApiResult<dto::SpecialtyRecord> {
    state
        .services
        .specialties
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/specialties/{id}",
    responses(
        (status = 200, description = "Specialty deleted", body = dto::DeleteRes),
        (status = 404, description = "No such specialty", body = dto::ErrorRes),
        (status = 409, description = "Doctors still reference it", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_specialty(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.specialties.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/medications",
    params(dto::MedicationFilter),
    responses(
        (status = 200, description = "List of medications", body = [dto::MedicationRecord])
    )
)]
pub(crate) async fn list_medications(
    State(state): State<AppState>,
    Query(filter): Query<dto::MedicationFilter>,
) -> Json<Vec<dto::MedicationRecord>> {
    Json(state.services.medications.list(&filter))
}

#[utoipa::path(
    post,
    path = "/medications",
    request_body = dto::CreateMedicationReq,
    responses(
        (status = 201, description = "Medication created", body = dto::MedicationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_medication(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateMedicationReq>,
) -> Result<(StatusCode, Json<dto::MedicationRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .medications
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/medications/{id}",
    responses(
        (status = 200, description = "Medication", body = dto::MedicationRecord),
        (status = 404, description = "No such medication", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::MedicationRecord> {
    state.services.medications.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/medications/{id}",
    request_body = dto::CreateMedicationReq,
    responses(
        (status = 200, description = "Medication replaced", body = dto::MedicationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such medication", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_medication(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateMedicationReq>,
) -> ApiResult<dto::MedicationRecord> {
    state
        .services
        .medications
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/medications/{id}",
    request_body = dto::UpdateMedicationReq,
    responses(
        (status = 200, description = "Medication updated", body = dto::MedicationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such medication", body = dto::ErrorRes),
        (status = 409, description = "Name already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_medication(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateMedicationReq>,
) -> ApiResult<dto::MedicationRecord> {
    state
        .services
        .medications
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/medications/{id}",
    responses(
        (status = 200, description = "Medication deleted", body = dto::DeleteRes),
        (status = 404, description = "No such medication", body = dto::ErrorRes),
        (status = 409, description = "Prescriptions still reference it", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_medication(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.medications.delete(id).map(Json).map_err(error_response)
}
