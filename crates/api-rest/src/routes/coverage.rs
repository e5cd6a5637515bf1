//! Routes for insurance policies and doctor schedule slots.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use api_shared::dto;

use crate::{error_response, ApiResult, AppState};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/insurance-policies",
            get(list_insurance_policies).post(create_insurance_policy),
        )
        .route(
            "/insurance-policies/:id",
            get(get_insurance_policy)
                .put(replace_insurance_policy)
                .patch(update_insurance_policy)
                .delete(delete_insurance_policy),
        )
        .route(
            "/schedule-slots",
            get(list_schedule_slots).post(create_schedule_slot),
        )
        .route(
            "/schedule-slots/:id",
            get(get_schedule_slot)
                .put(replace_schedule_slot)
                .patch(update_schedule_slot)
                .delete(delete_schedule_slot),
        )
}

#[utoipa::path(
    get,
    path = "/insurance-policies",
    params(dto::InsurancePolicyFilter),
    responses(
        (status = 200, description = "List of policies", body = [dto::InsurancePolicyRecord])
    )
)]
pub(crate) async fn list_insurance_policies(
    State(state): State<AppState>,
    Query(filter): Query<dto::InsurancePolicyFilter>,
) -> Json<Vec<dto::InsurancePolicyRecord>> {
    Json(state.services.insurance.list(&filter))
}

#[utoipa::path(
    post,
    path = "/insurance-policies",
    request_body = dto::CreateInsurancePolicyReq,
    responses(
        (status = 201, description = "Policy created", body = dto::InsurancePolicyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Covered patient does not exist", body = dto::ErrorRes),
        (status = 409, description = "Policy number already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_insurance_policy(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateInsurancePolicyReq>,
) -> Result<(StatusCode, Json<dto::InsurancePolicyRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .insurance
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/insurance-policies/{id}",
    responses(
        (status = 200, description = "Policy", body = dto::InsurancePolicyRecord),
        (status = 404, description = "No such policy", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_insurance_policy(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::InsurancePolicyRecord> {
    state.services.insurance.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/insurance-policies/{id}",
    request_body = dto::CreateInsurancePolicyReq,
    responses(
        (status = 200, description = "Policy replaced", body = dto::InsurancePolicyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such policy or patient", body = dto::ErrorRes),
        (status = 409, description = "Policy number already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_insurance_policy(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateInsurancePolicyReq>,
) -> ApiResult<dto::InsurancePolicyRecord> {
    state
        .services
        .insurance
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/insurance-policies/{id}",
    request_body = dto::UpdateInsurancePolicyReq,
    responses(
        (status = 200, description = "Policy updated", body = dto::InsurancePolicyRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such policy or patient", body = dto::ErrorRes),
        (status = 409, description = "Policy number already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_insurance_policy(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateInsurancePolicyReq>,
) -> ApiResult<dto::InsurancePolicyRecord> {
    state
        .services
        .insurance
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/insurance-policies/{id}",
    responses(
        (status = 200, description = "Policy deleted", body = dto::DeleteRes),
        (status = 404, description = "No such policy", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_insurance_policy(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.insurance.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/schedule-slots",
    params(dto::ScheduleSlotFilter),
    responses(
        (status = 200, description = "List of schedule slots", body = [dto::ScheduleSlotRecord])
    )
)]
pub(crate) async fn list_schedule_slots(
    State(state): State<AppState>,
    Query(filter): Query<dto::ScheduleSlotFilter>,
) -> Json<Vec<dto::ScheduleSlotRecord>> {
    Json(state.services.schedules.list(&filter))
}

#[utoipa::path(
    post,
    path = "/schedule-slots",
    request_body = dto::CreateScheduleSlotReq,
    responses(
        (status = 201, description = "Slot created", body = dto::ScheduleSlotRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Doctor does not exist", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_schedule_slot(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateScheduleSlotReq>,
) -> Result<(StatusCode, Json<dto::ScheduleSlotRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .schedules
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/schedule-slots/{id}",
    responses(
        (status = 200, description = "Schedule slot", body = dto::ScheduleSlotRecord),
        (status = 404, description = "No such slot", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_schedule_slot(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::ScheduleSlotRecord> {
    state.services.schedules.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/schedule-slots/{id}",
    request_body = dto::CreateScheduleSlotReq,
    responses(
        (status = 200, description = "Slot replaced", body = dto::ScheduleSlotRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such slot or doctor", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_schedule_slot(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateScheduleSlotReq>,
) -> ApiResult<dto::ScheduleSlotRecord> {
    state
        .services
        .schedules
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/schedule-slots/{id}",
    request_body = dto::UpdateScheduleSlotReq,
    responses(
        (status = 200, description = "Slot updated", body = dto::ScheduleSlotRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such slot or doctor", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_schedule_slot(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateScheduleSlotReq>,
) -> ApiResult<dto::ScheduleSlotRecord> {
    state
        .services
        .schedules
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/schedule-slots/{id}",
    responses(
        (status = 200, description = "Slot deleted", body = dto::DeleteRes),
        (status = 404, description = "No such slot", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_schedule_slot(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.schedules.delete(id).map(Json).map_err(error_response)
}
