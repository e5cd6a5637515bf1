//! Routes for appointments and consultations.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use api_shared::dto;

use crate::{error_response, ApiResult, AppState};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/:id",
            get(get_appointment)
                .put(replace_appointment)
                .patch(update_appointment)
                .delete(delete_appointment),
        )
        .route(
            "/consultations",
            get(list_consultations).post(create_consultation),
        )
        .route(
            "/consultations/:id",
            get(get_consultation)
                .put(replace_consultation)
                .patch(update_consultation)
                .delete(delete_consultation),
        )
}

#[utoipa::path(
    get,
    path = "/appointments",
    params(dto::AppointmentFilter),
    responses(
        (status = 200, description = "List of appointments", body = [dto::AppointmentRecord])
    )
)]
pub(crate) async fn list_appointments(
    State(state): State<AppState>,
    Query(filter): Query<dto::AppointmentFilter>,
) -> Json<Vec<dto::AppointmentRecord>> {
    Json(state.services.appointments.list(&filter))
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = dto::CreateAppointmentReq,
    responses(
        (status = 201, description = "Appointment created", body = dto::AppointmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Patient, doctor or consultation does not exist", body = dto::ErrorRes),
        (status = 409, description = "Consultation already linked to another appointment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateAppointmentReq>,
) -> Result<(StatusCode, Json<dto::AppointmentRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .appointments
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    responses(
        (status = 200, description = "Appointment", body = dto::AppointmentRecord),
        (status = 404, description = "No such appointment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::AppointmentRecord> {
    state.services.appointments.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/appointments/{id}",
    request_body = dto::CreateAppointmentReq,
    responses(
        (status = 200, description = "Appointment replaced; creation timestamp is preserved", body = dto::AppointmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such appointment or reference", body = dto::ErrorRes),
        (status = 409, description = "Consultation already linked to another appointment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_appointment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateAppointmentReq>,
) -> ApiResult<dto::AppointmentRecord> {
    state
        .services
        .appointments
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/appointments/{id}",
    request_body = dto::UpdateAppointmentReq,
    responses(
        (status = 200, description = "Appointment updated", body = dto::AppointmentRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such appointment or reference", body = dto::ErrorRes),
        (status = 409, description = "Consultation already linked to another appointment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateAppointmentReq>,
) -> ApiResult<dto::AppointmentRecord> {
    state
        .services
        .appointments
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    responses(
        (status = 200, description = "Appointment deleted", body = dto::DeleteRes),
        (status = 404, description = "No such appointment", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.appointments.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/consultations",
    params(dto::ConsultationFilter),
    responses(
        (status = 200, description = "List of consultations", body = [dto::ConsultationRecord])
    )
)]
pub(crate) async fn list_consultations(
    State(state): State<AppState>,
    Query(filter): Query<dto::ConsultationFilter>,
) -> Json<Vec<dto::ConsultationRecord>> {
    Json(state.services.consultations.list(&filter))
}

#[utoipa::path(
    post,
    path = "/consultations",
    request_body = dto::CreateConsultationReq,
    responses(
        (status = 201, description = "Consultation created", body = dto::ConsultationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Patient or doctor does not exist", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_consultation(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateConsultationReq>,
) -> Result<(StatusCode, Json<dto::ConsultationRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .consultations
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/consultations/{id}",
    responses(
        (status = 200, description = "Consultation", body = dto::ConsultationRecord),
        (status = 404, description = "No such consultation", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_consultation(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::ConsultationRecord> {
    state.services.consultations.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/consultations/{id}",
    request_body = dto::CreateConsultationReq,
    responses(
        (status = 200, description = "Consultation replaced", body = dto::ConsultationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such consultation or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_consultation(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateConsultationReq>,
) -> ApiResult<dto::ConsultationRecord> {
    state
        .services
        .consultations
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/consultations/{id}",
    request_body = dto::UpdateConsultationReq,
    responses(
        (status = 200, description = "Consultation updated", body = dto::ConsultationRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such consultation or reference", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_consultation(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateConsultationReq>,
) -> ApiResult<dto::ConsultationRecord> {
    state
        .services
        .consultations
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/consultations/{id}",
    responses(
        (status = 200, description = "Consultation deleted; treatments cascade, a linked appointment is unlinked", body = dto::DeleteRes),
        (status = 404, description = "No such consultation", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_consultation(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.consultations.delete(id).map(Json).map_err(error_response)
}
