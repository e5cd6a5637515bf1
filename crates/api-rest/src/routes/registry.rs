//! Routes for the people registry: patients and doctors.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;

use api_shared::dto;

use crate::{error_response, ApiResult, AppState};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient)
                .put(replace_patient)
                .patch(update_patient)
                .delete(delete_patient),
        )
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/:id",
            get(get_doctor)
                .put(replace_doctor)
                .patch(update_doctor)
                .delete(delete_doctor),
        )
}

#[utoipa::path(
    get,
    path = "/patients",
    params(dto::PatientFilter),
    responses(
        (status = 200, description = "List of patients", body = [dto::PatientRecord])
    )
)]
/// Lists patients; `search` matches national id and names.
pub(crate) async fn list_patients(
    State(state): State<AppState>,
    Query(filter): Query<dto::PatientFilter>,
) -> Json<Vec<dto::PatientRecord>> {
    Json(state.services.patients.list(&filter))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = dto::CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = dto::PatientRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<dto::CreatePatientReq>,
) -> Result<(StatusCode, Json<dto::PatientRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .patients
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/patients/{id}",
    responses(
        (status = 200, description = "Patient", body = dto::PatientRecord),
        (status = 404, description = "No such patient", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::PatientRecord> {
    state.services.patients.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/patients/{id}",
    request_body = dto::CreatePatientReq,
    responses(
        (status = 200, description = "Patient replaced", body = dto::PatientRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such patient", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_patient(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreatePatientReq>,
) -> ApiResult<dto::PatientRecord> {
    state
        .services
        .patients
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/patients/{id}",
    request_body = dto::UpdatePatientReq,
    responses(
        (status = 200, description = "Patient updated", body = dto::PatientRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such patient", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdatePatientReq>,
) -> ApiResult<dto::PatientRecord> {
    state
        .services
        .patients
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/patients/{id}",
    responses(
        (status = 200, description = "Patient deleted; policies and history entries go with it", body = dto::DeleteRes),
        (status = 404, description = "No such patient", body = dto::ErrorRes),
        (status = 409, description = "Appointments or consultations still reference the patient", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.patients.delete(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/doctors",
    params(dto::DoctorFilter),
    responses(
        (status = 200, description = "List of doctors", body = [dto::DoctorRecord])
    )
)]
pub(crate) async fn list_doctors(
    State(state): State<AppState>,
    Query(filter): Query<dto::DoctorFilter>,
) -> Json<Vec<dto::DoctorRecord>> {
    Json(state.services.doctors.list(&filter))
}

#[utoipa::path(
    post,
    path = "/doctors",
    request_body = dto::CreateDoctorReq,
    responses(
        (status = 201, description = "Doctor created", body = dto::DoctorRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "Referenced specialty does not exist", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn create_doctor(
    State(state): State<AppState>,
    Json(req): Json<dto::CreateDoctorReq>,
) -> Result<(StatusCode, Json<dto::DoctorRecord>), (StatusCode, Json<dto::ErrorRes>)> {
    state
        .services
        .doctors
        .create(req)
        .map(|record| (StatusCode::CREATED, Json(record)))
        .map_err(error_response)
}

#[utoipa::path(
    get,
    path = "/doctors/{id}",
    responses(
        (status = 200, description = "Doctor", body = dto::DoctorRecord),
        (status = 404, description = "No such doctor", body = dto::ErrorRes)
    )
)]
pub(crate) async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DoctorRecord> {
    state.services.doctors.get(id).map(Json).map_err(error_response)
}

#[utoipa::path(
    put,
    path = "/doctors/{id}",
    request_body = dto::CreateDoctorReq,
    responses(
        (status = 200, description = "Doctor replaced", body = dto::DoctorRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such doctor or specialty", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn replace_doctor(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::CreateDoctorReq>,
) -> ApiResult<dto::DoctorRecord> {
    state
        .services
        .doctors
        .replace(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    patch,
    path = "/doctors/{id}",
    request_body = dto::UpdateDoctorReq,
    responses(
        (status = 200, description = "Doctor updated", body = dto::DoctorRecord),
        (status = 400, description = "Validation failure", body = dto::ErrorRes),
        (status = 404, description = "No such doctor or specialty", body = dto::ErrorRes),
        (status = 409, description = "National id or email already taken", body = dto::ErrorRes)
    )
)]
pub(crate) async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
    Json(req): Json<dto::UpdateDoctorReq>,
) -> ApiResult<dto::DoctorRecord> {
    state
        .services
        .doctors
        .update(id, req)
        .map(Json)
        .map_err(error_response)
}

#[utoipa::path(
    delete,
    path = "/doctors/{id}",
    responses(
        (status = 200, description = "Doctor deleted; schedule slots go with it, history references are cleared", body = dto::DeleteRes),
        (status = 404, description = "No such doctor", body = dto::ErrorRes),
        (status = 409, description = "Appointments or consultations still reference the doctor", body = dto::ErrorRes)
    )
)]
pub(crate) async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<dto::RecordId>,
) -> ApiResult<dto::DeleteRes> {
    state.services.doctors.delete(id).map(Json).map_err(error_response)
}
