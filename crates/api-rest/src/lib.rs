//! # API REST
//!
//! REST surface for clinica.
//!
//! Handles:
//! - HTTP endpoints with axum, one route module per entity family
//! - OpenAPI/Swagger documentation
//! - Translation of core failures into HTTP statuses
//!
//! No business logic lives here: every handler validates nothing and
//! decides nothing, it hands the request to a `clinica-core` service
//! and maps the outcome.

#![warn(rust_2018_idioms)]

mod routes;

use axum::http::StatusCode;
use axum::response::Json;
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::dto;
use api_shared::health::HealthRes;
use clinica_core::{ClinicError, Services};

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

/// Handler result: a JSON body or a mapped failure.
pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<dto::ErrorRes>)>;

/// Maps a core failure onto an HTTP status and a wire error body.
///
/// Validation problems are the caller's fault (400); missing keys are
/// 404; uniqueness and integrity refusals are conflicts (409); snapshot
/// failures are the only 500s.
pub(crate) fn error_response(err: ClinicError) -> (StatusCode, Json<dto::ErrorRes>) {
    let (status, kind) = match &err {
        ClinicError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
        ClinicError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        ClinicError::UniqueConflict { .. } => (StatusCode::CONFLICT, "unique_conflict"),
        ClinicError::IntegrityBlocked { .. } => (StatusCode::CONFLICT, "integrity_blocked"),
        ClinicError::Snapshot(_) | ClinicError::Serialization(_) => {
            tracing::error!("storage failure: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "storage")
        }
    };
    (
        status,
        Json(dto::ErrorRes {
            kind: kind.to_owned(),
            message: err.to_string(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        routes::catalog::list_specialties,
        routes::catalog::create_specialty,
        routes::catalog::get_specialty,
        routes::catalog::replace_specialty,
        routes::catalog::update_specialty,
        routes::catalog::delete_specialty,
        routes::catalog::list_medications,
        routes::catalog::create_medication,
        routes::catalog::get_medication,
        routes::catalog::replace_medication,
        routes::catalog::update_medication,
        routes::catalog::delete_medication,
        routes::registry::list_patients,
        routes::registry::create_patient,
        routes::registry::get_patient,
        routes::registry::replace_patient,
        routes::registry::update_patient,
        routes::registry::delete_patient,
        routes::registry::list_doctors,
        routes::registry::create_doctor,
        routes::registry::get_doctor,
        routes::registry::replace_doctor,
        routes::registry::update_doctor,
        routes::registry::delete_doctor,
        routes::coverage::list_insurance_policies,
        routes::coverage::create_insurance_policy,
        routes::coverage::get_insurance_policy,
        routes::coverage::replace_insurance_policy,
        routes::coverage::update_insurance_policy,
        routes::coverage::delete_insurance_policy,
        routes::coverage::list_schedule_slots,
        routes::coverage::create_schedule_slot,
        routes::coverage::get_schedule_slot,
        routes::coverage::replace_schedule_slot,
        routes::coverage::update_schedule_slot,
        routes::coverage::delete_schedule_slot,
        routes::encounters::list_appointments,
        routes::encounters::create_appointment,
        routes::encounters::get_appointment,
        routes::encounters::replace_appointment,
        routes::encounters::update_appointment,
        routes::encounters::delete_appointment,
        routes::encounters::list_consultations,
        routes::encounters::create_consultation,
        routes::encounters::get_consultation,
        routes::encounters::replace_consultation,
        routes::encounters::update_consultation,
        routes::encounters::delete_consultation,
        routes::care::list_treatments,
        routes::care::create_treatment,
        routes::care::get_treatment,
        routes::care::replace_treatment,
        routes::care::update_treatment,
        routes::care::delete_treatment,
        routes::care::list_prescriptions,
        routes::care::create_prescription,
        routes::care::get_prescription,
        routes::care::replace_prescription,
        routes::care::update_prescription,
        routes::care::delete_prescription,
        routes::care::list_history_entries,
        routes::care::create_history_entry,
        routes::care::get_history_entry,
        routes::care::replace_history_entry,
        routes::care::update_history_entry,
        routes::care::delete_history_entry,
    ),
    components(schemas(
        HealthRes,
        dto::ErrorRes,
        dto::DeleteRes,
        dto::DeletedRow,
        dto::ClearedLink,
        dto::SpecialtyRecord,
        dto::CreateSpecialtyReq,
        dto::UpdateSpecialtyReq,
        dto::MedicationRecord,
        dto::CreateMedicationReq,
        dto::UpdateMedicationReq,
        dto::PatientRecord,
        dto::CreatePatientReq,
        dto::UpdatePatientReq,
        dto::DoctorRecord,
        dto::CreateDoctorReq,
        dto::UpdateDoctorReq,
        dto::InsurancePolicyRecord,
        dto::CreateInsurancePolicyReq,
        dto::UpdateInsurancePolicyReq,
        dto::ScheduleSlotRecord,
        dto::CreateScheduleSlotReq,
        dto::UpdateScheduleSlotReq,
        dto::AppointmentRecord,
        dto::CreateAppointmentReq,
        dto::UpdateAppointmentReq,
        dto::ConsultationRecord,
        dto::CreateConsultationReq,
        dto::UpdateConsultationReq,
        dto::TreatmentRecord,
        dto::CreateTreatmentReq,
        dto::UpdateTreatmentReq,
        dto::PrescriptionRecord,
        dto::CreatePrescriptionReq,
        dto::UpdatePrescriptionReq,
        dto::HistoryEntryRecord,
        dto::CreateHistoryEntryReq,
        dto::UpdateHistoryEntryReq,
    ))
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
async fn health() -> Json<HealthRes> {
    Json(api_shared::HealthService::check_health())
}

/// Builds the full REST router over the given services.
pub fn router(services: Services) -> Router {
    let state = AppState { services };

    Router::new()
        .route("/health", axum::routing::get(health))
        .merge(routes::catalog::router())
        .merge(routes::registry::router())
        .merge(routes::coverage::router())
        .merge(routes::encounters::router())
        .merge(routes::care::router())
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
