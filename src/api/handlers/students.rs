//! Student handlers nested under a school.

use crate::api::doc::SCHOOL_STUDENT_TAG;
use crate::api::dto::{PageParams, PagedResponse, ProblemDetail, StudentRequest, StudentResponse};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

/// Creates student routes, mounted under `/api/schools/{school_id}/students`.
pub fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(search_students, enroll_student))
        .routes(routes!(get_student, update_student, delete_student))
}

#[utoipa::path(
    get,
    path = "/",
    tag = SCHOOL_STUDENT_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        PageParams
    ),
    responses(
        (status = 200, description = "Students of the school matching the query", body = PagedResponse<StudentResponse>),
        (status = 404, description = "School not found", body = ProblemDetail)
    )
)]
async fn search_students(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<PagedResponse<StudentResponse>>> {
    let page = state
        .services
        .students
        .search_students(school_id, &params.query, params.page_request())
        .await?;
    Ok(Json(PagedResponse::from_page(page, StudentResponse::from)))
}

/// Enrolls a new student if the school has room.
#[utoipa::path(
    post,
    path = "/",
    tag = SCHOOL_STUDENT_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID")
    ),
    request_body = StudentRequest,
    responses(
        (status = 201, description = "Student enrolled", body = StudentResponse),
        (status = 400, description = "Validation failed", body = ProblemDetail),
        (status = 404, description = "School not found", body = ProblemDetail),
        (status = 409, description = "School is at maximum capacity", body = ProblemDetail)
    )
)]
async fn enroll_student(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<StudentRequest>,
) -> AppResult<(StatusCode, Json<StudentResponse>)> {
    let student = state
        .services
        .students
        .enroll_student(school_id, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

#[utoipa::path(
    get,
    path = "/{student_id}",
    tag = SCHOOL_STUDENT_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = StudentResponse),
        (status = 404, description = "Student not found in school", body = ProblemDetail)
    )
)]
async fn get_student(
    State(state): State<AppState>,
    Path((school_id, student_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<StudentResponse>> {
    let student = state
        .services
        .students
        .get_student(school_id, student_id)
        .await?;
    Ok(Json(StudentResponse::from(student)))
}

#[utoipa::path(
    put,
    path = "/{student_id}",
    tag = SCHOOL_STUDENT_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student renamed", body = StudentResponse),
        (status = 400, description = "Validation failed", body = ProblemDetail),
        (status = 404, description = "Student not found in school", body = ProblemDetail),
        (status = 409, description = "Concurrent modification", body = ProblemDetail)
    )
)]
async fn update_student(
    State(state): State<AppState>,
    Path((school_id, student_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(req): ValidatedJson<StudentRequest>,
) -> AppResult<Json<StudentResponse>> {
    let student = state
        .services
        .students
        .update_student(school_id, student_id, &req.name)
        .await?;
    Ok(Json(StudentResponse::from(student)))
}

#[utoipa::path(
    delete,
    path = "/{student_id}",
    tag = SCHOOL_STUDENT_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("student_id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student removed"),
        (status = 404, description = "Student not found in school", body = ProblemDetail)
    )
)]
async fn delete_student(
    State(state): State<AppState>,
    Path((school_id, student_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .services
        .students
        .delete_student(school_id, student_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
