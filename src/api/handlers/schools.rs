//! School request handlers.

use crate::api::doc::SCHOOL_TAG;
use crate::api::dto::{
    PageParams, PagedResponse, ProblemDetail, SchoolDetail, SchoolPatchRequest, SchoolRequest,
    SchoolSummary,
};
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

/// Creates school routes, mounted under `/api/schools`.
pub fn school_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(search_schools, create_school))
        .routes(routes!(get_school, update_school, patch_school, delete_school))
}

/// GET /api/schools - Search schools by name
#[utoipa::path(
    get,
    path = "/",
    tag = SCHOOL_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Schools matching the query", body = PagedResponse<SchoolSummary>),
        (status = 400, description = "Invalid paging parameters", body = ProblemDetail)
    )
)]
async fn search_schools(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> AppResult<Json<PagedResponse<SchoolSummary>>> {
    let page = state
        .services
        .schools
        .search_schools(&params.query, params.page_request())
        .await?;
    Ok(Json(PagedResponse::from_page(page, SchoolSummary::from)))
}

/// POST /api/schools - Create a school
#[utoipa::path(
    post,
    path = "/",
    tag = SCHOOL_TAG,
    request_body = SchoolRequest,
    responses(
        (status = 201, description = "School created", body = SchoolDetail),
        (status = 400, description = "Validation failed", body = ProblemDetail),
        (status = 409, description = "A school with this name already exists", body = ProblemDetail)
    )
)]
async fn create_school(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SchoolRequest>,
) -> AppResult<(StatusCode, Json<SchoolDetail>)> {
    let school = state
        .services
        .schools
        .create_school(&req.name, req.capacity)
        .await?;
    Ok((StatusCode::CREATED, Json(SchoolDetail::from(school))))
}

/// GET /api/schools/{school_id} - Get a school
#[utoipa::path(
    get,
    path = "/{school_id}",
    tag = SCHOOL_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID")
    ),
    responses(
        (status = 200, description = "School found", body = SchoolDetail),
        (status = 404, description = "School not found", body = ProblemDetail)
    )
)]
async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SchoolDetail>> {
    let school = state.services.schools.get_school(id).await?;
    Ok(Json(SchoolDetail::from(school)))
}

/// PUT /api/schools/{school_id} - Replace name and capacity
#[utoipa::path(
    put,
    path = "/{school_id}",
    tag = SCHOOL_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID")
    ),
    request_body = SchoolRequest,
    responses(
        (status = 200, description = "School updated", body = SchoolDetail),
        (status = 400, description = "Validation failed or capacity below enrollment", body = ProblemDetail),
        (status = 404, description = "School not found", body = ProblemDetail),
        (status = 409, description = "Duplicate name or concurrent modification", body = ProblemDetail)
    )
)]
async fn update_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SchoolRequest>,
) -> AppResult<Json<SchoolDetail>> {
    let school = state.services.schools.update_school(id, req.into()).await?;
    Ok(Json(SchoolDetail::from(school)))
}

/// PATCH /api/schools/{school_id} - Change name and/or capacity
#[utoipa::path(
    patch,
    path = "/{school_id}",
    tag = SCHOOL_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID")
    ),
    request_body = SchoolPatchRequest,
    responses(
        (status = 200, description = "School updated", body = SchoolDetail),
        (status = 400, description = "Validation failed or capacity below enrollment", body = ProblemDetail),
        (status = 404, description = "School not found", body = ProblemDetail),
        (status = 409, description = "Duplicate name or concurrent modification", body = ProblemDetail)
    )
)]
async fn patch_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<SchoolPatchRequest>,
) -> AppResult<Json<SchoolDetail>> {
    let school = state.services.schools.update_school(id, req.into()).await?;
    Ok(Json(SchoolDetail::from(school)))
}

/// DELETE /api/schools/{school_id} - Delete a school and its students
#[utoipa::path(
    delete,
    path = "/{school_id}",
    tag = SCHOOL_TAG,
    params(
        ("school_id" = Uuid, Path, description = "School ID")
    ),
    responses(
        (status = 204, description = "School deleted"),
        (status = 404, description = "School not found", body = ProblemDetail)
    )
)]
async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.schools.delete_school(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
