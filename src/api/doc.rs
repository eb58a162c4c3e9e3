use utoipa::OpenApi;

pub const SCHOOL_TAG: &str = "Schools";
pub const SCHOOL_STUDENT_TAG: &str = "School Students";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "School Management API",
        version = "1.0.0",
        description = "Manage schools, their capacity and the students enrolled in them",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    components(
        schemas(
            crate::api::dto::ProblemDetail,
        )
    ),
    tags(
        (name = SCHOOL_TAG, description = "School management endpoints"),
        (name = SCHOOL_STUDENT_TAG, description = "Enrollment of students within a school"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
