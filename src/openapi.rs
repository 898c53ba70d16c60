use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models::{
    ClassifyImageRequest, Complaint, ComplaintListResponse, ComplaintStatus, Feedback,
    FeedbackRequest, RegisterUserRequest, Severity, SubmitComplaintRequest, UpdateStatusRequest,
    UserProfile, UserRole, WasteAnalysis, WasteType,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::analysis::classify_image,
        crate::handlers::complaints::submit_complaint,
        crate::handlers::complaints::list_complaints,
        crate::handlers::complaints::get_complaint,
        crate::handlers::complaints::update_status,
        crate::handlers::complaints::submit_feedback,
        crate::handlers::complaints::list_user_complaints,
        crate::handlers::users::register_user,
        crate::handlers::users::get_user,
    ),
    components(
        schemas(
            ClassifyImageRequest,
            Complaint,
            ComplaintListResponse,
            ComplaintStatus,
            Feedback,
            FeedbackRequest,
            RegisterUserRequest,
            Severity,
            SubmitComplaintRequest,
            UpdateStatusRequest,
            UserProfile,
            UserRole,
            WasteAnalysis,
            WasteType,
        )
    ),
    tags(
        (name = "complaints-service", description = "Citizen waste complaints: AI-assisted intake, workflow and feedback")
    )
)]
pub struct ApiDoc;

pub fn routes() -> SwaggerUi {
    let openapi = ApiDoc::openapi();
    SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", openapi)
}
