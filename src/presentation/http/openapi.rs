use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
        paths(
            crate::presentation::http::auth::register,
            crate::presentation::http::auth::login,
            crate::presentation::http::users::profile,
            crate::presentation::http::notes::list_notes,
            crate::presentation::http::notes::create_note,
            crate::presentation::http::notes::get_note,
            crate::presentation::http::notes::update_note,
            crate::presentation::http::notes::delete_note,
            crate::presentation::http::health::health,
        ),
        components(schemas(
            crate::presentation::http::auth::RegisterRequest,
            crate::presentation::http::auth::LoginRequest,
            crate::presentation::http::auth::UserResponse,
            crate::presentation::http::auth::AuthResponse,
            crate::presentation::http::users::ProfileUser,
            crate::presentation::http::users::ProfileResponse,
            crate::presentation::http::notes::Note,
            crate::presentation::http::notes::NoteRequest,
            crate::presentation::http::notes::NoteResponse,
            crate::presentation::http::notes::NoteMessageResponse,
            crate::presentation::http::notes::NoteListResponse,
            crate::presentation::http::notes::MessageResponse,
            crate::presentation::http::error::ErrorBody,
            crate::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and login"),
            (name = "User", description = "Authenticated account"),
            (name = "Notes", description = "Per-user notes"),
            (name = "Health", description = "System health checks")
        )
    )]
pub struct ApiDoc;
