use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent, jwt_auth_middleware, AuditEvent, AuditOutcome,
    JwtAuth, JwtClaims, ValidatedJson,
};
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

/// OpenAPI documentation for the auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, TokenResponse, UserResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Staff authentication endpoints")
    )
)]
pub struct ApiDoc;

/// Application state for auth handlers
#[derive(Clone)]
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

/// Create the auth router
pub fn router<R: UserRepository + Clone + 'static>(state: AuthState<R>) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected)
        .with_state(state)
}

/// Register a new staff account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.register(input).await?;

    AuditEvent::new(
        Some(user.id.to_string()),
        "auth.register",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email/password, returning a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<TokenResponse>> {
    let user = match state
        .service
        .verify_credentials(&input.email, &input.password)
        .await
    {
        Ok(user) => user,
        Err(err) => {
            AuditEvent::new(None, "auth.login", None, AuditOutcome::Failure)
                .with_ip(extract_ip_from_headers(&headers))
                .with_user_agent(extract_user_agent(&headers))
                .log();
            return Err(err);
        }
    };

    let access_token = state
        .jwt_auth
        .create_access_token(&user.id.to_string(), &user.email)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    AuditEvent::new(
        Some(user.id.to_string()),
        "auth.login",
        Some(format!("user:{}", user.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// Get the account behind the presented token
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Extension(claims): Extension<JwtClaims>,
) -> UserResult<Json<UserResponse>> {
    // Tokens are issued with the numeric user id as the subject
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| UserError::Internal("Malformed token subject".to_string()))?;

    let user = state.service.get_user(user_id).await?;
    Ok(Json(user))
}
