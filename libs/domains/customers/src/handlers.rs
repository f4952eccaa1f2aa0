use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
    extract_ip_from_headers, extract_user_agent, jwt_auth_middleware, AuditEvent, AuditOutcome,
    IdPath, JwtAuth, JwtClaims, ValidatedJson,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CustomerResult;
use crate::models::{CreateCustomer, Customer, CustomerFilter, UpdateCustomer};
use crate::repository::CustomerRepository;
use crate::service::CustomerService;

const TAG: &str = "customers";

/// OpenAPI documentation for the customers API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_customer,
        list_customers,
        get_customer,
        update_customer,
        delete_customer,
    ),
    components(
        schemas(Customer, CreateCustomer, UpdateCustomer),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Customer directory endpoints")
    )
)]
pub struct ApiDoc;

/// Create the customer router. Mutations require a valid bearer token.
pub fn router<R: CustomerRepository + 'static>(
    service: CustomerService<R>,
    jwt_auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/{id}", put(update_customer))
        .route("/customers/{id}", delete(delete_customer))
        .route_layer(middleware::from_fn_with_state(
            jwt_auth,
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer))
        .merge(protected)
        .with_state(shared_service)
}

/// Create a new customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = TAG,
    request_body = CreateCustomer,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> CustomerResult<impl IntoResponse> {
    let customer = service.create_customer(input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "customer.create",
        Some(format!("customer:{}", customer.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({ "customer_name": customer.name }))
    .log();

    Ok((StatusCode::CREATED, Json(customer)))
}

/// List customers with optional filters
#[utoipa::path(
    get,
    path = "/customers",
    tag = TAG,
    params(CustomerFilter),
    responses(
        (status = 200, description = "List of customers", body = Vec<Customer>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_customers<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    Query(filter): Query<CustomerFilter>,
) -> CustomerResult<Json<Vec<Customer>>> {
    let customers = service.list_customers(filter).await?;
    Ok(Json(customers))
}

/// Get a customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
) -> CustomerResult<Json<Customer>> {
    let customer = service.get_customer(id).await?;
    Ok(Json(customer))
}

/// Update a customer
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    request_body = UpdateCustomer,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCustomer>,
) -> CustomerResult<Json<Customer>> {
    let customer = service.update_customer(id, input).await?;
    Ok(Json(customer))
}

/// Delete a customer
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Customer ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_customer<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CustomerResult<StatusCode> {
    service.delete_customer(id).await?;

    AuditEvent::new(
        Some(claims.sub),
        "customer.delete",
        Some(format!("customer:{id}")),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
