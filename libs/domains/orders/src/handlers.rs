use axum::{
    extract::State,
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
use domain_catalog::CatalogRepository;
use domain_customers::CustomerRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CreateOrder, CreateOrderItem, CreatePayment, Order, OrderItem, OrderWithItems, Payment,
    UpdateOrder, UpdatePayment,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

const TAG: &str = "orders";

/// OpenAPI documentation for the orders API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_order,
        get_order,
        update_order,
        delete_order,
        create_payment,
        get_payment,
        update_payment,
        delete_payment,
    ),
    components(
        schemas(
            Order,
            OrderItem,
            OrderWithItems,
            CreateOrder,
            CreateOrderItem,
            UpdateOrder,
            Payment,
            CreatePayment,
            UpdatePayment
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Order and payment endpoints")
    )
)]
pub struct ApiDoc;

/// Create the orders router. Payment mutations require a valid bearer
/// token; order placement stays open for the storefront.
pub fn router<R, C, D>(service: OrderService<R, C, D>, jwt_auth: JwtAuth) -> Router
where
    R: OrderRepository + 'static,
    C: CatalogRepository + 'static,
    D: CustomerRepository + 'static,
{
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/payments", post(create_payment))
        .route("/payments/{id}", put(update_payment))
        .route("/payments/{id}", delete(delete_payment))
        .route_layer(middleware::from_fn_with_state(
            jwt_auth,
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/orders", post(create_order))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/payments/{id}", get(get_payment))
        .merge(protected)
        .with_state(shared_service)
}

/// Place a new order.
///
/// References are validated and lines are priced server-side before
/// anything is written; the order and its items are persisted atomically.
#[utoipa::path(
    post,
    path = "/orders",
    tag = TAG,
    request_body = CreateOrder,
    responses(
        (status = 201, description = "Order created with computed total", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<impl IntoResponse>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let order = service.create_order(input).await?;

    AuditEvent::new(
        None,
        "order.create",
        Some(format!("order:{}", order.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "total": order.total,
        "payment_method": order.payment_method,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order with its items
#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderWithItems),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<OrderWithItems>>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let order = service.get_order_with_items(id).await?;
    Ok(Json(order))
}

/// Update an order's customer, payment method, or status
#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrder,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateOrder>,
) -> OrderResult<Json<Order>>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let order = service.update_order(id, input).await?;
    Ok(Json(order))
}

/// Delete an order and its items
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_order<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    IdPath(id): IdPath,
) -> OrderResult<StatusCode>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    service.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record a payment against an order (marks the order completed)
#[utoipa::path(
    post,
    path = "/payments",
    tag = TAG,
    request_body = CreatePayment,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_payment<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreatePayment>,
) -> OrderResult<impl IntoResponse>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let payment = service.create_payment(input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "payment.create",
        Some(format!("payment:{}", payment.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "order_id": payment.order_id,
        "amount": payment.amount,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get a payment by ID
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_payment<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    IdPath(id): IdPath,
) -> OrderResult<Json<Payment>>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let payment = service.get_payment(id).await?;
    Ok(Json(payment))
}

/// Update a payment
#[utoipa::path(
    put,
    path = "/payments/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    request_body = UpdatePayment,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_payment<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdatePayment>,
) -> OrderResult<Json<Payment>>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    let payment = service.update_payment(id, input).await?;
    Ok(Json(payment))
}

/// Delete a payment
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Payment deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_payment<R, C, D>(
    State(service): State<Arc<OrderService<R, C, D>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> OrderResult<StatusCode>
where
    R: OrderRepository,
    C: CatalogRepository,
    D: CustomerRepository,
{
    service.delete_payment(id).await?;

    AuditEvent::new(
        Some(claims.sub),
        "payment.delete",
        Some(format!("payment:{id}")),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}
