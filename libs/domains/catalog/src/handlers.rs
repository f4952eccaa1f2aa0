use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
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

use crate::error::CatalogResult;
use crate::models::{
    Category, CreateMenu, CreateMenuAddon, Menu, MenuAddon, MenuFilter, UpdateCategory,
    UpdateMenu, UpdateMenuAddon,
};
use crate::repository::CatalogRepository;
use crate::service::CatalogService;

const TAG: &str = "catalog";

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        update_category,
        delete_category,
        list_menus,
        create_menu,
        get_menu,
        update_menu,
        delete_menu,
        list_addons,
        create_addon,
        get_addon,
        update_addon,
        delete_addon,
    ),
    components(
        schemas(
            Category,
            Menu,
            MenuAddon,
            UpdateCategory,
            CreateMenu,
            UpdateMenu,
            CreateMenuAddon,
            UpdateMenuAddon
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Menu catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the catalog router (categories, menus, add-ons).
///
/// Menu mutations require a valid bearer token; read paths and the
/// category/add-on maintenance endpoints are public.
pub fn router<R: CatalogRepository + 'static>(
    service: CatalogService<R>,
    jwt_auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let protected = Router::new()
        .route("/menus", post(create_menu))
        .route("/menus/{id}", put(update_menu).delete(delete_menu))
        .route_layer(middleware::from_fn_with_state(
            jwt_auth,
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/categories", get(list_categories))
        .route(
            "/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/menus", get(list_menus))
        .route("/menus/{id}", get(get_menu))
        .route("/menus/{id}/addons", get(list_addons).post(create_addon))
        .route(
            "/addons/{id}",
            get(get_addon).put(update_addon).delete(delete_addon),
        )
        .merge(protected)
        .with_state(shared_service)
}

/// List all categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = TAG,
    responses(
        (status = 200, description = "List of categories", body = Vec<Category>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
) -> CatalogResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List menu items with optional filters
#[utoipa::path(
    get,
    path = "/menus",
    tag = TAG,
    params(MenuFilter),
    responses(
        (status = 200, description = "List of menu items", body = Vec<Menu>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_menus<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Query(filter): Query<MenuFilter>,
) -> CatalogResult<Json<Vec<Menu>>> {
    let menus = service.list_menus(filter).await?;
    Ok(Json(menus))
}

/// Create a new menu item
#[utoipa::path(
    post,
    path = "/menus",
    tag = TAG,
    request_body = CreateMenu,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Menu created", body = Menu),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_menu<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateMenu>,
) -> CatalogResult<impl IntoResponse> {
    let menu = service.create_menu(input).await?;

    AuditEvent::new(
        Some(claims.sub),
        "menu.create",
        Some(format!("menu:{}", menu.id)),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .with_details(json!({
        "menu_name": menu.name,
        "price": menu.price,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(menu)))
}

/// Get a menu item by ID
#[utoipa::path(
    get,
    path = "/menus/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "Menu found", body = Menu),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_menu<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<Menu>> {
    let menu = service.get_menu(id).await?;
    Ok(Json(menu))
}

/// Update a menu item
#[utoipa::path(
    put,
    path = "/menus/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    request_body = UpdateMenu,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu updated", body = Menu),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_menu<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMenu>,
) -> CatalogResult<Json<Menu>> {
    let menu = service.update_menu(id, input).await?;
    Ok(Json(menu))
}

/// Delete a menu item
#[utoipa::path(
    delete,
    path = "/menus/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_menu<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    Extension(claims): Extension<JwtClaims>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_menu(id).await?;

    AuditEvent::new(
        Some(claims.sub),
        "menu.delete",
        Some(format!("menu:{id}")),
        AuditOutcome::Success,
    )
    .with_ip(extract_ip_from_headers(&headers))
    .with_user_agent(extract_user_agent(&headers))
    .log();

    Ok(StatusCode::NO_CONTENT)
}

/// List the add-ons of a menu item
#[utoipa::path(
    get,
    path = "/menus/{id}/addons",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    responses(
        (status = 200, description = "List of add-ons", body = Vec<MenuAddon>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_addons<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<Vec<MenuAddon>>> {
    let addons = service.list_addons(id).await?;
    Ok(Json(addons))
}

/// Create an add-on under a menu item
#[utoipa::path(
    post,
    path = "/menus/{id}/addons",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Menu ID")
    ),
    request_body = CreateMenuAddon,
    responses(
        (status = 201, description = "Add-on created", body = MenuAddon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_addon<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateMenuAddon>,
) -> CatalogResult<impl IntoResponse> {
    let addon = service.create_addon(id, input).await?;
    Ok((StatusCode::CREATED, Json(addon)))
}

/// Get an add-on by ID
#[utoipa::path(
    get,
    path = "/addons/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Add-on ID")
    ),
    responses(
        (status = 200, description = "Add-on found", body = MenuAddon),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_addon<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<MenuAddon>> {
    let addon = service.get_addon(id).await?;
    Ok(Json(addon))
}

/// Update an add-on
#[utoipa::path(
    put,
    path = "/addons/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Add-on ID")
    ),
    request_body = UpdateMenuAddon,
    responses(
        (status = 200, description = "Add-on updated", body = MenuAddon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_addon<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateMenuAddon>,
) -> CatalogResult<Json<MenuAddon>> {
    let addon = service.update_addon(id, input).await?;
    Ok(Json(addon))
}

/// Delete an add-on
#[utoipa::path(
    delete,
    path = "/addons/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Add-on ID")
    ),
    responses(
        (status = 204, description = "Add-on deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_addon<R: CatalogRepository>(
    State(service): State<Arc<CatalogService<R>>>,
    IdPath(id): IdPath,
) -> CatalogResult<StatusCode> {
    service.delete_addon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
