use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        addresses::{AddAddressRequest, AddressBookResponse, UpdateAddressRequest},
        auth::{AuthResponse, SignInRequest, SignUpRequest},
        users::UpdateProfileRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Deleted},
    services::{address_service, auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route("/addresses", get(list_addresses))
        .route("/address", post(add_address))
        .route("/address/{id}", put(update_address).delete(delete_address))
        .route("/address/{id}/default", put(set_default_address))
}

#[utoipa::path(
    post,
    path = "/api/user/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<User>),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users"
)]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = auth_service::sign_up(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/user/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Session token issued", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is banned"),
        (status = 404, description = "No account for this email")
    ),
    tag = "Users"
)]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let resp = auth_service::sign_in(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/me",
    responses(
        (status = 200, description = "Current profile", body = ApiResponse<User>),
        (status = 403, description = "Missing token or banned account")
    ),
    security(("api_key" = [])),
    tag = "Users"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/user/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<User>),
        (status = 400, description = "Validation failed")
    ),
    security(("api_key" = [])),
    tag = "Users"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/user/me",
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<Deleted>)
    ),
    security(("api_key" = [])),
    tag = "Users"
)]
pub async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Deleted>>> {
    let resp = user_service::delete_account(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/user/addresses",
    responses(
        (status = 200, description = "Address book", body = ApiResponse<AddressBookResponse>)
    ),
    security(("api_key" = [])),
    tag = "Addresses"
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AddressBookResponse>>> {
    let resp = address_service::list_addresses(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/user/address",
    request_body = AddAddressRequest,
    responses(
        (status = 201, description = "Address added", body = ApiResponse<AddressBookResponse>),
        (status = 400, description = "Validation failed")
    ),
    security(("api_key" = [])),
    tag = "Addresses"
)]
pub async fn add_address(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddAddressRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AddressBookResponse>>)> {
    let resp = address_service::add_address(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/user/address/{id}",
    params(
        ("id" = Uuid, Path, description = "Address ID")
    ),
    request_body = UpdateAddressRequest,
    responses(
        (status = 200, description = "Address updated", body = ApiResponse<AddressBookResponse>),
        (status = 404, description = "Address not found")
    ),
    security(("api_key" = [])),
    tag = "Addresses"
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAddressRequest>,
) -> AppResult<Json<ApiResponse<AddressBookResponse>>> {
    let resp = address_service::update_address(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/user/address/{id}",
    params(
        ("id" = Uuid, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Address deleted", body = ApiResponse<AddressBookResponse>),
        (status = 404, description = "Address not found")
    ),
    security(("api_key" = [])),
    tag = "Addresses"
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AddressBookResponse>>> {
    let resp = address_service::delete_address(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/user/address/{id}/default",
    params(
        ("id" = Uuid, Path, description = "Address ID")
    ),
    responses(
        (status = 200, description = "Default address set", body = ApiResponse<AddressBookResponse>),
        (status = 404, description = "Address not found")
    ),
    security(("api_key" = [])),
    tag = "Addresses"
)]
pub async fn set_default_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AddressBookResponse>>> {
    let resp = address_service::set_default_address(&state, &user, id).await?;
    Ok(Json(resp))
}
