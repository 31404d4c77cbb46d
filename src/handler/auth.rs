use std::sync::Arc;

use axum::{
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use serde_json::json;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{
        FilterUserDto, LoginUserDto, RegisterShopDto, Response, UserData, UserLoginResponseDto,
        UserResponseDto,
    },
    error::{ErrorMessage, HttpError},
    middleware::{auth, JWTAuthMiddeware},
    models::shopmodel::ShopSummary,
    utils::{password, token},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register-shop", post(register_shop))
        .route("/logout", post(logout))
        .route("/me", get(get_me).layer(middleware::from_fn(auth)))
}

fn set_cookie(cookie: Cookie<'static>) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        cookie
            .to_string()
            .parse()
            .map_err(|_| HttpError::server_error(ErrorMessage::ServerError.to_string()))?,
    );
    Ok(headers)
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let wrong_credentials = || HttpError::unauthorized(ErrorMessage::WrongCredentials.to_string());

    let user = app_state
        .db_client
        .get_user_by_identifier(body.role, body.identifier.trim())
        .await
        .ok_or_else(wrong_credentials)?;

    if user.role.requires_password() {
        let stored = user.password.as_deref().ok_or_else(wrong_credentials)?;
        let supplied = body.password.as_deref().unwrap_or_default();
        let password_matched =
            password::compare(supplied, stored).map_err(|_| wrong_credentials())?;

        if !password_matched {
            return Err(wrong_credentials());
        }
    }

    let token = token::create_token(
        &user.id.to_string(),
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    tracing::info!("User {} signed in as {}", user.id, user.role.to_str());

    let response = Json(UserLoginResponseDto {
        status: "success".to_string(),
        token,
        user: FilterUserDto::filter_user(&user),
    });

    let mut response = response.into_response();
    response.headers_mut().extend(set_cookie(cookie)?);

    Ok(response)
}

pub async fn register_shop(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterShopDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (owner, shop) = app_state.shop_service.register_shop(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Registration submitted. Your shop is awaiting admin approval.",
            "data": {
                "user": FilterUserDto::filter_user(&owner),
                "shop": ShopSummary::from(&shop),
            }
        })),
    ))
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut response = Json(Response {
        status: "success",
        message: "Logged out".to_string(),
    })
    .into_response();
    response.headers_mut().extend(set_cookie(cookie)?);

    Ok(response)
}

pub async fn get_me(
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    let response_data = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    };

    Ok(Json(response_data))
}
