//! API handlers and routing for the bookstore REST endpoints

pub mod auth;
pub mod books;
pub mod health;
pub mod openapi;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    context::RequestContext,
    error::{AppError, AppResult},
    models::AuthClaims,
    AppState,
};

/// Extractor for the caller's verified token claims
pub struct AuthenticatedUser(pub AuthClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // Already verified by the gate
        if let Some(claims) = parts.extensions.get::<AuthClaims>() {
            return Ok(AuthenticatedUser(claims.clone()));
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing bearer token".to_string()))?;

        let claims = state.services.auth.verify(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected bearer token");
            AppError::from(e)
        })?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Every handler gets a context bounded by the configured request timeout
#[async_trait]
impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::with_timeout(
            &state.shutdown,
            state.config.request.timeout(),
        ))
    }
}

/// Gate for the protected route group: verifies the bearer token before the
/// handler runs and leaves the claims in the request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    if state.config.auth.require_admin {
        claims.require_admin()?;
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin = Router::new()
        .route("/books", post(books::create_book))
        .route("/books/:id", put(books::update_book).delete(books::delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/login", post(auth::login))
        // Books (public reads)
        .route("/books", get(books::list_books))
        .route("/books/:id", get(books::get_book))
        .nest("/admin", admin)
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
