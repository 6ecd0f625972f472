use crate::{
    admin::{dto as admin_dto, handlers as admin_handlers},
    group::{
        group_handlers,
        group_models::{GroupDocument, GroupSummary, Item, ItemPriority, Wishlist},
    },
    middleware::admin_session_middleware,
    state::AppState,
};
use axum::http::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::group::group_handlers::save_group,
        crate::group::group_handlers::get_group,
        crate::group::group_handlers::delete_group,
        crate::admin::handlers::login,
        crate::admin::handlers::logout,
        crate::admin::handlers::get_all_groups,
        crate::admin::handlers::get_group_document,
    ),
    components(
        schemas(
            GroupDocument,
            Wishlist,
            Item,
            ItemPriority,
            GroupSummary,
            admin_dto::AdminLoginRequest,
            admin_dto::AdminSessionResponse,
        )
    ),
    tags(
        (name = "groups", description = "Gift-exchange group endpoints"),
        (name = "admin", description = "Observer endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Public group routes; member identity rides in the query string
    let group_routes = Router::new().route(
        "/:group_id",
        get(group_handlers::get_group)
            .put(group_handlers::save_group)
            .delete(group_handlers::delete_group),
    );

    // Observer routes; everything except login sits behind the session check
    let admin_routes = Router::new()
        .route("/logout", post(admin_handlers::logout))
        .route("/groups", get(admin_handlers::get_all_groups))
        .route("/groups/:group_id", get(admin_handlers::get_group_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_session_middleware,
        ))
        .route("/login", post(admin_handlers::login));

    let api_routes = Router::new()
        .nest("/groups", group_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
