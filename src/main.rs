use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_playground::config::Config;
use api_playground::handlers::{
    EndpointListResponse, FieldsRequest, LogListResponse, SendResponse, SendState,
};
use api_playground::models::{
    EndpointDescriptor, FieldKind, FieldLocation, FieldSpec, HttpMethod, LogEntry, LoggedRequest,
};
use api_playground::services::BuiltRequest;
use api_playground::state::AppState;
use api_playground::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::endpoint::list_endpoints,
        handlers::endpoint::get_endpoint,
        handlers::endpoint::preview_request,
        handlers::endpoint::send_request,
        handlers::log::list_logs,
        handlers::log::get_log,
        handlers::log::clear_logs,
    ),
    components(schemas(
        EndpointDescriptor,
        EndpointListResponse,
        FieldSpec,
        FieldKind,
        FieldLocation,
        HttpMethod,
        FieldsRequest,
        BuiltRequest,
        SendState,
        SendResponse,
        LogEntry,
        LoggedRequest,
        LogListResponse,
    )),
    tags(
        (name = "Endpoints", description = "Endpoint catalog"),
        (name = "Playground", description = "Build and send requests to the upstream API"),
        (name = "Logs", description = "Request/response log")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let addr = config.server_addr();
    tracing::info!("Upstream API: {}", config.api_base_url);

    // Initialize application state (opens the log stores)
    let state = AppState::new(config).await?;

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
