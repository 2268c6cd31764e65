// File: crates/services/agenda_backend/src/main.rs
use agenda_common::services::ServiceFactory;
use agenda_config::load_config;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::warn;

mod app_state;
mod service_factory;

use app_state::AppState;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    agenda_common::logging::init();

    let state = AppState::new(config.clone());

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Agenda API!" }))
        .with_state(config.clone());

    // Booking routes need a store and a storage backend; without them the
    // service still starts but only serves the health route (and, when
    // enabled, the admin surface).
    let scheduling_router = match (
        state.service_factory.appointment_store(),
        state.service_factory.document_storage(),
    ) {
        (Some(store), Some(storage)) => Some(agenda_scheduling::routes::routes(
            config.clone(),
            store,
            storage,
            state.service_factory.export_notifier(),
        )),
        _ => {
            warn!("Booking routes disabled: appointment store or document storage unavailable");
            None
        }
    };

    #[cfg(feature = "supabase")]
    let supabase_router = if config.use_supabase && config.supabase.is_some() {
        Some(agenda_supabase::routes::routes(config.clone()))
    } else {
        None
    };

    let api_router = Router::new().nest("/api", {
        #[allow(unused_mut)] // for the features it needs to be mutable
        let mut router = api_router;
        if let Some(scheduling_router) = scheduling_router {
            router = router.merge(scheduling_router);
        }
        #[cfg(feature = "supabase")]
        {
            if let Some(supabase_router) = supabase_router {
                router = router.merge(supabase_router);
            }
        }
        router
    });

    let mut app = api_router;

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use agenda_scheduling::doc::SchedulingApiDoc;
        #[cfg(feature = "supabase")]
        use agenda_supabase::doc::AdminApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        // Define the Merged OpenAPI Documentation struct
        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Agenda API",
                version = "0.1.0",
                description = "Appointment booking service API docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Agenda", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulingApiDoc::openapi());
        #[cfg(feature = "supabase")]
        openapi_doc.merge(AdminApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Serve the widget bundle in dev mode
    if cfg!(debug_assertions) {
        println!("Running in development mode, serving static files from ./dist");
        app = app.fallback_service(ServeDir::new("dist"));
    }

    // Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
