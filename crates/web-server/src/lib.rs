use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use configuration::Settings;
use core_types::{
    Country, Discovery, Disease, DiseaseType, Doctor, Patient, PatientDisease, PublicServant,
    Record, Specialization, User,
};
use database::{DbRepository, Table};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

type ApiRouter = Router<Arc<AppState>>;

/// Mounts the five CRUD routes of one entity.
fn resource<E: Table>(router: ApiRouter, collection: &str, item: &str) -> ApiRouter {
    router
        .route(
            collection,
            get(handlers::list_rows::<E>).post(handlers::create_row::<E>),
        )
        .route(
            item,
            get(handlers::get_row::<E>)
                .put(handlers::replace_row::<E>)
                .delete(handlers::delete_row::<E>),
        )
}

/// Builds the full application router. Separate from `run_server` so tests can drive it in-process.
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let mut api = Router::new().route("/api/health", get(|| async { "OK" }));
    api = resource::<Country>(api, "/api/countries/", "/api/countries/:cname");
    api = resource::<User>(api, "/api/users/", "/api/users/:email");
    api = resource::<Doctor>(api, "/api/doctors/", "/api/doctors/:email");
    api = resource::<PublicServant>(api, "/api/public-servants/", "/api/public-servants/:email");
    api = resource::<Patient>(api, "/api/patients/", "/api/patients/:email");
    api = resource::<DiseaseType>(api, "/api/disease-types/", "/api/disease-types/:id");
    api = resource::<Specialization>(
        api,
        "/api/specializations/",
        "/api/specializations/:id/:email",
    );
    api = resource::<Disease>(api, "/api/diseases/", "/api/diseases/:disease_code");
    api = resource::<Discovery>(api, "/api/discoveries/", "/api/discoveries/:disease_code");
    api = resource::<PatientDisease>(
        api,
        "/api/patient-diseases/",
        "/api/patient-diseases/:email/:disease_code",
    );
    api = resource::<Record>(
        api,
        "/api/records/",
        "/api/records/:email/:cname/:disease_code",
    );

    api.with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit_bytes))
}

/// The main function to configure and run the web server.
///
/// Connects the pool, makes sure the tables exist, then serves until Ctrl-C.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let db_pool = database::connect(
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await?;
    database::create_schema(&db_pool).await?;
    let db_repo = DbRepository::new(db_pool);

    let app_state = Arc::new(AppState { db_repo });
    let app = build_router(app_state, settings.server.body_limit_bytes);

    let addr = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal.");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
