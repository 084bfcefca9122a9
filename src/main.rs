use anyhow::Context;
use axum::extract::State;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use visualoptics_api::config::AppConfig;
use visualoptics_api::database;
use visualoptics_api::handlers;
use visualoptics_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let pool = database::connect(&config.database)
        .await
        .context("failed to open the database pool")?;
    database::create_tables(&pool)
        .await
        .context("failed to create tables")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(pool, config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("VisualOptics API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(armazones_routes())
        .merge(cliente_routes())
        .merge(estado_sucursal_routes())
        .merge(materiales_routes())
        .merge(pacientes_routes())
        .merge(servicios_routes())
        .merge(sucursales_routes())
        .merge(tipo_cliente_routes())
        .merge(tipo_sucursal_routes())
        .merge(users_routes())
        .merge(users_roles_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn armazones_routes() -> Router<AppState> {
    use handlers::armazones;

    Router::new()
        .route("/armazones/create", post(armazones::create_armazon))
        .route("/armazones/all", get(armazones::get_all_armazones))
        .route("/armazones/:armazon_id", get(armazones::get_armazon))
        .route("/armazones/update/:armazon_id", post(armazones::update_armazon))
        .route("/armazones/delete/:armazon_id", delete(armazones::delete_armazon))
}

fn cliente_routes() -> Router<AppState> {
    use handlers::cliente;

    Router::new()
        .route("/cliente/create", post(cliente::create_cliente))
        .route("/cliente/all", get(cliente::get_all_clientes))
        .route("/cliente/:cliente_id", get(cliente::get_cliente))
        .route("/cliente/update/:cliente_id", post(cliente::update_cliente))
        .route("/cliente/delete/:cliente_id", delete(cliente::delete_cliente))
}

fn estado_sucursal_routes() -> Router<AppState> {
    use handlers::estado_sucursal;

    Router::new()
        .route("/estado_sucursal/create", post(estado_sucursal::create_estado_sucursal))
        .route("/estado_sucursal/all", get(estado_sucursal::get_all_estado_sucursales))
        .route("/estado_sucursal/:estado_id", get(estado_sucursal::get_estado_sucursal))
        .route(
            "/estado_sucursal/update/:estado_id",
            post(estado_sucursal::update_estado_sucursal),
        )
        .route(
            "/estado_sucursal/delete/:estado_id",
            delete(estado_sucursal::delete_estado_sucursal),
        )
}

fn materiales_routes() -> Router<AppState> {
    use handlers::materiales;

    Router::new()
        .route("/materiales/create", post(materiales::create_material))
        .route("/materiales/all", get(materiales::get_all_materiales))
        .route("/materiales/:material_id", get(materiales::get_material))
        .route("/materiales/update/:material_id", post(materiales::update_material))
        .route("/materiales/delete/:material_id", delete(materiales::delete_material))
}

fn pacientes_routes() -> Router<AppState> {
    use handlers::pacientes;

    Router::new()
        .route("/pacientes/create", post(pacientes::create_paciente))
        .route("/pacientes/all", get(pacientes::get_all_pacientes))
        .route("/pacientes/cliente/:cliente_id", get(pacientes::get_pacientes_by_cliente))
        .route("/pacientes/:paciente_id", get(pacientes::get_paciente))
        .route("/pacientes/update/:paciente_id", post(pacientes::update_paciente))
        .route("/pacientes/delete/:paciente_id", delete(pacientes::delete_paciente))
}

fn servicios_routes() -> Router<AppState> {
    use handlers::servicios;

    Router::new()
        .route("/servicios/create", post(servicios::create_servicio))
        .route("/servicios/all", get(servicios::get_all_servicios))
        .route("/servicios/:servicio_id", get(servicios::get_servicio))
        .route("/servicios/update/:servicio_id", post(servicios::update_servicio))
        .route("/servicios/delete/:servicio_id", delete(servicios::delete_servicio))
}

fn sucursales_routes() -> Router<AppState> {
    use handlers::sucursales;

    Router::new()
        .route("/sucursales/create", post(sucursales::create_sucursal))
        .route("/sucursales/all", get(sucursales::get_all_sucursales))
        .route("/sucursales/:sucursal_id", get(sucursales::get_sucursal))
        .route("/sucursales/update/:sucursal_id", post(sucursales::update_sucursal))
        .route("/sucursales/delete/:sucursal_id", delete(sucursales::delete_sucursal))
}

fn tipo_cliente_routes() -> Router<AppState> {
    use handlers::tipo_cliente;

    Router::new()
        .route("/tipo_cliente/create", post(tipo_cliente::create_tipo_cliente))
        .route("/tipo_cliente/all", get(tipo_cliente::get_all_tipo_clientes))
        .route("/tipo_cliente/:tipo_id", get(tipo_cliente::get_tipo_cliente))
        .route("/tipo_cliente/update/:tipo_id", post(tipo_cliente::update_tipo_cliente))
        .route("/tipo_cliente/delete/:tipo_id", delete(tipo_cliente::delete_tipo_cliente))
}

fn tipo_sucursal_routes() -> Router<AppState> {
    use handlers::tipo_sucursal;

    Router::new()
        .route("/tipo_sucursal/create", post(tipo_sucursal::create_tipo_sucursal))
        .route("/tipo_sucursal/all", get(tipo_sucursal::get_all_tipo_sucursales))
        .route("/tipo_sucursal/:tipo_id", get(tipo_sucursal::get_tipo_sucursal))
        .route("/tipo_sucursal/update/:tipo_id", post(tipo_sucursal::update_tipo_sucursal))
        .route("/tipo_sucursal/delete/:tipo_id", delete(tipo_sucursal::delete_tipo_sucursal))
}

fn users_routes() -> Router<AppState> {
    use handlers::users;

    Router::new()
        .route("/users/signup", post(users::user_signup))
        .route("/users/all", get(users::get_all_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/update/:user_id", post(users::update_user))
        .route("/users/delete/:user_id", delete(users::delete_user))
}

fn users_roles_routes() -> Router<AppState> {
    use handlers::users_roles;

    Router::new()
        .route("/users_roles/create", post(users_roles::create_user_role))
        .route("/users_roles/all", get(users_roles::get_all_user_roles))
        .route("/users_roles/:role_id", get(users_roles::get_user_role))
        .route("/users_roles/update/:role_id", post(users_roles::update_user_role))
        .route("/users_roles/delete/:role_id", delete(users_roles::delete_user_role))
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "VisualOptics API",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "API y PostgreSQL funcionan",
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::ping(&state.pool).await {
        Ok(()) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok",
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string(),
            })),
        ),
    }
}
