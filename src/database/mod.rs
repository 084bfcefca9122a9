use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from pool construction and schema bootstrap
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Table definitions, applied idempotently at startup. Relationships are
/// plain integer id columns checked at the application boundary; only the
/// uniqueness constraints the data model declares are enforced here.
const TABLES: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS armazones (
        id SERIAL PRIMARY KEY,
        marca VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS materiales (
        id SERIAL PRIMARY KEY,
        material VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS servicios (
        id SERIAL PRIMARY KEY,
        servicio VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tipo_cliente (
        id SERIAL PRIMARY KEY,
        cliente VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS tipo_sucursal (
        id SERIAL PRIMARY KEY,
        tipo VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS estado_sucursal (
        id SERIAL PRIMARY KEY,
        estado VARCHAR(100) NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS user_roles (
        id SERIAL PRIMARY KEY,
        rol VARCHAR(100) NOT NULL UNIQUE,
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    )"#,
    r#"CREATE TABLE IF NOT EXISTS sucursales (
        id SERIAL PRIMARY KEY,
        sucursal VARCHAR(100) NOT NULL,
        tipo_sucursal_id INTEGER NOT NULL,
        dependencia VARCHAR(100) NOT NULL,
        mondeda VARCHAR(10) NOT NULL,
        razon_social VARCHAR(200) NOT NULL,
        estado_sucursal_id INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS clientes (
        id SERIAL PRIMARY KEY,
        nombres VARCHAR(100) NOT NULL,
        apellidos VARCHAR(100) NOT NULL,
        rfc VARCHAR(16) NOT NULL,
        calle VARCHAR(200) NOT NULL,
        numero VARCHAR(50) NOT NULL,
        colonia VARCHAR(100) NOT NULL,
        ciudad VARCHAR(100) NOT NULL,
        estado VARCHAR(100) NOT NULL,
        codigopostal VARCHAR(20) NOT NULL,
        telefono VARCHAR(30) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        contacto VARCHAR(100) NOT NULL,
        tipocliente INTEGER,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP NOT NULL DEFAULT now()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS pacientes (
        id SERIAL PRIMARY KEY,
        nombres VARCHAR(100) NOT NULL,
        apellidos VARCHAR(100) NOT NULL,
        edad INTEGER NOT NULL,
        ocupacion VARCHAR(100),
        problema_ocular VARCHAR(255),
        medicamento_actual VARCHAR(255),
        lentes BOOLEAN NOT NULL DEFAULT FALSE,
        antecedentes_familiares_lentes BOOLEAN DEFAULT FALSE,
        hipertension BOOLEAN DEFAULT FALSE,
        diabetico BOOLEAN DEFAULT FALSE,
        util_lentes BOOLEAN DEFAULT FALSE,
        cefaleas BOOLEAN DEFAULT FALSE,
        princip_defi_visual VARCHAR(255),
        otros VARCHAR(255),
        cliente_id INTEGER
    )"#,
    r#"CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        nombres VARCHAR(100) NOT NULL,
        apellidos VARCHAR(100) NOT NULL,
        usuario VARCHAR(50) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        telefono VARCHAR(30) NOT NULL,
        "Sucursal" INTEGER NOT NULL,
        sucursal_acces INTEGER[] NOT NULL DEFAULT '{}',
        roles INTEGER[] NOT NULL DEFAULT '{}',
        hashed_password VARCHAR(255) NOT NULL
    )"#,
];

/// Open the connection pool described by the configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    if config.url.is_empty() {
        return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
    }

    let url = url::Url::parse(&config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url.as_str())
        .await?;

    info!("Connected to database at {}", url.host_str().unwrap_or("?"));
    Ok(pool)
}

/// Create any missing tables. Safe to run on every startup.
pub async fn create_tables(pool: &PgPool) -> Result<(), DatabaseError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database schema is up to date ({} tables)", TABLES.len());
    Ok(())
}

/// Ping the pool to confirm connectivity.
pub async fn ping(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
