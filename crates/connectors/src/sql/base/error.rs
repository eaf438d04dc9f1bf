use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any PostgreSQL driver error.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// The id column has a type the tool cannot bind back into an update.
    #[error("Unsupported row id column type: {0}")]
    UnsupportedIdType(String),

    /// The store was used after its connection had been released.
    #[error("Connection already closed")]
    Disconnected,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Errors happening during connection setup.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The server was unreachable or rejected the credentials.
    #[error("Failed to connect to PostgreSQL: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("Failed to initialise TLS: {0}")]
    Tls(#[from] native_tls::Error),
}
