use crate::sql::base::error::ConnectorError;
use model::execution::connection::{ConnectionSettings, SslMode};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls, config::SslMode as PgSslMode};
use tracing::error;

/// Client plus the task driving its socket. The task ends once the client is dropped.
pub type ConnectedClient = (Client, JoinHandle<()>);

pub fn pg_config(settings: &ConnectionSettings) -> Config {
    let mut config = Config::new();
    config
        .host(&settings.host)
        .port(settings.port)
        .dbname(&settings.database)
        .user(&settings.user)
        .password(&settings.password)
        .application_name(&settings.application_name)
        .ssl_mode(match settings.ssl_mode {
            SslMode::Disable => PgSslMode::Disable,
            SslMode::Prefer => PgSslMode::Prefer,
            SslMode::Require => PgSslMode::Require,
        });
    config
}

/// Makes a single connection attempt. With `prefer` the driver negotiates TLS
/// on that one socket and continues in plain text when the server declines.
pub async fn connect_client(settings: &ConnectionSettings) -> Result<ConnectedClient, ConnectorError> {
    let config = pg_config(settings);

    match settings.ssl_mode {
        SslMode::Disable => connect_without_tls(config).await,
        SslMode::Prefer | SslMode::Require => connect_with_tls(config).await,
    }
}

pub(crate) async fn connect_with_tls(config: Config) -> Result<ConnectedClient, ConnectorError> {
    let connector = TlsConnector::builder().build()?;
    let tls = MakeTlsConnector::new(connector);
    let (client, connection) = config.connect(tls).await?;
    let handle = tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok((client, handle))
}

pub(crate) async fn connect_without_tls(config: Config) -> Result<ConnectedClient, ConnectorError> {
    let (client, connection) = config.connect(NoTls).await?;
    let handle = tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok((client, handle))
}
