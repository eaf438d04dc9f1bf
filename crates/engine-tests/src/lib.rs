#![allow(dead_code)]

use connectors::sql::postgres::utils::connect_client;
use engine_config::settings::{
    RemediationSettings, RemediationSettingsBuilder, artifact::ArtifactSettings,
};
use model::execution::{
    connection::{ConnectionSettings, SslMode},
    target::TargetTable,
};
use std::path::Path;
use tokio_postgres::Client;

pub mod integration;

// Test database
const TEST_PG_HOST: &str = "localhost";
const TEST_PG_PORT: u16 = 5432;
const TEST_PG_DATABASE: &str = "testdb";
const TEST_PG_USER: &str = "user";
const TEST_PG_PASSWORD: &str = "password";

fn test_connection() -> ConnectionSettings {
    ConnectionSettings {
        host: TEST_PG_HOST.to_string(),
        port: TEST_PG_PORT,
        database: TEST_PG_DATABASE.to_string(),
        user: TEST_PG_USER.to_string(),
        password: TEST_PG_PASSWORD.to_string(),
        ssl_mode: SslMode::Disable,
        ..Default::default()
    }
}

fn test_settings(table: &str, artifact: &Path) -> RemediationSettings {
    RemediationSettingsBuilder::new()
        .connection(test_connection())
        .target(TargetTable::new(table, "id", "timezone"))
        .artifact(ArtifactSettings {
            path: artifact.to_path_buf(),
            ..Default::default()
        })
        .build()
        .expect("valid test settings")
}

/// Separate client for fixture setup and assertions, independent of the store under test.
async fn pg_client() -> Client {
    let (client, _connection) = connect_client(&test_connection())
        .await
        .expect("connect postgres");
    client
}

/// Drop & recreate `table` with an `id_type` key and the given timezone values.
async fn reset_table(client: &Client, table: &str, id_type: &str, rows: &[(&str, &str)]) {
    client
        .batch_execute(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (id {id_type} PRIMARY KEY, timezone VARCHAR(64));"
        ))
        .await
        .expect("reset table");

    for (id, zone) in rows {
        client
            .execute(
                &format!("INSERT INTO {table} (id, timezone) VALUES ({id}, $1)"),
                &[zone],
            )
            .await
            .expect("insert row");
    }
}

async fn zone_of(client: &Client, table: &str, id: &str) -> Option<String> {
    client
        .query_one(&format!("SELECT timezone FROM {table} WHERE id = {id}"), &[])
        .await
        .expect("select row")
        .get(0)
}
