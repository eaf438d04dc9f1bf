#[cfg(test)]
mod tests {
    use crate::{pg_client, reset_table, test_connection, test_settings, zone_of};
    use connectors::sql::{base::store::TimezoneStore, postgres::adapter::PgStore};
    use engine_core::{
        remediator::{ProbeOutcome, Remediator},
        runner,
    };
    use model::{
        core::{identifiers::RunId, timezone::TimezoneMapping},
        execution::target::TargetTable,
        records::row::{AffectedRow, RowId},
    };
    use tracing_test::traced_test;

    // Test case 01: legacy rows are rewritten, canonical and unknown names are left alone.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a running PostgreSQL at localhost:5432"]
    async fn tc01() {
        let table = "tz_tc01";
        let client = pg_client().await;
        reset_table(
            &client,
            table,
            "INTEGER",
            &[
                ("1", "US/Central"),
                ("2", "America/Chicago"),
                ("3", "US/Nonexistent"),
            ],
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let settings = test_settings(table, &dir.path().join("timezone_mapping.ex"));
        let mut store = PgStore::connect(settings.connection(), settings.target())
            .await
            .unwrap();

        let outcome = runner::run(
            &mut store,
            &settings,
            TimezoneMapping::builtin(),
            RunId::generate(),
        )
        .await
        .unwrap();

        assert_eq!(outcome.report.counts(), (1, 0));
        assert!(!store.is_connected());
        assert!(outcome.artifact.exists());
        assert!(outcome.confirm_probe.is_ok());

        assert_eq!(zone_of(&client, table, "1").await.as_deref(), Some("America/Chicago"));
        assert_eq!(zone_of(&client, table, "2").await.as_deref(), Some("America/Chicago"));
        assert_eq!(zone_of(&client, table, "3").await.as_deref(), Some("US/Nonexistent"));
    }

    // Test case 02: a second run finds nothing and changes nothing.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a running PostgreSQL at localhost:5432"]
    async fn tc02() {
        let table = "tz_tc02";
        let client = pg_client().await;
        reset_table(
            &client,
            table,
            "BIGINT",
            &[("10", "US/Eastern"), ("11", "Canada/Newfoundland"), ("12", "UTC")],
        )
        .await;

        let target = TargetTable::new(table, "id", "timezone");
        let mut store = PgStore::connect(&test_connection(), &target).await.unwrap();

        let first = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();
        assert_eq!(first.counts(), (2, 0));

        let second = Remediator::new(&mut store, TimezoneMapping::builtin())
            .fix_all(RunId::generate())
            .await
            .unwrap();
        assert_eq!(second.counts(), (0, 0));
        assert_eq!(second.scanned, 0);

        store.disconnect().await;
        assert_eq!(zone_of(&client, table, "11").await.as_deref(), Some("America/St_Johns"));
        assert_eq!(zone_of(&client, table, "12").await.as_deref(), Some("UTC"));
    }

    // Test case 03: the server resolves every canonical name in the table.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a running PostgreSQL at localhost:5432"]
    async fn tc03() {
        let mapping = TimezoneMapping::builtin();
        let mut store = PgStore::connect(&test_connection(), &TargetTable::default())
            .await
            .unwrap();
        let mut remediator = Remediator::new(&mut store, mapping);

        for entry in mapping.iter() {
            let outcome = remediator.probe(entry.canonical).await;
            assert!(
                matches!(outcome, ProbeOutcome::Ok { .. }),
                "{} should resolve: {outcome:?}",
                entry.canonical
            );
        }

        let bogus = remediator.probe("Not/A_Zone").await;
        assert!(!bogus.is_ok());
        store.disconnect().await;
    }

    // Test case 04: UUID keys are decoded and bound back with their own type.
    #[traced_test]
    #[tokio::test]
    #[ignore = "requires a running PostgreSQL at localhost:5432"]
    async fn tc04() {
        let table = "tz_tc04";
        let id = uuid::Uuid::new_v4();
        let key = format!("'{id}'");
        let client = pg_client().await;
        reset_table(&client, table, "UUID", &[(key.as_str(), "US/Pacific")]).await;

        let target = TargetTable::new(table, "id", "timezone");
        let mut store = PgStore::connect(&test_connection(), &target).await.unwrap();
        let mut remediator = Remediator::new(&mut store, TimezoneMapping::builtin());

        let rows = remediator.scan().await.unwrap();
        assert_eq!(rows, vec![AffectedRow::new(RowId::Uuid(id), "US/Pacific")]);

        let fixed = remediator.fix_one(&rows[0]).await.unwrap();
        assert_eq!(fixed.to, "America/Los_Angeles");
        store.disconnect().await;

        assert_eq!(
            zone_of(&client, table, &key).await.as_deref(),
            Some("America/Los_Angeles")
        );
    }
}
