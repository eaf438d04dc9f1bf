use model::execution::target::TargetTable;

const QUERY_PROBE_TIMEZONE_SQL: &str = include_str!("sql/probe_timezone.sql");

/// Wraps an identifier in double quotes, splitting an optional schema prefix.
pub fn quote_identifier(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!(r#""{}""#, part.replace('"', r#""""#)))
        .collect::<Vec<_>>()
        .join(".")
}

/// Statements used against the target table, rendered once per connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneQueries {
    pub select_by_zones: String,
    pub update_zone: String,
    pub select_zone: String,
    pub probe: &'static str,
}

impl ZoneQueries {
    pub fn new(target: &TargetTable) -> Self {
        let table = quote_identifier(&target.table);
        let id = quote_identifier(&target.id_column);
        let zone = quote_identifier(&target.zone_column);

        Self {
            select_by_zones: format!("SELECT {id}, {zone} FROM {table} WHERE {zone} = ANY($1)"),
            update_zone: format!("UPDATE {table} SET {zone} = $1 WHERE {id} = $2"),
            select_zone: format!("SELECT {zone} FROM {table} WHERE {id} = $1"),
            probe: QUERY_PROBE_TIMEZONE_SQL.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("srs_configs"), r#""srs_configs""#);
        assert_eq!(quote_identifier("public.srs_configs"), r#""public"."srs_configs""#);
        assert_eq!(quote_identifier(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn test_default_target_queries() {
        let queries = ZoneQueries::new(&TargetTable::default());
        assert_eq!(
            queries.select_by_zones,
            r#"SELECT "id", "timezone" FROM "srs_configs" WHERE "timezone" = ANY($1)"#
        );
        assert_eq!(
            queries.update_zone,
            r#"UPDATE "srs_configs" SET "timezone" = $1 WHERE "id" = $2"#
        );
        assert_eq!(
            queries.select_zone,
            r#"SELECT "timezone" FROM "srs_configs" WHERE "id" = $1"#
        );
    }

    #[test]
    fn test_probe_query_is_parameterized() {
        let queries = ZoneQueries::new(&TargetTable::default());
        assert_eq!(
            queries.probe,
            "SELECT date(now() AT TIME ZONE 'utc' AT TIME ZONE $1) AS probe_date"
        );
    }

    #[test]
    fn test_custom_target_queries() {
        let target = TargetTable::new("app.user_settings", "user_id", "tz");
        let queries = ZoneQueries::new(&target);
        assert_eq!(
            queries.update_zone,
            r#"UPDATE "app"."user_settings" SET "tz" = $1 WHERE "user_id" = $2"#
        );
    }
}
