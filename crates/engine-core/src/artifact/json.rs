use crate::{artifact::ArtifactRenderer, error::ArtifactError};
use model::core::timezone::TimezoneMapping;
use serde::Serialize;
use std::collections::BTreeMap;

/// Semantics consumers must apply to names outside the table.
const DEFAULT_POLICY: &str = "identity";

#[derive(Serialize)]
struct Contract<'a> {
    version: String,
    default: &'static str,
    mapping: BTreeMap<&'a str, &'a str>,
}

/// Language-neutral JSON document carrying the table and its lookup rule.
pub struct JsonContract;

impl ArtifactRenderer for JsonContract {
    fn render(&self, mapping: &TimezoneMapping) -> Result<String, ArtifactError> {
        let contract = Contract {
            version: mapping.fingerprint(),
            default: DEFAULT_POLICY,
            mapping: mapping.iter().map(|e| (e.legacy, e.canonical)).collect(),
        };
        let mut json = serde_json::to_string_pretty(&contract)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_document() {
        let mapping = TimezoneMapping::builtin();
        let json: serde_json::Value =
            serde_json::from_str(&JsonContract.render(&mapping).unwrap()).unwrap();

        assert_eq!(json["version"], mapping.fingerprint());
        assert_eq!(json["default"], "identity");
        assert_eq!(json["mapping"].as_object().unwrap().len(), 16);
        assert_eq!(json["mapping"]["US/Central"], "America/Chicago");
        assert!(json["mapping"].get("America/Chicago").is_none());
    }
}
