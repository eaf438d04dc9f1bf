use crate::{artifact::ArtifactRenderer, error::ArtifactError};
use model::core::timezone::TimezoneMapping;

const ELIXIR_TEMPLATE: &str = include_str!("templates/timezone_mapping.ex.tmpl");

/// Elixir module exposing `normalize_timezone/1` and `get_mapping/0`.
pub struct ElixirModule {
    module_name: String,
}

impl ElixirModule {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
        }
    }
}

impl ArtifactRenderer for ElixirModule {
    fn render(&self, mapping: &TimezoneMapping) -> Result<String, ArtifactError> {
        let entries = mapping
            .iter()
            .map(|entry| {
                format!(
                    "    {} => {}",
                    elixir_string(entry.legacy),
                    elixir_string(entry.canonical)
                )
            })
            .collect::<Vec<_>>()
            .join(",\n");

        Ok(ELIXIR_TEMPLATE
            .replace("{{module}}", &self.module_name)
            .replace("{{version}}", &mapping.fingerprint())
            .replace("{{entries}}", &entries))
    }
}

/// Double-quoted Elixir string literal with interpolation disabled.
fn elixir_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '#' => out.push_str("\\#"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_builtin() -> String {
        ElixirModule::new("Memoet.Utils.TimezoneMapping")
            .render(&TimezoneMapping::builtin())
            .unwrap()
    }

    #[test]
    fn test_module_shape() {
        let source = render_builtin();
        assert!(source.contains("defmodule Memoet.Utils.TimezoneMapping do"));
        assert!(source.contains("def normalize_timezone(timezone) do"));
        assert!(source.contains("Map.get(@timezone_mapping, timezone, timezone)"));
        assert!(source.contains("def get_mapping() do"));
        assert!(source.trim_end().ends_with("end"));
        assert!(!source.contains("{{"));
    }

    #[test]
    fn test_every_entry_is_rendered() {
        let source = render_builtin();
        let mapping = TimezoneMapping::builtin();
        for entry in mapping.iter() {
            let line = format!("\"{}\" => \"{}\"", entry.legacy, entry.canonical);
            assert!(source.contains(&line), "missing {line}");
        }
        assert_eq!(source.matches(" => ").count(), mapping.len());
    }

    #[test]
    fn test_version_is_embedded() {
        let source = render_builtin();
        let version = TimezoneMapping::builtin().fingerprint();
        assert!(source.contains(&format!("@mapping_version \"{version}\"")));
    }

    #[test]
    fn test_empty_mapping_renders_empty_map() {
        let source = ElixirModule::new("TzMap")
            .render(&TimezoneMapping::new(&[]))
            .unwrap();
        assert!(source.contains("@timezone_mapping %{\n\n  }"));
    }

    #[test]
    fn test_elixir_string_escaping() {
        assert_eq!(elixir_string("US/Central"), "\"US/Central\"");
        assert_eq!(elixir_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(elixir_string("#{x}"), "\"\\#{x}\"");
    }
}
