use crate::settings::error::SettingsError;

/// Accepts `[A-Za-z_][A-Za-z0-9_$]*`, the unquoted identifier grammar
/// PostgreSQL uses. Anything else is rejected rather than escaped.
pub fn validate_identifier(ident: &str) -> Result<(), SettingsError> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(SettingsError::InvalidIdentifier(ident.to_string()))
    }
}

/// Same as [`validate_identifier`] but allows a single `schema.` prefix.
pub fn validate_qualified_identifier(ident: &str) -> Result<(), SettingsError> {
    let parts: Vec<&str> = ident.split('.').collect();
    if parts.len() > 2 {
        return Err(SettingsError::InvalidIdentifier(ident.to_string()));
    }
    for part in parts {
        validate_identifier(part).map_err(|_| SettingsError::InvalidIdentifier(ident.to_string()))?;
    }
    Ok(())
}

/// Dotted module path such as `Memoet.Utils.TimezoneMapping`.
pub fn validate_module_name(name: &str) -> Result<(), SettingsError> {
    let valid = !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(())
    } else {
        Err(SettingsError::InvalidModuleName(name.to_string()))
    }
}
