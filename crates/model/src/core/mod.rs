pub mod identifiers;
pub mod timezone;
