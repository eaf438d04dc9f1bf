pub mod artifact;
pub mod error;
pub mod remediator;
pub mod runner;
