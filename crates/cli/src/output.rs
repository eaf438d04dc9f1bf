use crate::error::CliError;
use engine_config::report::summary::RunReport;
use engine_core::{remediator::ProbeOutcome, runner::RunOutcome};
use model::{core::timezone::TimezoneMapping, records::row::AffectedRow};
use std::path::Path;

pub fn print_summary(outcome: &RunOutcome) {
    print_report(&outcome.report);
    println!("Mapping written to {}", outcome.artifact.display());
    for probe in outcome.initial_probes.iter().chain([&outcome.confirm_probe]) {
        print_probe(probe);
    }
}

pub fn print_report(report: &RunReport) {
    println!("Fixed: {}", report.fixed);
    println!("Failed: {}", report.failed);
    for failure in &report.failures {
        println!(
            "  row {} ({}): {}",
            failure.id, failure.timezone, failure.failure
        );
    }
}

pub fn write_report(report: &RunReport, path: &Path) -> Result<(), CliError> {
    report.write_json(path)?;
    Ok(())
}

pub fn print_probe(probe: &ProbeOutcome) {
    match probe {
        ProbeOutcome::Ok { zone, date } => println!("{:<24} ok ({date})", zone),
        ProbeOutcome::Failed { zone, message } => println!("{:<24} error: {message}", zone),
    }
}

pub fn print_rows(rows: &[AffectedRow], as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    println!("Found {} rows with invalid timezones", rows.len());
    for row in rows {
        println!("{:<12} {}", row.id, row.timezone);
    }
    Ok(())
}

pub fn print_mapping(mapping: &TimezoneMapping) {
    println!("Timezone mapping (version {}):", mapping.fingerprint());
    println!("-----------------------------");
    for entry in mapping.iter() {
        println!("{:<24} {}", entry.legacy, entry.canonical);
    }
}
