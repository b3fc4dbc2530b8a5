//! Snapshot validation command

use anyhow::Result;
use portico_room::{validate_file, Severity, ValidationReport};
use portico_schema::SchemaRegistry;

pub fn run(snapshot: &str, schemas: &str, format: &str) -> Result<()> {
    let registry = SchemaRegistry::builtin_with_overrides(schemas)?;
    let report = validate_file(snapshot, &registry)?;

    if format == "json" {
        print_report_json(&report);
    } else {
        print_report_text(&report);
    }

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_report_text(report: &ValidationReport) {
    if report.violations.is_empty() {
        println!("OK: no problems found");
        return;
    }

    for violation in &report.violations {
        let severity_str = match violation.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
            Severity::Info => "INFO ",
        };
        println!("{severity_str} [{}] {}", violation.section, violation.message);
    }

    println!();
    println!("{}", report.summary());
}

fn print_report_json(report: &ValidationReport) {
    let violations: Vec<serde_json::Value> = report
        .violations
        .iter()
        .map(|v| {
            serde_json::json!({
                "section": v.section,
                "severity": match v.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                    Severity::Info => "info",
                },
                "message": v.message,
            })
        })
        .collect();

    let output = serde_json::json!({
        "valid": report.is_valid(),
        "summary": report.summary(),
        "errors": report.error_count(),
        "warnings": report.warning_count(),
        "violations": violations,
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}
