#[path = "property/total_report.rs"]
mod total_report;
