//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Statistics that are undefined for the data (an exact fit's F, for
/// example) serialize as `null` and read back as `None`.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
