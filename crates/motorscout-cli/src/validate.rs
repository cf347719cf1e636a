use std::path::Path;

/// Validate a history report and print the issues as pretty JSON.
///
/// # Errors
///
/// Returns an error if the checks file cannot be loaded or the issues cannot
/// be serialized.
pub(crate) fn run_validate(path: &Path) -> anyhow::Result<()> {
    let checks = motorscout_core::load_checks(path)?;
    let issues = motorscout_history::validate(&checks);

    if issues.is_empty() {
        tracing::info!(checks = checks.len(), "no contradictions found");
    } else {
        tracing::warn!(
            checks = checks.len(),
            issues = issues.len(),
            "history report contains contradictions"
        );
    }

    println!("{}", serde_json::to_string_pretty(&issues)?);
    Ok(())
}
