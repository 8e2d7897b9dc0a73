//! GitHub Actions workflow commands written to stdout.

/// Format the `::error::` command that marks the step as failed.
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Print the failure command. The caller exits non-zero.
pub fn set_failed(message: &str) {
    println!("{}", error_command(message));
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
