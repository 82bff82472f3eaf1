//! Console output gating for the batch driver.

/// Verbosity level for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output.
    Quiet,
    /// Normal output level.
    Normal,
    /// Verbose output with one line per converted file.
    Verbose,
}

/// Print `msg` when the current `level` admits messages of `required` level.
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}
