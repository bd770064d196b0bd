//! CLI command messaging system
//!
//! Coloured, tagged console output for the one-shot commands (stats, show,
//! reprocess, system control, backend configuration).

const INFO: &str = "\x1b[1;33m[INFO]\x1b[0m";
const WARN: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR: &str = "\x1b[1;31m[ERROR]\x1b[0m";
const SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";

/// `TAG title`, followed by a tab and the details when there are any.
fn tagged(tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", tag, title)
    } else {
        format!("{} {}\t {}", tag, title, details)
    }
}

/// Print CLI command info message
pub fn print_info(title: &str, details: &str) {
    println!("{}", tagged(INFO, title, details));
}

/// Print CLI command warning to stderr
pub fn print_warn(title: &str, details: &str) {
    eprintln!("{}", tagged(WARN, title, details));
}

/// Print CLI command error to stderr
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", tagged(ERROR, title, details.unwrap_or_default()));
}

/// Print CLI command success
pub fn print_success(title: &str, details: &str) {
    println!("{}", tagged(SUCCESS, title, details));
}

/// Macro for CLI info messages
#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

/// Macro for CLI warnings
#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

/// Macro for CLI success messages
#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}
