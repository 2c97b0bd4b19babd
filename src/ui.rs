// Terminal UI utilities
// Status lines go to stderr; stdout is reserved for ids that scripts capture.

use colored::Colorize;

use crate::domain::{Diagnostic, Failure, RecoveryNotice};

pub fn print_header(title: &str) {
    eprintln!();
    eprintln!(
        "{}",
        "╔════════════════════════════════════════════════════════════╗".bright_blue()
    );
    eprintln!("{}", format!("║  {:<58}║", title).bright_blue());
    eprintln!(
        "{}",
        "╚════════════════════════════════════════════════════════════╝".bright_blue()
    );
    eprintln!();
}

pub fn print_success(message: &str) {
    eprintln!("{}", format!("✅ {}", message).bright_green().bold());
}

pub fn print_error(message: &str) {
    eprintln!("{}", format!("❌ {}", message).bright_red().bold());
}

pub fn print_info(message: &str) {
    eprintln!("{}", format!("ℹ️  {}", message).bright_cyan());
}

pub fn print_warning(message: &str) {
    eprintln!("{}", format!("⚠️  {}", message).bright_yellow());
}

/// Banner for a replacement that left the release inconsistent
pub fn print_recovery(notice: &RecoveryNotice) {
    print_header("MANUAL RECOVERY REQUIRED");
    eprintln!("{}", format!("  {}", notice).bright_red().bold());
    eprintln!();
    eprintln!("{}", format!("  To fix: {}", notice.action()).bright_yellow());
    eprintln!();
}

/// Report a failed operation, loudly if it needs an operator
pub fn print_failure(context: &str, failure: &Failure) {
    match &failure.diagnostic {
        Diagnostic::ManualRecovery(notice) => print_recovery(notice),
        diagnostic => print_error(&format!("{}: {}", context, diagnostic)),
    }
}
