//! CLI progress display utilities
//!
//! Step lines with emoji indicators, falling back to plain text on
//! terminals without emoji support.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/3] 💾 Message`
pub fn print_step(current: usize, total: usize, emoji: &Emoji<'_, '_>, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print an un-numbered status line: `🔍 Message`
pub fn print_status(emoji: &Emoji<'_, '_>, msg: &str) {
    println!("{emoji}{msg}");
}

/// Print completion message: `✨ All done in 2 seconds`
pub fn print_done(elapsed: Duration) {
    println!("{}", done_message(elapsed));
}

fn done_message(elapsed: Duration) -> String {
    format!("{}All done in {}", SPARKLE, HumanDuration(elapsed))
}
