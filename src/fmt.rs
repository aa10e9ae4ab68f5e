//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅ ", "[OK] ");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌ ", "[FAIL] ");

/// Sparkles emoji for completion
pub const SPARKLES: Emoji = Emoji("✨ ", "* ");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️ ", "i ");

/// Chart emoji for size tables
pub const CHART: Emoji = Emoji("📊 ", "~ ");

/// Package emoji for app and feature totals
pub const PACKAGE: Emoji = Emoji("📦 ", "# ");

/// Microscope emoji for analysis stages
pub const MICROSCOPE: Emoji = Emoji("🔍 ", ">> ");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️ ", "! ");

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use bundle_ruler::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a signed size change with an explicit sign
///
/// ```
/// use bundle_ruler::fmt::format_delta;
///
/// assert_eq!(format_delta(2048), "+2.00 KB");
/// assert_eq!(format_delta(-100), "-100 B");
/// assert_eq!(format_delta(0), "0 B");
/// ```
pub fn format_delta(delta: i64) -> String {
    let magnitude = format_bytes(delta.unsigned_abs());
    match delta.signum() {
        1 => format!("+{}", magnitude),
        -1 => format!("-{}", magnitude),
        _ => magnitude,
    }
}

/// Truncate from the left so the distinguishing tail of a path stays visible
///
/// ```
/// use bundle_ruler::fmt::truncate_start;
///
/// assert_eq!(truncate_start("short", 10), "short");
/// assert_eq!(truncate_start("/res/drawable/icon.png", 12), ".../icon.png");
/// ```
pub fn truncate_start(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let tail: String = s.chars().skip(len - keep).collect();
    format!("...{}", tail)
}
