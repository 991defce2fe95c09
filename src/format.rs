use chrono::Duration;
use itertools::Itertools;

/// Formats uptime as `{hours}h {minutes}m`, flooring both parts.
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

/// Formats a memory size in kibibytes with a single decimal, rounding halves up.
pub fn format_free_heap(bytes: u64) -> String {
    let tenths = bytes.saturating_mul(10).saturating_add(512) / 1024;
    format!("{}.{} KB", tenths / 10, tenths % 10)
}

/// Groups digits by thousands: `2847` becomes `2,847`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let head = digits.len() % 3;
    let mut groups = Vec::new();
    if head != 0 {
        groups.push(&digits[..head]);
    }
    groups.extend((head..digits.len()).step_by(3).map(|i| &digits[i..i + 3]));
    groups.into_iter().join(",")
}

/// Formats time since the last update, e.g. `25s ago`.
pub fn format_age(age: Duration) -> String {
    let seconds = age.num_seconds().max(0);
    match seconds {
        _ if seconds < 60 => format!("{}s ago", seconds),
        _ if seconds < 3600 => format!("{}m ago", seconds / 60),
        _ if seconds < 86400 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86400),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_floors_to_minutes() {
        assert_eq!(format_uptime(1250), "0h 20m");
    }

    #[test]
    fn uptime_over_a_day() {
        assert_eq!(format_uptime(0), "0h 0m");
        assert_eq!(format_uptime(3600), "1h 0m");
        assert_eq!(format_uptime(90061), "25h 1m");
    }

    #[test]
    fn free_heap() {
        assert_eq!(format_free_heap(180_000), "175.8 KB");
        assert_eq!(format_free_heap(0), "0.0 KB");
        assert_eq!(format_free_heap(1024), "1.0 KB");
    }

    #[test]
    fn free_heap_rounds_halves_up() {
        assert_eq!(format_free_heap(256), "0.3 KB");
        assert_eq!(format_free_heap(1280), "1.3 KB");
        assert_eq!(format_free_heap(255), "0.2 KB");
    }

    #[test]
    fn thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(2847), "2,847");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(100_000), "100,000");
    }

    #[test]
    fn age() {
        assert_eq!(format_age(Duration::seconds(25)), "25s ago");
        assert_eq!(format_age(Duration::seconds(59)), "59s ago");
        assert_eq!(format_age(Duration::seconds(61)), "1m ago");
        assert_eq!(format_age(Duration::seconds(7300)), "2h ago");
        assert_eq!(format_age(Duration::days(3)), "3d ago");
    }

    #[test]
    fn negative_age() {
        assert_eq!(format_age(Duration::seconds(-5)), "0s ago");
    }
}
