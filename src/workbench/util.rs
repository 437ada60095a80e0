// SPDX-License-Identifier: MIT

//! Small helpers shared by list and table views

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, Utc};

/// Build a unique slug with the given prefix.
///
/// 9 random bytes, base64-encoded with `-` and `_` in place of `+` and `/`, so
/// the result matches `^[-a-zA-Z0-9_]+$`. 72 bits keeps the chance of a
/// collision within one workflow below 10^-12 for ~97,000 slugs; 9 bytes
/// encode to exactly 12 characters with no padding.
pub fn generate_slug(prefix: &str) -> String {
    let bytes: [u8; 9] = rand::random();
    format!("{}{}", prefix, URL_SAFE.encode(bytes))
}

/// Spreadsheet-style column letter: 0 → "A", 25 → "Z", 26 → "AA"
pub fn idx_to_letter(idx: usize) -> String {
    let mut letters = Vec::new();
    let mut n = idx + 1;
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Short "how long ago" label, e.g. `"3d ago"`
pub fn time_difference(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let ms = (end - start).num_milliseconds();
    let seconds = ms.div_euclid(1000);
    let minutes = seconds.div_euclid(60);
    let hours = minutes.div_euclid(60);
    let days = hours.div_euclid(24);
    let years = (days as f64 / 365.25).floor() as i64;

    if years > 0 {
        format!("{}y ago", years)
    } else if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else if seconds > 0 {
        format!("{}s ago", seconds)
    } else {
        "just now".to_string()
    }
}

/// Vertical extent of an element, in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalRect {
    pub top: f64,
    pub bottom: f64,
}

pub const DEFAULT_SCROLL_MARGIN: f64 = 10.0;

/// How far to add to a container's `scrollTop` so that `el` is in view with
/// the given margins, scrolling as little as possible.
///
/// When `el` is taller than the container, its top wins over its bottom.
pub fn scroll_delta(
    el: VerticalRect,
    container: VerticalRect,
    margin_top: f64,
    margin_bottom: f64,
) -> f64 {
    let mut dy = 0.0;
    if el.bottom + margin_bottom > container.bottom {
        dy += el.bottom + margin_bottom - container.bottom;
    }
    // after scrolling by dy, el.top sits at el.top - dy
    if el.top - dy - margin_top < container.top {
        dy = el.top - margin_top - container.top;
    }
    dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_slug_shape() {
        let slug = generate_slug("step-");
        assert!(slug.starts_with("step-"));
        let body = &slug["step-".len()..];
        assert_eq!(body.len(), 12);
        assert!(body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_slugs_differ() {
        assert_ne!(generate_slug(""), generate_slug(""));
    }

    #[test]
    fn test_idx_to_letter() {
        assert_eq!(idx_to_letter(0), "A");
        assert_eq!(idx_to_letter(25), "Z");
        assert_eq!(idx_to_letter(26), "AA");
        assert_eq!(idx_to_letter(27), "AB");
        assert_eq!(idx_to_letter(701), "ZZ");
        assert_eq!(idx_to_letter(702), "AAA");
    }

    #[test]
    fn test_time_difference() {
        let start = Utc::now();
        let ago = |d: Duration| time_difference(start, start + d);

        assert_eq!(ago(Duration::milliseconds(500)), "just now");
        assert_eq!(ago(Duration::seconds(-5)), "just now");
        assert_eq!(ago(Duration::seconds(42)), "42s ago");
        assert_eq!(ago(Duration::minutes(3)), "3m ago");
        assert_eq!(ago(Duration::hours(5)), "5h ago");
        assert_eq!(ago(Duration::days(364)), "364d ago");
        assert_eq!(ago(Duration::days(800)), "2y ago");
    }

    #[test]
    fn test_scroll_delta_no_scroll_when_visible() {
        let container = VerticalRect { top: 0.0, bottom: 500.0 };
        let el = VerticalRect { top: 100.0, bottom: 150.0 };
        assert_eq!(scroll_delta(el, container, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_scroll_delta_down() {
        let container = VerticalRect { top: 0.0, bottom: 500.0 };
        let el = VerticalRect { top: 480.0, bottom: 530.0 };
        assert_eq!(scroll_delta(el, container, 10.0, 10.0), 40.0);
    }

    #[test]
    fn test_scroll_delta_up() {
        let container = VerticalRect { top: 100.0, bottom: 500.0 };
        let el = VerticalRect { top: 50.0, bottom: 80.0 };
        assert_eq!(scroll_delta(el, container, 10.0, 10.0), -60.0);
    }

    #[test]
    fn test_scroll_delta_tall_element_shows_top() {
        let container = VerticalRect { top: 0.0, bottom: 100.0 };
        let el = VerticalRect { top: 50.0, bottom: 400.0 };
        // Scrolling down by 310 would push the top out; settle on top - margin.
        assert_eq!(scroll_delta(el, container, 10.0, 10.0), 40.0);
    }
}
