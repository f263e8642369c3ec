//! Formatting rules shared by every template

use crate::document::parse_year_month;

pub const PORTFOLIO_LABEL: &str = "Portfolio";
pub const LINKEDIN_LABEL: &str = "LinkedIn";
pub const GITHUB_LABEL: &str = "GitHub";
pub const PROJECT_LINK_LABEL: &str = "Link";
pub const CREDENTIAL_LABEL: &str = "Credential";
pub const PRESENT: &str = "Present";
/// Separator between the two ends of a date range
pub const RANGE_SEPARATOR: &str = " \u{2013} ";

const LONG_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    /// `Jan 2020`
    Short,
    /// `January 2020`
    Long,
}

/// Format a `YYYY-MM` value as `{Month} {Year}`.
///
/// Empty input gives empty output; a value that is not a year-month is
/// shown as given.
pub fn format_date(value: &str, style: MonthStyle) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    match parse_year_month(value) {
        Some((year, month)) => {
            let name = LONG_MONTHS[(month - 1) as usize];
            match style {
                MonthStyle::Long => format!("{} {}", name, year),
                MonthStyle::Short => format!("{} {}", &name[..3], year),
            }
        }
        None => value.to_string(),
    }
}

/// Format a date range; `current` forces `Present` whatever `end` holds.
///
/// A missing end is left off rather than leaving a dangling separator.
pub fn format_range(start: &str, end: Option<&str>, current: bool, style: MonthStyle) -> String {
    let start = format_date(start, style);
    let end = if current {
        PRESENT.to_string()
    } else {
        format_date(end.unwrap_or(""), style)
    };
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{}{}{}", start, RANGE_SEPARATOR, end),
        (false, true) => start,
        (true, _) => end,
    }
}

/// Turn a raw link value into a clickable href.
///
/// Qualified http(s) URLs pass through, values containing `@` become
/// `mailto:` links and anything else gets `https://` prepended.
pub fn ensure_href(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else if raw.contains('@') {
        format!("mailto:{}", raw)
    } else {
        format!("https://{}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_months_by_style() {
        assert_eq!(format_date("2020-01", MonthStyle::Short), "Jan 2020");
        assert_eq!(format_date("2021-09", MonthStyle::Long), "September 2021");
        assert_eq!(format_date("", MonthStyle::Long), "");
        assert_eq!(format_date("soon", MonthStyle::Short), "soon");
    }

    #[test]
    fn current_always_ends_in_present() {
        assert_eq!(format_range("2020-01", Some("2023-05"), true, MonthStyle::Short), "Jan 2020 \u{2013} Present");
        assert_eq!(format_range("2020-01", Some("garbage"), true, MonthStyle::Short), "Jan 2020 \u{2013} Present");
        assert_eq!(format_range("", None, true, MonthStyle::Long), "Present");
    }

    #[test]
    fn partial_ranges_have_no_dangling_separator() {
        assert_eq!(format_range("2020-01", None, false, MonthStyle::Short), "Jan 2020");
        assert_eq!(format_range("", Some("2019-12"), false, MonthStyle::Short), "Dec 2019");
        assert_eq!(format_range("", None, false, MonthStyle::Short), "");
    }

    #[test]
    fn normalizes_links() {
        assert_eq!(ensure_href("example.com"), "https://example.com");
        assert_eq!(ensure_href("a@b.com"), "mailto:a@b.com");
        assert_eq!(ensure_href("https://x.com"), "https://x.com");
        assert_eq!(ensure_href("HTTP://X.com"), "HTTP://X.com");
        assert_eq!(ensure_href(""), "");
    }
}
