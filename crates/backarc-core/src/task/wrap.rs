//! Archive endpoint wrapping.

/// Known archive.today mirror hosts. One is picked at random per task to
/// spread submissions across mirrors.
pub const ARCHIVE_TODAY_HOSTS: &[&str] = &[
    "archive.today",
    "archive.li",
    "archive.vn",
    "archive.fo",
    "archive.md",
    "archive.ph",
    "archive.is",
];

/// Wayback Machine save endpoint for a backlink.
pub fn wrap_for_wayback(url: &str) -> String {
    format!("https://web.archive.org/save/{}", urlencoding::encode(url))
}

/// archive.today submission endpoint on the given mirror. `anyway=1` forces
/// a fresh snapshot even when one already exists.
pub fn wrap_for_archive_today(url: &str, host: &str) -> String {
    format!(
        "https://{}/submit/?anyway=1&url={}",
        host,
        urlencoding::encode(url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wayback_encodes_the_backlink() {
        assert_eq!(
            wrap_for_wayback("https://example.com/a?b=c"),
            "https://web.archive.org/save/https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"
        );
    }

    #[test]
    fn archive_today_uses_mirror_and_anyway_flag() {
        assert_eq!(
            wrap_for_archive_today("https://example.com/x", "archive.ph"),
            "https://archive.ph/submit/?anyway=1&url=https%3A%2F%2Fexample.com%2Fx"
        );
    }

    #[test]
    fn mirror_list_has_seven_hosts() {
        assert_eq!(ARCHIVE_TODAY_HOSTS.len(), 7);
        assert!(ARCHIVE_TODAY_HOSTS.contains(&"archive.today"));
    }
}
