//! Live streaming platforms the recorder knows how to follow.

/// A registered streaming platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedPlatform {
    /// Identifier stored in [`Streamer::platform`](crate::Streamer::platform).
    pub name: &'static str,
    /// Name shown in the UI.
    pub display_name: &'static str,
    /// Host the profile URLs live on.
    host: &'static str,
}

/// Every platform the recorder supports.
pub const SUPPORTED_PLATFORMS: &[SupportedPlatform] = &[SupportedPlatform {
    name: "tiktok",
    display_name: "TikTok",
    host: "tiktok.com",
}];

/// Looks a platform up by its identifier (case-insensitive).
pub fn find_platform(name: &str) -> Option<&'static SupportedPlatform> {
    SUPPORTED_PLATFORMS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

impl SupportedPlatform {
    /// URL of the streamer's profile page.
    pub fn profile_url(&self, username: &str) -> String {
        format!("https://www.{}/@{username}", self.host)
    }

    /// URL of the streamer's live page.
    pub fn live_url(&self, username: &str) -> String {
        format!("{}/live", self.profile_url(username))
    }

    /// Extracts the username from a profile or live URL.
    ///
    /// The username is the text following `<host>/@`, up to the next `/`,
    /// `?` or `#`.  Returns `None` if the URL does not contain one.
    pub fn username_from_url(&self, url: &str) -> Option<String> {
        let marker = format!("{}/@", self.host);
        let start = url.find(&marker)? + marker.len();
        let rest = &url[start..];
        let end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
        let username = &rest[..end];
        (!username.is_empty()).then(|| username.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiktok() -> &'static SupportedPlatform {
        find_platform("TikTok").expect("tiktok is registered")
    }

    #[test]
    fn test_tiktok_urls() {
        assert_eq!(tiktok().profile_url("alice"), "https://www.tiktok.com/@alice");
        assert_eq!(tiktok().live_url("alice"), "https://www.tiktok.com/@alice/live");
    }

    #[test]
    fn test_username_from_url() {
        let p = tiktok();
        assert_eq!(
            p.username_from_url("https://www.tiktok.com/@tv_asahi_news/live").as_deref(),
            Some("tv_asahi_news")
        );
        assert_eq!(
            p.username_from_url("tiktok.com/@bob?lang=en").as_deref(),
            Some("bob")
        );
        assert_eq!(p.username_from_url("https://www.tiktok.com/@"), None);
        assert_eq!(p.username_from_url("https://example.com/@bob"), None);
    }

    #[test]
    fn test_unknown_platform() {
        assert!(find_platform("twitch").is_none());
    }
}
