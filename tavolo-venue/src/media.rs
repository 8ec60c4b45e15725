use url::Url;

pub const DEFAULT_VENUE_IMAGE: &str = "/static/images/default-venue.jpg";
pub const DEFAULT_MENU_IMAGE: &str = "/static/images/default-menu.jpg";

fn is_valid_image_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host().is_some(),
        Err(_) => false,
    }
}

/// Venue and menu images come from user input. Anything that is not an
/// absolute http(s) URL falls back to the bundled default so clients never
/// render `javascript:` or relative garbage.
pub fn safe_image_url(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        Some(url) if is_valid_image_url(url) => url.to_string(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_http_urls() {
        let url = safe_image_url(Some("https://cdn.example.com/venue.jpg"), DEFAULT_VENUE_IMAGE);
        assert_eq!(url, "https://cdn.example.com/venue.jpg");
    }

    #[test]
    fn falls_back_on_missing_or_relative_urls() {
        assert_eq!(safe_image_url(None, DEFAULT_MENU_IMAGE), DEFAULT_MENU_IMAGE);
        assert_eq!(
            safe_image_url(Some("../etc/passwd"), DEFAULT_VENUE_IMAGE),
            DEFAULT_VENUE_IMAGE
        );
    }

    #[test]
    fn falls_back_on_non_http_schemes() {
        assert_eq!(
            safe_image_url(Some("javascript:alert(1)"), DEFAULT_VENUE_IMAGE),
            DEFAULT_VENUE_IMAGE
        );
        assert_eq!(
            safe_image_url(Some("ftp://example.com/a.jpg"), DEFAULT_VENUE_IMAGE),
            DEFAULT_VENUE_IMAGE
        );
    }
}
