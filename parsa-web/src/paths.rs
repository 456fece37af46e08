//! Deployment-dependent URLs: static assets under `PUBLIC_URL` and the remote API base.

/// Webhook host used when `PARSA_API_BASE` is not set at compile time.
pub const DEFAULT_API_BASE: &str =
    "https://api.parsa-li.com/webhook/d941ca98-b8fc-4a10-aba8-a6e17706f3ca";

/// When `PUBLIC_URL` is set at compile time (e.g., `/site`), generated URLs
/// are prefixed accordingly. Builds without it fall back to root-anchored paths.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Base URL every API endpoint path is appended to.
#[must_use]
pub fn api_base() -> String {
    api_base_with(option_env!("PARSA_API_BASE"))
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn api_base_with(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Image URLs from the API may be absolute or relative to the site.
#[must_use]
pub fn image_url(src: &str) -> String {
    if src.is_empty() || src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
        src.to_string()
    } else {
        asset_path(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_root_prefixed_path_when_base_missing() {
        assert_eq!(asset_path("static/img/logo.png"), "/static/img/logo.png");
        assert_eq!(asset_path("/static/img/logo.png"), "/static/img/logo.png");
    }

    #[test]
    fn builds_paths_with_public_base() {
        assert_eq!(
            asset_path_with_base("static/img/logo.png", "/site/"),
            "/site/static/img/logo.png"
        );
    }

    #[test]
    fn api_base_falls_back_and_trims() {
        assert_eq!(api_base_with(None), DEFAULT_API_BASE);
        assert_eq!(api_base_with(Some("  ")), DEFAULT_API_BASE);
        assert_eq!(
            api_base_with(Some("http://localhost:5678/webhook/")),
            "http://localhost:5678/webhook"
        );
    }

    #[test]
    fn absolute_images_are_untouched() {
        assert_eq!(image_url("https://cdn.example/a.png"), "https://cdn.example/a.png");
        assert_eq!(image_url("img/flags/de.png"), "/img/flags/de.png");
        assert_eq!(image_url(""), "");
    }
}
