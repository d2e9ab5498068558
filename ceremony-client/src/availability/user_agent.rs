use serde::{Deserialize, Serialize};

use super::Version;

/// Operating system families a [`CompatibilityRule`](super::CompatibilityRule) can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    MacOs,
    /// Desktop Linux
    Linux,
    /// Google Android
    Android,
    /// Apple iOS and iPadOS
    Ios,
    /// Anything not recognized.
    #[serde(other)]
    Other,
}

/// Browser families a [`CompatibilityRule`](super::CompatibilityRule) can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// Google Chrome and Chromium
    Chrome,
    /// Microsoft Edge
    Edge,
    /// Mozilla Firefox
    Firefox,
    /// Apple Safari
    Safari,
    /// Opera
    Opera,
    /// Anything not recognized.
    #[serde(other)]
    Other,
}

/// The parts of a `User-Agent` string relevant to feature detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    /// The operating system.
    pub platform: Platform,
    /// The browser.
    pub browser: Browser,
    /// The browser's version, when it could be read.
    pub version: Option<Version>,
}

impl UserAgent {
    /// Classify a `User-Agent` header value.
    ///
    /// Chromium based browsers all announce themselves as `Chrome`, so the more specific tokens are
    /// looked at first.
    pub fn parse(user_agent: &str) -> Self {
        let platform = parse_platform(user_agent);
        let (browser, version) = parse_browser(user_agent)
            .map(|(browser, version)| (browser, version.parse::<Version>().ok()))
            .unwrap_or((Browser::Other, None));

        Self {
            platform,
            browser,
            version,
        }
    }
}

fn parse_platform(ua: &str) -> Platform {
    if ua.contains("Windows") {
        Platform::Windows
    } else if ua.contains("Android") {
        Platform::Android
    } else if ["iPhone", "iPad", "iPod"].iter().any(|t| ua.contains(t)) {
        Platform::Ios
    } else if ua.contains("Macintosh") || ua.contains("Mac OS X") {
        Platform::MacOs
    } else if ua.contains("Linux") || ua.contains("X11") {
        Platform::Linux
    } else {
        Platform::Other
    }
}

const BROWSER_TOKENS: &[(&str, Browser)] = &[
    ("Edg", Browser::Edge),
    ("EdgA", Browser::Edge),
    ("EdgiOS", Browser::Edge),
    ("Edge", Browser::Edge),
    ("OPR", Browser::Opera),
    ("OPiOS", Browser::Opera),
    ("Opera", Browser::Opera),
    ("Firefox", Browser::Firefox),
    ("FxiOS", Browser::Firefox),
    ("CriOS", Browser::Chrome),
    ("Chrome", Browser::Chrome),
];

fn parse_browser(ua: &str) -> Option<(Browser, &str)> {
    if let Some(found) = BROWSER_TOKENS
        .iter()
        .find_map(|(token, browser)| product_version(ua, token).map(|v| (*browser, v)))
    {
        return Some(found);
    }

    // Safari reports its own version in a separate `Version/` product.
    if product_version(ua, "Safari").is_some() {
        return Some((Browser::Safari, product_version(ua, "Version").unwrap_or("")));
    }

    None
}

/// The version following `product/` in `ua`, e.g. `119.0.6045.105` for `Chrome`.
fn product_version<'a>(ua: &'a str, product: &str) -> Option<&'a str> {
    ua.split_whitespace().find_map(|part| {
        let rest = part.strip_prefix(product)?.strip_prefix('/')?;
        let end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        Some(&rest[..end])
    })
}
