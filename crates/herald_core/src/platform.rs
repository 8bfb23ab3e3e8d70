//! Target platform types.

use serde::{Deserialize, Serialize};

/// Social platforms Herald can publish to.
///
/// # Examples
///
/// ```
/// use herald_core::Platform;
///
/// assert_eq!(format!("{}", Platform::LinkedIn), "linkedin");
/// assert_eq!(Platform::Twitter.media_limit(), 4);
/// assert!(Platform::Instagram.requires_media());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    /// LinkedIn member posts
    LinkedIn,
    /// Instagram business account posts
    Instagram,
    /// Twitter/X posts
    Twitter,
    /// Facebook page posts
    Facebook,
}

impl Platform {
    /// Maximum number of media attachments the platform accepts per post.
    pub fn media_limit(&self) -> usize {
        match self {
            Platform::Instagram => 20,
            Platform::Twitter => 4,
            Platform::LinkedIn => 20,
            Platform::Facebook => 40,
        }
    }

    /// Whether the platform mandates at least one media attachment.
    pub fn requires_media(&self) -> bool {
        matches!(self, Platform::Instagram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!(Platform::from_str("linkedin").unwrap(), Platform::LinkedIn);
        assert_eq!(Platform::from_str("twitter").unwrap(), Platform::Twitter);
        assert!(Platform::from_str("myspace").is_err());
    }

    #[test]
    fn media_limits_match_platform_rules() {
        assert_eq!(Platform::Twitter.media_limit(), 4);
        assert_eq!(Platform::Facebook.media_limit(), 40);
        assert!(Platform::Instagram.requires_media());
        assert!(!Platform::LinkedIn.requires_media());
    }
}
