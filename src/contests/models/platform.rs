use crate::constants::endpoints;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contest platforms with a supported source adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    CodeChef,
    LeetCode,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Codeforces, Platform::CodeChef, Platform::LeetCode];

    /// Lowercase identifier used in contest ids, config keys and CLI arguments
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Codeforces => "codeforces",
            Platform::CodeChef => "codechef",
            Platform::LeetCode => "leetcode",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Codeforces => "Codeforces",
            Platform::CodeChef => "CodeChef",
            Platform::LeetCode => "LeetCode",
        }
    }

    /// Two-letter badge shown in compact listings
    pub fn short_code(&self) -> &'static str {
        match self {
            Platform::Codeforces => "CF",
            Platform::CodeChef => "CC",
            Platform::LeetCode => "LC",
        }
    }

    /// Public contest list endpoint used when the config does not override it
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Platform::Codeforces => endpoints::CODEFORCES_CONTESTS,
            Platform::CodeChef => endpoints::CODECHEF_CONTESTS,
            Platform::LeetCode => endpoints::LEETCODE_GRAPHQL,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "codeforces" | "cf" => Ok(Platform::Codeforces),
            "codechef" | "cc" => Ok(Platform::CodeChef),
            "leetcode" | "lc" => Ok(Platform::LeetCode),
            other => Err(AppError::config_error(format!(
                "Unknown contest source '{other}' (expected codeforces, codechef or leetcode)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str_accepts_slugs_and_codes() {
        assert_eq!("codeforces".parse::<Platform>().unwrap(), Platform::Codeforces);
        assert_eq!("CC".parse::<Platform>().unwrap(), Platform::CodeChef);
        assert_eq!(" LeetCode ".parse::<Platform>().unwrap(), Platform::LeetCode);
        assert!("atcoder".parse::<Platform>().is_err());
    }

    #[test]
    fn test_slug_roundtrip() {
        for platform in Platform::ALL {
            assert_eq!(platform.slug().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Platform::CodeChef.to_string(), "CodeChef");
    }
}
