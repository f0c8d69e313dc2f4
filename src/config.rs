//! Run configuration.
//!
//! Everything that used to be read from the environment deep inside the
//! pipeline lives in one [`Config`] value that is passed down explicitly.

use tracing::warn;

pub const GITHUB_CREDENTIALS_KEY: &str = "M2T_GITHUB";
pub const LOOKUP_GITHUB_TAGS_KEY: &str = "M2T_GHTAGS";
pub const OFFLINE_KEY: &str = "M2T_OFFLINE";
pub const PREFIX_KEY: &str = "M2T_PREFIX";
pub const DEBUG_KEY: &str = "M2T_DEBUG";

pub const DEFAULT_PACKAGE_PREFIX: &str = "vendor";

/// Github basic-auth credentials (`username:personal_access_token`).
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    /// Parse `username:token`. Anything else yields `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let (username, token) = s.split_once(':')?;
        if username.is_empty() || token.is_empty() || token.contains(':') {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            token: token.to_string(),
        })
    }
}

// Keep tokens out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Disable all network access.
    pub offline: bool,
    /// Look up Github tags and submodule directories.
    pub lookup_github_tags: bool,
    /// Directory under `${WRKSRC}` that vendored packages are placed in.
    pub package_prefix: String,
    pub github_credentials: Option<Credentials>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offline: false,
            lookup_github_tags: false,
            package_prefix: DEFAULT_PACKAGE_PREFIX.to_string(),
            github_credentials: None,
        }
    }
}

impl Config {
    /// Configuration that never touches the network.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Read Github credentials from `M2T_GITHUB`.
    pub fn credentials_from_env() -> Option<Credentials> {
        let raw = std::env::var(GITHUB_CREDENTIALS_KEY).ok()?;
        if raw.is_empty() {
            return None;
        }
        let creds = Credentials::parse(&raw);
        if creds.is_none() {
            warn!(
                "ignoring {}: expected \"username:personal_access_token\"",
                GITHUB_CREDENTIALS_KEY
            );
        }
        creds
    }

    /// Whether per-tuple remote normalization and pass 2 may call out.
    pub fn online(&self) -> bool {
        !self.offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_parse() {
        let c = Credentials::parse("octocat:ghp_123").unwrap();
        assert_eq!(c.username, "octocat");
        assert_eq!(c.token, "ghp_123");
    }

    #[test]
    fn test_credentials_parse_rejects_malformed() {
        assert!(Credentials::parse("octocat").is_none());
        assert!(Credentials::parse(":token").is_none());
        assert!(Credentials::parse("user:").is_none());
        assert!(Credentials::parse("a:b:c").is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let c = Credentials::parse("octocat:secret").unwrap();
        let dbg = format!("{:?}", c);
        assert!(dbg.contains("octocat"));
        assert!(!dbg.contains("secret"));
    }

    #[test]
    fn test_env_keys() {
        for key in [
            GITHUB_CREDENTIALS_KEY,
            LOOKUP_GITHUB_TAGS_KEY,
            OFFLINE_KEY,
            PREFIX_KEY,
            DEBUG_KEY,
        ] {
            assert!(key.starts_with("M2T_"), "{}", key);
        }
    }

    #[test]
    fn test_default_prefix() {
        assert_eq!(Config::default().package_prefix, "vendor");
        assert!(Config::offline().offline);
        assert!(!Config::offline().online());
    }
}
