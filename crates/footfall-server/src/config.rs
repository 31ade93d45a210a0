//! Server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use footfall_predict::ClientConfig;

/// Port the host listens on by default.
pub const DEFAULT_PORT: u16 = 3004;

/// How admin routes authenticate callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Every admin request runs as the fixed demo principal.
    ///
    /// Only meant for local demos; the server logs a warning at startup.
    Demo,
    /// Admin requests must present one of these bearer tokens.
    Token {
        /// Accepted tokens.
        tokens: Vec<String>,
    },
}

impl AuthMode {
    /// Token mode with the given tokens.
    #[must_use]
    pub fn token<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Token {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true for [`AuthMode::Demo`].
    #[must_use]
    pub const fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }

    /// Returns the mode name as used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Token { .. } => "token",
        }
    }
}

impl Default for AuthMode {
    /// Token mode with no tokens: admin routes stay closed until configured.
    fn default() -> Self {
        Self::Token { tokens: Vec::new() }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration for [`serve`](crate::serve).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub addr: SocketAddr,
    /// Admin authentication.
    pub auth: AuthMode,
    /// Prediction service client settings.
    pub predict: ClientConfig,
    /// Prediction log directory; the platform data directory when unset.
    pub store_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            auth: AuthMode::default(),
            predict: ClientConfig::default(),
            store_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 3004);
        assert!(config.addr.ip().is_unspecified());
        assert_eq!(config.auth, AuthMode::Token { tokens: Vec::new() });
        assert!(config.store_path.is_none());
    }

    #[test]
    fn test_auth_mode_names() {
        assert_eq!(AuthMode::Demo.to_string(), "demo");
        assert_eq!(AuthMode::token(["abc"]).to_string(), "token");
        assert!(AuthMode::Demo.is_demo());
        assert!(!AuthMode::token(Vec::<String>::new()).is_demo());
    }
}
