//! Serve command implementation.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use footfall_lib::{AuthMode, ClientConfig, ServerConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Admin authentication mode as given on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum AuthArg {
    /// Admin routes run as a fixed demo user
    Demo,
    /// Admin routes require a bearer token
    Token,
}

/// Run the HTTP API until interrupted.
pub(crate) async fn serve(
    host: IpAddr,
    port: u16,
    ml_url: &str,
    auth_mode: AuthArg,
    tokens: Vec<String>,
    store: Option<PathBuf>,
) -> Result<()> {
    let tokens: Vec<String> = tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect();

    let auth = match auth_mode {
        AuthArg::Demo if !tokens.is_empty() => {
            bail!("--token has no effect with --auth-mode demo")
        }
        AuthArg::Demo => AuthMode::Demo,
        AuthArg::Token => AuthMode::Token { tokens },
    };

    let config = ServerConfig {
        addr: SocketAddr::new(host, port),
        auth,
        predict: ClientConfig::with_base_url(ml_url),
        store_path: store,
    };

    footfall_lib::serve(config)
        .await
        .context("Server failed")
}
