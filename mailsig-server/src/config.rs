//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use mailsig::KeyPair;

use crate::ServerError;

const SECS_PER_HOUR: u64 = 3600;

/// Startup configuration.
///
/// Every flag falls back to an environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "mailsig-server")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// PEM-encoded RSA private key used to sign tokens
    #[arg(long, env = "PRIVATE_KEY_PATH")]
    pub private_key_path: PathBuf,

    /// PEM-encoded RSA public key used to verify tokens
    #[arg(long, env = "PUBLIC_KEY_PATH")]
    pub public_key_path: PathBuf,

    /// Lifetime of issued tokens, in hours
    #[arg(long, env = "SIGNATURE_TTL_HOURS")]
    pub signature_ttl_hours: u64,

    /// Address to listen on
    #[arg(long, env = "MAILSIG_LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,
}

impl Config {
    /// Returns the token lifetime.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Config` if the TTL is zero or overflows.
    pub fn signature_ttl(&self) -> Result<Duration, ServerError> {
        if self.signature_ttl_hours == 0 {
            return Err(ServerError::Config {
                reason: "SIGNATURE_TTL_HOURS must be at least 1".to_string(),
            });
        }

        self.signature_ttl_hours
            .checked_mul(SECS_PER_HOUR)
            .map(Duration::from_secs)
            .ok_or_else(|| ServerError::Config {
                reason: format!(
                    "SIGNATURE_TTL_HOURS is too large: {}",
                    self.signature_ttl_hours
                ),
            })
    }

    /// Loads and cross-checks the configured key pair.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Core` if either key cannot be loaded or they
    /// do not belong together.
    pub fn load_keys(&self) -> Result<KeyPair, ServerError> {
        Ok(KeyPair::from_pem_files(
            &self.private_key_path,
            &self.public_key_path,
        )?)
    }
}
