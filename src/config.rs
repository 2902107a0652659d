//! Command-line configuration: `<program> <port> <password>`.
//!
//! Grounded in the teacher's declared-but-unused `clap` dependency; unlike
//! the teacher's `config.rs` (a TOML file loader), this server's external
//! interface is CLI-args-only (no files, no environment variables).

use clap::Parser;

use crate::constants::MAX_PASSWORD_LEN;
use crate::errors::ConfigError;

#[derive(Parser, Debug)]
#[command(name = "ircd", about = "A small RFC 1459 IRC server")]
struct Cli {
    /// Listening port, in [1024, 65535]
    port: u16,

    /// Server password clients must supply via PASS
    password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub password: String,
}

impl Config {
    /// Parses and validates `std::env::args()`.
    ///
    /// On malformed invocation, usage text is printed to stderr by `clap`
    /// itself (argument count/type errors) or by us (semantic validation
    /// failures), and the process should exit 1.
    pub fn from_args() -> Result<Self, ConfigError> {
        let cli = Cli::parse();
        Self::validate(cli.port, cli.password)
    }

    fn validate(port: u16, password: String) -> Result<Self, ConfigError> {
        if port < 1024 {
            return Err(ConfigError::InvalidPort);
        }
        if password.is_empty()
            || password.len() > MAX_PASSWORD_LEN
            || password.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidPassword);
        }
        Ok(Config { port, password })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_config() {
        let cfg = Config::validate(6667, "right".to_string()).unwrap();
        assert_eq!(cfg.port, 6667);
        assert_eq!(cfg.password, "right");
    }

    #[test]
    fn rejects_low_port() {
        assert_eq!(
            Config::validate(80, "right".to_string()),
            Err(ConfigError::InvalidPort)
        );
    }

    #[test]
    fn rejects_empty_password() {
        assert_eq!(
            Config::validate(6667, "".to_string()),
            Err(ConfigError::InvalidPassword)
        );
    }

    #[test]
    fn rejects_password_with_whitespace() {
        assert_eq!(
            Config::validate(6667, "has space".to_string()),
            Err(ConfigError::InvalidPassword)
        );
    }

    #[test]
    fn rejects_overlong_password() {
        let pw = "a".repeat(51);
        assert_eq!(Config::validate(6667, pw), Err(ConfigError::InvalidPassword));
    }
}
