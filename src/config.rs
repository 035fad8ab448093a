use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub board_rows: usize,
    pub board_cols: usize,
    pub min_vowels: usize,
    pub round_seconds: u32,
    pub solve_timeout_ms: u64,
    pub parallel_solve: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dictionary_path: "./enable1.txt".to_string(),
            board_rows: 4,
            board_cols: 4,
            min_vowels: 3,
            round_seconds: 120,
            solve_timeout_ms: 2000,
            parallel_solve: true,
        }
    }
}

impl GameConfig {
    pub fn solve_timeout(&self) -> Duration {
        Duration::from_millis(self.solve_timeout_ms)
    }
}

/// Read `name`, falling back to `default` when unset.
fn var_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: var_or("PORT", 3000).context("PORT must be a number")?,
        };

        let defaults = GameConfig::default();
        let game = GameConfig {
            dictionary_path: env::var("DICTIONARY_PATH").unwrap_or(defaults.dictionary_path),
            board_rows: var_or("BOARD_ROWS", defaults.board_rows)?,
            board_cols: var_or("BOARD_COLS", defaults.board_cols)?,
            min_vowels: var_or("MIN_VOWELS", defaults.min_vowels)?,
            round_seconds: var_or("ROUND_SECONDS", defaults.round_seconds)?,
            solve_timeout_ms: var_or("SOLVE_TIMEOUT_MS", defaults.solve_timeout_ms)?,
            parallel_solve: var_or("PARALLEL_SOLVE", defaults.parallel_solve)?,
        };

        if game.board_rows == 0 || game.board_cols == 0 {
            anyhow::bail!("BOARD_ROWS and BOARD_COLS must be at least 1");
        }

        Ok(Config { server, game })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_or_default_when_unset() {
        let value: u32 = var_or("RAMBLE_TEST_UNSET_VARIABLE", 17).unwrap();
        assert_eq!(value, 17);
    }

    #[test]
    fn test_var_or_parses_and_rejects() {
        env::set_var("RAMBLE_TEST_ROUND_SECONDS", " 45 ");
        let value: u32 = var_or("RAMBLE_TEST_ROUND_SECONDS", 120).unwrap();
        assert_eq!(value, 45);

        env::set_var("RAMBLE_TEST_PARALLEL", "maybe");
        assert!(var_or("RAMBLE_TEST_PARALLEL", true).is_err());
    }

    #[test]
    fn test_defaults() {
        let game = GameConfig::default();
        assert_eq!((game.board_rows, game.board_cols), (4, 4));
        assert_eq!(game.round_seconds, 120);
        assert_eq!(game.solve_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            game: GameConfig::default(),
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
