use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "chain-explorer", about = "Read-only terminal blockchain explorer")]
pub struct Config {
    /// RPC endpoint URL (http://)
    #[arg(short, long, env = "EXPLORER_RPC_URL", default_value = "https://eth.replit.com")]
    pub rpc_url: String,

    /// Top block of the recent window. Follows the live head when omitted.
    #[arg(long, env = "EXPLORER_START_BLOCK")]
    pub start_block: Option<u64>,

    /// Number of recent blocks shown on the latest-blocks screen
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    pub window: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value = "15000")]
    pub fetch_timeout_ms: u64,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// Open an address or transaction hash on start-up
    #[arg(short, long)]
    pub search: Option<String>,

    /// Diagnostic log file (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(path) => path.clone(),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("chain-explorer")
                .join("explorer.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["chain-explorer"]);
        assert_eq!(config.window, 10);
        assert_eq!(config.start_block, None);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_start_block_and_window() {
        let config =
            Config::parse_from(["chain-explorer", "--start-block", "172414", "--window", "3"]);
        assert_eq!(config.start_block, Some(172414));
        assert_eq!(config.window, 3);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(Config::try_parse_from(["chain-explorer", "--window", "0"]).is_err());
    }

    #[test]
    fn test_explicit_log_file() {
        let config = Config::parse_from(["chain-explorer", "--log-file", "/tmp/x.log"]);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/x.log"));
    }
}
