/// End-to-end tests for the server binary
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("v-track")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--rate-limit"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("v-track")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("v-track")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid cache capacity value
    #[test]
    fn test_exit_code_invalid_cache_capacity() {
        cargo_bin_cmd!("v-track")
            .args(["--cache-capacity", "lots"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - no API token configured
    #[test]
    fn test_exit_code_missing_token() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("v-track")
            .current_dir(dir.path())
            .env_remove("VTRACK_API_TOKEN")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Missing API token"));
    }

    /// Exit code 3: Application error - explicit config file does not exist
    #[test]
    fn test_exit_code_missing_config_file() {
        cargo_bin_cmd!("v-track")
            .args(["--config", "/nonexistent/v-track.config.yml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to read config file"));
    }

    /// Exit code 3: Application error - invalid rate limit
    #[test]
    fn test_exit_code_invalid_rate_limit() {
        cargo_bin_cmd!("v-track")
            .env("VTRACK_API_TOKEN", "token")
            .args(["--rate-limit", "often"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("rate_limit"));
    }
}

#[test]
fn test_discovered_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("v-track.config.yml"),
        "api_token: from-file\ncache_capacity: 0\n",
    )
    .unwrap();

    cargo_bin_cmd!("v-track")
        .current_dir(dir.path())
        .env_remove("VTRACK_API_TOKEN")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cache_capacity"));
}

#[test]
fn test_invalid_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yml");
    fs::write(&path, "invalid: yaml: [[[broken").unwrap();

    cargo_bin_cmd!("v-track")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_unbindable_address_fails() {
    cargo_bin_cmd!("v-track")
        .env("VTRACK_API_TOKEN", "token")
        .args(["--bind", "not-an-address"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to bind"));
}
