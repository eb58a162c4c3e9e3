//! clap value parsers for arguments clap cannot check on its own

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

const MAX_ROLLBACK_STEPS: u32 = 100;

/// RFC 1123 host name: dot separated labels of letters, digits and inner hyphens
static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("hostname pattern is valid")
});

/// Port between 1 and 65535
pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a number between 1 and 65535, got: '{}'",
            value
        )),
    }
}

/// Existing, readable file
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", value));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", value));
    }
    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", value, e))
}

/// Between 1 and 100 migrations
pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value.parse().map_err(|_| {
        format!(
            "Rollback steps must be a positive number, got: '{}'",
            value
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {}",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

/// IP address (v4 or v6) or host name
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // Dotted digits that failed to parse are a malformed IPv4 address
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address: '{}'", value));
    }
    if host.len() > 253 || !HOSTNAME.is_match(host) {
        return Err(format!("Invalid host name: '{}'", value));
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "8080", "65535"] {
            assert!(validate_port(port).is_ok(), "Port {port} should be valid");
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "Port '{port}' should be invalid");
        }
    }

    #[test]
    fn test_host_validation_valid_hosts() {
        for host in [
            "localhost",
            "127.0.0.1",
            "0.0.0.0",
            "::1",
            "school-api.internal",
            " 10.0.0.1 ",
        ] {
            assert!(validate_host_address(host).is_ok(), "Host {host} should be valid");
        }
        assert_eq!(validate_host_address(" 10.0.0.1 ").unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_host_validation_invalid_hosts() {
        let long = "x".repeat(300);
        for host in [
            "",
            "   ",
            "host with spaces",
            "999.999.999.999",
            "-leading.dash",
            "under_score",
            long.as_str(),
        ] {
            assert!(validate_host_address(host).is_err(), "Host '{host}' should be invalid");
        }
    }

    #[test]
    fn test_rollback_steps_validation() {
        for steps in ["1", "50", "100"] {
            assert!(validate_rollback_steps(steps).is_ok());
        }
        for steps in ["0", "101", "-1", "abc", ""] {
            assert!(validate_rollback_steps(steps).is_err(), "Steps '{steps}' should be invalid");
        }
    }

    #[test]
    fn test_config_file_path_validation() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        std::fs::write(&file, "[server]\n").unwrap();

        assert_eq!(validate_config_file_path(file.to_str().unwrap()).unwrap(), file);
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
