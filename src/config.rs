use std::{env, net::SocketAddr, str::FromStr};

use crate::error::AppError;

/// What an assigned driver may write into a trip's `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverStatusPolicy {
    /// Any non-empty string is written verbatim.
    #[default]
    Permissive,
    /// Only `in_progress` and `completed`.
    ForwardOnly,
}

impl FromStr for DriverStatusPolicy {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "forward-only" | "forward_only" => Ok(Self::ForwardOnly),
            other => Err(AppError::Config(format!(
                "invalid DRIVER_STATUS_POLICY: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub seed_demo_data: bool,
    pub driver_status_policy: DriverStatusPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            seed_demo_data: true,
            driver_status_policy: DriverStatusPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| AppError::Config(format!("invalid SEED_DEMO_DATA: {raw}")))?,
            Err(_) => true,
        };

        let driver_status_policy = match env::var("DRIVER_STATUS_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => DriverStatusPolicy::default(),
        };

        Ok(Self {
            listen_addr,
            seed_demo_data,
            driver_status_policy,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
