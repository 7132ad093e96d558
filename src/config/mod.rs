//! Configuration management module
//!
//! Handles loading configuration from multiple sources with proper precedence:
//! CLI arguments > environment variables > TOML files > defaults

use std::net::Ipv6Addr;

use ipnetwork::Ipv6Network;
use tracing::warn;

use crate::error::{ConfigError, RouteError};
use crate::network::InterfaceRegistry;
use crate::routing::{GatewayName, PrefixLength, RouteTable};

pub mod cli;
pub mod env;
pub mod toml;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub interfaces: Vec<String>,
    pub routes: Vec<StaticRoute>,
    pub default_gateway: Option<StaticRoute>,
}

/// Statically configured route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    pub destination: String, // CIDR notation
    pub gateway: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            interfaces: Vec::new(),
            routes: Vec::new(),
            default_gateway: None,
        }
    }
}

impl StaticRoute {
    pub fn new(destination: impl Into<String>, gateway: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            gateway: gateway.into(),
        }
    }

    /// Parse `destination/prefix=gateway`
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let (destination, gateway) = value.split_once('=').ok_or_else(|| {
            ConfigError::InvalidFormat(format!(
                "Invalid route '{}'. Expected format: 'destination/prefix=gateway'",
                value
            ))
        })?;

        let destination = destination.trim();
        let gateway = gateway.trim();
        if destination.is_empty() || gateway.is_empty() {
            return Err(ConfigError::InvalidFormat(format!(
                "Invalid route '{}'. Destination and gateway are required",
                value
            )));
        }

        Ok(Self::new(destination, gateway))
    }

    /// Destination address (host bits kept), prefix and gateway
    pub fn resolve(&self) -> Result<(Ipv6Addr, PrefixLength, GatewayName), ConfigError> {
        let (addr, prefix) = parse_cidr(&self.destination)?;
        let gateway = parse_gateway(&self.gateway)?;
        Ok((addr, prefix, gateway))
    }
}

/// Parse `addr/prefix` without discarding host bits
pub fn parse_cidr(cidr: &str) -> Result<(Ipv6Addr, PrefixLength), ConfigError> {
    if !cidr.contains('/') {
        return Err(ConfigError::InvalidFormat(format!(
            "Invalid destination '{}'. Must be in CIDR format (e.g., '2001:db8::/32')",
            cidr
        )));
    }

    let network = cidr
        .parse::<Ipv6Network>()
        .map_err(|e| ConfigError::InvalidFormat(format!("Invalid destination '{}': {}", cidr, e)))?;
    let prefix = PrefixLength::new(network.prefix()).map_err(validation_error)?;
    Ok((network.ip(), prefix))
}

pub fn parse_gateway(name: &str) -> Result<GatewayName, ConfigError> {
    GatewayName::new(name).map_err(validation_error)
}

fn validation_error(e: RouteError) -> ConfigError {
    ConfigError::ValidationError(e.to_string())
}

/// Load configuration from every source in precedence order
pub fn load_configuration(args: &cli::CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    if let Some(ref path) = args.config {
        config = toml::apply_toml_config(config, toml::load_toml_config(path)?);
    }

    let config = env::apply_env_config(config)?;
    args.apply_to_config(config)
}

impl AppConfig {
    /// Check every interface, route and default gateway without building anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.interfaces {
            parse_gateway(name)?;
        }
        for route in self.routes.iter().chain(&self.default_gateway) {
            route.resolve()?;
        }
        Ok(())
    }

    pub fn build_registry(&self) -> Result<InterfaceRegistry, ConfigError> {
        self.interfaces
            .iter()
            .map(|name| parse_gateway(name))
            .collect()
    }

    /// Build the route table. Routes already covered by an earlier one are skipped.
    pub fn build_table(&self) -> Result<RouteTable, ConfigError> {
        let mut table = RouteTable::new();

        for route in &self.routes {
            let (addr, prefix, gateway) = route.resolve()?;
            if !self.interfaces.is_empty() && !self.interfaces.iter().any(|i| gateway == i.as_str()) {
                warn!("Route {} uses unconfigured interface {}", route.destination, gateway);
            }
            if let Err(e) = table.add_route(addr, prefix, gateway) {
                warn!("Skipping configured route {}: {}", route.destination, e);
            }
        }

        // Installed last: a default makes every later add resolve already.
        if let Some(route) = &self.default_gateway {
            let (addr, prefix, gateway) = route.resolve()?;
            table
                .set_default_gateway(addr, prefix, gateway)
                .map_err(validation_error)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AppConfig {
        AppConfig {
            interfaces: vec!["eth0".to_string(), "eth1".to_string()],
            routes: vec![
                StaticRoute::new("2001:db8::/32", "eth0"),
                StaticRoute::new("2001:db8:1::5/64", "eth1"),
            ],
            default_gateway: Some(StaticRoute::new("::/0", "eth0")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_parse_static_route() {
        let route = StaticRoute::parse(" 2001:db8::/32 = eth0 ").unwrap();
        assert_eq!(route, StaticRoute::new("2001:db8::/32", "eth0"));

        assert!(matches!(
            StaticRoute::parse("2001:db8::/32"),
            Err(ConfigError::InvalidFormat(_))
        ));
        assert!(matches!(
            StaticRoute::parse("=eth0"),
            Err(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_cidr_keeps_host_bits() {
        let (addr, prefix) = parse_cidr("2001:db8::7/48").unwrap();
        assert_eq!(addr, "2001:db8::7".parse::<Ipv6Addr>().unwrap());
        assert_eq!(prefix.get(), 48);

        assert!(parse_cidr("2001:db8::").is_err());
        assert!(parse_cidr("10.0.0.0/8").is_err());
        assert!(parse_cidr("2001:db8::/129").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(sample_config().validate().is_ok());

        let mut config = sample_config();
        config.routes.push(StaticRoute::new("2001:db8::/32", "toolong0"));
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = sample_config();
        config.interfaces.push(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_table() {
        let table = sample_config().build_table().unwrap();

        // 2001:db8:1::5 already resolves through the /32, so the /64 is skipped.
        assert_eq!(table.len(), 1);
        assert_eq!(table.default_gateway().unwrap().gateway, "eth0");
        assert_eq!(
            table.find("2001:db8::1".parse().unwrap()).map(|g| g.to_string()),
            Some("eth0".to_string())
        );
    }

    #[test]
    fn test_build_registry() {
        let registry = sample_config().build_registry().unwrap();
        let names: Vec<String> = registry.names().map(|n| n.to_string()).collect();
        assert_eq!(names, ["eth0", "eth1"]);
    }
}
