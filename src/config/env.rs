//! Environment variable configuration handling

use crate::config::{AppConfig, StaticRoute};
use crate::error::ConfigError;
use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "IP6_ROUTING_";

/// Apply environment variable configuration over base configuration
pub fn apply_env_config(base_config: AppConfig) -> Result<AppConfig, ConfigError> {
    apply_env_from(base_config, |key| env::var(key).ok())
}

/// Same as [`apply_env_config`] with an explicit variable source
pub fn apply_env_from<F>(mut base_config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(format!("{}{}", ENV_PREFIX, name).as_str());

    if let Some(level) = var("LOG_LEVEL") {
        base_config.log_level = level;
    }

    // Format: IP6_ROUTING_INTERFACES="eth0,eth1"
    if let Some(interfaces) = var("INTERFACES") {
        base_config.interfaces = parse_list(&interfaces);
    }

    // Format: IP6_ROUTING_ROUTES="2001:db8::/32=eth0,fd00::/8=wg0"
    if let Some(routes) = var("ROUTES") {
        base_config.routes = parse_routes(&routes)?;
    }

    // Format: IP6_ROUTING_DEFAULT_GATEWAY="::/0=eth0"
    if let Some(route) = var("DEFAULT_GATEWAY") {
        base_config.default_gateway = Some(StaticRoute::parse(route.trim())?);
    }

    Ok(base_config)
}

/// Parse a comma-separated list of `destination/prefix=gateway` routes
pub fn parse_routes(routes_str: &str) -> Result<Vec<StaticRoute>, ConfigError> {
    routes_str
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(StaticRoute::parse)
        .collect()
}

/// Parse a comma-separated list, dropping empty items
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_apply_env_from() {
        let lookup = vars(&[
            ("IP6_ROUTING_LOG_LEVEL", "trace"),
            ("IP6_ROUTING_INTERFACES", "eth0, wg0,"),
            ("IP6_ROUTING_ROUTES", "2001:db8::/32=eth0,fd00::/8=wg0"),
            ("IP6_ROUTING_DEFAULT_GATEWAY", "::/0=eth0"),
        ]);

        let config = apply_env_from(AppConfig::default(), lookup).unwrap();

        assert_eq!(config.log_level, "trace");
        assert_eq!(config.interfaces, ["eth0", "wg0"]);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1], StaticRoute::new("fd00::/8", "wg0"));
        assert_eq!(config.default_gateway, Some(StaticRoute::new("::/0", "eth0")));
    }

    #[test]
    fn test_apply_env_from_no_vars() {
        let base_config = AppConfig {
            interfaces: vec!["eth0".to_string()],
            ..AppConfig::default()
        };

        let config = apply_env_from(base_config.clone(), vars(&[])).unwrap();
        assert_eq!(config, base_config);
    }

    #[test]
    fn test_apply_env_config_reads_process_env() {
        env::set_var("IP6_ROUTING_INTERFACES", "lo");
        let config = apply_env_config(AppConfig::default()).unwrap();
        env::remove_var("IP6_ROUTING_INTERFACES");

        assert_eq!(config.interfaces, ["lo"]);
    }

    #[test]
    fn test_parse_routes() {
        let routes = parse_routes("2001:db8::/32=eth0, ,fe80::/10=lo").unwrap();
        assert_eq!(
            routes,
            [
                StaticRoute::new("2001:db8::/32", "eth0"),
                StaticRoute::new("fe80::/10", "lo"),
            ]
        );

        assert!(parse_routes("").unwrap().is_empty());
        assert!(matches!(
            parse_routes("2001:db8::/32:eth0"),
            Err(ConfigError::InvalidFormat(_))
        ));
    }
}
