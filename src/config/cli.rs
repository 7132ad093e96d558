//! Command-line argument parsing

use crate::config::env::{parse_list, parse_routes};
use crate::config::{AppConfig, StaticRoute};
use crate::error::ConfigError;
use clap::Parser;

/// Command-line arguments structure
#[derive(Parser, Debug, Default)]
#[command(name = "ip6-routing")]
#[command(about = "Static IPv6 routing table with longest-prefix-match lookups")]
#[command(version)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, help = "Set the logging level")]
    pub log_level: Option<String>,

    /// Interfaces known to the host, comma separated
    #[arg(long, help = "Interfaces known to the host, e.g. 'eth0,wg0'")]
    pub interfaces: Option<String>,

    /// Static routes in format "dest/prefix=gateway"
    #[arg(
        long,
        help = "Static routes in format '2001:db8::/32=eth0,fd00::/8=wg0'"
    )]
    pub routes: Option<String>,

    /// Default gateway in format "dest/prefix=gateway"
    #[arg(long, help = "Default gateway in format '::/0=eth0'")]
    pub default_gateway: Option<String>,

    /// Addresses to resolve
    #[arg(long, value_name = "ADDR", help = "Resolve an address and exit (repeatable)")]
    pub lookup: Vec<String>,

    /// Print the route table and exit
    #[arg(long, help = "Print the route table and exit")]
    pub dump: bool,

    /// Validate configuration and exit
    #[arg(
        long,
        help = "Validate configuration and exit without starting the shell"
    )]
    pub validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    pub print_default_config: bool,
}

impl CliArgs {
    /// Apply CLI arguments over base configuration
    pub fn apply_to_config(&self, mut base_config: AppConfig) -> Result<AppConfig, ConfigError> {
        if let Some(ref level) = self.log_level {
            base_config.log_level = level.clone();
        }

        if let Some(ref interfaces) = self.interfaces {
            base_config.interfaces = parse_list(interfaces);
        }

        if let Some(ref routes) = self.routes {
            base_config.routes = parse_routes(routes)?;
        }

        if let Some(ref route) = self.default_gateway {
            base_config.default_gateway = Some(StaticRoute::parse(route)?);
        }

        Ok(base_config)
    }
}

/// Print default configuration in TOML format
pub fn print_default_config() {
    let default_config = AppConfig::default();

    println!("# IPv6 Routing Configuration");
    println!("# This is the default configuration with all available options");
    println!();
    println!("# Interfaces known to the host (1 to 4 printable characters each)");
    println!("interfaces = [\"eth0\"]");
    println!();
    println!("[logging]");
    println!("# Log level: trace, debug, info, warn, error");
    println!("level = \"{}\"", default_config.log_level);
    println!();
    println!("# Static routes, longest prefix wins. Host bits are ignored.");
    println!("# A route whose destination is already routed is skipped.");
    println!("[[routes]]");
    println!("destination = \"2001:db8::/32\"");
    println!("gateway = \"eth0\"");
    println!();
    println!("# Fallback used when no route matches");
    println!("# [default_gateway]");
    println!("# destination = \"::/0\"");
    println!("# gateway = \"eth0\"");
}
