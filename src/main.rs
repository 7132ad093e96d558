use std::net::Ipv6Addr;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ip6_routing::admin::{Command, Flow, Session};
use ip6_routing::config::cli::{print_default_config, CliArgs};
use ip6_routing::config::load_configuration;
use ip6_routing::error::{AppError, CommandError};
use ip6_routing::SharedRouteTable;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print_default_config();
        return Ok(());
    }

    let config = load_configuration(&cli)?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;
    if cli.validate_config {
        println!("Configuration is valid");
        return Ok(());
    }

    let table = SharedRouteTable::new(config.build_table()?);
    let mut session = Session::new(table, config.build_registry()?);
    info!(
        "Route table loaded with {} route(s)",
        session.table().dump_table().len()
    );

    if cli.dump || !cli.lookup.is_empty() {
        for addr in &cli.lookup {
            let addr = addr
                .parse::<Ipv6Addr>()
                .map_err(|e| CommandError::InvalidArgument {
                    arg: addr.clone(),
                    reason: e.to_string(),
                })?;
            print_reply(session.execute(Command::Find(addr))?);
        }
        if cli.dump {
            print_reply(session.execute(Command::Show)?);
        }
        return Ok(());
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = session.run(stdin, stdout) => result?,
        _ = tokio::signal::ctrl_c() => warn!("Interrupted"),
    }

    info!("Shutting down IPv6 routing shell");
    Ok(())
}

fn print_reply(flow: Flow) {
    if let Flow::Continue(text) = flow {
        println!("{}", text);
    }
}
