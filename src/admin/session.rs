//! Administrative session over a line-oriented stream

use std::fmt::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::admin::command::{Command, HELP};
use crate::error::{AppError, CommandError};
use crate::network::{InterfaceRegistry, InterfaceResolver};
use crate::routing::SharedRouteTable;

/// What the session does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Applies administrative commands to a route table and the interface registry
pub struct Session {
    table: SharedRouteTable,
    interfaces: InterfaceRegistry,
}

impl Session {
    pub fn new(table: SharedRouteTable, interfaces: InterfaceRegistry) -> Self {
        Self { table, interfaces }
    }

    pub fn table(&self) -> &SharedRouteTable {
        &self.table
    }

    pub fn interfaces(&self) -> &InterfaceRegistry {
        &self.interfaces
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, AppError> {
        debug!("Executing {:?}", command);

        let reply = match command {
            Command::Add { addr, prefix, gateway } => {
                self.table.add_route(addr, prefix, gateway)?;
                "ok".to_string()
            }
            Command::Remove { addr, prefix } => {
                let removed = self.table.remove_route(addr, prefix)?;
                format!("removed {}", removed)
            }
            Command::Update { addr, prefix, gateway } => {
                self.table.update_route_gateway(addr, prefix, gateway)?;
                "ok".to_string()
            }
            Command::Flush(gateway) => {
                let removed = self.table.remove_routes_for_interface(&gateway);
                format!("{} route(s) removed", removed)
            }
            Command::SetDefault { addr, prefix, gateway } => {
                self.table.set_default_gateway(addr, prefix, gateway)?;
                "ok".to_string()
            }
            Command::ClearDefault => match self.table.clear_default_gateway() {
                Some(previous) => format!("cleared default {}", previous),
                None => "no default gateway".to_string(),
            },
            Command::Find(addr) => match self.table.find(addr) {
                Some(gateway) => match self.interfaces.resolve_interface(&gateway) {
                    Some(handle) => format!("{} via {}", addr, handle),
                    None => format!("{} via {} (interface unavailable)", addr, gateway),
                },
                None => format!("no route to {}", addr),
            },
            Command::LinkUp(gateway) => {
                let handle = self.interfaces.register(gateway);
                info!("Interface {} is up", handle);
                format!("{} up", gateway)
            }
            Command::LinkDown(gateway) => {
                if !self.interfaces.set_link(&gateway, false) {
                    return Err(CommandError::UnknownInterface(gateway.to_string()).into());
                }
                let removed = self.table.remove_routes_for_interface(&gateway);
                let mut reply = format!("{} down, {} route(s) removed", gateway, removed);
                if self
                    .table
                    .default_gateway()
                    .is_some_and(|d| d.gateway == gateway)
                {
                    reply.push_str(", default route kept");
                }
                reply
            }
            Command::Show => self.render_table(),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Flow::Quit),
        };

        Ok(Flow::Continue(reply))
    }

    /// Parse and execute one line; errors become the reply text
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let result = line
            .parse::<Command>()
            .map_err(AppError::from)
            .and_then(|command| self.execute(command));

        match result {
            Ok(flow) => flow,
            Err(e) => Flow::Continue(format!("error: {}", e)),
        }
    }

    /// Serve commands until end of input or `quit`
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<(), AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_line(&line) {
                Flow::Continue(reply) => {
                    output.write_all(reply.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    output.flush().await?;
                }
                Flow::Quit => break,
            }
        }

        Ok(())
    }

    fn render_table(&self) -> String {
        self.table.with_table(|table| {
            let mut text = String::new();
            for entry in table.entries() {
                let _ = writeln!(text, "{}", entry);
            }
            if let Some(default) = table.default_gateway() {
                let _ = writeln!(text, "default {}", default);
            }
            if text.is_empty() {
                text.push_str("(empty)");
            }
            text.trim_end().to_string()
        })
    }
}
