//! Administrative command parsing

use std::net::Ipv6Addr;
use std::str::FromStr;

use crate::config::{parse_cidr, parse_gateway};
use crate::error::{CommandError, ConfigError};
use crate::routing::{GatewayName, PrefixLength};

pub const HELP: &str = "\
add <addr/prefix> <gw>      add a route
del <addr/prefix>           remove a route
update <addr/prefix> <gw>   change the gateway of a route
flush <gw>                  remove every route via <gw>
default <addr/prefix> <gw>  set the default gateway
nodefault                   clear the default gateway
find <addr>                 resolve an address
up <gw> | down <gw>         change interface link state
show                        print the route table
quit                        leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    },
    Remove {
        addr: Ipv6Addr,
        prefix: PrefixLength,
    },
    Update {
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    },
    Flush(GatewayName),
    SetDefault {
        addr: Ipv6Addr,
        prefix: PrefixLength,
        gateway: GatewayName,
    },
    ClearDefault,
    Find(Ipv6Addr),
    LinkUp(GatewayName),
    LinkDown(GatewayName),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();

        let command = match words.as_slice() {
            ["add", cidr, gw] => {
                let (addr, prefix) = cidr_arg(cidr)?;
                Command::Add {
                    addr,
                    prefix,
                    gateway: gateway_arg(gw)?,
                }
            }
            ["add", ..] => return Err(CommandError::Usage("add <addr/prefix> <gw>")),
            ["del", cidr] => {
                let (addr, prefix) = cidr_arg(cidr)?;
                Command::Remove { addr, prefix }
            }
            ["del", ..] => return Err(CommandError::Usage("del <addr/prefix>")),
            ["update", cidr, gw] => {
                let (addr, prefix) = cidr_arg(cidr)?;
                Command::Update {
                    addr,
                    prefix,
                    gateway: gateway_arg(gw)?,
                }
            }
            ["update", ..] => return Err(CommandError::Usage("update <addr/prefix> <gw>")),
            ["flush", gw] => Command::Flush(gateway_arg(gw)?),
            ["flush", ..] => return Err(CommandError::Usage("flush <gw>")),
            ["default", cidr, gw] => {
                let (addr, prefix) = cidr_arg(cidr)?;
                Command::SetDefault {
                    addr,
                    prefix,
                    gateway: gateway_arg(gw)?,
                }
            }
            ["default", ..] => return Err(CommandError::Usage("default <addr/prefix> <gw>")),
            ["nodefault"] => Command::ClearDefault,
            ["find", addr] => Command::Find(addr.parse().map_err(|e| CommandError::InvalidArgument {
                arg: addr.to_string(),
                reason: format!("{}", e),
            })?),
            ["find", ..] => return Err(CommandError::Usage("find <addr>")),
            ["up", gw] => Command::LinkUp(gateway_arg(gw)?),
            ["down", gw] => Command::LinkDown(gateway_arg(gw)?),
            ["up" | "down", ..] => return Err(CommandError::Usage("up <gw> | down <gw>")),
            ["show"] => Command::Show,
            ["help"] => Command::Help,
            ["quit" | "exit"] => Command::Quit,
            _ => return Err(CommandError::Unknown(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn cidr_arg(arg: &str) -> Result<(Ipv6Addr, PrefixLength), CommandError> {
    parse_cidr(arg).map_err(|e| invalid(arg, e))
}

fn gateway_arg(arg: &str) -> Result<GatewayName, CommandError> {
    parse_gateway(arg).map_err(|e| invalid(arg, e))
}

fn invalid(arg: &str, e: ConfigError) -> CommandError {
    CommandError::InvalidArgument {
        arg: arg.to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_commands() {
        let command: Command = "add 2001:db8::1/32 eth0".parse().unwrap();
        assert_eq!(
            command,
            Command::Add {
                addr: "2001:db8::1".parse().unwrap(),
                prefix: PrefixLength::new(32).unwrap(),
                gateway: GatewayName::new("eth0").unwrap(),
            }
        );

        assert!(matches!(
            "  del   fd00::/8 ".parse::<Command>(),
            Ok(Command::Remove { .. })
        ));
        assert!(matches!(
            "update fd00::/8 wg0".parse::<Command>(),
            Ok(Command::Update { .. })
        ));
        assert!(matches!(
            "default ::/0 eth0".parse::<Command>(),
            Ok(Command::SetDefault { .. })
        ));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("nodefault".parse::<Command>(), Ok(Command::ClearDefault));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "down eth0".parse::<Command>(),
            Ok(Command::LinkDown(GatewayName::new("eth0").unwrap()))
        );
        assert_eq!(
            "find ::1".parse::<Command>(),
            Ok(Command::Find(Ipv6Addr::LOCALHOST))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "add 2001:db8::/32".parse::<Command>(),
            Err(CommandError::Usage("add <addr/prefix> <gw>"))
        );
        assert_eq!(
            "route add".parse::<Command>(),
            Err(CommandError::Unknown("route add".to_string()))
        );
        assert!(matches!(
            "add 2001:db8::/129 eth0".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "flush eth10".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
        assert!(matches!(
            "find 10.0.0.1".parse::<Command>(),
            Err(CommandError::InvalidArgument { .. })
        ));
    }
}
