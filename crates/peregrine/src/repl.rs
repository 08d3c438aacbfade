//! The interactive command loop.
//!
//! Commands: `server <ip>`, `trace on|off`, `lookup <name> [type]` (alias
//! `l`), `dump`, `quit`/`exit`. Anything after a `#` on a line is a
//! comment. User-input errors are reported and the offending command is
//! skipped; the loop itself only ends on quit or end of input.

use anyhow::Result;
use peregrine_proto::{Name, Question, RecordType, ResourceRecord, Type};
use peregrine_resolver::{IterativeResolver, Outcome, Transport};
use std::io::{self, BufRead, Write};
use std::net::IpAddr;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::FilterHandle;

/// Fallback filter when the configured level does not parse.
pub(crate) const DEFAULT_LEVEL: &str = "info";

/// Filter directive that surfaces per-round query/response detail.
const TRACE_DIRECTIVE: &str = "peregrine_resolver=trace";

/// A parsed REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Change the root server used for subsequent lookups.
    Server(IpAddr),
    /// Toggle verbose per-round tracing.
    Trace(bool),
    /// Resolve a name and print the results.
    Lookup(Question),
    /// Print every cached record.
    Dump,
    /// Leave the loop.
    Quit,
}

/// User-input errors. Reported, then the command is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
enum CommandError {
    #[error("Invalid root server ({0}).")]
    InvalidServerAddress(String),

    #[error("Invalid query type. Must be one of:\n\tA, AAAA, NS, MX, CNAME")]
    InvalidQueryType,

    #[error("Invalid host name ({0}).")]
    InvalidName(String),

    #[error("Invalid call. Format:\n\t{0}")]
    Usage(&'static str),

    #[error(
        "Invalid command. Valid commands are:\n\tlookup fqdn [type]\n\ttrace on|off\n\tserver IP\n\tdump\n\tquit"
    )]
    Unknown,
}

/// Parses one input line. `Ok(None)` means a blank line or pure comment.
fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let args: Vec<&str> = line.split_whitespace().collect();
    let command = match args[0].to_ascii_lowercase().as_str() {
        "quit" | "exit" => Command::Quit,
        "server" => match args[..] {
            [_, ip] => {
                let addr = ip
                    .parse::<IpAddr>()
                    .map_err(|_| CommandError::InvalidServerAddress(ip.to_string()))?;
                Command::Server(addr)
            }
            _ => return Err(CommandError::Usage("server IP")),
        },
        "trace" => match args[..] {
            [_, setting] if setting.eq_ignore_ascii_case("on") => Command::Trace(true),
            [_, setting] if setting.eq_ignore_ascii_case("off") => Command::Trace(false),
            _ => return Err(CommandError::Usage("trace on|off")),
        },
        "lookup" | "l" => {
            let (host, rtype) = match args[..] {
                [_, host] => (host, RecordType::A),
                [_, host, rtype] => (
                    host,
                    RecordType::from_str(rtype).map_err(|()| CommandError::InvalidQueryType)?,
                ),
                _ => return Err(CommandError::Usage("lookup hostName [type]")),
            };
            let name =
                Name::from_str(host).map_err(|e| CommandError::InvalidName(e.to_string()))?;
            Command::Lookup(Question::new(name, rtype))
        }
        "dump" => Command::Dump,
        _ => return Err(CommandError::Unknown),
    };

    Ok(Some(command))
}

/// One formatted output row: queried name, queried type, TTL, value.
fn print_row(name: &Name, rtype: Type, ttl: i64, value: &str) {
    let name = name.to_utf8();
    let rtype = rtype.to_string();
    println!("{name:<30.30} {rtype:<5} {ttl:<8} {value}");
}

fn print_results(question: &Question, records: &[ResourceRecord]) {
    if records.is_empty() {
        print_row(&question.qname, question.qtype, -1, "0.0.0.0");
    }
    for record in records {
        print_row(
            &question.qname,
            question.qtype,
            i64::from(record.ttl()),
            &record.rdata().to_string(),
        );
    }
}

/// The interactive loop: owns the resolver, the current root server, and
/// the log-filter handle that `trace on|off` flips.
pub struct Repl<T: Transport> {
    resolver: IterativeResolver<T>,
    root: IpAddr,
    filter: FilterHandle,
    base_level: String,
}

impl<T: Transport> Repl<T> {
    /// Creates the loop around a resolver and its starting root server.
    pub fn new(
        resolver: IterativeResolver<T>,
        root: IpAddr,
        filter: FilterHandle,
        base_level: String,
    ) -> Self {
        Self {
            resolver,
            root,
            filter,
            base_level,
        }
    }

    /// Runs until `quit`/`exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let interactive = console::user_attended();

        loop {
            if interactive {
                print!("peregrine> ");
                io::stdout().flush()?;
            }

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }

            match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command),
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Server(addr) => {
                self.root = addr;
                println!("Root DNS server is now: {addr}");
            }
            Command::Trace(on) => self.set_trace(on),
            Command::Lookup(question) => {
                let resolution = self.resolver.resolve(self.root, &question);
                if resolution.outcome == Outcome::Exhausted && resolution.records.is_empty() {
                    eprintln!("Lookup for {question} gave up before finding an answer.");
                }
                print_results(&question, &resolution.records);
            }
            Command::Dump => {
                self.resolver.cache().for_each(|key, records| {
                    for record in records {
                        print_row(
                            key.name(),
                            key.rtype(),
                            i64::from(record.ttl()),
                            &record.rdata().to_string(),
                        );
                    }
                });
            }
            Command::Quit => {}
        }
    }

    fn set_trace(&mut self, on: bool) {
        let directive = if on {
            format!("{},{TRACE_DIRECTIVE}", self.base_level)
        } else {
            self.base_level.clone()
        };

        let filter =
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
        if let Err(e) = self.filter.reload(filter) {
            eprintln!("Could not update tracing: {e}");
            return;
        }
        println!("Verbose tracing is now: {}", if on { "ON" } else { "OFF" });
    }
}
