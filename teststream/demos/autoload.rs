//! Autoload example: print a switch's resource tree as JSON.
//!
//! # Usage
//!
//! Against a live switch:
//! ```bash
//! cargo run --example autoload -- --address 192.168.42.240?teststream=OS-192 \
//!     --user admin --password secret --protocol telnet
//! ```
//!
//! Replaying recorded command output (one file per command, e.g.
//! `show_status.txt`, `show_port_rawinfo_asterisk_swi_OS-192.txt`):
//! ```bash
//! cargo run --example autoload -- --address lab?teststream=OS-192 --replay ./recordings
//! ```

use std::env;
use std::path::PathBuf;

use teststream::{
    Driver, DriverCommands, DriverConfig, LoginAddress, PortMode, Protocol, ReplayDriver,
    ResourceDescription,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=debug for the command flow, trace for raw session output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let login: LoginAddress = args.address.parse()?;

    let tree = match &args.replay {
        Some(dir) => {
            let mut commands = DriverCommands::new(ReplayDriver::from_dir(dir), args.port_mode);
            autoload(&mut commands, &args.address, &login.host).await?
        }
        None => {
            let config = DriverConfig {
                port_mode: args.port_mode,
                protocol: args.protocol,
                timeout_secs: args.timeout,
                port: None,
            };
            let mut commands =
                DriverCommands::connect(&args.address, &args.user, &args.password, &config).await?;
            autoload(&mut commands, &args.address, &login.host).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&tree)?);
    eprintln!(
        "{} chassis, {} ports, {} mapped",
        tree.chassis.len(),
        tree.ports().count(),
        tree.ports().filter(|p| p.mapping.is_some()).count()
    );

    Ok(())
}

async fn autoload<D: Driver>(
    commands: &mut DriverCommands<D>,
    address: &str,
    host: &str,
) -> Result<ResourceDescription, teststream::Error> {
    if commands.session().is_none() {
        commands.login(address).await?;
    }
    let tree = commands.get_resource_description(host).await;
    commands.logout().await?;
    tree
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    address: String,
    user: String,
    password: String,
    protocol: Protocol,
    port_mode: PortMode,
    timeout: u64,
    replay: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut address = String::new();
        let mut user = env::var("USER").unwrap_or_else(|_| "admin".to_string());
        let mut password = String::new();
        let mut protocol = Protocol::Ssh;
        let mut port_mode = PortMode::Logical;
        let mut timeout = 30u64;
        let mut replay = None;

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match (args[i].as_str(), value) {
                ("--address" | "-a", Some(v)) => address = v,
                ("--user" | "-u", Some(v)) => user = v,
                ("--password" | "-P", Some(v)) => password = v,
                ("--protocol", Some(v)) => {
                    protocol = match v.to_ascii_lowercase().as_str() {
                        "telnet" => Protocol::Telnet,
                        _ => Protocol::Ssh,
                    }
                }
                ("--port-mode", Some(v)) => port_mode = v.parse().unwrap_or_default(),
                ("--timeout", Some(v)) => timeout = v.parse().unwrap_or(30),
                ("--replay", Some(v)) => replay = Some(PathBuf::from(v)),
                ("--help", _) => {
                    print_help();
                    std::process::exit(0);
                }
                (other, _) => {
                    eprintln!("Unknown or incomplete argument: {}", other);
                    print_help();
                    std::process::exit(1);
                }
            }
            i += 2;
        }

        if address.is_empty() {
            eprintln!("Error: --address is required");
            print_help();
            std::process::exit(1);
        }

        Self {
            address,
            user,
            password,
            protocol,
            port_mode,
            timeout,
            replay,
        }
    }
}

fn print_help() {
    println!("Usage: autoload --address <host[:port]?teststream=switch> [options]");
    println!();
    println!("Options:");
    println!("  -a, --address <ADDR>     Login address");
    println!("  -u, --user <USER>        Username (default: $USER)");
    println!("  -P, --password <PASS>    Password");
    println!("      --protocol <PROTO>   ssh or telnet (default: ssh)");
    println!("      --port-mode <MODE>   LOGICAL or PHYSICAL (default: LOGICAL)");
    println!("      --timeout <SECS>     Command timeout (default: 30)");
    println!("      --replay <DIR>       Replay recorded output instead of connecting");
}
