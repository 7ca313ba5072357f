//! CLI surface (SPEC_FULL.md §R).
//!
//! Grounded on `cmd/dnska/*.go` in `original_source` for the subcommand
//! set (`app`/`lookup`/`decode`/`stress`/`version`, here `app` renamed
//! `serve` and `stress` dropped) and on `dandyvica-dnsquery`'s use of the
//! `clap` derive API for the argument shape.

use std::collections::HashSet;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dns_resolver::config::{Config, Mode};
use dns_resolver::forwarder::{MultiplexedForwarder, StubForwarder};
use dns_resolver::resolve::{
    AuthorityCleaner, BlacklistResolver, CacheResolver, ChainResolver, ForwardResolver,
    IterativeResolver, Resolver, StaticResolver,
};
use dns_resolver::roots::RootHints;
use dns_resolver::server::{serve_tcp, serve_udp};
use dns_resolver::wire::{Message, QClass, QType, Question};
use dns_resolver::InternalMessage;
use permit::Permit;

const FORWARDER_POOL_SIZE: u16 = 4096;

#[derive(Parser)]
#[command(name = "resolverd", version, about = "A threaded, recursive/forwarding DNS resolver")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the resolver, serving UDP (and optionally TCP) until interrupted.
    Serve {
        /// Path to a TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Resolve one name through a fresh pipeline and print the answer.
    Lookup {
        name: String,
        #[arg(long, default_value = "A")]
        qtype: String,
        #[arg(long)]
        forward: Option<String>,
    },
    /// Decode a raw DNS wire message from a file and print its structure.
    Decode { path: PathBuf },
    /// Print the resolver's version.
    Version,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Serve { config } => serve(config),
        Command::Lookup { name, qtype, forward } => lookup(&name, &qtype, forward),
        Command::Decode { path } => decode(&path),
        Command::Version => {
            println!("resolverd {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn serve(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let permit = Permit::new();

    let pipeline = build_pipeline(&config)?;
    let udp_addr = config.local_address.clone();
    let tcp_addr = config.tcp_local_address.clone();

    std::thread::scope(|scope| {
        let udp_permit = permit.new_sub();
        scope.spawn(|| {
            if let Err(e) = serve_udp(&udp_permit, &udp_addr, pipeline.as_ref()) {
                log::error!("udp listener exited: {e}");
            }
        });
        if let Some(tcp_addr) = &tcp_addr {
            let tcp_permit = permit.new_sub();
            scope.spawn(|| {
                if let Err(e) = serve_tcp(&tcp_permit, tcp_addr, pipeline.as_ref()) {
                    log::error!("tcp listener exited: {e}");
                }
            });
        }
    });
    Ok(())
}

fn build_pipeline(config: &Config) -> Result<Box<dyn Resolver>, Box<dyn std::error::Error>> {
    let mut blacklisted = HashSet::new();
    blacklisted.insert("www.yahoo.com".to_string());

    let bottom: Box<dyn Resolver> = match config.mode {
        Mode::Iterative => Box::new(IterativeResolver::default()),
        Mode::Forward => {
            let upstream: SocketAddr = config
                .upstream_address
                .to_socket_addrs()?
                .next()
                .ok_or("could not resolve upstream address")?;
            let forwarder = MultiplexedForwarder::new(&upstream.to_string(), FORWARDER_POOL_SIZE, Permit::new())?;
            Box::new(ForwardResolver::new(forwarder))
        }
    };

    let chained = ChainResolver::new(vec![Box::new(StaticResolver::new(Default::default())), bottom]);
    let blacklisted = BlacklistResolver::new(blacklisted, chained);
    let cached = CacheResolver::new(blacklisted);
    Ok(Box::new(AuthorityCleaner::new(cached)))
}

fn lookup(name: &str, qtype: &str, forward: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let qtype = parse_qtype(qtype)?;
    let question = Question { name: name.to_string(), qtype, qclass: QClass::IN };
    let permit = Permit::new();

    let answer = match forward {
        Some(upstream) => {
            let forwarder = MultiplexedForwarder::new(&upstream, FORWARDER_POOL_SIZE, permit.new_sub())?;
            let resolver = ForwardResolver::new(forwarder);
            let result = resolver.resolve(&permit, InternalMessage::new(question));
            permit.revoke();
            result?
        }
        None => {
            let resolver = IterativeResolver::new(RootHints::default(), StubForwarder::new(Duration::from_secs(5)));
            resolver.resolve(&permit, InternalMessage::new(question))?
        }
    };

    for record in &answer.answer {
        println!("{record:?}");
    }
    if answer.answer.is_empty() {
        println!("(no answer, rcode={:?})", answer.response_code);
    }
    Ok(())
}

fn parse_qtype(s: &str) -> Result<QType, Box<dyn std::error::Error>> {
    Ok(match s.to_ascii_uppercase().as_str() {
        "A" => QType::A,
        "AAAA" => QType::AAAA,
        "NS" => QType::NS,
        "CNAME" => QType::CNAME,
        "MX" => QType::MX,
        "TXT" => QType::TXT,
        "PTR" => QType::PTR,
        "SOA" => QType::SOA,
        other => return Err(format!("unsupported qtype {other:?}").into()),
    })
}

fn decode(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let message = Message::parse(&bytes)?;
    println!("{message:#?}");
    Ok(())
}
