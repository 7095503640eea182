use std::io;
use std::net::Ipv4Addr;
use std::process;
use std::time::Duration;

use clap::Parser;
use log::{debug, LevelFilter};

use dnsclient::{report, Config, Error, RecordKind, Resolver, UdpTransport};

#[derive(Parser)]
#[command(name = "dnsclient")]
#[command(version)]
#[command(about = "Query a name server over UDP and print the reply")]
struct Cli {
    /// Seconds to wait for a reply before retransmitting
    #[arg(short = 't', long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Retransmissions before giving up
    #[arg(short = 'r', long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_retries: u32,

    /// Name server port
    #[arg(short = 'p', long, default_value_t = 53)]
    port: u16,

    /// Ask for mail exchange records
    #[arg(long, conflicts_with = "ns")]
    mx: bool,

    /// Ask for name server records
    #[arg(long)]
    ns: bool,

    /// Log each step of the lookup to stderr
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Name server address, as @a.b.c.d
    #[arg(value_parser = parse_server)]
    server: Ipv4Addr,

    /// Domain name to look up
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    name: String,
}

impl Cli {
    fn config(&self) -> Config {
        let kind = if self.mx {
            RecordKind::MX
        } else if self.ns {
            RecordKind::NS
        } else {
            RecordKind::A
        };
        Config::new(self.server, self.name.as_str())
            .port(self.port)
            .kind(kind)
            .timeout(Duration::from_secs(self.timeout))
            .max_retries(self.max_retries)
    }
}

fn parse_server(arg: &str) -> Result<Ipv4Addr, String> {
    let addr = arg.strip_prefix('@').unwrap_or(arg);
    addr.parse()
        .map_err(|_| format!("`{}` is not a dotted-quad IPv4 address", addr))
}

fn run(config: Config) -> Result<(), Error> {
    let stdout = io::stdout();
    let transport = match UdpTransport::connect(config.server_addr()) {
        Ok(transport) => transport,
        Err(err) => {
            let err = Error::from(err);
            report::write_failure(&mut stdout.lock(), &err)?;
            return Err(err);
        }
    };
    Resolver::new(config, transport, rand::thread_rng(), stdout.lock()).resolve()
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_module("dnsclient", LevelFilter::Debug);
    }
    builder.init();

    if let Err(err) = run(cli.config()) {
        debug!("lookup failed: {}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_argument() {
        assert_eq!(parse_server("@8.8.8.8"), Ok(Ipv4Addr::new(8, 8, 8, 8)));
        assert_eq!(parse_server("1.1.1.1"), Ok(Ipv4Addr::new(1, 1, 1, 1)));
        assert!(parse_server("@8.8.8").is_err());
        assert!(parse_server("@256.1.1.1").is_err());
    }

    #[test]
    fn flags_select_record_kind() {
        let cli = Cli::parse_from(["dnsclient", "-t", "2", "--mx", "@8.8.8.8", "example.com"]);
        let config = cli.config();
        assert_eq!(config.kind, RecordKind::MX);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.port, 53);

        let cli = Cli::parse_from(["dnsclient", "@8.8.8.8", "example.com"]);
        assert_eq!(cli.config().kind, RecordKind::A);
    }

    #[test]
    fn invalid_arguments() {
        assert!(Cli::try_parse_from(["dnsclient", "--mx", "--ns", "@8.8.8.8", "a.com"]).is_err());
        assert!(Cli::try_parse_from(["dnsclient", "-t", "0", "@8.8.8.8", "a.com"]).is_err());
        assert!(Cli::try_parse_from(["dnsclient", "-r", "0", "@8.8.8.8", "a.com"]).is_err());
        assert!(Cli::try_parse_from(["dnsclient", "-p", "65536", "@8.8.8.8", "a.com"]).is_err());
        assert!(Cli::try_parse_from(["dnsclient", "@8.8.8.8", ""]).is_err());
        assert!(Cli::try_parse_from(["dnsclient", "@example", "a.com"]).is_err());
    }
}
