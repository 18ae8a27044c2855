use std::net::IpAddr;

use axum::http::StatusCode;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use ridealong_testing::relay::{self, StubRelay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Relay {
            host,
            port,
            fail_with,
        } => {
            let relay = match fail_with {
                Some(status) => StubRelay::failing(StatusCode::from_u16(status)?),
                None => StubRelay::accepting(),
            };
            relay::start_server(host, port, relay).await?
        }
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the form relay testing server
    Relay {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8001")]
        port: u16,
        /// Answer every submission with this HTTP status instead of 200
        #[arg(long)]
        fail_with: Option<u16>,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
