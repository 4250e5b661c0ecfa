//! ghp - GitHub Projects (v2) from the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghp_cmd::factory::Factory;
use ghp_cmd::project::ProjectCommand;
use ghp_core::cmdutil::FlagError;

mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
}

#[derive(Debug, Parser)]
#[command(
    name = "ghp",
    version,
    about = "Work with GitHub Projects",
    long_about = "Work with GitHub Projects (v2) from the command line.\n\n\
                  The minimum required token scope is `project`; read-only \
                  commands also work with `read:project`."
)]
struct Cli {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GH_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());

    let exit_code = match cli.command.run(&factory).await {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            eprintln!("{e:#}");
            if e.downcast_ref::<FlagError>().is_some() {
                eprintln!("\nRun `ghp <command> --help` for usage.");
            }
            exit_codes::ERROR
        }
    };

    std::process::exit(exit_code);
}
