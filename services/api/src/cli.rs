use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ubex::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ubex-api",
    about = "Run the Uni Bridge Exchange API or a command-line walkthrough",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Submit one application and print its notification sequence
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["ubex-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn demo_flags_parse() {
        let cli = Cli::try_parse_from([
            "ubex-api",
            "demo",
            "--speedup",
            "15",
            "--vacancy",
            "v3",
            "--seed",
            "42",
        ])
        .expect("parses");
        let Some(Command::Demo(args)) = cli.command else {
            panic!("demo command expected");
        };
        assert_eq!(args.speedup, 15);
        assert_eq!(args.vacancy, "v3");
        assert_eq!(args.seed, Some(42));
        assert!(args.certificate_image.is_none());
    }
}
