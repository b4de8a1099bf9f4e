//! release-rebuild - Trigger rebuilds for stale OKD release components

use clap::Parser;

use release_rebuild::cli::Cli;
use release_rebuild::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage and parse errors exit 1; --help and --version exit 0.
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logging::init_tracing(cli.log_format);

    if let Err(e) = cli.run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
