//! mcpdiff CLI entry point.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use mcpdiff::cli::Cli;
use mcpdiff::pipeline::Pipeline;
use mcpdiff::sink;
use mcpdiff::ui::Status;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("mcpdiff=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mcpdiff=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("mcpdiff starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let status = Status::new(cli.quiet);

    // Snapshot the environment once; the gate only ever sees this map.
    let env: HashMap<String, String> = std::env::vars().collect();

    let pipeline = Pipeline::from_cli(&cli);
    let report = pipeline.run(&env, &status);

    // Report body on stdout, status on stderr.
    println!("{}", report.markdown());
    sink::emit(&report);

    if report.success() {
        status.success(&format!("Comparison complete ({})", report.outcome().as_str()));
    } else {
        status.warning(&format!(
            "Validation not completed ({})",
            report.outcome().as_str()
        ));
    }

    // A report with success=false is still a normal completion; only
    // configuration errors (rejected by clap above) exit non-zero.
    ExitCode::SUCCESS
}
