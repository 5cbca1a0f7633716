//! HAProxy status check (monitoring plugin).
//!
//! # Overview
//!
//! ```text
//!   CLI flags ──┐
//!   --config ───┼─▶ config ─▶ stats::fetch ─▶ stats::parser ─▶ stats::filter ─▶ check::evaluator
//!   defaults ───┘              GET ;csv        header → rows     pxname match      decision table
//!                                                                                      │
//!   stdout: "CheckHaproxyStatus <VERDICT>: <message>"  ◀───────────────────────────────┘
//!   exit:   0 OK / 1 WARNING / 2 CRITICAL / 3 UNKNOWN
//! ```
//!
//! One fetch, one evaluation, one line of output. Nothing is retried and no
//! state survives the process.

use clap::Parser;

use haproxy_check::check::{CheckResult, HaproxyCheck};
use haproxy_check::cli::Cli;
use haproxy_check::observability::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            finish(CheckResult::unknown(format!("invalid arguments: {}", e.kind())));
        }
    };

    logging::init(cli.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "check-haproxy-status starting");

    let result = match cli.into_config().and_then(HaproxyCheck::new) {
        Ok(check) => {
            tracing::debug!(
                hostname = %check.config().hostname,
                port = check.config().port,
                path = %check.config().path,
                service = %check.config().service,
                exact_match = check.config().exact_match,
                "Configuration loaded"
            );
            check.run().await
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            CheckResult::unknown(e.to_string())
        }
    };

    finish(result);
}

fn finish(result: CheckResult) -> ! {
    println!("{}", result);
    std::process::exit(result.exit_code())
}
