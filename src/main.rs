use clap::Parser;
use salter_listener::app::{Options, RealScanner, run_with_io};
use salter_listener::observer::TracingObserver;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

/// Exit codes for the application
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_PANIC: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set up panic hook to ensure clean exit codes for process managers
    // (e.g., systemd, Telegraf execd) that monitor exit status
    panic::set_hook(Box::new(move |info: &PanicHookInfo| {
        eprintln!("Panic! {}", info);
        std::process::exit(EXIT_PANIC);
    }));

    let options = Options::parse();

    if let Err(why) = salter_listener::logging::init(options.verbose) {
        eprintln!("error: failed to initialize logging: {why}");
        std::process::exit(EXIT_ERROR);
    }

    let mut stdout = std::io::stdout();
    match run_with_io(options, &RealScanner, Arc::new(TracingObserver), &mut stdout).await {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(why) => {
            tracing::error!(error = %why, "exiting");
            eprintln!("error: {}", why);
            std::process::exit(EXIT_ERROR);
        }
    }
}
