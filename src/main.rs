#[cfg(not(target_arch = "wasm32"))]
use anyhow::Result;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    use termfolio::{app, cli, debug};

    // Process CLI arguments first (before logging init for cleaner output)
    let options = match cli::process_cli() {
        cli::CliResult::Exit(code) => {
            if code == 0 {
                return Ok(());
            }
            std::process::exit(code);
        }
        cli::CliResult::Continue(options) => *options,
    };

    // CLI --log-level flag takes highest precedence, then DEBUG_LEVEL, then config.
    let level = debug::resolve_level(
        options.log_level,
        debug::level_from_env(),
        options.config.log_level.to_level_filter(),
    );
    debug::init_log_bridge(level);

    log::info!("Starting termfolio {}", termfolio::VERSION);

    let result = app::run(options);
    if let Err(ref e) = result {
        eprintln!("termfolio: error: {e:#}");
    }
    result
}

// The browser build is a library; see `termfolio::web::mount`.
#[cfg(target_arch = "wasm32")]
fn main() {}
