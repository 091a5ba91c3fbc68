//! Logger setup for the binary

use log::LevelFilter;

/// Install the env_logger backend.
///
/// `info` by default, `debug` with `--verbose`; `RUST_LOG` still wins.
pub(crate) fn init(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
