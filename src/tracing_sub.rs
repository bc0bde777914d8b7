use std::io;

use tracing::Level;

/// Initialize a compact tracing subscriber writing to stderr at `DEBUG`.
/// Safe to call multiple times; subsequent calls are no-ops for the global
/// subscriber.
pub fn init_default() {
    init_with_level(Level::DEBUG);
}

/// Same as [`init_default`] with an explicit maximum level.
///
/// Output goes to stderr so that command output on stdout (exports in
/// particular) stays machine-readable.
pub fn init_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .compact()
        .try_init();
}

/// Map a `-v` count to a level: none is `WARN`, then `INFO`, `DEBUG`,
/// `TRACE`.
pub fn level_for_verbosity(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_ladder() {
        assert_eq!(level_for_verbosity(0), Level::WARN);
        assert_eq!(level_for_verbosity(2), Level::DEBUG);
        assert_eq!(level_for_verbosity(9), Level::TRACE);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_with_level(Level::WARN);
        init_default();
    }
}
