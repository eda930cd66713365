use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

/// Map `-v` repetitions to a max level: 0 → WARN, 1 → INFO, 2+ → DEBUG.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the fmt subscriber. Logs go to stderr; stdout is reserved for
/// confirmation lines and reports.
pub fn init(verbosity: u8) {
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::INFO);
        assert_eq!(level_for(5), Level::DEBUG);
    }
}
