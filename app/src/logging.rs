use clap::Args;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Args, Debug, Default)]
pub struct LoggingOpts {
    /// A level of verbosity, and can be used multiple times
    #[arg(short, long, action = clap::ArgAction::Count, global(true))]
    pub verbose: u8,

    /// Disable everything but error logging
    #[arg(short, long, global(true), conflicts_with = "verbose")]
    pub quiet: bool,
}

impl LoggingOpts {
    pub fn to_level_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Log to stderr so stdout carries only the form. `RUST_LOG` overrides
    /// the flags when set.
    pub fn configure_logging(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(self.to_level_filter().into())
            .from_env_lossy();
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
}
