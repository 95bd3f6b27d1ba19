use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use crate::config::LoggingLevel;

/// Handle for changing the crate log level after the subscriber is installed.
#[derive(Clone)]
pub struct LogHandle(reload::Handle<EnvFilter, Registry>);

impl LogHandle {
    /// Swap the filter for one built from `level`.
    pub fn set_level(&self, level: LoggingLevel) {
        let _ = self.0.reload(env_filter(level));
    }
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` is honoured; `level` is added as the directive for this crate.
/// Install early with a default level so config loading is logged, then
/// call [`LogHandle::set_level`] once the configured level is known.
/// Installing more than once keeps the first subscriber.
pub fn init(level: LoggingLevel) -> LogHandle {
    let (filter, handle) = reload::Layer::new(env_filter(level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    LogHandle(handle)
}

fn env_filter(level: LoggingLevel) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("attachment_sizing={}", level.as_directive()).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
