use log::LevelFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Installs the global logger used by the command line tools. ``RUST_LOG``
/// takes precedence over both the default level and the per-module filters.
/// Calling it a second time is a no-op.
pub fn setup_logger(level: LogLevel, module_filters: Option<&[(&str, LogLevel)]>) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level.into()).format_timestamp_millis();
    for (module, module_level) in module_filters.unwrap_or_default() {
        builder.filter_module(module, (*module_level).into());
    }
    builder.parse_default_env();
    if builder.try_init().is_err() {
        log::debug!("logger was already initialized");
    }
}
