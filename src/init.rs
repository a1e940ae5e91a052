use env_logger::{Env, Target};

/// Sets up `env_logger` on stderr, `warn` unless `RUST_LOG` says otherwise.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .format_timestamp(None)
        .init();
}
