use once_cell::sync::OnceCell;
use std::{env, io};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

pub fn init() {
    // RUST_LOG or default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // Optional file logging (RUST_LOG_FILE, default logs/teaview.log)
    let log_path = env::var("RUST_LOG_FILE").unwrap_or_else(|_| "logs/teaview.log".to_string());
    let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        std::path::Path::new(&log_path)
            .parent()
            .unwrap_or(std::path::Path::new(".")),
        std::path::Path::new(&log_path)
            .file_name()
            .unwrap_or(std::ffi::OsStr::new("teaview.log")),
    ));
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(nb_writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    // Log panics with a backtrace before the process dies
    std::panic::set_hook(Box::new(|info| {
        let mut msg = String::new();
        if let Some(loc) = info.location() {
            msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
        }
        if let Some(s) = info.payload().downcast_ref::<&str>() {
            msg.push_str(s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            msg.push_str(s);
        } else {
            msg.push_str("<non-string panic>");
        }
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
    }));
}
