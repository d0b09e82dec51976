#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use owo_colors::OwoColorize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::application::chat;
use crate::application::cli;
use crate::application::cli::Mode;
use crate::application::server;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::infrastructure::providers::HttpAdapter;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        format!(
            "Simple AI Chat has failed with the following version and error.\n\nVersion: {}\nError: {:#}",
            env!("CARGO_PKG_VERSION"),
            err
        )
        .red()
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// The server logs to stderr. The chat owns the terminal, so it only logs to a
/// JSON file, and only when `RUST_LOG` asks for this crate.
fn init_tracing(mode: &Mode) -> Option<WorkerGuard> {
    if *mode == Mode::Serve {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| return EnvFilter::new("info,tower_http=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();

        return None;
    }

    if !env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("simple_ai_chat")
    {
        return None;
    }

    let file_appender = tracing_appender::rolling::never(Config::get(ConfigKey::LogDir), "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(writer)
        .init();

    return Some(guard);
}

#[tokio::main]
async fn main() {
    better_panic::install();

    let mode = match cli::parse() {
        Ok(mode) => mode,
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let _guard = init_tracing(&mode);

    let res = match mode {
        Mode::Serve => server::start().await,
        Mode::Chat => chat::start(&HttpAdapter::default()).await,
    };

    if let Err(err) = res {
        handle_error(err);
    }
}
