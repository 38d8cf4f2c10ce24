// SPDX-License-Identifier: MPL-2.0
//! `message-bar-demo`: shows a burst of messages on the headless overlay
//! and logs the presentation sequence.
//!
//! ```text
//! message-bar-demo [--count N] [--duration SECS] [--tap] [--sticky]
//!                  [--config-dir PATH]
//! ```

use message_bar::config;
use message_bar::message::{MessageType, ShowRequest};
use message_bar::MessageBar;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
message-bar-demo

USAGE:
  message-bar-demo [OPTIONS]

OPTIONS:
  --count N          Number of messages to enqueue [default: 3]
  --duration SECS    Display duration of each message [default: 1.5]
  --tap              Tap the first message instead of letting it time out
  --sticky           Make the last message sticky, then cancel it
  --config-dir PATH  Directory holding settings.toml
  -h, --help         Print help
";

struct Args {
    count: u32,
    duration: f64,
    tap: bool,
    sticky: bool,
    config_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(None);
    }

    let parsed = Args {
        count: args.opt_value_from_str("--count")?.unwrap_or(3),
        duration: args.opt_value_from_str("--duration")?.unwrap_or(1.5),
        tap: args.contains("--tap"),
        sticky: args.contains("--sticky"),
        config_dir: args
            .opt_value_from_str::<_, String>("--config-dir")?
            .map(PathBuf::from),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unknown arguments");
    }
    Ok(Some(parsed))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let (settings, warning) = config::load_with_override(args.config_dir.clone());
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    let bar = MessageBar::headless(settings.bar_config(), settings.runtime_options());
    bar.set_tap_handler(|| tracing::info!("tap handler called"))?;

    let kinds = [MessageType::Success, MessageType::Info, MessageType::Error];
    let mut ids = Vec::new();
    for n in 0..args.count {
        let kind = kinds[n as usize % kinds.len()];
        let last = n + 1 == args.count;
        let mut request = ShowRequest::new(kind)
            .title(format!("Message {}", n + 1))
            .body(format!("{kind:?} message from the demo"))
            .duration_secs(args.duration);
        if n == 0 {
            request = request.on_dismiss(|| tracing::info!("first message dismissed by tap"));
        }
        if last && args.sticky {
            request = request.auto_dismiss(false);
        }
        ids.push(bar.show(request)?);
    }

    if args.tap {
        tokio::time::sleep(Duration::from_millis(500)).await;
        if let Some(surface) = bar.snapshot().await?.surface {
            bar.tap(surface)?;
        }
    }

    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let snapshot = bar.snapshot().await?;
        if snapshot.is_idle() {
            break;
        }
        // Only the sticky message is left
        if args.sticky && snapshot.queued == 0 && snapshot.visible == ids.last().copied() {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if let Some(&id) = ids.last() {
                bar.cancel(id)?;
            }
        }
    }

    bar.shutdown()?;
    tracing::info!(shown = ids.len(), "all messages presented");
    Ok(())
}
