//! flatwalk - a first-person apartment interaction demo
//!
//! Walk between rooms, click the furniture, keep the health meter topped up.

mod config;
mod game;
mod headless;
mod hud;

use anyhow::Result;
use config::SettingsConfig;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting flatwalk v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if !cli.headless {
        if cli.max_steps.is_some() {
            tracing::warn!("--max-steps has no effect without --headless");
        }
        if cli.script.is_some() {
            tracing::warn!("--script has no effect without --headless");
        }
        if cli.log.is_some() {
            tracing::warn!("--log has no effect without --headless");
        }
    }

    let settings = match cli.settings.as_deref() {
        Some(path) => SettingsConfig::load_from_path(path),
        None => SettingsConfig::load(),
    };
    let catalog = config::load_catalog_lenient(cli.rooms.as_deref());
    let (width, height) = cli.resolution;

    if cli.headless {
        headless::run(headless::HeadlessConfig {
            catalog,
            max_steps: cli.max_steps.unwrap_or(20 * headless::STEPS_PER_SECOND),
            script: cli.script,
            log: cli.log,
            width,
            height,
        })
    } else {
        game::run(settings, catalog, game::GameOptions { width, height })
    }
}

/// Command line options.
struct CliOptions {
    headless: bool,
    max_steps: Option<u64>,
    resolution: (u32, u32),
    settings: Option<PathBuf>,
    rooms: Option<PathBuf>,
    script: Option<PathBuf>,
    log: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            headless: false,
            max_steps: None,
            resolution: (1280, 720),
            settings: None,
            rooms: None,
            script: None,
            log: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => opts.headless = true,
                "--max-steps" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.max_steps = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--max-steps must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--max-steps requires an integer");
                    }
                }
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match raw.split_once('x') {
                            Some((w, h)) => match (w.parse::<u32>(), h.parse::<u32>()) {
                                (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                                    opts.resolution = (width, height);
                                }
                                _ => {
                                    tracing::error!(value = %raw, "--resolution must be like 1280x720");
                                }
                            },
                            None => {
                                tracing::error!(value = %raw, "--resolution must be like 1280x720");
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires a value like 1280x720");
                    }
                }
                "--settings" => {
                    if let Some(path) = args.next() {
                        opts.settings = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--settings requires a file path");
                    }
                }
                "--rooms" => {
                    if let Some(path) = args.next() {
                        opts.rooms = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--rooms requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--log" => {
                    if let Some(path) = args.next() {
                        opts.log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--log requires a file path");
                    }
                }
                other => {
                    tracing::error!(argument = %other, "unknown command line argument");
                }
            }
        }

        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliOptions {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_headless_run() {
        let opts = parse(&["--headless", "--max-steps", "40", "--resolution", "640x480"]);
        assert!(opts.headless);
        assert_eq!(opts.max_steps, Some(40));
        assert_eq!(opts.resolution, (640, 480));
    }

    #[test]
    fn bad_resolution_keeps_default() {
        let opts = parse(&["--resolution", "potato"]);
        assert_eq!(opts.resolution, (1280, 720));
    }

    #[test]
    fn paths_are_captured() {
        let opts = parse(&["--rooms", "packs/flat.json", "--script", "s.json"]);
        assert_eq!(opts.rooms, Some(PathBuf::from("packs/flat.json")));
        assert_eq!(opts.script, Some(PathBuf::from("s.json")));
    }
}
