use clap::{Parser, Subcommand};
use dayglow::{ClassList, FixedHour, HourSource, LocalClock, Theme, ThemeSelector};
use dayglow::{config, output, preview};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hour override shared by commands that classify "now".
#[derive(clap::Args, Clone, Copy)]
struct HourArgs {
    /// Use this hour (0-23) instead of the local clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    hour: Option<u32>,
}

impl HourArgs {
    fn clock(self) -> Arc<dyn HourSource> {
        match self.hour {
            Some(hour) => Arc::new(FixedHour::new(hour)),
            None => Arc::new(LocalClock),
        }
    }
}

#[derive(Parser)]
#[command(name = "dayglow")]
#[command(about = "Time-of-day theming for content sites")]
#[command(long_about = "\
Time-of-day theming for content sites

The page body carries one of three marker classes, chosen from the local hour:

  06:00 - 15:59   theme-morning
  16:00 - 19:59   theme-evening
  20:00 - 05:59   theme-night

Colors for each theme, the framework modules, stylesheets and image domains
live in config.toml. Run 'dayglow gen-config' to generate a documented one.")]
#[command(version)]
struct Cli {
    /// Site directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the theme for the current hour
    Current {
        #[command(flatten)]
        hour: HourArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Track the theme on a body class list, re-checking every minute until Ctrl-C
    Watch(HourArgs),
    /// Print the generated themes.css
    Css,
    /// Render a static HTML preview of a themed page
    Preview {
        #[command(flatten)]
        hour: HourArgs,
        /// Markdown page to render as the body
        #[arg(long)]
        page: Option<PathBuf>,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Validate config.toml and print a summary
    Check,
    /// Check whether an image URL may be optimized (exit status 1 if not)
    ImageAllowed {
        /// Image URL or local path
        url: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Current { hour, json } => {
            let report = output::ThemeReport::for_hour(hour.clock().current_hour());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_current(&report);
            }
        }
        Command::Watch(hour) => {
            watch(hour.clock()).await?;
        }
        Command::Css => {
            let site_config = config::load_config(&cli.source)?;
            print!("{}", config::generate_stylesheet(&site_config));
        }
        Command::Preview { hour, page, out } => {
            let site_config = config::load_config(&cli.source)?;
            let theme = Theme::for_hour(hour.clock().current_hour());
            let html = preview::render_preview_file(&site_config, theme, page.as_deref())?;
            write_or_print(out.as_deref(), &html)?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.join("config.toml").display());
            let site_config = config::load_config(&cli.source)?;
            output::print_config_summary(&site_config);
            println!("==> Config is valid");
        }
        Command::ImageAllowed { url } => {
            let site_config = config::load_config(&cli.source)?;
            let allowed = site_config.image.is_allowed(&url);
            println!("{}", output::format_image_check(&url, allowed));
            if !allowed {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Run a selector against an in-memory body class list, printing each
/// theme change until interrupted.
async fn watch(clock: Arc<dyn HourSource>) -> Result<(), Box<dyn std::error::Error>> {
    let body = ClassList::new();
    let mut selector = ThemeSelector::new(clock, body.clone());
    let mut theme = selector.current_theme();
    selector.activate();
    println!(
        "{}",
        output::format_theme_change(theme.take_current(), &body.to_attribute())
    );

    loop {
        tokio::select! {
            changed = theme.changed() => match changed {
                Some(current) => {
                    println!("{}", output::format_theme_change(current, &body.to_attribute()));
                }
                None => break,
            },
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
        }
    }

    selector.deactivate();
    Ok(())
}

fn write_or_print(out: Option<&Path>, content: &str) -> std::io::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("==> Wrote {}", path.display());
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
