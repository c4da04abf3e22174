use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

use super::routes_file::RoutesFile;
use crate::config::RouterConfig;
use crate::location::Location;
use crate::navigation::{ClickEvent, LinkDecision, LinkInterceptor};

/// Command-line interface for inspecting route tables
#[derive(Parser, Debug)]
#[command(name = "simple-router", version)]
#[command(about = "Inspect simple-router route tables", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compile every pattern in a route file and print the table
    Check {
        /// Route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,
    },
    /// Parse a URL, resolve it, and print the resulting location as JSON
    Resolve {
        /// Route file (YAML or JSON)
        #[arg(short, long)]
        routes: PathBuf,

        /// URL to resolve, e.g. `/posts/23/edit?order=desc`
        url: String,
    },
    /// Decide whether a click on `href` would be handled in-page
    Link {
        /// Document origin, e.g. `https://www.example.com`
        #[arg(short, long)]
        origin: String,

        /// Browsing-context target of the link (`_blank`, `_self`, ...)
        #[arg(short, long)]
        target: Option<String>,

        /// Treat the click as ctrl/cmd-modified
        #[arg(long, default_value_t = false)]
        modified: bool,

        href: String,
    },
}

/// Parse the process arguments and run the selected command.
///
/// # Errors
///
/// Returns an error if the route file cannot be read or compiled, the URL
/// does not resolve, or the origin is invalid.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RouterConfig::from_env();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli.command, &config, &mut out)
}

/// Run `command`, writing its report to `out`.
///
/// # Errors
///
/// See [`run_cli`].
pub fn execute<W: Write>(command: &Commands, config: &RouterConfig, out: &mut W) -> anyhow::Result<()> {
    debug!(?command, "Running command");
    match command {
        Commands::Check { routes } => {
            let file = RoutesFile::load(routes)?;
            let table = file
                .to_table(config)
                .with_context(|| format!("Invalid route table in {}", routes.display()))?;

            writeln!(out, "{} routes", table.len())?;
            for (index, entry) in table.entries().iter().enumerate() {
                let params: Vec<&str> = entry.matcher().param_names().collect();
                if params.is_empty() {
                    writeln!(out, "{index:>3}  {:<32} {}", entry.pattern(), entry.unit())?;
                } else {
                    writeln!(
                        out,
                        "{index:>3}  {:<32} {} [{}]",
                        entry.pattern(),
                        entry.unit(),
                        params.join(", ")
                    )?;
                }
            }
            if !table.has_fallback() {
                writeln!(out, "warning: no universal fallback; unmatched paths will fail")?;
            }
            Ok(())
        }
        Commands::Resolve { routes, url } => {
            let table = RoutesFile::load(routes)?
                .to_table(config)
                .with_context(|| format!("Invalid route table in {}", routes.display()))?;
            let location = Location::from_url(url, &table)
                .with_context(|| format!("Failed to resolve {url}"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&location)?)?;
            Ok(())
        }
        Commands::Link {
            origin,
            target,
            modified,
            href,
        } => {
            let interceptor = LinkInterceptor::new(origin)?;
            let event = ClickEvent {
                ctrl: *modified,
                ..ClickEvent::primary()
            };
            let decision = interceptor.decide_click(href, &event, target.as_deref());
            let label = match decision {
                LinkDecision::Intercept => "intercept",
                LinkDecision::Native => "native",
            };
            writeln!(out, "{label}")?;
            Ok(())
        }
    }
}
