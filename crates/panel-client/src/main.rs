//! Macropanel — command-line front end for the device controller.
//!
//! The same binding engine that backs the interactive panel, driven from the
//! terminal: list macros, inspect current bindings, assign and clear them.
//!
//! # Usage
//!
//! ```text
//! macropanel [OPTIONS] <COMMAND>
//!
//! Commands:
//!   show       Print the current keyboard and mouse bindings
//!   macros     List the macros defined on the controller
//!   assign     Bind a macro to a key or mouse button
//!   clear      Remove the binding of a key or mouse button
//!   clear-all  Remove every binding of both device classes
//!
//! Options:
//!   --backend-url <URL>   Controller base URL [default: from config file,
//!                         falling back to http://127.0.0.1:9264]
//!   --config <PATH>       Explicit config file path
//! ```
//!
//! Targets are keyboard layout codes (`keya`, `f5`, `controlleft`) or mouse
//! button labels prefixed with `mouse:` (`mouse:left`, `mouse:forward`).
//!
//! # Environment variable overrides
//!
//! | Variable             | Description                          |
//! |----------------------|--------------------------------------|
//! | `MACROPANEL_BACKEND` | Controller base URL                  |
//! | `RUST_LOG`           | `tracing` filter (overrides config)  |

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use panel_client::api::HttpDeviceApi;
use panel_client::config::PanelConfig;
use panel_client::controller::{BindTarget, KeyboardKeyTarget, MouseButtonTarget};
use panel_client::session::{DropOutcome, PanelSession};
use panel_core::{layout_to_hid, DeviceClass, DeviceInput, MouseButton, RENDERED_CODES};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Macro binding panel for a programmable keyboard/mouse device controller.
#[derive(Debug, Parser)]
#[command(
    name = "macropanel",
    about = "Configure macro bindings on a programmable keyboard/mouse controller",
    version
)]
struct Cli {
    /// Base URL of the controller's REST API.
    ///
    /// Overrides the config file when given. The controller serves
    /// `/api/get/*` and `/api/set/*` under this URL.
    #[arg(long, env = "MACROPANEL_BACKEND")]
    backend_url: Option<String>,

    /// Path to a `macropanel.toml` config file.
    ///
    /// Defaults to the platform config location.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current keyboard and mouse bindings.
    Show,
    /// List the macros defined on the controller.
    Macros,
    /// Bind a macro to a key or mouse button.
    Assign {
        /// Target input: a keyboard layout code (`keya`) or `mouse:<label>`.
        target: String,
        /// Catalog key of the macro to bind.
        macro_key: String,
    },
    /// Remove the binding of a key or mouse button.
    Clear {
        /// Target input: a keyboard layout code (`keya`) or `mouse:<label>`.
        target: String,
    },
    /// Remove every binding of both device classes.
    ClearAll,
}

/// Parses a CLI target string into a device input.
///
/// Keyboard targets are bare layout codes; mouse targets carry a `mouse:`
/// prefix so that a hypothetical key named like a button label cannot be
/// ambiguous.
fn parse_target(target: &str) -> anyhow::Result<DeviceInput> {
    if let Some(label) = target.strip_prefix("mouse:") {
        let button = MouseButton::from_label(label)
            .with_context(|| format!("unknown mouse button '{label}' (expected one of: left, right, middle, back, forward)"))?;
        return Ok(DeviceInput::Mouse(button));
    }
    let hid = layout_to_hid(target)
        .with_context(|| format!("unknown keyboard layout code '{target}'"))?;
    Ok(DeviceInput::Keyboard(hid))
}

/// Resolves a numeric binding identifier back to a display label.
fn binding_label(class: DeviceClass, id: u8) -> String {
    match class {
        DeviceClass::Keyboard => RENDERED_CODES
            .iter()
            .find(|code| layout_to_hid(code).map(|h| h.usage_id()) == Some(id))
            .map(|code| code.to_string())
            .unwrap_or_else(|| format!("hid:{id}")),
        DeviceClass::Mouse => MouseButton::from_mask(id)
            .map(|b| format!("mouse:{}", b.label()))
            .unwrap_or_else(|| format!("mask:{id}")),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PanelConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => PanelConfig::load().context("loading config")?,
    };

    // RUST_LOG wins over the config file's log_level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let backend_url = cli
        .backend_url
        .clone()
        .unwrap_or_else(|| config.backend_url.clone());
    info!("macropanel connecting to {backend_url}");

    let api = HttpDeviceApi::new(backend_url);
    // The CLI has no viewport; the width only affects menu anchoring, which
    // the CLI never opens.
    let mut session = PanelSession::start(api, 0).await;

    match cli.command {
        Command::Show => {
            let catalog = session.catalog().await;
            for class in [DeviceClass::Keyboard, DeviceClass::Mouse] {
                let bindings = session.bindings(class).await;
                println!("{class}:");
                if bindings.is_empty() {
                    println!("  (no bindings)");
                }
                for (id, macro_key) in bindings.iter() {
                    let name = catalog
                        .get(macro_key)
                        .map(|m| m.name)
                        .unwrap_or_else(|| "?".to_string());
                    println!("  {:<14} {} ({})", binding_label(class, id), macro_key, name);
                }
            }
        }

        Command::Macros => {
            let catalog = session.catalog().await;
            if catalog.is_empty() {
                println!("(no macros defined)");
            }
            for m in catalog.iter() {
                println!("{:<12} {} : {}", m.key, m.name, m.description);
            }
        }

        Command::Assign { target, macro_key } => {
            let input = parse_target(&target)?;
            if !session.catalog().await.contains(&macro_key) {
                bail!("no macro '{macro_key}' in the catalog (run `macropanel macros`)");
            }
            session.drag_start(&macro_key).await?;
            let outcome = match input {
                DeviceInput::Keyboard(_) => session.drop_on_key(&target).await?,
                DeviceInput::Mouse(button) => session.drop_on_mouse(button).await?,
            };
            match outcome {
                DropOutcome::Bound => println!("bound {input} -> {macro_key}"),
                DropOutcome::Ignored => bail!("assignment was not delivered"),
            }
        }

        Command::Clear { target } => {
            let input = parse_target(&target)?;
            let controller = session.controller();
            match input {
                DeviceInput::Keyboard(hid) => {
                    KeyboardKeyTarget::from_hid(hid, controller)
                        .on_menu_select(panel_core::MenuAction::Clear)
                        .await?
                }
                DeviceInput::Mouse(button) => {
                    MouseButtonTarget::new(button, controller)
                        .on_menu_select(panel_core::MenuAction::Clear)
                        .await?
                }
            }
            println!("cleared {input}");
        }

        Command::ClearAll => {
            session.clear_all().await?;
            println!("cleared all bindings");
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
