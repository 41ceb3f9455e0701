//! Coffe Havana CLI - browse the menu, manage the cart and check out.
//!
//! # Usage
//!
//! ```bash
//! # List the menu, or one category of it
//! havana menu
//! havana menu --category postres
//!
//! # Manage the cart
//! havana cart add Latte
//! havana cart add "Pan de la casa" --price 28.5
//! havana cart increase Latte
//! havana cart decrease Latte
//! havana cart remove Latte
//! havana cart clear
//! havana cart show
//!
//! # Hand the order off to WhatsApp
//! havana checkout pay
//! havana checkout transfer
//!
//! # Render HTML fragments instead of plain text
//! havana --html cart show
//! ```
//!
//! The cart lives in `$HAVANA_DATA_DIR/<cart key>.json` and survives between
//! invocations. See `havana_storefront::config` for every variable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use havana_storefront::checkout::PaymentMethod;
use havana_storefront::config::StorefrontConfig;
use havana_storefront::error::{AppError, Result};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "havana")]
#[command(author, version, about = "Coffe Havana storefront")]
struct Cli {
    /// Render HTML fragments instead of plain text
    #[arg(long, global = true)]
    html: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the menu
    Menu {
        /// Only list this category (e.g. `cafe`, `postres`)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Send the order through WhatsApp and clear the cart
    Checkout {
        #[command(subcommand)]
        method: CheckoutMethod,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add one unit of an item
    Add {
        /// Item name
        name: String,

        /// Unit price; defaults to the menu price
        #[arg(short, long)]
        price: Option<Decimal>,
    },
    /// Add one more unit of an item in the cart
    Increase {
        /// Item name
        name: String,
    },
    /// Take one unit away (never below 1)
    Decrease {
        /// Item name
        name: String,
    },
    /// Remove an item from the cart
    Remove {
        /// Item name
        name: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CheckoutMethod {
    /// Pay through Mercado Pago
    Pay,
    /// Pay by bank transfer
    Transfer,
}

fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(
    metadata: &tracing::Metadata<'_>,
) -> sentry::integrations::tracing::EventFilter {
    use sentry::integrations::tracing::EventFilter;

    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr so they never mix with cart output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "havana_storefront=info,havana_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry::integrations::tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();

    // Sentry needs the DSN from the config and must start before tracing
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = config
        .map_err(AppError::from)
        .and_then(|config| run(cli, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

fn run(cli: Cli, config: &StorefrontConfig) -> Result<()> {
    match cli.command {
        Commands::Menu { category } => {
            let catalog = commands::load_catalog(config)?;
            commands::menu::list(&catalog, category.as_deref(), &mut std::io::stdout().lock())?;
        }
        Commands::Cart { action } => {
            let mut store = commands::open_store(config, cli.html);
            match action {
                CartAction::Show => {}
                CartAction::Add { name, price } => match price {
                    Some(price) => store.add(&name, price),
                    None => {
                        let catalog = commands::load_catalog(config)?;
                        commands::cart::add_from_menu(&mut store, &catalog, &name)?;
                    }
                },
                CartAction::Increase { name } => store.increase(&name),
                CartAction::Decrease { name } => store.decrease(&name),
                CartAction::Remove { name } => store.remove(&name),
                CartAction::Clear => store.clear(),
            }
            store.presenter_mut().flush();
        }
        Commands::Checkout { method } => {
            let mut store = commands::open_store(config, cli.html);
            let method = match method {
                CheckoutMethod::Pay => PaymentMethod::MercadoPago,
                CheckoutMethod::Transfer => PaymentMethod::BankTransfer,
            };
            let outcome = commands::checkout::run(&mut store, config, method);
            store.presenter_mut().flush();
            commands::checkout::report(&outcome, &mut std::io::stdout().lock())?;
        }
    }

    std::io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(format!("stdout: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_price() {
        let cli = Cli::parse_from(["havana", "--html", "cart", "add", "Pan", "--price", "28.5"]);
        assert!(cli.html);
        let Commands::Cart {
            action: CartAction::Add { name, price },
        } = cli.command
        else {
            panic!("expected cart add");
        };
        assert_eq!(name, "Pan");
        assert_eq!(price, Some(Decimal::new(285, 1)));
    }

    #[test]
    fn test_html_flag_is_global() {
        let cli = Cli::parse_from(["havana", "checkout", "pay", "--html"]);
        assert!(cli.html);
        assert!(matches!(
            cli.command,
            Commands::Checkout {
                method: CheckoutMethod::Pay
            }
        ));
    }
}
