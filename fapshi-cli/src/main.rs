//! `fapshi`: command-line access to the Fapshi payment gateway.
//!
//! Each subcommand performs one gateway operation and prints the normalized
//! response as JSON on stdout. The exit status is 0 for a 2xx response, 1 for
//! any other response, and 2 when the client could not be configured.
//!
//! Credentials come from `FAPSHI_API_USER` / `FAPSHI_API_KEY` (and optionally
//! `FAPSHI_BASE_URL`), or from a TOML file passed with `--config`.

#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and clap"
)]

mod observability;

use std::{collections::HashMap, fs, path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use fapshi_client::{
    Envelope, FapshiClient, FapshiConfig, FapshiError, PaymentLinkOptions, Result,
    config::SANDBOX_BASE_URL,
};
use serde::Serialize;
use tracing::{error, info};

use crate::observability::{LogFormat, init_observability};

const EXIT_GATEWAY_FAILURE: u8 = 1;
const EXIT_CONFIG_FAILURE: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "fapshi", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file; environment variables are used when omitted.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target the sandbox gateway regardless of the configured base URL.
    #[arg(long, global = true)]
    sandbox: bool,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "LOG_FORMAT",
        value_enum,
        ignore_case = true,
        default_value_t
    )]
    log_format: LogFormat,

    /// Raise log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a hosted payment link.
    CreateLink(CreateLinkArgs),
    /// Charge a mobile-money wallet directly.
    Charge(PhoneAmountArgs),
    /// Show the status of a transaction.
    Status {
        /// Transaction id.
        trans_id: String,
    },
    /// Expire an unpaid payment link.
    Expire {
        /// Transaction id of the link.
        trans_id: String,
    },
    /// Show the merchant account balance.
    Balance,
    /// Pay out to a mobile-money wallet.
    Payout(PhoneAmountArgs),
    /// List transactions tagged with a user id.
    UserTransactions {
        /// User id given when the payments were created.
        user_id: String,
    },
    /// Search transactions, e.g. `search status=SUCCESSFUL medium="mobile money"`.
    Search {
        /// Filters as KEY=VALUE pairs.
        #[arg(value_name = "KEY=VALUE", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
}

#[derive(Debug, Args)]
struct CreateLinkArgs {
    /// Amount in XAF.
    #[arg(long)]
    amount: i64,
    /// Payer email.
    #[arg(long)]
    email: Option<String>,
    /// Where the payer lands after paying.
    #[arg(long)]
    redirect_url: Option<String>,
    /// Your user reference.
    #[arg(long)]
    user_id: Option<String>,
    /// Your transaction reference.
    #[arg(long)]
    external_id: Option<String>,
    /// Restrict the link to card payments (`true`) or allow every medium (`false`).
    #[arg(long, value_name = "BOOL")]
    card_only: Option<bool>,
    /// Reason shown to the payer.
    #[arg(long)]
    message: Option<String>,
}

impl CreateLinkArgs {
    fn into_options(self) -> (i64, PaymentLinkOptions) {
        let options = PaymentLinkOptions {
            email: self.email,
            redirect_url: self.redirect_url,
            user_id: self.user_id,
            external_id: self.external_id,
            card_only: self.card_only,
            message: self.message,
        };
        (self.amount, options)
    }
}

#[derive(Debug, Args)]
struct PhoneAmountArgs {
    /// Amount in XAF.
    #[arg(long)]
    amount: i64,
    /// Nine-digit phone number starting with 6.
    #[arg(long)]
    phone: String,
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{raw}`")),
    }
}

fn load_config(cli: &Cli) -> Result<FapshiConfig> {
    let config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|e| {
                FapshiError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
            })?;
            FapshiConfig::from_toml(&raw)?
        }
        None => FapshiConfig::from_env()?,
    };

    Ok(if cli.sandbox { config.with_base_url(SANDBOX_BASE_URL) } else { config })
}

fn emit<R: Serialize + Envelope>(response: &R) -> ExitCode {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "cannot render response");
            return ExitCode::from(EXIT_GATEWAY_FAILURE);
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_GATEWAY_FAILURE)
    }
}

async fn run(client: &FapshiClient, command: Command) -> ExitCode {
    match command {
        Command::CreateLink(args) => {
            let (amount, options) = args.into_options();
            emit(&client.create_payment_link(amount, options).await)
        }
        Command::Charge(args) => emit(&client.charge_phone_wallet(args.amount, &args.phone).await),
        Command::Status { trans_id } => emit(&client.get_payment_status(&trans_id).await),
        Command::Expire { trans_id } => emit(&client.cancel_payment_link(&trans_id).await),
        Command::Balance => emit(&client.get_account_balance().await),
        Command::Payout(args) => emit(&client.disburse_to_phone(args.amount, &args.phone).await),
        Command::UserTransactions { user_id } => {
            emit(&client.get_user_transactions(&user_id).await)
        }
        Command::Search { filters } => {
            let filters: HashMap<String, String> = filters.into_iter().collect();
            emit(&client.search_transactions(&filters).await)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_observability(cli.log_format, cli.verbose);

    let client = match load_config(&cli).and_then(FapshiClient::new) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "cannot configure client");
            eprintln!("fapshi: {e}");
            return ExitCode::from(EXIT_CONFIG_FAILURE);
        }
    };
    info!(base_url = client.base_url(), "using gateway");

    run(&client, cli.command).await
}
