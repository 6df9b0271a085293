#[macro_use]
extern crate tracing;

use clap::Parser;
use eyre::{OptionExt, Result};
use scw::{OperationOutcome, WalletApp};
use scw_common::{from_base_units, to_base_units, try_get_http_provider};
use scw_config::Config;
use scw_wallets::ProviderWallet;
use std::{process::ExitCode, sync::Arc};
use yansi::Paint;

mod args;

use args::{Scw, ScwSubcommand};

fn main() -> Result<ExitCode> {
    subscriber();
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
    let args = Scw::parse();
    main_args(args)
}

/// Initializes a tracing subscriber writing to stderr, filtered by `RUST_LOG`.
fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main_args(args: Scw) -> Result<ExitCode> {
    let Scw { global, cmd } = args;

    // offline conversions
    match &cmd {
        ScwSubcommand::ToBaseUnits { amount, decimals } => {
            println!("{}", to_base_units(amount, *decimals)?);
            return Ok(ExitCode::SUCCESS);
        }
        ScwSubcommand::FromBaseUnits { value, decimals } => {
            println!("{}", from_base_units(*value, *decimals)?);
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let config = Config::load_with(global)?;
    let contract = config
        .contract
        .ok_or_eyre("no contract address: pass `--contract` or set `contract` in scw.toml")?;
    let provider = try_get_http_provider(&config.eth_rpc_url)?;
    debug!(rpc_url = %config.eth_rpc_url, %contract, "using endpoint");

    let wallet = Arc::new(ProviderWallet::new(provider));
    let app = WalletApp::new(Some(wallet), contract).with_token_decimals(config.token_decimals);

    // a single read, without looking for a connection
    if let ScwSubcommand::Owner = cmd {
        let owner = app.refresh_owner().await?;
        println!("{owner}");
        return Ok(ExitCode::SUCCESS);
    }

    app.mount().await;
    match cmd {
        ScwSubcommand::Account => {
            let account = match app.connection().account() {
                Some(account) => account,
                None => app.connect().await?,
            };
            println!("{account}");
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let op = cmd.into_operation().ok_or_eyre("not a contract operation")?;
    if !app.connection().is_connected() {
        app.connect().await?;
    }
    let watcher = app.connection().spawn_account_watcher(config.account_poll_interval());
    let outcome = app.submit(op).await;
    if let Some(watcher) = watcher {
        watcher.abort();
    }

    Ok(report(&outcome))
}

fn report(outcome: &OperationOutcome) -> ExitCode {
    match outcome {
        OperationOutcome::Success { tx_hash, .. } => {
            println!("{}", outcome.message().green());
            println!("transaction hash: {tx_hash}");
            ExitCode::SUCCESS
        }
        OperationOutcome::Failure { .. } => {
            eprintln!("{}", outcome.message().red());
            ExitCode::FAILURE
        }
    }
}
