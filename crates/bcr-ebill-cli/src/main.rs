use std::process::ExitCode;

use anyhow::Result;
use bcr_ebill_client::{
    Config as ClientConfig, Context, app::App, get_config, init, state::notice::NoticeKind,
    state::scope::ViewScope,
};
use clap::Parser;
use log::{error, info};

mod commands;
mod config;
mod render;

use config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let conf = Config::parse();

    env_logger::Builder::from_default_env()
        .filter_level(conf.log_level.into())
        .init();

    let client_config = ClientConfig::new(
        &conf.ledger_url,
        conf.api_token.clone(),
        conf.request_timeout_secs,
    )?;
    init(client_config)?;
    let client_config = get_config();
    info!("using ledger at {}", client_config.ledger_base_url);

    let ctx = Context::new(client_config.clone())?;
    let app = App::new(ctx);

    let scope = ViewScope::new();
    let token = scope.token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, cancelling");
            scope.cancel();
        }
    });

    let out = match commands::run(&app, conf.command, conf.json, &token).await {
        Ok(out) => out,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };
    print!("{out}");

    let state = app.state().await;
    for notice in state.notices.iter() {
        eprintln!("{}", render::notice(notice));
    }
    if state.notices.of_kind(NoticeKind::Error).is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
