use crate::cli::{Cli, Command};
use crate::config::{AppConfig, DashboardConfig};
use crate::dashboard::{shared_loading, spawn_loader, DashboardState};
use crate::errors::{AppError, ServerError};
use crate::router::handle;
use astra::Server;
use clap::Parser;
use std::fs;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

mod classifier;
mod cli;
mod config;
mod dashboard;
mod domain;
mod errors;
mod harvester;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = AppConfig::load(&cli.config)?;
    cli.command.apply_overrides(&mut cfg);

    match cli.command {
        Command::Harvest(_) => {
            harvester::run(&cfg.harvest)?;
        }
        Command::Classify(_) => {
            classifier::run(&cfg.classify)?;
        }
        Command::Serve(_) => serve(cfg.dashboard)?,
        Command::Render(_) => render(&cfg.dashboard)?,
    }
    Ok(())
}

fn serve(cfg: DashboardConfig) -> Result<(), AppError> {
    let addr: SocketAddr = cfg
        .addr
        .parse()
        .map_err(|e| ServerError::BadRequest(format!("invalid listen address '{}': {e}", cfg.addr)))?;

    // The server answers with a loading page until the artifact is in.
    let dashboard = shared_loading();
    spawn_loader(cfg.clone(), dashboard.clone());

    tracing::info!("Starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(cfg.max_workers);

    server.serve(move |req, _info| match handle(req, &dashboard) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    })?;

    tracing::info!("Server shut down cleanly.");
    Ok(())
}

fn render(cfg: &DashboardConfig) -> Result<(), AppError> {
    let app = match DashboardState::load(cfg) {
        DashboardState::Ready(app) => app,
        DashboardState::Error(msg) => return Err(ServerError::Load(msg).into()),
        DashboardState::Loading => return Err(ServerError::InternalError.into()),
    };

    if let Some(parent) = cfg.render_output.parent() {
        fs::create_dir_all(parent)?;
    }
    let page = templates::pages::dashboard_page(&app);
    fs::write(&cfg.render_output, page.into_string())?;

    tracing::info!(
        "Rendered {} complexes to {}",
        app.view.rows.len(),
        cfg.render_output.display()
    );
    Ok(())
}
