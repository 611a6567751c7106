//! Serve command: run the HTTP service until Ctrl-C.

use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};

use crate::args::GlobalOptions;
use crate::common::logger::Log;
use crate::nighttemp::NightTemp;

pub async fn handle_serve_command(
    options: &GlobalOptions,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    log_version!();
    let context = super::prepare(options)?;

    let config_path = crate::config::get_config_path()?;
    context
        .config
        .log_config(&config_path.display().to_string());

    let bind = bind.as_deref().unwrap_or(context.config.bind());
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address '{bind}'"))?;
    let addr = SocketAddr::new(ip, port.unwrap_or(context.config.port()));

    if Log::is_debug() {
        log_pipe!();
        log_debug!("Debug mode enabled, logging provider calls");
    }

    let app = NightTemp::new(context.config.clone())?;
    Log::set_timestamps(true);
    let result = crate::server::serve(app, addr).await;
    Log::set_timestamps(false);

    log_end!();
    result
}

pub fn display_help() {
    log_version!();
    log_block_start!("serve - Run the HTTP service");
    log_block_start!("Usage: nighttemp serve [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--bind <addr>   Listen address (overrides 'bind' in the config)");
    log_indented!("--port <n>      Listen port (overrides 'port' in the config)");
    log_block_start!("Route:");
    log_indented!("GET /night-time-temperature?lat=<deg>&lng=<deg>");
    log_indented!("200 {{\"temperature\": 5175}}");
    log_indented!("400 bad coordinates, 502 provider failure, 500 computation failure");
    log_block_start!("Examples:");
    log_indented!("nighttemp serve --port 8080");
    log_indented!("curl 'http://127.0.0.1:8080/night-time-temperature?lat=40.71&lng=-74.01'");
    log_end!();
}
