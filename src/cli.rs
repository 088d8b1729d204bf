use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;

use prokick_gateways::{GeorefGateway, HttpBackendGateway};
use prokick_webserver::web;

use crate::config::Config;

#[derive(Parser)]
#[command(version, about = "Same-origin API service for the ProKick web client")]
struct Args {
    /// Path to the configuration file
    #[arg(long, value_name = "FILE")]
    cfg_file: Option<PathBuf>,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.cfg_file.as_deref())?;
    let port = args.port.or(cfg.webserver.port);

    log::info!("Forwarding API calls to backend at {}", cfg.backend.url);
    let backend = HttpBackendGateway::new(&cfg.backend.url)?;
    log::info!("Using Georef API at {}", cfg.georef.url);
    let geo = GeorefGateway::new(&cfg.georef.url)?;

    let gateways = web::Gateways {
        backend: Arc::new(backend),
        geo: Arc::new(geo),
    };
    web::run(gateways, port).await;
    Ok(())
}
