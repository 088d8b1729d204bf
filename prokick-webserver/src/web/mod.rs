use std::sync::Arc;

use prokick_core::gateways::{backend::BackendGateway, geolookup::GeoLookupGateway};
use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
mod guards;
mod venue_cache;

#[cfg(test)]
mod mockgw;

use venue_cache::VenueCache;

pub struct Gateways {
    pub backend: Arc<dyn BackendGateway + Send + Sync>,
    pub geo: Arc<dyn GeoLookupGateway + Send + Sync>,
}

pub(crate) fn rocket_instance(
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let Gateways { backend, geo } = gateways;

    let mut instance = r
        .manage(guards::Backend(backend))
        .manage(guards::GeoLookup(geo))
        .manage(VenueCache::new());

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

pub async fn run(gateways: Gateways, port: Option<u16>) {
    let rocket_cfg = port.map(|port| RocketCfg {
        port,
        ..RocketCfg::default()
    });
    let instance = rocket_instance(mounts(), rocket_cfg, gateways);
    if let Err(err) = instance.launch().await {
        log::error!("Unable to run web server: {err}");
    }
}
