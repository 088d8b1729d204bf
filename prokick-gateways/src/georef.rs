//! Client for the Argentine geographic reference API (Georef).
//!
//! <https://apis.datos.gob.ar/georef/api> serves the administrative units
//! and geocoding used by the location pickers and the map search. Responses
//! change rarely, so they are cached in memory for an hour.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use prokick_core::gateways::geolookup::{Error, GeoLookupGateway, GeoSuggestion, Region, Result};
use prokick_entities::geo::MapPoint;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DEFAULT_GEOREF_URL: &str = "https://apis.datos.gob.ar/georef/api";

const CACHE_TTL: Duration = Duration::from_secs(60 * 60);
const MAX_MUNICIPALITIES: usize = 5000;
const MAX_LOCALITIES: usize = 5000;
const MAX_PROVINCES: usize = 50;

pub struct GeorefGateway {
    base_url: String,
    client: Client,
    cache: Mutex<HashMap<String, (Instant, Value)>>,
}

impl std::fmt::Debug for GeorefGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeorefGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(serde::Deserialize)]
struct Named {
    nombre: String,
}

#[derive(serde::Deserialize)]
struct IdNamed {
    id: String,
    nombre: String,
}

#[derive(serde::Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

#[derive(serde::Deserialize)]
struct Altura {
    valor: Option<u32>,
}

#[derive(serde::Deserialize)]
struct Direccion {
    calle: Named,
    altura: Option<Altura>,
    localidad_censal: Option<Named>,
    provincia: Named,
    ubicacion: LatLon,
}

#[derive(serde::Deserialize)]
struct Localidad {
    nombre: String,
    departamento: Option<Named>,
    provincia: Named,
    centroide: LatLon,
}

impl From<IdNamed> for Region {
    fn from(from: IdNamed) -> Self {
        Self {
            id: from.id,
            name: from.nombre,
        }
    }
}

/// Georef pads absent address parts; collapse ` ,` leftovers.
fn tidy_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for part in label.split(',') {
        let part = part.trim_end();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(part);
    }
    out
}

impl GeorefGateway {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(crate::HTTP_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            client,
            cache: Mutex::new(HashMap::new()),
        })
    }

    fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let mut key = path.to_owned();
        for (name, value) in params {
            key.push_str(&format!("&{name}={value}"));
        }
        if let Some((fetched_at, value)) = self.cache.lock().get(&key) {
            if fetched_at.elapsed() < CACHE_TTL {
                return Ok(value.clone());
            }
        }

        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|err| Error(err.to_string()))?;
        if !response.status().is_success() {
            return Err(Error(format!("status {}", response.status())));
        }
        let value: Value = response.json().map_err(|err| Error(err.to_string()))?;
        self.cache.lock().insert(key, (Instant::now(), value.clone()));
        Ok(value)
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut value = self.get_json(path, params)?;
        let list = value.get_mut(field).map(Value::take).unwrap_or(Value::Null);
        serde_json::from_value(list).map_err(|err| Error(err.to_string()))
    }

    fn search_direcciones(&self, query: &str, max: usize) -> Vec<Direccion> {
        let params = [
            ("direccion", query.to_owned()),
            ("max", max.to_string()),
        ];
        self.get_list("/direcciones", "direcciones", &params)
            .unwrap_or_else(|err| {
                log::debug!("direcciones lookup failed: {err}");
                vec![]
            })
    }

    fn search_localidades(&self, query: &str, max: usize) -> Vec<Localidad> {
        let params = [
            ("nombre", query.to_owned()),
            ("max", max.to_string()),
            ("campos", "nombre,departamento,provincia,centroide".to_owned()),
        ];
        self.get_list("/localidades", "localidades", &params)
            .unwrap_or_else(|err| {
                log::debug!("localidades lookup failed: {err}");
                vec![]
            })
    }
}

impl GeoLookupGateway for GeorefGateway {
    fn provinces(&self) -> Result<Vec<Region>> {
        let params = [
            ("campos", "id,nombre".to_owned()),
            ("orden", "nombre".to_owned()),
            ("max", MAX_PROVINCES.to_string()),
        ];
        let list: Vec<IdNamed> = self.get_list("/provincias", "provincias", &params)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    fn municipalities(&self, province: &str) -> Result<Vec<Region>> {
        let params = [
            ("provincia", province.to_owned()),
            ("campos", "id,nombre".to_owned()),
            ("orden", "nombre".to_owned()),
            ("max", MAX_MUNICIPALITIES.to_string()),
        ];
        let list: Vec<IdNamed> = self.get_list("/municipios", "municipios", &params)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    fn localities(&self, province: &str, municipality: Option<&str>) -> Result<Vec<Region>> {
        let mut params = vec![
            ("provincia", province.to_owned()),
            ("campos", "id,nombre".to_owned()),
            ("orden", "nombre".to_owned()),
            ("max", MAX_LOCALITIES.to_string()),
        ];
        if let Some(municipality) = municipality {
            params.push(("municipio", municipality.to_owned()));
        }
        let list: Vec<IdNamed> = self.get_list("/localidades", "localidades", &params)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    fn search_streets(&self, province: &str, name: &str, max: usize) -> Result<Vec<Region>> {
        let params = [
            ("provincia", province.to_owned()),
            ("nombre", name.to_owned()),
            ("max", max.to_string()),
        ];
        let list: Vec<IdNamed> = self.get_list("/calles", "calles", &params)?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    fn resolve_address_lat_lng(
        &self,
        province: &str,
        city: &str,
        address: &str,
    ) -> Option<MapPoint> {
        let params = [
            ("direccion", address.to_owned()),
            ("provincia", province.to_owned()),
            ("localidad_censal", city.to_owned()),
            ("max", "1".to_owned()),
        ];
        let first: Option<Direccion> = self
            .get_list("/direcciones", "direcciones", &params)
            .ok()?
            .into_iter()
            .next();
        let ubicacion = first?.ubicacion;
        MapPoint::try_from_lat_lng_deg(ubicacion.lat, ubicacion.lon)
    }

    fn search_places(&self, query: &str, max: usize) -> Result<Vec<GeoSuggestion>> {
        let mut suggestions = Vec::new();

        for d in self.search_direcciones(query, max) {
            let Some(pos) = MapPoint::try_from_lat_lng_deg(d.ubicacion.lat, d.ubicacion.lon)
            else {
                continue;
            };
            let altura = d
                .altura
                .and_then(|a| a.valor)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let localidad = d.localidad_censal.map(|l| l.nombre).unwrap_or_default();
            let label = tidy_label(&format!(
                "📍 {} {altura}, {localidad}, {}",
                d.calle.nombre, d.provincia.nombre
            ));
            suggestions.push(GeoSuggestion { label, pos });
        }

        for l in self.search_localidades(query, max) {
            let Some(pos) = MapPoint::try_from_lat_lng_deg(l.centroide.lat, l.centroide.lon)
            else {
                continue;
            };
            let departamento = l.departamento.map(|d| d.nombre).unwrap_or_default();
            let label = tidy_label(&format!(
                "🏙️ {}, {departamento}, {}",
                l.nombre, l.provincia.nombre
            ));
            suggestions.push(GeoSuggestion { label, pos });
        }

        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_collapse_missing_parts() {
        assert_eq!(
            tidy_label("📍 San Martín , , Santa Fe"),
            "📍 San Martín, Santa Fe"
        );
        assert_eq!(
            tidy_label("🏙️ Rosario, Rosario, Santa Fe"),
            "🏙️ Rosario, Rosario, Santa Fe"
        );
    }
}
