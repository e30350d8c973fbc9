pub mod _structs;
pub mod geo;

pub use _structs::*;
pub use geo::{compute_distance, Coordinates};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Catálogo de transporte: dueño de paradas, rutas y distancias medidas.
///
/// Paradas y rutas viven en arenas de sólo inserción; el resto de estructuras
/// las referencian por `StopId`/`BusId`.
#[derive(Debug, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,
    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,
    buses_at_stop: Vec<BTreeSet<String>>,
    distances: BTreeMap<(StopId, StopId), u32>,
    routing_settings: Option<RoutingSettings>,
}

impl TransportCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega una parada nueva. Los nombres repetidos se rechazan.
    pub fn add_stop(
        &mut self,
        name: impl Into<String>,
        coordinates: Coordinates,
    ) -> Result<StopId, CatalogueError> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId(self.stops.len());
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop {
            id,
            name,
            coordinates,
        });
        self.buses_at_stop.push(BTreeSet::new());
        Ok(id)
    }

    /// Registra la distancia medida `from -> to` en metros.
    pub fn add_distance(&mut self, from: &str, meters: u32, to: &str) -> Result<(), CatalogueError> {
        let from_id = self.stop_id(from)?;
        let to_id = self.stop_id(to)?;
        self.distances.insert((from_id, to_id), meters);
        Ok(())
    }

    /// Agrega una ruta. Todas sus paradas deben existir y cada par de paradas
    /// consecutivas del recorrido completo debe tener distancia medida.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        stop_names: &[S],
        is_roundtrip: bool,
    ) -> Result<BusId, CatalogueError> {
        let name = name.into();
        if self.bus_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }
        if stop_names.len() < 2 {
            return Err(CatalogueError::TooFewStops(name));
        }

        let stops = stop_names
            .iter()
            .map(|stop| self.stop_id(stop.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let bus = Bus {
            id: BusId(self.buses.len()),
            name,
            stops,
            is_roundtrip,
        };

        let route = bus.full_route();
        for pair in route.windows(2) {
            if self.try_distance(pair[0], pair[1]).is_none() {
                return Err(CatalogueError::MissingDistance {
                    bus: bus.name.clone(),
                    from: self.stops[pair[0].0].name.clone(),
                    to: self.stops[pair[1].0].name.clone(),
                });
            }
        }

        for stop in &bus.stops {
            self.buses_at_stop[stop.0].insert(bus.name.clone());
        }

        debug!(bus = %bus.name, stops = bus.stops.len(), "bus added");
        let id = bus.id;
        self.bus_index.insert(bus.name.clone(), id);
        self.buses.push(bus);
        Ok(id)
    }

    pub fn set_routing_settings(&mut self, settings: RoutingSettings) {
        self.routing_settings = Some(settings);
    }

    pub fn routing_settings(&self) -> Option<RoutingSettings> {
        self.routing_settings
    }

    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_index.get(name).map(|id| &self.stops[id.0])
    }

    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).map(|id| &self.buses[id.0])
    }

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.0]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Rutas que pasan por la parada, ordenadas por nombre.
    pub fn buses_at_stop(&self, id: StopId) -> &BTreeSet<String> {
        &self.buses_at_stop[id.0]
    }

    /// Igual que `buses_at_stop` pero por nombre; `None` si la parada no existe.
    pub fn buses_serving(&self, stop_name: &str) -> Option<&BTreeSet<String>> {
        self.find_stop(stop_name).map(|stop| self.buses_at_stop(stop.id))
    }

    /// Distancia medida en sentido exacto `from -> to`.
    pub fn measured_distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances.get(&(from, to)).copied()
    }

    /// Distancia `from -> to`; si no fue medida se usa la del sentido inverso.
    pub fn try_distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.measured_distance(from, to)
            .or_else(|| self.measured_distance(to, from))
    }

    /// Como `try_distance`, pero la ausencia de distancia es un error de programación.
    pub fn distance(&self, from: StopId, to: StopId) -> u32 {
        self.try_distance(from, to).unwrap_or_else(|| {
            panic!(
                "no measured distance between {} and {}",
                self.stops[from.0].name, self.stops[to.0].name
            )
        })
    }

    /// Todas las distancias medidas, en orden determinista.
    pub fn measured_distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    /// Longitud geográfica y real de una secuencia de paradas.
    pub fn route_length(&self, stops: &[StopId]) -> RouteLength {
        stops
            .windows(2)
            .fold(RouteLength::default(), |mut length, pair| {
                length.geo += compute_distance(
                    self.stops[pair[0].0].coordinates,
                    self.stops[pair[1].0].coordinates,
                );
                length.road += self.distance(pair[0], pair[1]) as u64;
                length
            })
    }

    pub fn bus_stats(&self, name: &str) -> Option<BusStats> {
        let bus = self.find_bus(name)?;
        let route = bus.full_route();
        let unique_stop_count = route.iter().collect::<BTreeSet<_>>().len();
        let length = self.route_length(&route);

        Some(BusStats {
            stop_count: route.len(),
            unique_stop_count,
            route_length: length.road,
            curvature: length.curvature(),
        })
    }

    fn stop_id(&self, name: &str) -> Result<StopId, CatalogueError> {
        self.stop_index
            .get(name)
            .copied()
            .ok_or_else(|| CatalogueError::UnknownStop(name.to_string()))
    }
}
