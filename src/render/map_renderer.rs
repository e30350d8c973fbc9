use super::settings::RenderSettings;
use super::svg::{
    Circle, Color, Document, PathProps, Point, Polyline, StrokeLineCap, StrokeLineJoin, Text,
};
use crate::catalogue::{Bus, Coordinates, Stop, TransportCatalogue};
use geo::{BoundingRect, MultiPoint};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

const EPSILON: f64 = 1e-6;
const FONT_FAMILY: &str = "Verdana";

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Proyecta coordenadas geográficas sobre el lienzo SVG, conservando la
/// proporción y dejando `padding` en los bordes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom_coeff: f64,
}

impl SphereProjector {
    pub fn new(points: &[Coordinates], max_width: f64, max_height: f64, padding: f64) -> Self {
        let mut projector = Self {
            padding,
            min_lon: 0.0,
            max_lat: 0.0,
            zoom_coeff: 0.0,
        };

        let multi_point: MultiPoint<f64> = points
            .iter()
            .map(|coordinates| (coordinates.lng, coordinates.lat))
            .collect::<Vec<_>>()
            .into();
        let Some(bounds) = multi_point.bounding_rect() else {
            return projector;
        };

        projector.min_lon = bounds.min().x;
        projector.max_lat = bounds.max().y;
        let lon_span = bounds.max().x - bounds.min().x;
        let lat_span = bounds.max().y - bounds.min().y;

        let width_zoom = (!is_zero(lon_span)).then(|| (max_width - 2.0 * padding) / lon_span);
        let height_zoom = (!is_zero(lat_span)).then(|| (max_height - 2.0 * padding) / lat_span);

        projector.zoom_coeff = match (width_zoom, height_zoom) {
            (Some(width), Some(height)) => width.min(height),
            (Some(width), None) => width,
            (None, Some(height)) => height,
            (None, None) => 0.0,
        };
        projector
    }

    pub fn project(&self, coordinates: Coordinates) -> Point {
        Point::new(
            (coordinates.lng - self.min_lon) * self.zoom_coeff + self.padding,
            (self.max_lat - coordinates.lat) * self.zoom_coeff + self.padding,
        )
    }
}

/// Elementos del mapa. Cada capa se dibuja completa antes de la siguiente.
#[derive(Debug, Clone, PartialEq)]
pub enum MapItem {
    Line(Polyline),
    Label(Text),
    Point(Circle),
}

impl MapItem {
    pub fn draw(self, document: &mut Document) {
        match self {
            MapItem::Line(line) => document.add(line),
            MapItem::Label(label) => document.add(label),
            MapItem::Point(point) => document.add(point),
        }
    }
}

struct MapRenderer<'a> {
    catalogue: &'a TransportCatalogue,
    settings: &'a RenderSettings,
    projector: SphereProjector,
}

impl MapRenderer<'_> {
    fn point_of(&self, stop: &Stop) -> Point {
        self.projector.project(stop.coordinates)
    }

    fn route_line(&self, bus: &Bus, color: &Color) -> MapItem {
        let line: Polyline = bus
            .full_route()
            .into_iter()
            .map(|id| self.point_of(self.catalogue.stop(id)))
            .collect();

        MapItem::Line(
            line.fill_color(Color::None)
                .stroke_color(color.clone())
                .stroke_width(self.settings.line_width)
                .stroke_line_cap(StrokeLineCap::Round)
                .stroke_line_join(StrokeLineJoin::Round),
        )
    }

    fn bus_labels(&self, bus: &Bus, color: &Color) -> Vec<MapItem> {
        let mut anchors = Vec::with_capacity(2);
        if let Some(&first) = bus.stops.first() {
            anchors.push(first);
            match bus.terminal() {
                Some(terminal) if !bus.is_roundtrip && terminal != first => anchors.push(terminal),
                _ => {}
            }
        }

        anchors
            .into_iter()
            .flat_map(|id| {
                let base = Text::new()
                    .position(self.point_of(self.catalogue.stop(id)))
                    .offset(self.settings.bus_label_offset)
                    .font_size(self.settings.bus_label_font_size)
                    .font_family(FONT_FAMILY)
                    .font_weight("bold")
                    .data(bus.name.as_str());
                [
                    MapItem::Label(self.underlayer(base.clone())),
                    MapItem::Label(base.fill_color(color.clone())),
                ]
            })
            .collect()
    }

    fn stop_point(&self, stop: &Stop) -> MapItem {
        MapItem::Point(
            Circle::new()
                .center(self.point_of(stop))
                .radius(self.settings.stop_radius)
                .fill_color("white"),
        )
    }

    fn stop_labels(&self, stop: &Stop) -> [MapItem; 2] {
        let base = Text::new()
            .position(self.point_of(stop))
            .offset(self.settings.stop_label_offset)
            .font_size(self.settings.stop_label_font_size)
            .font_family(FONT_FAMILY)
            .data(stop.name.as_str());
        [
            MapItem::Label(self.underlayer(base.clone())),
            MapItem::Label(base.fill_color("black")),
        ]
    }

    fn underlayer(&self, text: Text) -> Text {
        text.fill_color(self.settings.underlayer_color.clone())
            .stroke_color(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .stroke_line_cap(StrokeLineCap::Round)
            .stroke_line_join(StrokeLineJoin::Round)
    }
}

/// Dibuja el mapa esquemático: líneas de rutas, nombres de rutas, paradas y
/// nombres de paradas, en ese orden. Sólo aparecen paradas con al menos una ruta.
#[instrument(skip_all, fields(buses = catalogue.buses().len()))]
pub fn render_map(catalogue: &TransportCatalogue, settings: &RenderSettings) -> Document {
    let buses: BTreeMap<&str, &Bus> = catalogue
        .buses()
        .iter()
        .filter(|bus| !bus.stops.is_empty())
        .map(|bus| (bus.name.as_str(), bus))
        .collect();

    let stops: BTreeMap<&str, &Stop> = buses
        .values()
        .flat_map(|bus| bus.stops.iter())
        .map(|&id| {
            let stop = catalogue.stop(id);
            (stop.name.as_str(), stop)
        })
        .collect();

    let coordinates: Vec<Coordinates> = stops.values().map(|stop| stop.coordinates).collect();
    let renderer = MapRenderer {
        catalogue,
        settings,
        projector: SphereProjector::new(
            &coordinates,
            settings.width,
            settings.height,
            settings.padding,
        ),
    };

    let mut lines = Vec::with_capacity(buses.len());
    let mut bus_labels = Vec::new();
    for (index, bus) in buses.values().enumerate() {
        let color = settings.palette_color(index);
        lines.push(renderer.route_line(bus, &color));
        bus_labels.extend(renderer.bus_labels(bus, &color));
    }

    let points = stops.values().map(|stop| renderer.stop_point(stop));
    let stop_labels = stops.values().flat_map(|stop| renderer.stop_labels(stop));

    let mut document = Document::new();
    lines
        .into_iter()
        .chain(bus_labels)
        .chain(points)
        .chain(stop_labels)
        .for_each(|item| item.draw(&mut document));

    debug!(
        stops = stops.len(),
        objects = document.objects().len(),
        "Map rendered"
    );
    document
}
