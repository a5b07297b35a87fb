//! Marker projection: coordinate lookup, marker placement and the map view.
//!
//! The core only decides which entities get a marker and which marker shows
//! its tooltip. Pixel placement is a passthrough to a [`MapProjection`]; the
//! bundled [`WebMercator`] matches the slippy-map tiling used by the renderer.

use std::{collections::BTreeMap, f64::consts::PI};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Error, Result, overlay::EntityId, overlay::HoverRegistry};

/// Edge length of a map tile in pixels.
/// Latitude bound of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

pub const TILE_SIZE: f64 = 256.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
/// Geographic position in degrees. Serialized as `[latitude, longitude]`.
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(self) -> f64 {
        self.latitude
    }

    pub fn longitude(self) -> f64 {
        self.longitude
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = Error;

    fn try_from([latitude, longitude]: [f64; 2]) -> Result<Self> {
        Coordinate::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.latitude, coordinate.longitude]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Fixed table of entity locations supplied by the content collaborator.
pub struct CoordinateTable(BTreeMap<EntityId, Coordinate>);

impl CoordinateTable {
    pub fn insert(&mut self, id: EntityId, coordinate: Coordinate) -> Option<Coordinate> {
        self.0.insert(id, coordinate)
    }

    pub fn get(&self, id: &EntityId) -> Option<Coordinate> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(EntityId, Coordinate)> for CoordinateTable {
    fn from_iter<T: IntoIterator<Item = (EntityId, Coordinate)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Read-only projection of an entity's display data shown above its marker.
pub struct Tooltip {
    pub title: String,
    pub subtitle: String,
}

/// Content entity that can be placed on the map.
pub trait MapEntity {
    fn entity_id(&self) -> EntityId;
    fn tooltip(&self) -> Tooltip;
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Anchor/content pair handed to the map renderer.
pub struct PlacedMarker {
    pub id: EntityId,
    pub anchor: Coordinate,
    pub aria_label: String,
    pub tooltip: Tooltip,
}

impl PlacedMarker {
    /// Resolve the marker's visual state against the hover registry.
    pub fn render(&self, hover: &HoverRegistry) -> RenderedMarker {
        let highlighted = hover.is_hovered(&self.id);
        RenderedMarker {
            id: self.id.clone(),
            anchor: self.anchor,
            aria_label: self.aria_label.clone(),
            highlighted,
            tooltip: highlighted.then(|| self.tooltip.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedMarker {
    pub id: EntityId,
    pub anchor: Coordinate,
    pub aria_label: String,
    pub highlighted: bool,
    pub tooltip: Option<Tooltip>,
}

/// Coordinate lookup over a [`CoordinateTable`].
#[derive(Clone, Copy, Debug)]
pub struct MarkerProjection<'a> {
    table: &'a CoordinateTable,
}

impl<'a> MarkerProjection<'a> {
    pub fn new(table: &'a CoordinateTable) -> Self {
        Self { table }
    }

    pub fn anchor_for(&self, id: &EntityId) -> Option<Coordinate> {
        self.table.get(id)
    }

    /// Place every entity that has a registered coordinate, keeping the
    /// presentation order. Entities without one are skipped.
    pub fn place<'e, E, I>(&self, entities: I) -> Vec<PlacedMarker>
    where
        E: MapEntity + 'e,
        I: IntoIterator<Item = &'e E>,
    {
        entities
            .into_iter()
            .filter_map(|entity| {
                let id = entity.entity_id();
                let Some(anchor) = self.anchor_for(&id) else {
                    trace!(%id, "no coordinate registered; marker skipped");
                    return None;
                };
                let tooltip = entity.tooltip();
                Some(PlacedMarker {
                    aria_label: format!("{}, {}", tooltip.title, tooltip.subtitle),
                    id,
                    anchor,
                    tooltip,
                })
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Initial viewport and zoom bounds handed to the map renderer. Values can be
/// overridden through environment variables.
pub struct MapView {
    pub center: Coordinate,
    pub default_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Pixel offset applied to the top-left of each marker overlay.
    pub overlay_offset: (f64, f64),
}

impl Default for MapView {
    fn default() -> Self {
        Self::with_overrides(
            env_f64("STARS_MAP_LAT"),
            env_f64("STARS_MAP_LON"),
            env_f64("STARS_MAP_ZOOM"),
        )
    }
}

impl MapView {
    /// Stock STARS view with optional overrides. An out-of-range center is
    /// ignored and the zoom is clamped to the view's bounds.
    pub fn with_overrides(
        latitude: Option<f64>,
        longitude: Option<f64>,
        zoom: Option<f64>,
    ) -> Self {
        let stock = Coordinate {
            latitude: 20.0,
            longitude: -40.0,
        };
        let center = Coordinate::new(
            latitude.unwrap_or(stock.latitude),
            longitude.unwrap_or(stock.longitude),
        )
        .unwrap_or(stock);

        let mut view = Self {
            center,
            default_zoom: 2.5,
            min_zoom: 2.0,
            max_zoom: 18.0,
            overlay_offset: (15.0, 15.0),
        };
        if let Some(zoom) = zoom.filter(|zoom| zoom.is_finite()) {
            view.default_zoom = view.clamp_zoom(zoom);
        }
        view
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Top-left corner of a marker overlay anchored at `anchor`.
    pub fn overlay_origin(&self, anchor: ScreenPoint) -> ScreenPoint {
        ScreenPoint {
            x: anchor.x - self.overlay_offset.0,
            y: anchor.y - self.overlay_offset.1,
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Converts geographic coordinates to viewport pixels.
pub trait MapProjection {
    fn project(&self, coordinate: Coordinate) -> ScreenPoint;
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Spherical Web Mercator projection over 256 px tiles.
pub struct WebMercator {
    center: Coordinate,
    zoom: f64,
    width: f64,
    height: f64,
}

impl WebMercator {
    /// Build a projection for a viewport of `width`×`height` pixels centred on
    /// the view's center. `zoom` is clamped to the view's bounds.
    pub fn new(view: &MapView, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center: view.center,
            zoom: view.clamp_zoom(zoom),
            width,
            height,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    fn tile_x(&self, longitude: f64) -> f64 {
        (longitude + 180.0) / 360.0 * self.zoom.exp2()
    }

    fn tile_y(&self, latitude: f64) -> f64 {
        let rad = latitude
            .clamp(-MAX_LATITUDE, MAX_LATITUDE)
            .to_radians();
        (1.0 - (rad.tan() + 1.0 / rad.cos()).ln() / PI) / 2.0 * self.zoom.exp2()
    }
}

impl MapProjection for WebMercator {
    fn project(&self, coordinate: Coordinate) -> ScreenPoint {
        let dx = self.tile_x(coordinate.longitude) - self.tile_x(self.center.longitude);
        let dy = self.tile_y(coordinate.latitude) - self.tile_y(self.center.latitude);
        ScreenPoint {
            x: dx * TILE_SIZE + self.width / 2.0,
            y: dy * TILE_SIZE + self.height / 2.0,
        }
    }
}
