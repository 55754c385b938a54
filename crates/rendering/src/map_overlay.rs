//! Geographic view of a parcel outline.
//!
//! The same coordinate pairs the card draws as screen `(x, y)` are read here
//! as `(lng, lat)`. From them we compute the polygon path, its bounds and a
//! Web Mercator view that fits them, plus a static-map URL for the hosted
//! maps service.

use std::f64::consts::PI;

use bevy::math::Vec2;

use parcels::Coordinate;

/// Pixel size of the Mercator world at zoom 0.
const TILE_SIZE: f64 = 256.0;
/// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_78;
const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 21.0;

const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";
/// Largest size the static map endpoint serves without a premium plan.
const STATIC_MAP_MAX_SIDE: u32 = 640;

pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 41.0082,
    lng: 28.9784,
};
pub const DEFAULT_ZOOM: f64 = 15.0;

pub const LABEL_TEXT_FILL: &str = "#494949";
pub const LABEL_TEXT_STROKE: &str = "#f5f5f5";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Fill and stroke of the drawn parcel polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill_rgb: [u8; 3],
    pub fill_opacity: f32,
    pub stroke_rgb: [u8; 3],
    pub stroke_opacity: f32,
    pub stroke_weight: f32,
}

pub const POLYGON_STYLE: PolygonStyle = PolygonStyle {
    fill_rgb: crate::scene::BLUE,
    fill_opacity: 0.2,
    stroke_rgb: crate::scene::BLUE,
    stroke_opacity: 0.9,
    stroke_weight: 2.0,
};

/// Outline vertices as map positions: index 0 is longitude, index 1 latitude.
pub fn polygon_path(geometry: &[Coordinate]) -> Vec<LatLng> {
    geometry
        .iter()
        .map(|c| LatLng {
            lat: c[1],
            lng: c[0],
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl LatLngBounds {
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south: p.lat,
            west: p.lng,
            north: p.lat,
            east: p.lng,
        }
    }

    /// Smallest box containing every point, `None` for an empty path.
    pub fn from_path(path: &[LatLng]) -> Option<Self> {
        let (first, rest) = path.split_first()?;
        let mut bounds = Self::from_point(*first);
        for p in rest {
            bounds.extend(*p);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south = self.south.min(p.lat);
        self.north = self.north.max(p.lat);
        self.west = self.west.min(p.lng);
        self.east = self.east.max(p.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng {
            lat: (self.south + self.north) * 0.5,
            lng: (self.west + self.east) * 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Web Mercator position in `[0, 1]²` world units, y pointing south.
fn world_point(p: LatLng) -> (f64, f64) {
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lng + 180.0) / 360.0;
    let y = 0.5 - ((1.0 + lat.sin()) / (1.0 - lat.sin())).ln() / (4.0 * PI);
    (x, y)
}

/// Center and zoom of a map viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    /// The highest whole zoom at which `bounds` fits in a viewport of
    /// `size` pixels, centered on the bounds.
    pub fn fit(bounds: &LatLngBounds, size: Vec2) -> Self {
        let (west, north) = world_point(LatLng {
            lat: bounds.north,
            lng: bounds.west,
        });
        let (east, south) = world_point(LatLng {
            lat: bounds.south,
            lng: bounds.east,
        });
        let span_x = (east - west).abs();
        let span_y = (south - north).abs();

        let zoom_for = |span: f64, pixels: f32| {
            if span <= 0.0 {
                MAX_ZOOM
            } else {
                (pixels as f64 / (span * TILE_SIZE)).log2()
            }
        };
        let zoom = zoom_for(span_x, size.x)
            .min(zoom_for(span_y, size.y))
            .floor()
            .clamp(MIN_ZOOM, MAX_ZOOM);

        Self {
            center: bounds.center(),
            zoom,
        }
    }

    /// The default view when there is no outline, otherwise one fitting it.
    pub fn for_path(path: &[LatLng], size: Vec2) -> Self {
        match LatLngBounds::from_path(path) {
            Some(bounds) => Self::fit(&bounds, size),
            None => Self::default(),
        }
    }

    /// Pixel offset of `p` from the viewport's top-left corner.
    pub fn project(&self, p: LatLng, size: Vec2) -> Vec2 {
        let scale = TILE_SIZE * 2f64.powf(self.zoom);
        let (cx, cy) = world_point(self.center);
        let (x, y) = world_point(p);
        Vec2::new(
            ((x - cx) * scale) as f32 + size.x * 0.5,
            ((y - cy) * scale) as f32 + size.y * 0.5,
        )
    }
}

// ---------------------------------------------------------------------------
// Static map
// ---------------------------------------------------------------------------

fn map_color(rgb: [u8; 3], opacity: Option<f32>) -> String {
    let mut color = format!("0x{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
    if let Some(opacity) = opacity {
        let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        color.push_str(&format!("{alpha:02x}"));
    }
    color
}

fn style_color(hex: &str) -> String {
    format!("0x{}", hex.trim_start_matches('#'))
}

/// Request URL for a static image of `view` with `path` drawn on it.
///
/// Query values are joined with `%7C`, the escaped `|` separator.
pub fn static_map_url(api_key: &str, view: &MapView, path: &[LatLng], size: Vec2) -> String {
    let width = (size.x.round() as u32).clamp(1, STATIC_MAP_MAX_SIDE);
    let height = (size.y.round() as u32).clamp(1, STATIC_MAP_MAX_SIDE);
    let mut url = format!(
        "{STATIC_MAP_ENDPOINT}?center={},{}&zoom={}&size={width}x{height}",
        view.center.lat, view.center.lng, view.zoom as u32
    );
    url.push_str(&format!(
        "&style=feature:all%7Celement:labels.text.fill%7Ccolor:{}",
        style_color(LABEL_TEXT_FILL)
    ));
    url.push_str(&format!(
        "&style=feature:all%7Celement:labels.text.stroke%7Ccolor:{}",
        style_color(LABEL_TEXT_STROKE)
    ));
    if !path.is_empty() {
        let style = POLYGON_STYLE;
        url.push_str(&format!(
            "&path=fillcolor:{}%7Ccolor:{}%7Cweight:{}",
            map_color(style.fill_rgb, Some(style.fill_opacity)),
            map_color(style.stroke_rgb, Some(style.stroke_opacity)),
            style.stroke_weight
        ));
        // Close the ring explicitly; the endpoint does not.
        for p in path.iter().chain(path.first()) {
            url.push_str(&format!("%7C{},{}", p.lat, p.lng));
        }
    }
    url.push_str("&key=");
    url.push_str(api_key);
    url
}

/// Everything the map panel draws for one parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOverlay {
    pub path: Vec<LatLng>,
    pub bounds: Option<LatLngBounds>,
    pub view: MapView,
}

impl MapOverlay {
    pub fn new(geometry: &[Coordinate], size: Vec2) -> Self {
        let path = polygon_path(geometry);
        let bounds = LatLngBounds::from_path(&path);
        let view = match &bounds {
            Some(bounds) => MapView::fit(bounds, size),
            None => MapView::default(),
        };
        Self { path, bounds, view }
    }

    /// The outline in viewport pixels.
    pub fn projected(&self, size: Vec2) -> Vec<Vec2> {
        self.path
            .iter()
            .map(|p| self.view.project(*p, size))
            .collect()
    }

    pub fn static_map_url(&self, api_key: &str, size: Vec2) -> String {
        static_map_url(api_key, &self.view, &self.path, size)
    }
}
