/// Celestial body registry: visual and descriptive attributes for the sun
/// and the eight planets, loaded from embedded JSON.
///
/// Angular speeds are authored in radians per reference unit; the animation
/// tick scales them by elapsed seconds × 10. The moon is not part of the
/// registry and has its own fixed table below.

use orrery_engine::Color;
use serde::Deserialize;

const BODIES_JSON: &str = include_str!("../data/bodies.json");

/// Registry key of the star at the center.
pub const SUN_KEY: &str = "sun";

// ── Moon ─────────────────────────────────────────────────────────────

pub const MOON_RADIUS: f32 = 0.5;
/// Distance from the moon's anchor (Earth) in world units.
pub const MOON_OFFSET: f32 = 5.0;
pub const MOON_ORBITAL_SPEED: f32 = 0.03;
pub const MOON_COLOR: u32 = 0xcccccc;
pub const MOON_TITLE: &str = "Earth's Moon";
pub const MOON_FACTS: [(&str, &str); 5] = [
    ("Type", "Natural Satellite"),
    ("Diameter", "3,474 km"),
    ("Distance from Earth", "384,400 km"),
    ("Orbital Period", "27.3 days"),
    ("Composition", "Rocky surface, iron core"),
];

/// Fallback for unparseable colors.
const FALLBACK_COLOR: Color = Color::new(0.7, 0.7, 0.7);

/// Raw JSON ring structure.
#[derive(Debug, Deserialize)]
struct RawRing {
    inner: f32,
    outer: f32,
    color: String,
    opacity: f32,
}

/// Raw JSON body structure.
#[derive(Debug, Deserialize)]
struct RawBody {
    key: String,
    radius: f32,
    #[serde(default)]
    distance: f32,
    #[serde(default)]
    orbital_speed: f32,
    #[serde(default)]
    rotation_speed: f32,
    #[serde(default)]
    tilt: f32,
    color: String,
    #[serde(default)]
    ring: Option<RawRing>,
    facts: Vec<(String, String)>,
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct RegistryJson {
    bodies: Vec<RawBody>,
}

/// A flat ring around a body. Radii are multiples of the body radius.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpec {
    pub inner: f32,
    pub outer: f32,
    pub color: Color,
    pub opacity: f32,
}

/// Immutable per-body data.
#[derive(Debug, Clone)]
pub struct BodyDescriptor {
    pub key: String,
    /// Display title for the info panel.
    pub title: String,
    pub radius: f32,
    /// Distance from the sun; 0 for the sun itself.
    pub orbital_distance: f32,
    pub orbital_speed: f32,
    pub rotation_speed: f32,
    pub axial_tilt_degrees: f32,
    pub color: Color,
    pub ring: Option<RingSpec>,
    /// Label/text pairs in display order.
    pub facts: Vec<(String, String)>,
}

impl BodyDescriptor {
    pub fn is_sun(&self) -> bool {
        self.key == SUN_KEY
    }

    pub fn axial_tilt(&self) -> f32 {
        self.axial_tilt_degrees.to_radians()
    }
}

/// Parse a `rrggbb` hex string.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().map(Color::from_hex)
}

fn color_or_fallback(key: &str, hex: &str) -> Color {
    parse_hex_color(hex).unwrap_or_else(|| {
        log::warn!("bodies: {key} has invalid color {hex:?}, using grey");
        FALLBACK_COLOR
    })
}

/// "The Sun" for the star, the capitalised key for everything else.
fn title_for(key: &str) -> String {
    if key == SUN_KEY {
        return "The Sun".to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Body registry in authored order, sun first.
pub struct Registry {
    bodies: Vec<BodyDescriptor>,
    sun: usize,
}

impl Registry {
    /// Load the registry from embedded JSON.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(BODIES_JSON)
    }

    /// Parse a registry from a JSON string. Exactly one body must use the sun key.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let raw: RegistryJson = serde_json::from_str(json)?;
        let bodies: Vec<BodyDescriptor> = raw
            .bodies
            .into_iter()
            .map(|b| BodyDescriptor {
                title: title_for(&b.key),
                color: color_or_fallback(&b.key, &b.color),
                ring: b.ring.map(|r| RingSpec {
                    inner: r.inner,
                    outer: r.outer,
                    color: color_or_fallback(&b.key, &r.color),
                    opacity: r.opacity,
                }),
                radius: b.radius,
                orbital_distance: if b.key == SUN_KEY { 0.0 } else { b.distance },
                orbital_speed: b.orbital_speed,
                rotation_speed: b.rotation_speed,
                axial_tilt_degrees: b.tilt,
                facts: b.facts,
                key: b.key,
            })
            .collect();

        let mut suns = bodies.iter().enumerate().filter(|(_, b)| b.is_sun());
        let sun = match (suns.next(), suns.next()) {
            (Some((i, _)), None) => i,
            (None, _) => return Err(serde_json::Error::custom("registry has no sun entry")),
            (Some(_), Some(_)) => return Err(serde_json::Error::custom("registry has more than one sun entry")),
        };

        Ok(Self { bodies, sun })
    }

    pub fn get(&self, index: usize) -> Option<&BodyDescriptor> {
        self.bodies.get(index)
    }

    /// Index and descriptor for `key`.
    pub fn by_key(&self, key: &str) -> Option<(usize, &BodyDescriptor)> {
        self.bodies.iter().enumerate().find(|(_, b)| b.key == key)
    }

    pub fn sun_index(&self) -> usize {
        self.sun
    }

    pub fn sun(&self) -> &BodyDescriptor {
        &self.bodies[self.sun]
    }

    /// Every orbiting body with its registry index, in authored order.
    pub fn planets(&self) -> impl Iterator<Item = (usize, &BodyDescriptor)> {
        self.bodies.iter().enumerate().filter(|(_, b)| !b.is_sun())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_registry() {
        let registry = Registry::load().expect("Failed to load body registry");
        assert_eq!(registry.len(), 9, "sun plus eight planets");
        assert_eq!(registry.planets().count(), 8);
        assert_eq!(registry.sun().title, "The Sun");
        assert_eq!(registry.sun().orbital_distance, 0.0);
    }

    #[test]
    fn planets_keep_authored_order() {
        let registry = Registry::load().unwrap();
        let keys: Vec<&str> = registry.planets().map(|(_, b)| b.key.as_str()).collect();
        assert_eq!(
            keys,
            ["mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune"]
        );
        let distances: Vec<f32> = registry.planets().map(|(_, b)| b.orbital_distance).collect();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn earth_values() {
        let registry = Registry::load().unwrap();
        let (_, earth) = registry.by_key("earth").unwrap();
        assert_eq!(earth.title, "Earth");
        assert_eq!(earth.radius, 2.0);
        assert_eq!(earth.orbital_distance, 40.0);
        assert_eq!(earth.color, Color::from_hex(0x2244bb));
        assert!((earth.axial_tilt() - 23.4_f32.to_radians()).abs() < 1e-6);
        assert_eq!(earth.facts.len(), 6);
        assert_eq!(earth.facts[4], ("Moons".to_string(), "1 (Luna)".to_string()));
    }

    #[test]
    fn only_saturn_and_uranus_have_rings() {
        let registry = Registry::load().unwrap();
        let ringed: Vec<&str> = registry
            .iter()
            .filter(|b| b.ring.is_some())
            .map(|b| b.key.as_str())
            .collect();
        assert_eq!(ringed, ["saturn", "uranus"]);

        let (_, uranus) = registry.by_key("uranus").unwrap();
        let ring = uranus.ring.as_ref().unwrap();
        assert_eq!((ring.inner, ring.outer, ring.opacity), (1.2, 1.8, 0.3));
        assert_eq!(ring.color, Color::from_hex(0x88bbcc));
    }

    #[test]
    fn sun_facts_in_order() {
        let registry = Registry::load().unwrap();
        let labels: Vec<&str> = registry.sun().facts.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Type", "Diameter", "Mass", "Temperature", "Composition"]);
    }

    #[test]
    fn missing_sun_is_an_error() {
        let json = r#"{ "bodies": [
            { "key": "mars", "radius": 1, "distance": 5, "color": "ff0000", "facts": [] }
        ] }"#;
        let err = Registry::from_json(json).err().unwrap();
        assert!(err.to_string().contains("no sun"));
    }

    #[test]
    fn bad_color_falls_back_to_grey() {
        let json = r#"{ "bodies": [
            { "key": "sun", "radius": 1, "color": "nope", "facts": [] }
        ] }"#;
        let registry = Registry::from_json(json).unwrap();
        assert_eq!(registry.sun().color, FALLBACK_COLOR);
    }

    #[test]
    fn titles() {
        assert_eq!(title_for("sun"), "The Sun");
        assert_eq!(title_for("neptune"), "Neptune");
        assert_eq!(title_for(""), "");
    }
}
