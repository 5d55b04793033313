//! Value coercion registry
//!
//! Per domain kind, an ordered list of pure rules
//! `fn(&Value, &dyn Host) -> Option<T>` is tried in priority order and
//! the first match wins. "No match" is an explicit `None`, never an
//! error - callers decide whether absence is fatal.
//!
//! Textual grammars: vector strings admit only non-negative
//! components, while location strings admit signed ones. The two
//! grammars are intentionally not harmonized.

use once_cell::sync::Lazy;
use regex::Regex;

use super::script_value::{Color, EntityId, ItemStack, Location, Player, Value, Vector};
use crate::runtime::host::Host;

/// A single coercion rule
pub type Rule<T> = fn(&Value, &dyn Host) -> Option<T>;

static VECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d+)?,\d+(\.\d+)?,\d+(\.\d+)?$").expect("vector pattern")
});

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_\- \u{4e00}-\u{9fa5}]+,-?\d+(\.\d+)?,-?\d+(\.\d+)?,-?\d+(\.\d+)?(,-?\d+(\.\d+)?,-?\d+(\.\d+)?)?$",
    )
    .expect("location pattern")
});

static COLOR_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").expect("hex color pattern"));

static COLOR_RGB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^((25[0-5]|2[0-4]\d|[01]?\d?\d),){2}(25[0-5]|2[0-4]\d|[01]?\d?\d)$")
        .expect("rgb color pattern")
});

/// Ordered rule sets for every supported domain kind
pub struct Coercions {
    vector: Vec<Rule<Vector>>,
    location: Vec<Rule<Location>>,
    color: Vec<Rule<Color>>,
    string_list: Vec<Rule<Vec<String>>>,
    entity: Vec<Rule<EntityId>>,
    player: Vec<Rule<Player>>,
    item: Vec<Rule<ItemStack>>,
}

impl Coercions {
    /// The standard rule tables
    pub fn standard() -> Self {
        Self {
            vector: vec![vector_typed, vector_from_location, vector_from_str],
            location: vec![
                location_typed,
                location_from_player,
                location_from_entity,
                location_from_vector,
                location_from_str,
            ],
            color: vec![color_typed, color_from_str],
            string_list: vec![list_from_str, list_from_list],
            entity: vec![entity_typed, entity_from_player, entity_from_name],
            player: vec![player_typed, player_from_name],
            item: vec![item_typed, item_from_entity, item_from_material],
        }
    }

    fn first<T>(rules: &[Rule<T>], value: &Value, host: &dyn Host) -> Option<T> {
        rules.iter().find_map(|rule| rule(value, host))
    }

    pub fn vector(&self, value: &Value, host: &dyn Host) -> Option<Vector> {
        Self::first(&self.vector, value, host)
    }

    pub fn location(&self, value: &Value, host: &dyn Host) -> Option<Location> {
        Self::first(&self.location, value, host)
    }

    pub fn color(&self, value: &Value, host: &dyn Host) -> Option<Color> {
        Self::first(&self.color, value, host)
    }

    pub fn string_list(&self, value: &Value, host: &dyn Host) -> Option<Vec<String>> {
        Self::first(&self.string_list, value, host)
    }

    pub fn entity(&self, value: &Value, host: &dyn Host) -> Option<EntityId> {
        Self::first(&self.entity, value, host)
    }

    pub fn player(&self, value: &Value, host: &dyn Host) -> Option<Player> {
        Self::first(&self.player, value, host)
    }

    pub fn item(&self, value: &Value, host: &dyn Host) -> Option<ItemStack> {
        Self::first(&self.item, value, host)
    }
}

/// Standard coercion tables, built once
static STANDARD: Lazy<Coercions> = Lazy::new(Coercions::standard);

/// Coerce to a vector
pub fn to_vector(value: &Value, host: &dyn Host) -> Option<Vector> {
    STANDARD.vector(value, host)
}

/// Coerce to a location
pub fn to_location(value: &Value, host: &dyn Host) -> Option<Location> {
    STANDARD.location(value, host)
}

/// Coerce to a color
pub fn to_color(value: &Value, host: &dyn Host) -> Option<Color> {
    STANDARD.color(value, host)
}

/// Coerce to a string list
pub fn to_string_list(value: &Value, host: &dyn Host) -> Option<Vec<String>> {
    STANDARD.string_list(value, host)
}

/// Coerce to an entity handle
pub fn to_entity(value: &Value, host: &dyn Host) -> Option<EntityId> {
    STANDARD.entity(value, host)
}

/// Coerce to an online player
pub fn to_player(value: &Value, host: &dyn Host) -> Option<Player> {
    STANDARD.player(value, host)
}

/// Coerce to an item stack
pub fn to_item(value: &Value, host: &dyn Host) -> Option<ItemStack> {
    STANDARD.item(value, host)
}

/// Numeric view of a value: int, float, or numeric string
pub fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Int(v) => Some(*v as f64),
        Value::Float(v) => Some(*v),
        Value::Str(s) => s.parse().ok(),
        _ => None,
    }
}

/// Like [`to_f64`], narrowed to `f32`
pub fn to_f32(value: &Value) -> Option<f32> {
    to_f64(value).map(|v| v as f32)
}

/// Integer view of a value
pub fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Int(v) => Some(*v),
        Value::Float(v) => Some(*v as i64),
        Value::Str(s) => s.parse().ok(),
        _ => None,
    }
}

/// Textual view of a value; `Unit` has none
pub fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Unit => None,
        other => Some(other.to_string()),
    }
}

// === Vector rules ===

fn vector_typed(value: &Value, _host: &dyn Host) -> Option<Vector> {
    match value {
        Value::Vector(v) => Some(*v),
        _ => None,
    }
}

fn vector_from_location(value: &Value, _host: &dyn Host) -> Option<Vector> {
    match value {
        Value::Location(loc) => Some(Vector::new(loc.x, loc.y, loc.z)),
        _ => None,
    }
}

fn vector_from_str(value: &Value, _host: &dyn Host) -> Option<Vector> {
    let Value::Str(s) = value else { return None };
    if !VECTOR_RE.is_match(s) {
        return None;
    }
    let mut parts = s.split(',');
    Some(Vector::new(
        parts.next()?.parse().ok()?,
        parts.next()?.parse().ok()?,
        parts.next()?.parse().ok()?,
    ))
}

// === Location rules ===

fn location_typed(value: &Value, _host: &dyn Host) -> Option<Location> {
    match value {
        Value::Location(loc) => Some(loc.clone()),
        _ => None,
    }
}

fn location_from_player(value: &Value, host: &dyn Host) -> Option<Location> {
    match value {
        Value::Player(player) => host.entity_position(player.entity),
        _ => None,
    }
}

fn location_from_entity(value: &Value, host: &dyn Host) -> Option<Location> {
    match value {
        Value::Entity(entity) => host.entity_position(*entity),
        _ => None,
    }
}

fn location_from_vector(value: &Value, _host: &dyn Host) -> Option<Location> {
    match value {
        Value::Vector(v) => Some(Location {
            world: None,
            x: v.x,
            y: v.y,
            z: v.z,
            yaw: 0.0,
            pitch: 0.0,
        }),
        _ => None,
    }
}

fn location_from_str(value: &Value, _host: &dyn Host) -> Option<Location> {
    let Value::Str(s) = value else { return None };
    if !LOCATION_RE.is_match(s) {
        return None;
    }
    let parts: Vec<&str> = s.split(',').collect();
    Some(Location {
        world: Some(parts.first()?.to_string()),
        x: parts.get(1)?.parse().ok()?,
        y: parts.get(2)?.parse().ok()?,
        z: parts.get(3)?.parse().ok()?,
        yaw: parts.get(4).and_then(|v| v.parse().ok()).unwrap_or(0.0),
        pitch: parts.get(5).and_then(|v| v.parse().ok()).unwrap_or(0.0),
    })
}

// === Color rules ===

fn color_typed(value: &Value, _host: &dyn Host) -> Option<Color> {
    match value {
        Value::Color(color) => Some(*color),
        _ => None,
    }
}

fn color_from_str(value: &Value, _host: &dyn Host) -> Option<Color> {
    let Value::Str(s) = value else { return None };
    if COLOR_HEX_RE.is_match(s) {
        let hex = &s[1..];
        let packed = if hex.len() == 3 {
            // #rgb: double every nibble
            let mut wide = String::with_capacity(6);
            for c in hex.chars() {
                wide.push(c);
                wide.push(c);
            }
            u32::from_str_radix(&wide, 16).ok()?
        } else {
            u32::from_str_radix(hex, 16).ok()?
        };
        return Some(Color::from_packed(packed));
    }
    if COLOR_RGB_RE.is_match(s) {
        let mut parts = s.split(',');
        return Some(Color::new(
            parts.next()?.parse().ok()?,
            parts.next()?.parse().ok()?,
            parts.next()?.parse().ok()?,
        ));
    }
    let packed: u32 = s.parse().ok()?;
    Some(Color::from_packed(packed))
}

// === String list rules ===

fn list_from_str(value: &Value, _host: &dyn Host) -> Option<Vec<String>> {
    match value {
        Value::Str(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

fn list_from_list(value: &Value, _host: &dyn Host) -> Option<Vec<String>> {
    match value {
        Value::List(items) => Some(
            items
                .iter()
                .filter(|item| !matches!(item, Value::Unit))
                .map(|item| item.to_string())
                .collect(),
        ),
        _ => None,
    }
}

// === Entity rules ===

fn entity_typed(value: &Value, _host: &dyn Host) -> Option<EntityId> {
    match value {
        Value::Entity(entity) => Some(*entity),
        _ => None,
    }
}

fn entity_from_player(value: &Value, host: &dyn Host) -> Option<EntityId> {
    match value {
        Value::Player(player) if player.online => Some(player.entity),
        // offline record: resolve back to the live player first
        Value::Player(player) => host.player_exact(&player.name).map(|p| p.entity),
        _ => None,
    }
}

fn entity_from_name(value: &Value, host: &dyn Host) -> Option<EntityId> {
    match value {
        Value::Str(name) => host.player_exact(name).map(|p| p.entity),
        _ => None,
    }
}

// === Player rules ===

fn player_typed(value: &Value, host: &dyn Host) -> Option<Player> {
    match value {
        Value::Player(player) if player.online => Some(player.clone()),
        Value::Player(player) => host.player_exact(&player.name),
        _ => None,
    }
}

fn player_from_name(value: &Value, host: &dyn Host) -> Option<Player> {
    match value {
        Value::Str(name) => host.player_exact(name),
        _ => None,
    }
}

// === Item rules ===

fn item_typed(value: &Value, _host: &dyn Host) -> Option<ItemStack> {
    match value {
        Value::Item(item) => Some(item.clone()),
        _ => None,
    }
}

fn item_from_entity(value: &Value, host: &dyn Host) -> Option<ItemStack> {
    match value {
        Value::Entity(entity) => host.item_of_entity(*entity),
        _ => None,
    }
}

fn item_from_material(value: &Value, host: &dyn Host) -> Option<ItemStack> {
    match value {
        Value::Str(name) => host.material(name).map(ItemStack::of),
        _ => None,
    }
}
