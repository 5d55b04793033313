//! Script value representation
//!
//! `Value` is a closed tagged union: every value an action can produce
//! or consume is one of these variants. There is no open "any" type
//! and no reflection; dispatching on a value is a `match`.

use std::fmt;

/// Entity handle, resolved through the host bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// An online (or remembered offline) player
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Backing entity
    pub entity: EntityId,
    /// Exact name, as the host knows it
    pub name: String,
    /// Whether the player is currently online
    pub online: bool,
}

/// Free 3D vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    /// Create a new vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

/// World position with orientation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    /// World name; `None` for positions promoted from bare vectors
    pub world: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    /// Create a location without orientation
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: Some(world.into()),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Create a location with orientation
    pub fn with_direction(
        world: impl Into<String>,
        x: f64,
        y: f64,
        z: f64,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self {
            world: Some(world.into()),
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let world = self.world.as_deref().unwrap_or("~");
        write!(
            f,
            "{},{},{},{},{},{}",
            world, self.x, self.y, self.z, self.yaw, self.pitch
        )
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from channels
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` integer
    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Inventory item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    /// Canonical material id
    pub material: String,
    pub amount: i32,
    pub durability: i32,
    /// Custom display name, if set
    pub display_name: Option<String>,
    /// Custom model id, if set
    pub model: Option<i32>,
}

impl ItemStack {
    /// A single item of `material` with default meta
    pub fn of(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            amount: 1,
            durability: 0,
            display_name: None,
            model: None,
        }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.material, self.amount)
    }
}

/// Script value - the closed union of everything actions exchange
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Empty value
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Vector(Vector),
    Location(Location),
    Color(Color),
    Entity(EntityId),
    Player(Player),
    Item(ItemStack),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Vector(v) => write!(f, "{v}"),
            Value::Location(v) => write!(f, "{v}"),
            Value::Color(v) => write!(f, "{v}"),
            Value::Entity(v) => write!(f, "entity#{}", v.0),
            Value::Player(v) => write!(f, "{}", v.name),
            Value::Item(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}
