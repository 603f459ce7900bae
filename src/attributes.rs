use std::fmt;
use std::sync::Arc;

use glam::Vec3;
use parking_lot::RwLock;
use rand::Rng;

/// Lower bound of every position coordinate.
pub const POSITION_MIN: f32 = -2.0;
/// Upper bound of every position coordinate.
pub const POSITION_MAX: f32 = 2.0;
/// Granularity of position edits made through a control.
pub const POSITION_STEP: f32 = 0.1;
/// Color given to every freshly created object.
pub const DEFAULT_COLOR: Rgb = Rgb::new(0x00ff00);

/// 24-bit RGB color stored as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(u32);

impl Rgb {
    pub const WHITE: Self = Self(0xffffff);

    /// Builds a color from a hex value; bits above the low 24 are dropped.
    pub const fn new(hex: u32) -> Self {
        Self(hex & 0xffffff)
    }

    pub const fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn hex(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Normalized channels in `0.0..=1.0`, unconverted (sRGB encoded).
    pub fn to_vec3(self) -> Vec3 {
        let [r, g, b] = self.to_bytes();
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// One of the three position coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X Position",
            Axis::Y => "Y Position",
            Axis::Z => "Z Position",
        }
    }
}

/// Clamps a coordinate into the position range.
pub fn clamp_coordinate(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(POSITION_MIN, POSITION_MAX)
}

/// Clamps a coordinate and snaps it onto the step grid through zero.
///
/// Snapping is idempotent: a snapped value snaps to itself.
pub fn snap_coordinate(value: f32) -> f32 {
    let clamped = clamp_coordinate(value);
    clamp_coordinate((clamped / POSITION_STEP).round() * POSITION_STEP)
}

/// Editable visual and spatial state of one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeState {
    pub color: Rgb,
    pub position: Vec3,
}

impl AttributeState {
    pub fn new(color: Rgb, position: Vec3) -> Self {
        Self {
            color,
            position: Vec3::new(
                clamp_coordinate(position.x),
                clamp_coordinate(position.y),
                clamp_coordinate(position.z),
            ),
        }
    }

    /// Default color at a uniformly random position inside the range, on the
    /// slider step grid.
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        let mut coordinate = || snap_coordinate(rng.gen_range(POSITION_MIN..=POSITION_MAX));
        let position = Vec3::new(coordinate(), coordinate(), coordinate());
        Self::new(DEFAULT_COLOR, position)
    }

    pub fn coordinate(&self, axis: Axis) -> f32 {
        self.position[axis.index()]
    }

    pub fn set_coordinate(&mut self, axis: Axis, value: f32) {
        self.position[axis.index()] = clamp_coordinate(value);
    }
}

impl Default for AttributeState {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR, Vec3::ZERO)
    }
}

/// Attribute state shared between an object and the controls of its section.
pub type SharedAttributes = Arc<RwLock<AttributeState>>;

pub(crate) fn share(state: AttributeState) -> SharedAttributes {
    Arc::new(RwLock::new(state))
}
