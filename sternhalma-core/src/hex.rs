//! Hex grid geometry with axial coordinates
//!
//! Pointy-top orientation with `r` growing downwards on screen, so the
//! "top" of the board is negative `r`. The implicit cube coordinate is
//! `s = -q - r`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ParseHexError;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i32 {
        (self.q.abs() + self.r.abs() + self.s().abs()) / 2
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i32 {
        (*self - other).distance_to_center()
    }

    /// Get neighbor in a direction
    pub fn neighbor(&self, direction: Direction) -> Hex {
        *self + direction.delta()
    }

    /// Rotate about the origin by 60 degrees clockwise, `steps` times
    pub fn rotate_cw(&self, steps: u32) -> Hex {
        let (mut q, mut r, mut s) = (self.q, self.r, self.s());
        for _ in 0..steps % 6 {
            (q, r, s) = (-r, -s, -q);
        }
        Hex::new(q, r)
    }

    /// Rotate about the origin by 60 degrees counter-clockwise, `steps` times
    pub fn rotate_ccw(&self, steps: u32) -> Hex {
        let (mut q, mut r, mut s) = (self.q, self.r, self.s());
        for _ in 0..steps % 6 {
            (q, r, s) = (-s, -q, -r);
        }
        Hex::new(q, r)
    }

    /// Canonical map key, `"q,r"`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Inverse of [`Hex::key`]
    pub fn from_key(key: &str) -> Result<Hex, ParseHexError> {
        key.parse()
    }

    /// Snap fractional cube coordinates to the nearest hex.
    ///
    /// Each component is rounded independently; the one with the largest
    /// rounding error is then recomputed from the other two so that
    /// `q + r + s == 0` holds again.
    pub fn cube_round(fq: f64, fr: f64) -> Hex {
        let fs = -fq - fr;
        let mut q = fq.round();
        let mut r = fr.round();
        let s = fs.round();

        let dq = (q - fq).abs();
        let dr = (r - fr).abs();
        let ds = (s - fs).abs();

        if dq > dr && dq > ds {
            q = -r - s;
        } else if dr > ds {
            r = -q - s;
        }

        Hex::new(q as i32, r as i32)
    }

    /// Center of this hex in pixel space, for hexes of the given radius
    pub fn to_pixel(&self, size: f64) -> (f64, f64) {
        let q = self.q as f64;
        let r = self.r as f64;
        (size * SQRT_3 * (q + r / 2.0), size * 1.5 * r)
    }

    /// Hex containing a pixel-space point
    pub fn from_pixel(x: f64, y: f64, size: f64) -> Hex {
        let fq = (SQRT_3 / 3.0 * x - y / 3.0) / size;
        let fr = (2.0 / 3.0 * y) / size;
        Hex::cube_round(fq, fr)
    }
}

impl Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex::new(self.q + other.q, self.r + other.r)
    }
}

impl Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.q - other.q, self.r - other.r)
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, factor: i32) -> Hex {
        Hex::new(self.q * factor, self.r * factor)
    }
}

impl Neg for Hex {
    type Output = Hex;

    fn neg(self) -> Hex {
        Hex::new(-self.q, -self.r)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

impl FromStr for Hex {
    type Err = ParseHexError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (q, r) = key
            .split_once(',')
            .ok_or_else(|| ParseHexError::Malformed(key.to_string()))?;

        let component = |text: &str| {
            text.trim()
                .parse::<i32>()
                .map_err(|_| ParseHexError::BadComponent {
                    key: key.to_string(),
                    component: text.to_string(),
                })
        };

        Ok(Hex::new(component(q)?, component(r)?))
    }
}

// Serialized as the canonical key so hexes can be JSON map keys.
impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

/// The six unit directions of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    E,
    NE,
    NW,
    W,
    SW,
    SE,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::E,
        Direction::NE,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::SE,
    ];

    /// Unit offset in axial coordinates
    pub const fn delta(self) -> Hex {
        match self {
            Direction::E => Hex::new(1, 0),
            Direction::NE => Hex::new(1, -1),
            Direction::NW => Hex::new(0, -1),
            Direction::W => Hex::new(-1, 0),
            Direction::SW => Hex::new(-1, 1),
            Direction::SE => Hex::new(0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::E => Direction::W,
            Direction::NE => Direction::SW,
            Direction::NW => Direction::SE,
            Direction::W => Direction::E,
            Direction::SW => Direction::NE,
            Direction::SE => Direction::NW,
        }
    }
}

/// Direction vectors in axial coordinates: E, NE, NW, W, SW, SE
pub const DIRECTIONS: [Hex; 6] = [
    Direction::E.delta(),
    Direction::NE.delta(),
    Direction::NW.delta(),
    Direction::W.delta(),
    Direction::SW.delta(),
    Direction::SE.delta(),
];
