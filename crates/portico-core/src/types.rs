//! Spatial and common wire types

use crate::error::{PorticoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A 3D vector, serialized as `{"x": .., "y": .., "z": ..}`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn from_array(arr: [f32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// A rotation quaternion, serialized as `{"x": .., "y": .., "z": .., "w": ..}`.
///
/// Euler conversions use the platform engine's ZXY extrinsic rotation order
/// (equivalent to YXZ intrinsic), angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_array(arr: [f32; 4]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
            w: arr[3],
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Build a quaternion from Euler angles in degrees.
    ///
    /// `yaw` spins around Y (horizontal facing), `pitch` tilts around X,
    /// `roll` tilts around Z.
    pub fn from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        let (sy, cy) = (yaw.to_radians() * 0.5).sin_cos();
        let (sp, cp) = (pitch.to_radians() * 0.5).sin_cos();
        let (sr, cr) = (roll.to_radians() * 0.5).sin_cos();

        Self {
            w: cy * cp * cr + sy * sp * sr,
            x: cy * sp * cr + sy * cp * sr,
            y: sy * cp * cr - cy * sp * sr,
            z: cy * cp * sr - sy * sp * cr,
        }
    }

    /// Convert back to Euler angles `(yaw, pitch, roll)` in degrees.
    /// Exact inverse of [`Quat::from_euler`] away from the pitch
    /// singularity; at |pitch| = 90 the yaw/roll split is ambiguous.
    pub fn to_euler(&self) -> (f32, f32, f32) {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);

        let sinp = 2.0 * (w * x - y * z);
        let pitch = if sinp.abs() >= 1.0 {
            (std::f32::consts::FRAC_PI_2).copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (w * y + x * z);
        let cosy_cosp = 1.0 - 2.0 * (x * x + y * y);
        let yaw = siny_cosp.atan2(cosy_cosp);

        let sinr_cosp = 2.0 * (w * z + x * y);
        let cosr_cosp = 1.0 - 2.0 * (x * x + z * z);
        let roll = sinr_cosp.atan2(cosr_cosp);

        (yaw.to_degrees(), pitch.to_degrees(), roll.to_degrees())
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An RGB color carried on the wire as a 6-char hex string without `#`
/// (e.g. `"FF0000"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-char hex color. No `#` prefix, exactly six hex digits.
    pub fn parse(s: &str) -> Result<Self> {
        if !Self::is_valid_hex(s) {
            return Err(PorticoError::InvalidColor(s.to_string()));
        }
        let packed = u32::from_str_radix(s, 16).map_err(|_| PorticoError::InvalidColor(s.to_string()))?;
        Ok(Self::from_packed(packed))
    }

    pub fn is_valid_hex(s: &str) -> bool {
        s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn from_packed(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let v1 = Vec3::new(1.0, 2.0, 3.0);
        let v2 = Vec3::new(4.0, 6.0, 3.0);

        assert_eq!(v1 + v2, Vec3::new(5.0, 8.0, 6.0));
        assert_eq!(v2 - v1, Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(v1 * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert!((v1.distance(&v2) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_quat_identity_roundtrip() {
        let q = Quat::from_euler(0.0, 0.0, 0.0);
        assert!((q.w - 1.0).abs() < 1e-6);
        assert!(q.x.abs() < 1e-6 && q.y.abs() < 1e-6 && q.z.abs() < 1e-6);
    }

    #[test]
    fn test_quat_yaw_roundtrip() {
        let q = Quat::from_euler(90.0, 0.0, 0.0);
        let (yaw, pitch, roll) = q.to_euler();
        assert!((yaw - 90.0).abs() < 0.01);
        assert!(pitch.abs() < 0.01);
        assert!(roll.abs() < 0.01);
    }

    #[test]
    fn test_quat_pitch_stands_image_upright() {
        // A flat-lying image is stood upright with pitch=90. The asin
        // singularity costs some f32 precision there, hence the loose
        // tolerance.
        let q = Quat::from_euler(0.0, 90.0, 0.0);
        let (_, pitch, _) = q.to_euler();
        assert!((pitch - 90.0).abs() < 0.1);
    }

    #[test]
    fn test_color_parse() {
        let c = Color::parse("FF8844").unwrap();
        assert_eq!(c, Color::new(0xFF, 0x88, 0x44));
        assert_eq!(c.to_hex(), "FF8844");

        assert!(Color::parse("#FF8844").is_err());
        assert!(Color::parse("FF884").is_err());
        assert!(Color::parse("GGGGGG").is_err());
        assert!(Color::parse("ff8844").is_ok());
    }

    #[test]
    fn test_vec3_serde_shape() {
        let v = Vec3::new(1.0, 2.5, -3.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.5,"z":-3.0}"#);
    }
}
