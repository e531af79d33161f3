use std::fmt;
use std::str::FromStr;

use crate::error::{BootstrapError, Result};

/// What to ask the windowing toolkit for. These map one-to-one onto the window and context hints
/// a GLFW-style toolkit takes before creating a window.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// (major, minor)
    pub gl_version: (u8, u8),
    /// Core profile: no deprecated fixed-function entry points.
    pub core_profile: bool,
    /// Only a request: glutin has no switch for it, and creates core profile contexts
    /// forward-compatible where the platform tells the two apart (macOS).
    pub forward_compatible: bool,
    pub vsync: bool,
}

impl SurfaceConfig {
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title<T: Into<String>>(mut self, title: T) -> Self {
        self.title = title.into();
        self
    }

    /// Rejects requests no toolkit could satisfy before a window is ever opened.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BootstrapError::InvalidConfig(format!(
                "surface size must be non-zero, got {}x{}", self.width, self.height
            )));
        }

        if self.gl_version.0 < 3 && self.core_profile {
            return Err(BootstrapError::InvalidConfig(format!(
                "core profile needs OpenGL 3.2 or later, got {}.{}",
                self.gl_version.0, self.gl_version.1
            )));
        }

        Ok(())
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            title: String::from("Test Window"),
            gl_version: (3, 3),
            core_profile: true,
            forward_compatible: true,
            vsync: true,
        }
    }
}

/// RGBA colour the colour target is cleared to every frame. Components are in `0.0..=1.0`, not
/// `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    pub const BLACK: ClearColor = ClearColor { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const RED: ClearColor = ClearColor { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for ClearColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

/// Parses `"r,g,b,a"` or `"r,g,b"` (alpha defaults to opaque).
impl FromStr for ClearColor {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self> {
        let mut components = Vec::with_capacity(4);

        for part in s.split(',') {
            let value: f32 = part.trim().parse().map_err(|_| {
                BootstrapError::InvalidConfig(format!("'{}' is not a colour component", part.trim()))
            })?;

            if !(0.0..=1.0).contains(&value) {
                return Err(BootstrapError::InvalidConfig(format!(
                    "colour component {} is outside 0.0..=1.0", value
                )));
            }

            components.push(value);
        }

        match components[..] {
            [r, g, b] => Ok(Self::new(r, g, b, 1.0)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(BootstrapError::InvalidConfig(format!(
                "expected 3 or 4 colour components, got {}", components.len()
            ))),
        }
    }
}
