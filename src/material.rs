//! Surface materials for robot parts.

use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Phong material quadruple handed to the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// RGBA ambient reflectance.
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Material {
    pub const fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}

/// Visually distinct classes of parts, each mapped to one palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialClass {
    Body,
    Arm,
    LowerBody,
    Gun,
}

/// One material per [`MaterialClass`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialPalette {
    pub body: Material,
    pub arm: Material,
    pub lower_body: Material,
    pub gun: Material,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            body: Material::new(
                Vec4::new(0.0, 0.0, 0.0, 1.0),
                Vec4::new(0.1, 0.35, 0.1, 1.0),
                Vec4::new(0.45, 0.55, 0.45, 1.0),
                32.0,
            ),
            arm: Material::new(
                Vec4::new(0.0215, 0.1745, 0.0215, 0.55),
                Vec4::new(0.5, 0.0, 0.0, 1.0),
                Vec4::new(0.7, 0.6, 0.6, 1.0),
                32.0,
            ),
            lower_body: Material::new(
                Vec4::new(0.25, 0.25, 0.25, 1.0),
                Vec4::new(0.4, 0.4, 0.4, 1.0),
                Vec4::new(0.774597, 0.774597, 0.774597, 1.0),
                76.8,
            ),
            gun: Material::new(
                Vec4::new(0.0, 0.0, 0.0, 1.0),
                Vec4::new(0.01, 0.0, 0.01, 0.01),
                Vec4::new(0.5, 0.5, 0.5, 1.0),
                100.0,
            ),
        }
    }
}

impl MaterialPalette {
    pub fn get(&self, class: MaterialClass) -> &Material {
        match class {
            MaterialClass::Body => &self.body,
            MaterialClass::Arm => &self.arm,
            MaterialClass::LowerBody => &self.lower_body,
            MaterialClass::Gun => &self.gun,
        }
    }
}
