use super::rigid::RigidTransform;
use crate::common::errors::Result;
use motion_utils::vector::Vector3d;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User facing parameters of a [`RigidTransform`], the same ones the
/// ``rotate_motion`` tool takes on its command line. Missing fields in a JSON
/// file fall back to the identity, unknown ones are an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigidTransformConfig {
    /// Rotation about X in degrees
    pub rx: f64,
    /// Rotation about Y in degrees
    pub ry: f64,
    /// Rotation about Z in degrees
    pub rz: f64,
    pub center: bool,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
}
impl Default for RigidTransformConfig {
    fn default() -> Self {
        Self {
            rx: 0.0,
            ry: 0.0,
            rz: 0.0,
            center: false,
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
        }
    }
}
impl RigidTransformConfig {
    pub fn to_transform(&self) -> RigidTransform {
        RigidTransform::from_euler_deg(self.rx, self.ry, self.rz)
            .with_centering(self.center)
            .with_offset(Vector3d::new(self.tx, self.ty, self.tz))
    }
    /// # Errors
    /// Will return an error if the string isn't a valid config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
    /// # Errors
    /// Will return an error if the file can't be read or parsed
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
    /// # Errors
    /// Will return an error if the file can't be written
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json_string)?;
        Ok(())
    }
}
