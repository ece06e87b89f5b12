//! Core components for the entity system

use crate::io::{StreamError, StreamReader, StreamWriter};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Transform component representing position, rotation, and scale in local space
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Convert this transform to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn serialize<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<(), StreamError> {
        stream.write(self)
    }

    pub fn deserialize<R: Read>(stream: &mut StreamReader<R>) -> Result<Self, StreamError> {
        stream.read()
    }
}

/// Display name of a game object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_transform_default() {
        let transform = Transform::default();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_transform_to_matrix() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.to_matrix();
        assert_eq!(matrix.w_axis.truncate(), transform.position);
    }

    #[test]
    fn test_transform_stream() {
        let transform =
            Transform::from_position(Vec3::new(5.0, 10.0, 15.0)).with_scale(Vec3::splat(2.0));

        let mut writer = StreamWriter::new(Vec::new());
        transform.serialize(&mut writer).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(bytes.len(), 10 * 4);

        let mut reader = StreamReader::new(Cursor::new(bytes));
        assert_eq!(Transform::deserialize(&mut reader).unwrap(), transform);
    }

    #[test]
    fn test_name_component() {
        let name = Name::new("Test Entity");
        assert_eq!(name.as_str(), "Test Entity");
        assert_eq!(Name::default().as_str(), "");
    }
}
