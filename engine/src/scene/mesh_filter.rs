//! MeshFilter component: which mesh a game object draws

use crate::io::{StreamError, StreamReader, StreamWriter};
use std::io::{Read, Write};

/// Meshes the engine can generate without an asset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Cube,
    /// Double sided plane on XZ
    Plane,
    Quad,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Cube, Primitive::Plane, Primitive::Quad];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Cube => "cube",
            Primitive::Plane => "plane",
            Primitive::Quad => "quad",
        }
    }

    pub fn index_count(self) -> u32 {
        match self {
            Primitive::Cube => 36, // 6 faces * 2 triangles * 3 indices
            Primitive::Plane => 12,
            Primitive::Quad => 6,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// Mesh reference held by a game object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFilter {
    pub mesh_name: String,
    pub index_count: u32,
}

impl MeshFilter {
    pub fn new(mesh_name: impl Into<String>, index_count: u32) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            index_count,
        }
    }

    pub fn primitive(primitive: Primitive) -> Self {
        Self::new(primitive.name(), primitive.index_count())
    }

    pub fn serialize<W: Write>(&self, stream: &mut StreamWriter<W>) -> Result<(), StreamError> {
        stream.write_str(&self.mesh_name)?;
        stream.write(&self.index_count)
    }

    pub fn deserialize<R: Read>(stream: &mut StreamReader<R>) -> Result<Self, StreamError> {
        let mesh_name = stream.read()?;
        let index_count = stream.read()?;
        Ok(Self {
            mesh_name,
            index_count,
        })
    }
}
