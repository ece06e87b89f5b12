//! Graphics module
//!
//! Provides materials, shader variations and the draw submission queue.

pub mod material;
pub mod shader;

// Re-export commonly used types
pub use material::{CullMode, Material, MaterialError, MaterialUniform, TextureSlot, TextureType};
pub use shader::{DrawCall, RenderQueue, ShaderFlags, ShaderLibrary, ShaderVariation};
