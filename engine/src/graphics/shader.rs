//! Shader variations and draw submission
//!
//! A [`ShaderVariation`] is selected per material from the set of texture
//! slots it binds. Rendering through a variation records a [`DrawCall`] on the
//! shared [`RenderQueue`], which the frame loop drains and hands to the GPU
//! backend.

use crate::graphics::material::MaterialUniform;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Bit set describing which texture slots a shader variation samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderFlags(pub u32);

impl ShaderFlags {
    pub const NONE: Self = Self(0);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

/// A single recorded draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub shader_flags: ShaderFlags,
    pub shader_name: String,
    pub index_count: u32,
    pub uniform: MaterialUniform,
}

/// Per-frame list of submitted draws
#[derive(Debug, Default)]
pub struct RenderQueue {
    calls: Mutex<Vec<DrawCall>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn calls(&self) -> MutexGuard<'_, Vec<DrawCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, call: DrawCall) {
        trace!(
            shader = %call.shader_name,
            index_count = call.index_count,
            "Draw call submitted"
        );
        self.calls().push(call);
    }

    /// Take every pending draw call, leaving the queue empty
    pub fn drain(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.calls())
    }

    pub fn len(&self) -> usize {
        self.calls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls().is_empty()
    }

    /// Sum of indices over all pending draws
    pub fn total_indices(&self) -> u64 {
        self.calls().iter().map(|c| u64::from(c.index_count)).sum()
    }

    /// Material uniforms of the pending draws, packed for a uniform buffer upload
    pub fn uniform_data(&self) -> Vec<u8> {
        let uniforms: Vec<MaterialUniform> = self.calls().iter().map(|c| c.uniform).collect();
        bytemuck::cast_slice(&uniforms).to_vec()
    }
}

/// A compiled permutation of the deferred geometry shader
#[derive(Debug)]
pub struct ShaderVariation {
    flags: ShaderFlags,
    name: String,
    queue: Arc<RenderQueue>,
}

impl ShaderVariation {
    pub fn new(flags: ShaderFlags, queue: Arc<RenderQueue>) -> Self {
        Self {
            flags,
            name: format!("gbuffer_{:02x}", flags.0),
            queue,
        }
    }

    pub fn flags(&self) -> ShaderFlags {
        self.flags
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Submit an indexed draw using this variation with the given material constants
    pub fn render(&self, index_count: u32, uniform: MaterialUniform) {
        if index_count == 0 {
            debug!(shader = %self.name, "Skipping draw with zero indices");
            return;
        }
        self.queue.submit(DrawCall {
            shader_flags: self.flags,
            shader_name: self.name.clone(),
            index_count,
            uniform,
        });
    }
}

/// Owns every shader variation; materials only keep weak references
pub struct ShaderLibrary {
    variations: HashMap<ShaderFlags, Arc<ShaderVariation>>,
    queue: Arc<RenderQueue>,
}

impl ShaderLibrary {
    pub fn new(queue: Arc<RenderQueue>) -> Self {
        Self {
            variations: HashMap::new(),
            queue,
        }
    }

    /// Return the variation for `flags`, compiling it on first use
    pub fn get_or_create(&mut self, flags: ShaderFlags) -> Arc<ShaderVariation> {
        let queue = &self.queue;
        self.variations
            .entry(flags)
            .or_insert_with(|| {
                debug!(flags = flags.0, "Creating shader variation");
                Arc::new(ShaderVariation::new(flags, Arc::clone(queue)))
            })
            .clone()
    }

    pub fn get(&self, flags: ShaderFlags) -> Option<Arc<ShaderVariation>> {
        self.variations.get(&flags).cloned()
    }

    /// Drop every variation. Materials holding weak references lose their shader.
    pub fn clear(&mut self) {
        debug!(count = self.variations.len(), "Releasing shader variations");
        self.variations.clear();
    }

    pub fn len(&self) -> usize {
        self.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }
}
