//! String-keyed resource handles
//!
//! The simulation never owns GPU resources. It refers to textures and
//! shaders by key through an explicit registry owned by the embedding
//! application and passed in wherever it is needed; the core only reads.

use std::collections::HashMap;

/// Opaque handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Opaque handle to a compiled shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Key-to-handle registry filled by the asset loader at startup
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    textures: HashMap<String, TextureHandle>,
    shaders: HashMap<String, ShaderHandle>,
    next_id: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture key, returning its handle. Re-registering a key
    /// returns the existing handle.
    pub fn register_texture(&mut self, key: &str) -> TextureHandle {
        if let Some(&handle) = self.textures.get(key) {
            return handle;
        }
        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        self.textures.insert(key.to_owned(), handle);
        handle
    }

    pub fn register_shader(&mut self, key: &str) -> ShaderHandle {
        if let Some(&handle) = self.shaders.get(key) {
            return handle;
        }
        let handle = ShaderHandle(self.next_id);
        self.next_id += 1;
        self.shaders.insert(key.to_owned(), handle);
        handle
    }

    pub fn texture(&self, key: &str) -> Option<TextureHandle> {
        self.textures.get(key).copied()
    }

    pub fn shader(&self, key: &str) -> Option<ShaderHandle> {
        self.shaders.get(key).copied()
    }
}
