//! Texture lifetime for textured draws.
//!
//! Every textured draw needs its image bound to a GPU texture. How long that
//! texture lives is a [`TexturePolicy`] decision made here, so the draw
//! paths only ever see "bind, draw, finish".

use crate::gl::{GraphicsContext, TextureParams};
use glc_core::{ImageId, TextureInfo, TexturePolicy};
use std::collections::HashMap;

/// A texture bound for exactly one draw call.
pub(crate) enum Binding<T> {
    /// Created for this draw; the store decides its fate in `finish`.
    Fresh(T),
    /// Owned by the cache.
    Cached,
}

pub(crate) struct TextureStore<T> {
    policy: TexturePolicy,
    cache: HashMap<ImageId, T>,
    /// Textures kept alive under [`TexturePolicy::Retain`].
    retained: Vec<T>,
}

impl<T> TextureStore<T> {
    pub fn new(policy: TexturePolicy) -> Self {
        Self {
            policy,
            cache: HashMap::new(),
            retained: Vec::new(),
        }
    }

    /// Bind a texture holding `info`'s image, creating and uploading it
    /// unless the cache already has one. `None` if the context could not
    /// allocate a texture.
    pub fn bind<C>(&mut self, gl: &mut C, info: &TextureInfo) -> Option<Binding<T>>
    where
        C: GraphicsContext<Texture = T>,
    {
        if self.policy == TexturePolicy::Cache
            && let Some(texture) = self.cache.get(&info.image)
        {
            gl.bind_texture(texture, TextureParams::PIXEL);
            return Some(Binding::Cached);
        }

        let Some(texture) = gl.create_texture() else {
            log::warn!("context refused to allocate a texture for {:?}", info.image);
            return None;
        };
        gl.bind_texture(&texture, TextureParams::PIXEL);

        match gl.upload_image(info) {
            Ok(()) if self.policy == TexturePolicy::Cache => {
                self.cache.insert(info.image, texture);
                Some(Binding::Cached)
            }
            Ok(()) => Some(Binding::Fresh(texture)),
            Err(e) => {
                // Never cache a texture without pixels; the next frame retries.
                log::warn!("texture upload for {:?} failed: {e}", info.image);
                Some(Binding::Fresh(texture))
            }
        }
    }

    /// Called after the draw call that used `binding`.
    pub fn finish<C>(&mut self, gl: &mut C, binding: Binding<T>)
    where
        C: GraphicsContext<Texture = T>,
    {
        let Binding::Fresh(texture) = binding else {
            return;
        };
        match self.policy {
            TexturePolicy::Retain => self.retained.push(texture),
            TexturePolicy::ReleaseAfterDraw | TexturePolicy::Cache => gl.delete_texture(texture),
        }
    }

    /// Number of textures this store keeps alive between draws.
    pub fn len(&self) -> usize {
        self.cache.len() + self.retained.len()
    }

    /// Delete every cached and retained texture.
    pub fn release_all<C>(&mut self, gl: &mut C)
    where
        C: GraphicsContext<Texture = T>,
    {
        for (_, texture) in self.cache.drain() {
            gl.delete_texture(texture);
        }
        for texture in self.retained.drain(..) {
            gl.delete_texture(texture);
        }
    }
}
