//! Shader sources embedded in the host page.
//!
//! Each shader lives in an element whose `id` is its logical key, usually
//! `<script type="x-shader/x-vertex" id="vertex-shader-2d">`.

use glc_render::ShaderSource;
use web_sys::Document;

pub struct DocumentShaders {
    document: Option<Document>,
}

impl DocumentShaders {
    /// Read shaders from the current window's document. Without a document
    /// every lookup misses.
    pub fn from_window() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }
}

impl ShaderSource for DocumentShaders {
    fn source(&self, key: &str) -> Option<String> {
        self.document
            .as_ref()?
            .get_element_by_id(key)?
            .text_content()
    }
}
