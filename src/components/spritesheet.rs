use std::sync::Arc;

/// Handle to a decoded sprite-sheet image.
///
/// The pixels live with whoever decoded the image (a texture store, a GPU
/// upload, ...). The animation core only needs the key to hand back to the
/// [`Surface`](crate::resources::surface::Surface) and the intrinsic size to
/// compute cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub tex_key: Arc<str>,
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    pub fn new(tex_key: impl Into<Arc<str>>, width: u32, height: u32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
        }
    }
}
