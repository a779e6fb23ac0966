/// Premultiplied RGBA8 page bitmaps.
pub mod bitmap;
