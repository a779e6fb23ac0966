/// Transition engine driving a graphics device between two page bitmaps.
pub mod engine;
