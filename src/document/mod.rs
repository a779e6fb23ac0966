//! Document loading and page rasterization.
//!
//! The viewer only talks to [`source::Rasterizer`]; [`svg::SvgDocument`] is the bundled
//! implementation.

/// Rasterization provider contract.
pub mod source;
/// SVG page decks rendered with resvg.
pub mod svg;
