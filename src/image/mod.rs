//! Raster containers and I/O.
//!
//! - [`RasterImage`]: owned, immutable 8-bit grayscale image. Every transform
//!   in the pipeline returns a new instance.
//! - [`ImageF32`]: mutable float scratch buffer for numeric stages (gradients,
//!   blur, classifier input).
pub mod f32;
pub mod gray;
pub mod io;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::gray::RasterImage;
pub use self::traits::{ImageView, ImageViewMut, Rows};
