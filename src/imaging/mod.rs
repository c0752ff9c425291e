//! Image transcoding: decode, orient, downscale, encode to WebP.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image` decoder header + EXIF orientation |
//! | **Orient** | `DynamicImage::apply_orientation` |
//! | **Resize** | Lanczos3 via `image::imageops` |
//! | **Encode → WebP** | `webp` (libwebp, lossy, quality + method) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing an encode
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_target_dimensions;
pub use operations::{ImageSettings, optimize_image};
pub use params::{EncodeParams, Effort, Quality};
pub use rust_backend::RustBackend;
