//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Output dimensions for an image bounded by `max_width`.
///
/// Images at or below the cap keep their size (never upscaled). Wider images
/// are scaled to exactly `max_width`, with height following the aspect ratio
/// (rounded, at least 1px).
///
/// # Examples
/// ```
/// # use optimedia::imaging::calculate_target_dimensions;
/// assert_eq!(calculate_target_dimensions((2000, 1000), 1600), (1600, 800));
/// assert_eq!(calculate_target_dimensions((800, 600), 1600), (800, 600));
/// ```
pub fn calculate_target_dimensions(original: (u32, u32), max_width: u32) -> (u32, u32) {
    let (width, height) = original;
    if width <= max_width || width == 0 {
        return original;
    }
    let ratio = max_width as f64 / width as f64;
    let scaled_height = ((height as f64 * ratio).round() as u32).max(1);
    (max_width, scaled_height)
}
