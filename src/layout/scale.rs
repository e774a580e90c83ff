//! Preview scale: fit fixed-width pages into the viewing area

use crate::config::PreviewConfig;

/// Gap between stacked pages at reduced scale
pub const COMPACT_STACK_GAP: f32 = 12.0;
/// Gap between stacked pages at (near) native scale
pub const STACK_GAP: f32 = 16.0;

/// Scale below which pages stack with the compact gap
const COMPACT_BELOW: f32 = 0.8;

/// Compute the uniform display scale with default margin and bounds
pub fn compute_scale(native_width: f32, available_width: f32) -> f32 {
    compute_scale_with(native_width, available_width, &PreviewConfig::default())
}

/// Compute the uniform display scale
///
/// `target = min(available - margin, native)`, clamped into the configured
/// bounds. A degenerate native width yields the upper bound.
pub fn compute_scale_with(native_width: f32, available_width: f32, config: &PreviewConfig) -> f32 {
    if !native_width.is_finite() || native_width <= 0.0 {
        return config.max_scale;
    }

    // f32::min ignores NaN, so an unknown width falls back to native
    let target = (available_width - config.scale_margin).min(native_width);
    (target / native_width)
        .max(config.min_scale)
        .min(config.max_scale)
}

/// Spacing between stacked page previews
pub fn stack_gap(scale: f32) -> f32 {
    if scale < COMPACT_BELOW {
        COMPACT_STACK_GAP
    } else {
        STACK_GAP
    }
}
