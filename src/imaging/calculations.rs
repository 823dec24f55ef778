//! Pure calculation functions for image dimensions.

use crate::types::Dimension;

/// Scale `source` (width, height) to the largest size that fits in `max`
/// without changing the aspect ratio.
///
/// Small images are scaled up, matching `convert -resize WxH`. Neither side
/// ever drops below one pixel; a zero side in `max` counts as one.
///
/// ```
/// # use gallerize::imaging::fit_within;
/// # use gallerize::types::Dimension;
/// // 4000x3000 landscape into 1024x1024 → 1024x768
/// assert_eq!(fit_within((4000, 3000), Dimension::new(1024, 1024)), (1024, 768));
/// ```
pub fn fit_within(source: (u32, u32), max: Dimension) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = (max.width.max(1), max.height.max(1));
    if src_w == 0 || src_h == 0 {
        return (max_w, max_h);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}
