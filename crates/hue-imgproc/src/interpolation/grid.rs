/// Map every destination index to a source coordinate with pixel-center alignment.
///
/// The centers of the destination pixels are aligned with the centers of the source pixels,
/// i.e. `src = (dst + 0.5) * src_len / dst_len - 0.5`, and the result is clamped to
/// `[0, src_len - 1]` so border samples replicate the edge. When both lengths are equal the
/// grid is the identity.
///
/// # Arguments
///
/// * `src_len` - The number of samples along the source axis.
/// * `dst_len` - The number of samples along the destination axis.
///
/// # Returns
///
/// A vector of `dst_len` source coordinates.
///
/// # Example
///
/// ```
/// use hue_imgproc::interpolation::grid::resample_grid;
///
/// assert_eq!(resample_grid(2, 4), vec![0.0, 0.25, 0.75, 1.0]);
/// assert_eq!(resample_grid(3, 3), vec![0.0, 1.0, 2.0]);
/// ```
pub fn resample_grid(src_len: usize, dst_len: usize) -> Vec<f32> {
    if src_len == 0 || dst_len == 0 {
        return Vec::new();
    }

    if src_len == dst_len {
        return (0..dst_len).map(|i| i as f32).collect();
    }

    let scale = src_len as f64 / dst_len as f64;
    let max = (src_len - 1) as f64;

    (0..dst_len)
        .map(|i| ((i as f64 + 0.5) * scale - 0.5).clamp(0.0, max) as f32)
        .collect()
}
