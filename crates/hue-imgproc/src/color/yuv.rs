use std::sync::OnceLock;

use num_traits::Float;

use crate::parallel;
use hue_image::{Image, ImageError};

/// A 3x3 linear color transform applied to each pixel as a column vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

static RGB_FROM_YUV: OnceLock<Result<ColorMatrix, ImageError>> = OnceLock::new();

impl ColorMatrix {
    /// The forward RGB to YUV transform.
    ///
    /// The first row holds the luma weights and the other two rows the analog color-difference
    /// coefficients, bounding U to +-0.436 and V to +-0.615 for unit RGB inputs.
    pub const YUV_FROM_RGB: ColorMatrix = ColorMatrix([
        [0.299, 0.587, 0.114],
        [-0.14714119, -0.28886916, 0.43601035],
        [0.61497538, -0.51496512, -0.10001026],
    ]);

    /// The identity transform.
    pub const IDENTITY: ColorMatrix =
        ColorMatrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// The inverse of [`ColorMatrix::YUV_FROM_RGB`], computed once and cached for the process.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SingularMatrix`] if the forward transform cannot be inverted.
    pub fn rgb_from_yuv() -> Result<ColorMatrix, ImageError> {
        RGB_FROM_YUV
            .get_or_init(|| Self::YUV_FROM_RGB.inverse())
            .clone()
    }

    /// Compute the determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Invert the matrix through its adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::SingularMatrix`] if the determinant is zero.
    pub fn inverse(&self) -> Result<ColorMatrix, ImageError> {
        let det = self.determinant();
        if det.abs() <= f64::EPSILON {
            return Err(ImageError::SingularMatrix(det));
        }

        let m = &self.0;
        let mut inv = [[0.0; 3]; 3];
        for (i, row) in inv.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                // transposed cofactor of (j, i)
                let (r0, r1) = Self::others(j);
                let (c0, c1) = Self::others(i);
                let minor = m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0];
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                *val = sign * minor / det;
            }
        }

        Ok(ColorMatrix(inv))
    }

    /// Multiply two matrices.
    pub fn mul(&self, other: &ColorMatrix) -> ColorMatrix {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, val) in row.iter_mut().enumerate() {
                *val = (0..3).map(|k| self.0[i][k] * other.0[k][j]).sum();
            }
        }
        ColorMatrix(out)
    }

    /// Apply the transform to a single pixel.
    pub fn transform(&self, pixel: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * pixel[0] + m[0][1] * pixel[1] + m[0][2] * pixel[2],
            m[1][0] * pixel[0] + m[1][1] * pixel[1] + m[1][2] * pixel[2],
            m[2][0] * pixel[0] + m[2][1] * pixel[1] + m[2][2] * pixel[2],
        ]
    }

    fn others(idx: usize) -> (usize, usize) {
        match idx {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }

    fn cast<T: Float>(&self) -> Result<[[T; 3]; 3], ImageError> {
        let mut out = [[T::zero(); 3]; 3];
        for (dst_row, src_row) in out.iter_mut().zip(self.0.iter()) {
            for (dst, &src) in dst_row.iter_mut().zip(src_row.iter()) {
                *dst = T::from(src).ok_or(ImageError::CastError(
                    std::any::type_name::<T>().to_string(),
                ))?;
            }
        }
        Ok(out)
    }
}

fn apply_matrix<T>(
    src: &Image<T, 3>,
    dst: &mut Image<T, 3>,
    matrix: &ColorMatrix,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let m = matrix.cast::<T>()?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let (a, b, c) = (src_pixel[0], src_pixel[1], src_pixel[2]);
        for (out, row) in dst_pixel.iter_mut().zip(m.iter()) {
            *out = row[0] * a + row[1] * b + row[2] * c;
        }
    });

    Ok(())
}

/// Convert an RGB image to an YUV image.
///
/// The transform is linear and keeps the scale of the input: an RGB image in the range
/// [0, 255] produces Y in [0, 255], U in [-0.436 * 255, 0.436 * 255] and V in
/// [-0.615 * 255, 0.615 * 255]. No clipping is applied.
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output YUV image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use hue_image::{Image, ImageSize};
/// use hue_imgproc::color::yuv_from_rgb;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut yuv = Image::from_size_val(image.size(), 0.0).unwrap();
///
/// yuv_from_rgb(&image, &mut yuv).unwrap();
///
/// assert_eq!(yuv.num_channels(), 3);
/// assert_eq!(yuv.size().width, 4);
/// assert_eq!(yuv.size().height, 5);
/// ```
pub fn yuv_from_rgb<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    apply_matrix(src, dst, &ColorMatrix::YUV_FROM_RGB)
}

/// Convert a YUV image to an RGB image.
///
/// Multiplies every pixel by the numerically computed inverse of
/// [`ColorMatrix::YUV_FROM_RGB`]. Values are not clipped, callers producing 8-bit images are
/// responsible for clamping the result.
///
/// # Arguments
///
/// * `src` - The input YUV image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use hue_image::{Image, ImageSize};
/// use hue_imgproc::color::rgb_from_yuv;
///
/// let image = Image::<f32, 3>::new(
///     ImageSize {
///        width: 4,
///        height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut rgb = Image::from_size_val(image.size(), 0.0).unwrap();
///
/// rgb_from_yuv(&image, &mut rgb).unwrap();
///
/// assert_eq!(rgb.num_channels(), 3);
/// assert_eq!(rgb.size().width, 4);
/// assert_eq!(rgb.size().height, 5);
/// ```
pub fn rgb_from_yuv<T>(src: &Image<T, 3>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    let matrix = ColorMatrix::rgb_from_yuv()?;
    apply_matrix(src, dst, &matrix)
}
