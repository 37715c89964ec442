use crate::error::ColorizeError;

/// A dense `f32` tensor of rank 4 stored contiguously in NCHW order.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor4 {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl Tensor4 {
    /// Create a tensor from a shape and its row-major data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the product of the shape.
    ///
    /// # Example
    ///
    /// ```
    /// use hue_colorize::Tensor4;
    ///
    /// let t = Tensor4::from_shape_vec([1, 2, 2, 3], vec![0.0; 12]).unwrap();
    /// assert_eq!(t.shape(), [1, 2, 2, 3]);
    /// assert_eq!(t.numel(), 12);
    /// ```
    pub fn from_shape_vec(shape: [usize; 4], data: Vec<f32>) -> Result<Self, ColorizeError> {
        let numel = shape.iter().product::<usize>();
        if data.len() != numel {
            return Err(ColorizeError::InvalidTensorShape(shape, data.len()));
        }
        Ok(Self { shape, data })
    }

    /// Create a tensor filled with a single value.
    pub fn from_shape_val(shape: [usize; 4], val: f32) -> Self {
        let numel = shape.iter().product::<usize>();
        Self {
            shape,
            data: vec![val; numel],
        }
    }

    /// The shape of the tensor as (N, C, H, W).
    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    /// The number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// The data of the tensor in NCHW order.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Borrow one (H, W) plane of the tensor.
    ///
    /// Returns `None` if the batch or channel index is out of range.
    pub fn plane(&self, batch: usize, channel: usize) -> Option<&[f32]> {
        let [n, c, h, w] = self.shape;
        if batch >= n || channel >= c {
            return None;
        }
        let start = (batch * c + channel) * h * w;
        self.data.get(start..start + h * w)
    }
}
