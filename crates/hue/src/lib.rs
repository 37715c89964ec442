#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use hue_image as image;

#[doc(inline)]
pub use hue_imgproc as imgproc;

#[doc(inline)]
pub use hue_colorize as colorize;

#[doc(inline)]
pub use hue_io as io;
