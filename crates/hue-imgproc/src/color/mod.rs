mod yuv;

pub use yuv::{rgb_from_yuv, yuv_from_rgb, ColorMatrix};
