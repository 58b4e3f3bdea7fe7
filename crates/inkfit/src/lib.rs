#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use inkfit_image as image;

#[doc(inline)]
pub use inkfit_imgproc as imgproc;

#[doc(inline)]
pub use inkfit_io as io;

#[doc(inline)]
pub use inkfit_pose as pose;

#[doc(inline)]
pub use inkfit_preview as preview;
