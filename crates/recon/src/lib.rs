#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use recon_scene as scene;

#[doc(inline)]
pub use recon_io as io;

#[doc(inline)]
pub use recon_camera as camera;
