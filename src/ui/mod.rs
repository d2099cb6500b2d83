pub mod overlay;
#[cfg(feature = "replay")]
pub mod replay;
pub mod timeline;
