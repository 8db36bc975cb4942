//! PTY module - Shell hosted in a pseudo-terminal

mod wrapper;

pub use wrapper::{PtySurface, SurfaceOptions};
