//! Widget: view-side state of the bridge widget
//!
//! Everything here is plain data. Rendering happens elsewhere; this crate
//! decides what to show (drawer state, CSS variables, warning banners).

pub mod banner;
pub mod drawer;
pub mod style;

pub use banner::{Banner, BannerLevel};
pub use drawer::{Drawer, DrawerController};
pub use style::{css_variables, stylesheet, CSS_VAR_PREFIX};
