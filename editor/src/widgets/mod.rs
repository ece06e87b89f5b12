//! Built-in editor widgets
//!
//! The main menu bar, the toolbar, the scene hierarchy, the property inspector, the
//! material browser and a frame statistics overlay.

mod asset_viewer;
mod hierarchy;
mod menu_bar;
mod properties;
mod stats;
mod toolbar;

pub use asset_viewer::{import_materials, AssetViewer};
pub use hierarchy::Hierarchy;
pub use menu_bar::MenuBar;
pub use properties::Properties;
pub use stats::Stats;
pub use toolbar::Toolbar;
