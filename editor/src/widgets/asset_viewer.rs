//! Material browser
//!
//! Shows the materials in the resource cache and imports material files from
//! the project's materials directory.

use crate::widget::{EditorShared, Widget};
use engine::core::Context;
use engine::graphics::Material;
use imgui::Condition;
use std::sync::Arc;
use tracing::{info, warn};

const TITLE: &str = "Assets";

pub struct AssetViewer {
    visible: bool,
}

impl AssetViewer {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

/// Load every `.material` file from the configured directory into the cache
///
/// Files that fail to parse are skipped with a warning. Returns the number of
/// materials cached.
pub fn import_materials(ctx: &Context) -> usize {
    let dir = ctx.config().asset_root.join(&ctx.config().materials_dir);
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = ?dir, error = %e, "Cannot read materials directory");
            return 0;
        }
    };

    let mut imported = 0;
    for path in entries.filter_map(|entry| entry.ok()).map(|entry| entry.path()) {
        if path.extension().and_then(|ext| ext.to_str()) != Some("material") {
            continue;
        }
        match Material::load_from_file(&path) {
            Ok(mut material) => {
                material.acquire_shader(&mut ctx.shaders());
                ctx.resources().cache(Arc::new(material));
                imported += 1;
            }
            Err(e) => warn!(path = ?path, error = %e, "Skipping material"),
        }
    }
    info!(count = imported, "Imported materials");
    imported
}

impl Widget for AssetViewer {
    fn title(&self) -> &str {
        TITLE
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update(&mut self, ui: &imgui::Ui, ctx: &Context, shared: &mut EditorShared) {
        ui.window(TITLE)
            .position([250.0, 500.0], Condition::FirstUseEver)
            .size([730.0, 200.0], Condition::FirstUseEver)
            .opened(&mut self.visible)
            .build(|| {
                if ui.button("Import Materials") {
                    import_materials(ctx);
                }
                ui.separator();

                let names = ctx.resources().material_names();
                if names.is_empty() {
                    ui.text_disabled("No materials loaded");
                }
                for name in names {
                    let is_selected = shared.selected_material.as_deref() == Some(name.as_str());
                    if ui.selectable_config(&name).selected(is_selected).build() {
                        shared.selected_material = Some(name);
                    }
                }
            });
    }
}
