//! Main menu bar

use crate::widget::{EditorCommand, EditorShared, Widget};
use engine::core::Context;
use tracing::info;

const TITLE: &str = "Menu Bar";

/// File / View / Help menus along the top of the window
pub struct MenuBar;

impl MenuBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for MenuBar {
    fn title(&self) -> &str {
        TITLE
    }

    // Always shown
    fn is_visible(&self) -> bool {
        true
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn update(&mut self, ui: &imgui::Ui, _ctx: &Context, shared: &mut EditorShared) {
        ui.main_menu_bar(|| {
            ui.menu("File", || {
                if ui.menu_item("New Scene") {
                    shared.push(EditorCommand::NewScene);
                }
                if ui.menu_item("Load Scene") {
                    shared.push(EditorCommand::LoadScene);
                }
                if ui.menu_item("Save Scene") {
                    shared.push(EditorCommand::SaveScene);
                }
                ui.separator();
                if ui.menu_item("Exit") {
                    info!("Exit requested from menu");
                    shared.exit_requested = true;
                }
            });
            ui.menu("View", || {
                let entries: Vec<(String, bool)> = shared
                    .widget_visibility
                    .iter()
                    .filter(|(title, _)| title != TITLE)
                    .cloned()
                    .collect();
                for (title, visible) in entries {
                    if ui.menu_item_config(&title).selected(visible).build() {
                        shared.push(EditorCommand::ToggleWidget(title));
                    }
                }
            });
            ui.menu("Help", || {
                if ui.menu_item("About") {
                    info!(
                        version = env!("CARGO_PKG_VERSION"),
                        scene = %shared.scene_name,
                        "Editor"
                    );
                }
            });
        });
    }
}
