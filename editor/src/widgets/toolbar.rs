//! Quick actions under the menu bar

use crate::widget::{EditorCommand, EditorShared, Widget};
use engine::core::Context;
use imgui::{Condition, WindowFlags};
use tracing::info;

const TITLE: &str = "Toolbar";

pub struct Toolbar {
    visible: bool,
    // Result of the last material check, shown until the next one
    unrenderable: Option<usize>,
}

impl Toolbar {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            unrenderable: None,
        }
    }
}

impl Widget for Toolbar {
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
        let unrenderable = &mut self.unrenderable;
        ui.window(TITLE)
            .position([0.0, 20.0], Condition::Always)
            .size([ui.io().display_size[0], 36.0], Condition::Always)
            .flags(
                WindowFlags::NO_TITLE_BAR
                    | WindowFlags::NO_RESIZE
                    | WindowFlags::NO_MOVE
                    | WindowFlags::NO_SCROLLBAR
                    | WindowFlags::NO_SAVED_SETTINGS,
            )
            .build(|| {
                if ui.button("Save") {
                    shared.push(EditorCommand::SaveScene);
                }
                ui.same_line();
                if ui.button("Load") {
                    shared.push(EditorCommand::LoadScene);
                }
                ui.same_line();
                if ui.button("Check Materials") {
                    let count = ctx.scene().report_unrenderable();
                    info!(count, "Game objects without a material");
                    *unrenderable = Some(count);
                }
                if let Some(count) = *unrenderable {
                    ui.same_line();
                    if count == 0 {
                        ui.text("All objects have materials");
                    } else {
                        ui.text_colored([1.0, 0.6, 0.2, 1.0], format!("{count} without material"));
                    }
                }
                ui.same_line();
                ui.text_disabled(format!("Scene: {}", shared.scene_name));
            });
    }
}
