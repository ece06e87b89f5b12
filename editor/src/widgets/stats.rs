//! Frame statistics overlay

use crate::widget::{EditorShared, Widget};
use engine::core::Context;
use imgui::Condition;

const TITLE: &str = "Stats";

pub struct Stats {
    visible: bool,
}

impl Stats {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

impl Widget for Stats {
    fn title(&self) -> &str {
        TITLE
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn update(&mut self, ui: &imgui::Ui, ctx: &Context, _shared: &mut EditorShared) {
        let queue = ctx.render_queue();
        let draw_calls = queue.len();
        let indices = queue.total_indices();
        let uniform_bytes = queue.uniform_data().len();
        let materials = ctx.resources().len();
        let shaders = ctx.shaders().len();
        let objects = ctx.scene().len();

        ui.window(TITLE)
            .position([260.0, 66.0], Condition::FirstUseEver)
            .size([220.0, 150.0], Condition::FirstUseEver)
            .opened(&mut self.visible)
            .build(|| {
                ui.text(format!("FPS: {:.1}", ui.io().framerate));
                ui.text(format!("Draw calls: {draw_calls}"));
                ui.text(format!("Indices: {indices}"));
                ui.text(format!("Uniform data: {uniform_bytes} bytes"));
                ui.separator();
                ui.text(format!("Game objects: {objects}"));
                ui.text(format!("Materials: {materials}"));
                ui.text(format!("Shader variations: {shaders}"));
            });
    }
}
