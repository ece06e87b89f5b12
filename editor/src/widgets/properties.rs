//! Property inspector for the selected game object

use crate::widget::{EditorCommand, EditorShared, Widget};
use engine::core::entity::Transform;
use engine::core::Context;
use engine::scene::{MeshFilter, MeshRenderer};
use imgui::{Condition, TreeNodeFlags};

const TITLE: &str = "Properties";

pub struct Properties {
    visible: bool,
}

impl Properties {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

impl Widget for Properties {
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
            .position([980.0, 56.0], Condition::FirstUseEver)
            .size([300.0, 450.0], Condition::FirstUseEver)
            .opened(&mut self.visible)
            .build(|| {
                let Some(entity) = shared.selected_entity else {
                    ui.text_disabled("Nothing selected");
                    return;
                };

                let mut scene = ctx.scene();
                if !scene.contains(entity) {
                    shared.selected_entity = None;
                    return;
                }

                ui.text(format!(
                    "Name: {}",
                    scene.game_object_name(entity).unwrap_or_default()
                ));

                if let Some(transform) = scene.get::<Transform>(entity) {
                    if ui.collapsing_header("Transform", TreeNodeFlags::DEFAULT_OPEN) {
                        let p = transform.position;
                        let s = transform.scale;
                        ui.text(format!("Position: {:.2} {:.2} {:.2}", p.x, p.y, p.z));
                        ui.text(format!("Scale:    {:.2} {:.2} {:.2}", s.x, s.y, s.z));
                    }
                }

                if let Some(filter) = scene.get::<MeshFilter>(entity) {
                    if ui.collapsing_header("MeshFilter", TreeNodeFlags::DEFAULT_OPEN) {
                        ui.text(format!(
                            "Mesh: {} ({} indices)",
                            filter.mesh_name, filter.index_count
                        ));
                    }
                }

                let Some(renderer) = scene.get_mut::<MeshRenderer>(entity) else {
                    return;
                };
                if !ui.collapsing_header("MeshRenderer", TreeNodeFlags::DEFAULT_OPEN) {
                    return;
                }

                let mut cast_shadows = renderer.cast_shadows();
                if ui.checkbox("Cast Shadows", &mut cast_shadows) {
                    renderer.set_cast_shadows(cast_shadows);
                }
                let mut receive_shadows = renderer.receive_shadows();
                if ui.checkbox("Receive Shadows", &mut receive_shadows) {
                    renderer.set_receive_shadows(receive_shadows);
                }

                ui.separator();
                ui.text(format!("Material: {}", renderer.material_name()));
                if let Some(material) = renderer.material() {
                    let c = material.color_albedo();
                    ui.text(format!(
                        "Albedo: {:.2} {:.2} {:.2} {:.2}",
                        c.x, c.y, c.z, c.w
                    ));
                    ui.text(format!("Cull: {:?}", material.cull_mode()));
                    match material.shader() {
                        Some(shader) => ui.text(format!("Shader: {}", shader.name())),
                        None => ui.text_colored([1.0, 0.4, 0.4, 1.0], "Shader: none"),
                    }
                    if !material.is_editable() {
                        ui.text_disabled("Engine material (read only)");
                    }
                }

                if ui.button("Use Standard Material") {
                    shared.push(EditorCommand::UseStandardMaterial(entity));
                }
                if let Some(selected) = shared.selected_material.clone() {
                    if ui.button(format!("Assign \"{selected}\"")) {
                        shared.push(EditorCommand::AssignMaterial {
                            entity,
                            material: selected,
                        });
                    }
                }
            });
    }
}
