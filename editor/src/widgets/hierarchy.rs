//! Scene hierarchy widget
//!
//! Lists every game object of the active scene and drives the selection.

use crate::widget::{EditorCommand, EditorShared, Widget};
use engine::core::Context;
use engine::scene::Primitive;
use imgui::Condition;
use tracing::debug;
use winit::event::{ElementState, Event, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const TITLE: &str = "Hierarchy";

pub struct Hierarchy {
    visible: bool,
}

impl Hierarchy {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }
}

impl Widget for Hierarchy {
    fn title(&self) -> &str {
        TITLE
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // Escape clears the selection
    fn handle_event(&mut self, event: &Event<()>, shared: &mut EditorShared) -> bool {
        if let Event::WindowEvent {
            event: WindowEvent::KeyboardInput {
                event: key_event, ..
            },
            ..
        } = event
        {
            if key_event.state == ElementState::Pressed
                && key_event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                && shared.selected_entity.is_some()
            {
                shared.selected_entity = None;
                debug!("Selection cleared");
                return true;
            }
        }
        false
    }

    fn update(&mut self, ui: &imgui::Ui, ctx: &Context, shared: &mut EditorShared) {
        ui.window(TITLE)
            .position([0.0, 56.0], Condition::FirstUseEver)
            .size([250.0, 400.0], Condition::FirstUseEver)
            .opened(&mut self.visible)
            .build(|| {
                {
                    let scene = ctx.scene();
                    if scene.is_empty() {
                        ui.text_disabled("Scene is empty");
                    }
                    for &entity in scene.game_objects() {
                        let name = scene.game_object_name(entity).unwrap_or_default();
                        let is_selected = shared.selected_entity == Some(entity);
                        if ui
                            .selectable_config(format!("{name}##{}", entity.id()))
                            .selected(is_selected)
                            .build()
                        {
                            shared.selected_entity = Some(entity);
                            debug!(entity = ?entity, "Selected game object");
                        }
                    }
                }

                ui.separator();
                if ui.button("Create Empty") {
                    shared.push(EditorCommand::CreateGameObject {
                        name: "GameObject".to_string(),
                        primitive: None,
                    });
                }
                for primitive in Primitive::ALL {
                    ui.same_line();
                    if ui.button(format!("Create {}", primitive.name())) {
                        shared.push(EditorCommand::CreateGameObject {
                            name: primitive.name().to_string(),
                            primitive: Some(primitive),
                        });
                    }
                }
                if let Some(entity) = shared.selected_entity {
                    if ui.button("Delete Selected") {
                        shared.push(EditorCommand::RemoveGameObject(entity));
                    }
                }
            });
    }
}
