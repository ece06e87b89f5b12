//! Widget trait and the state widgets share with the editor

use engine::core::Context;
use engine::core::entity::Entity;
use engine::scene::Primitive;
use tracing::debug;
use winit::event::Event;

/// A self-contained editor panel
pub trait Widget {
    fn title(&self) -> &str;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    /// Offer a platform event to the widget; return `true` to consume it
    fn handle_event(&mut self, _event: &Event<()>, _shared: &mut EditorShared) -> bool {
        false
    }

    /// Build the widget's UI for this frame
    fn update(&mut self, ui: &imgui::Ui, ctx: &Context, shared: &mut EditorShared);
}

/// Scene mutations requested by widgets, applied once all widgets have run
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    NewScene,
    SaveScene,
    LoadScene,
    CreateGameObject {
        name: String,
        primitive: Option<Primitive>,
    },
    RemoveGameObject(Entity),
    UseStandardMaterial(Entity),
    AssignMaterial { entity: Entity, material: String },
    ToggleWidget(String),
}

/// State visible to every widget
#[derive(Debug, Default)]
pub struct EditorShared {
    pub selected_entity: Option<Entity>,
    pub selected_material: Option<String>,
    pub scene_name: String,
    pub exit_requested: bool,
    /// Title and visibility of every widget, refreshed each frame
    pub widget_visibility: Vec<(String, bool)>,
    commands: Vec<EditorCommand>,
}

impl EditorShared {
    pub fn new(scene_name: impl Into<String>) -> Self {
        Self {
            scene_name: scene_name.into(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, command: EditorCommand) {
        debug!(?command, "Editor command queued");
        self.commands.push(command);
    }

    pub fn pending(&self) -> &[EditorCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<EditorCommand> {
        std::mem::take(&mut self.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_drain_in_order() {
        let mut shared = EditorShared::new("untitled");
        shared.push(EditorCommand::NewScene);
        shared.push(EditorCommand::ToggleWidget("Stats".to_string()));
        assert_eq!(shared.pending().len(), 2);

        let commands = shared.take_commands();
        assert_eq!(commands[0], EditorCommand::NewScene);
        assert_eq!(commands[1], EditorCommand::ToggleWidget("Stats".to_string()));
        assert!(shared.pending().is_empty());
    }
}
