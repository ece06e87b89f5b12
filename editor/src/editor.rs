//! Editor shell
//!
//! The [`Editor`] owns the imgui context and an ordered list of widgets. The
//! host forwards window events to [`Editor::handle_event`] and calls
//! [`Editor::update`] once per frame.

use crate::platform::PlatformBackend;
use crate::settings::{EditorSettings, StyleSettings, Theme};
use crate::widget::{EditorCommand, EditorShared, Widget};
use crate::widgets::{AssetViewer, Hierarchy, MenuBar, Properties, Stats, Toolbar};
use crate::EditorError;
use engine::core::Context;
use engine::scene::{MeshFilter, MeshRenderer, Scene};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use winit::event::{Event, WindowEvent};

/// Counters describing the UI generated by one [`Editor::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub widgets_drawn: usize,
    pub vertices: usize,
    pub indices: usize,
}

/// Widget-hosting editor window
pub struct Editor {
    settings: EditorSettings,
    widgets: Vec<Box<dyn Widget>>,
    shared: EditorShared,
    context: Option<Arc<Context>>,
    imgui: Option<imgui::Context>,
    platform: Option<Box<dyn PlatformBackend>>,
    last_frame: Instant,
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        let shared = EditorShared::new(settings.scene_name.clone());
        Self {
            settings,
            widgets: Vec::new(),
            shared,
            context: None,
            imgui: None,
            platform: None,
            last_frame: Instant::now(),
        }
    }

    /// Bind the window backend and engine context, then build the widgets
    pub fn initialize(&mut self, platform: impl PlatformBackend + 'static, context: Arc<Context>) {
        if self.is_initialized() {
            warn!("Editor::initialize(): editor is already initialized");
            return;
        }
        info!("Initializing editor");

        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None); // Don't save layout to file

        let mut platform: Box<dyn PlatformBackend> = Box::new(platform);
        platform.attach(&mut imgui);

        // The atlas has to exist before the first frame; a GPU renderer uploads it from here
        let atlas = imgui.fonts().build_rgba32_texture();
        debug!(width = atlas.width, height = atlas.height, "Built font atlas");

        Self::apply_style(&mut imgui, &self.settings.style);

        let visible = &self.settings.widgets;
        let mut widgets: Vec<Box<dyn Widget>> = vec![
            Box::new(MenuBar::new()),
            Box::new(Toolbar::new(visible.toolbar)),
            Box::new(Hierarchy::new(visible.hierarchy)),
            Box::new(Properties::new(visible.properties)),
            Box::new(AssetViewer::new(visible.asset_viewer)),
            Box::new(Stats::new(visible.stats)),
        ];
        // Widgets registered before initialization keep their place after the built-ins
        widgets.append(&mut self.widgets);
        self.widgets = widgets;

        self.imgui = Some(imgui);
        self.platform = Some(platform);
        self.context = Some(context);
        self.last_frame = Instant::now();

        info!(widgets = self.widgets.len(), "Editor initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.imgui.is_some()
    }

    /// Register an additional widget. It is drawn after the existing ones.
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) {
        debug!(title = widget.title(), "Adding widget");
        self.widgets.push(widget);
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    pub fn widget_titles(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.title()).collect()
    }

    pub fn is_widget_visible(&self, title: &str) -> Option<bool> {
        self.widgets
            .iter()
            .find(|w| w.title() == title)
            .map(|w| w.is_visible())
    }

    pub fn shared(&self) -> &EditorShared {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut EditorShared {
        &mut self.shared
    }

    pub fn exit_requested(&self) -> bool {
        self.shared.exit_requested
    }

    /// Dispatch a platform event to imgui and then to the widgets in order
    ///
    /// Returns true if the event was consumed by the editor.
    pub fn handle_event(&mut self, event: &Event<()>) -> bool {
        let (Some(imgui), Some(platform)) = (self.imgui.as_mut(), self.platform.as_mut()) else {
            return false;
        };

        platform.handle_event(imgui, event);

        for widget in self.widgets.iter_mut() {
            if widget.handle_event(event, &mut self.shared) {
                debug!(widget = widget.title(), "Event consumed by widget");
                return true;
            }
        }

        // Input imgui is currently interacting with stays with the editor
        let io = imgui.io();
        match event {
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { .. },
                ..
            } => io.want_capture_keyboard,
            Event::WindowEvent {
                event:
                    WindowEvent::MouseInput { .. }
                    | WindowEvent::MouseWheel { .. }
                    | WindowEvent::CursorMoved { .. },
                ..
            } => io.want_capture_mouse,
            _ => false,
        }
    }

    /// Build and render one frame of editor UI
    pub fn update(&mut self) -> Result<FrameStats, EditorError> {
        let (Some(imgui), Some(platform), Some(ctx)) = (
            self.imgui.as_mut(),
            self.platform.as_mut(),
            self.context.as_ref(),
        ) else {
            return Err(EditorError::NotInitialized);
        };

        let now = Instant::now();
        imgui.io_mut().update_delta_time(now - self.last_frame);
        self.last_frame = now;

        platform.prepare_frame(imgui)?;

        self.shared.widget_visibility = self
            .widgets
            .iter()
            .map(|w| (w.title().to_string(), w.is_visible()))
            .collect();

        let ui = imgui.new_frame();
        let mut widgets_drawn = 0;
        for widget in self.widgets.iter_mut() {
            if widget.is_visible() {
                widget.update(ui, ctx, &mut self.shared);
                widgets_drawn += 1;
            }
        }
        platform.prepare_render(ui);

        let draw_data = imgui.render();
        let stats = FrameStats {
            widgets_drawn,
            vertices: draw_data.total_vtx_count.max(0) as usize,
            indices: draw_data.total_idx_count.max(0) as usize,
        };

        self.apply_commands();
        Ok(stats)
    }

    /// Release widgets and the imgui context. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if !self.is_initialized() && self.widgets.is_empty() {
            return;
        }
        info!(widgets = self.widgets.len(), "Shutting down editor");
        self.widgets.clear();
        self.shared = EditorShared::new(self.settings.scene_name.clone());
        self.platform = None;
        self.imgui = None;
        self.context = None;
    }

    fn apply_style(imgui: &mut imgui::Context, settings: &StyleSettings) {
        let style = imgui.style_mut();
        match settings.theme {
            Theme::Dark => style.use_dark_colors(),
            Theme::Light => style.use_light_colors(),
            Theme::Classic => style.use_classic_colors(),
        };
        style.window_rounding = settings.window_rounding;
        style.child_rounding = settings.window_rounding;
        style.popup_rounding = settings.window_rounding;
        style.scrollbar_rounding = settings.frame_rounding;
        style.frame_rounding = settings.frame_rounding;
        style.grab_rounding = settings.frame_rounding;
        style.window_border_size = 1.0;
        style.frame_border_size = 0.0;

        imgui.io_mut().font_global_scale = settings.font_scale;
        debug!(theme = ?settings.theme, "Applied editor style");
    }

    fn apply_commands(&mut self) {
        let Some(ctx) = self.context.clone() else {
            return;
        };

        for command in self.shared.take_commands() {
            match command {
                EditorCommand::NewScene => {
                    ctx.replace_scene(Scene::new());
                    self.shared.selected_entity = None;
                    info!("Started a new scene");
                }
                EditorCommand::SaveScene => {
                    let result = ctx
                        .config()
                        .scene_path(&self.shared.scene_name)
                        .map_err(|e| e.to_string())
                        .and_then(|path| {
                            ctx.scene().save_to_file(&path).map_err(|e| e.to_string())
                        });
                    if let Err(e) = result {
                        error!(scene = %self.shared.scene_name, "Failed to save scene: {e}");
                    }
                }
                EditorCommand::LoadScene => {
                    let result = ctx
                        .config()
                        .scene_path(&self.shared.scene_name)
                        .map_err(|e| e.to_string())
                        .and_then(|path| {
                            Scene::load_from_file(&path, &ctx).map_err(|e| e.to_string())
                        });
                    match result {
                        Ok(scene) => {
                            ctx.replace_scene(scene);
                            self.shared.selected_entity = None;
                        }
                        Err(e) => {
                            error!(scene = %self.shared.scene_name, "Failed to load scene: {e}")
                        }
                    }
                }
                EditorCommand::CreateGameObject { name, primitive } => {
                    let mut scene = ctx.scene();
                    let entity = scene.create_game_object(name);
                    if let Some(primitive) = primitive {
                        let mut renderer = MeshRenderer::new();
                        renderer.use_standard_material(&ctx);
                        let added = scene
                            .add_component(entity, MeshFilter::primitive(primitive))
                            .and_then(|_| scene.add_component(entity, renderer));
                        if let Err(e) = added {
                            error!("Failed to set up game object: {e}");
                        }
                    }
                    self.shared.selected_entity = Some(entity);
                }
                EditorCommand::RemoveGameObject(entity) => {
                    if let Err(e) = ctx.scene().remove(entity) {
                        warn!("Failed to remove game object: {e}");
                    }
                    if self.shared.selected_entity == Some(entity) {
                        self.shared.selected_entity = None;
                    }
                }
                EditorCommand::UseStandardMaterial(entity) => {
                    let mut scene = ctx.scene();
                    match scene.get_mut::<MeshRenderer>(entity) {
                        Some(renderer) => renderer.use_standard_material(&ctx),
                        None => warn!("Selected game object has no MeshRenderer"),
                    }
                }
                EditorCommand::AssignMaterial { entity, material } => {
                    let weak = ctx.resources().get_material_by_name(&material);
                    let mut scene = ctx.scene();
                    match scene.get_mut::<MeshRenderer>(entity) {
                        Some(renderer) => renderer.set_material_from_memory(&weak, true, &ctx),
                        None => warn!("Selected game object has no MeshRenderer"),
                    }
                }
                EditorCommand::ToggleWidget(title) => {
                    match self.widgets.iter_mut().find(|w| w.title() == title) {
                        Some(widget) => {
                            let visible = !widget.is_visible();
                            widget.set_visible(visible);
                            debug!(widget = %title, visible, "Toggled widget");
                        }
                        None => warn!(widget = %title, "No widget with that title"),
                    }
                }
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
