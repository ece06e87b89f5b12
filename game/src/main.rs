//! Game entry point with the scene editor demonstration

use engine::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowAttributes,
};

#[cfg(feature = "editor")]
use editor::{Editor, EditorSettings, WinitBackend};

#[cfg(feature = "editor")]
const EDITOR_SETTINGS_FILE: &str = "editor_settings.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    engine::init_logging();
    info!("Starting game");

    // Create event loop and window
    let event_loop = EventLoop::builder().build()?;
    let window_attributes = WindowAttributes::default()
        .with_title("Scene Editor Demo")
        .with_inner_size(winit::dpi::PhysicalSize::new(1280, 720));

    #[allow(deprecated)] // Using create_window on EventLoop for simplicity
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let config = AssetConfig::default();
    if let Err(e) = config.validate() {
        warn!("{e}; directories will be created on demand");
    }
    let ctx = Arc::new(Context::new(config));
    create_demo_scene(&ctx);

    #[cfg(feature = "editor")]
    let mut editor = {
        let mut editor = Editor::new(EditorSettings::load_or_default(EDITOR_SETTINGS_FILE));
        editor.initialize(WinitBackend::new(window.clone()), ctx.clone());
        editor
    };

    #[allow(deprecated)] // Using the simpler closure-based API for now
    event_loop.run(move |event, elwt| {
        // Let editor handle events first if enabled
        #[cfg(feature = "editor")]
        {
            if editor.handle_event(&event) {
                return; // Event consumed by editor
            }
        }

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Window close requested");
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    // Skip rendering if window is minimized
                    let size = window.inner_size();
                    if size.width == 0 || size.height == 0 {
                        return;
                    }

                    let rendered = ctx.scene().render();

                    #[cfg(feature = "editor")]
                    {
                        match editor.update() {
                            Ok(stats) => debug!(
                                widgets = stats.widgets_drawn,
                                vertices = stats.vertices,
                                "Editor frame"
                            ),
                            Err(e) => warn!("Editor update failed: {e}"),
                        }
                    }

                    let queue = ctx.render_queue();
                    let uniform_bytes = queue.uniform_data().len();
                    let draw_calls = queue.drain();
                    debug!(
                        objects = rendered,
                        draw_calls = draw_calls.len(),
                        uniform_bytes,
                        indices = draw_calls.iter().map(|c| c.index_count as u64).sum::<u64>(),
                        "Frame submitted"
                    );

                    #[cfg(feature = "editor")]
                    {
                        if editor.exit_requested() {
                            elwt.exit();
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                #[cfg(feature = "editor")]
                editor.shutdown();
                info!("Event loop exiting");
            }
            _ => {}
        }
    })?;

    Ok(())
}

/// Populate the context's scene with a few primitives
fn create_demo_scene(ctx: &Context) {
    let brick_path = match ctx.config().material_path("brick") {
        Ok(path) => path,
        Err(e) => {
            warn!("Failed to resolve brick material path: {e}");
            return;
        }
    };
    if !brick_path.exists() {
        let mut brick = Material::new("brick");
        brick.set_color_albedo(Vec4::new(0.6, 0.25, 0.2, 1.0));
        brick.set_roughness(0.9);
        if let Err(e) = brick.save_to_file(&brick_path) {
            warn!("Failed to write brick material: {e}");
        }
    }

    let mut scene = ctx.scene();
    for (index, x) in [-2.0, 0.0, 2.0].into_iter().enumerate() {
        let entity = scene.create_game_object(format!("Cube {index}"));
        if let Some(transform) = scene.get_mut::<Transform>(entity) {
            transform.position = Vec3::new(x, 0.5, 0.0);
        }

        let mut renderer = MeshRenderer::new();
        if index == 1 {
            renderer.set_material_from_file(&brick_path, ctx);
        } else {
            renderer.use_standard_material(ctx);
        }

        let added = scene
            .add_component(entity, MeshFilter::primitive(Primitive::Cube))
            .and_then(|_| scene.add_component(entity, renderer));
        if let Err(e) = added {
            warn!("Failed to set up demo cube: {e}");
        }
    }

    let floor = scene.create_game_object("Floor");
    if let Some(transform) = scene.get_mut::<Transform>(floor) {
        transform.scale = Vec3::new(10.0, 1.0, 10.0);
    }
    let mut renderer = MeshRenderer::new();
    renderer.use_standard_material(ctx);
    let added = scene
        .add_component(floor, MeshFilter::primitive(Primitive::Plane))
        .and_then(|_| scene.add_component(floor, renderer));
    if let Err(e) = added {
        warn!("Failed to set up floor: {e}");
    }

    info!(objects = scene.len(), "Demo scene created");
}
