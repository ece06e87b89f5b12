//! Platform backends feeding window input into imgui

use crate::EditorError;
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use std::sync::Arc;
use tracing::debug;
use winit::event::{Event, WindowEvent};
use winit::window::Window;

/// Binds the editor's imgui context to a window system
pub trait PlatformBackend {
    /// Called once when the editor initializes
    fn attach(&mut self, imgui: &mut imgui::Context);

    /// Translate a window event into imgui input
    fn handle_event(&mut self, imgui: &mut imgui::Context, event: &Event<()>);

    /// Sync display size and cursor state before a new frame
    fn prepare_frame(&mut self, imgui: &mut imgui::Context) -> Result<(), EditorError>;

    /// Hook run after widgets have been built, before draw data is generated
    fn prepare_render(&mut self, ui: &imgui::Ui);
}

/// Backend for a real winit window
pub struct WinitBackend {
    window: Arc<Window>,
    platform: Option<WinitPlatform>,
}

impl WinitBackend {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            platform: None,
        }
    }
}

impl PlatformBackend for WinitBackend {
    fn attach(&mut self, imgui: &mut imgui::Context) {
        let mut platform = WinitPlatform::new(imgui);
        platform.attach_window(imgui.io_mut(), &self.window, HiDpiMode::Default);
        debug!(
            width = self.window.inner_size().width,
            height = self.window.inner_size().height,
            "Attached editor to window"
        );
        self.platform = Some(platform);
    }

    fn handle_event(&mut self, imgui: &mut imgui::Context, event: &Event<()>) {
        if let Some(platform) = self.platform.as_mut() {
            platform.handle_event(imgui.io_mut(), &self.window, event);
        }
    }

    fn prepare_frame(&mut self, imgui: &mut imgui::Context) -> Result<(), EditorError> {
        let platform = self.platform.as_mut().ok_or(EditorError::NotInitialized)?;
        platform
            .prepare_frame(imgui.io_mut(), &self.window)
            .map_err(|e| EditorError::Platform(e.to_string()))
    }

    fn prepare_render(&mut self, ui: &imgui::Ui) {
        if let Some(platform) = self.platform.as_mut() {
            platform.prepare_render(ui, &self.window);
        }
    }
}

/// Backend without a window: fixed display size, only resize events are honoured
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    display_size: [f32; 2],
    scale_factor: f32,
}

impl HeadlessBackend {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            display_size: [width, height],
            scale_factor: 1.0,
        }
    }

    pub fn display_size(&self) -> [f32; 2] {
        self.display_size
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl PlatformBackend for HeadlessBackend {
    fn attach(&mut self, imgui: &mut imgui::Context) {
        let io = imgui.io_mut();
        io.display_size = self.display_size;
        io.display_framebuffer_scale = [self.scale_factor, self.scale_factor];
    }

    fn handle_event(&mut self, _imgui: &mut imgui::Context, event: &Event<()>) {
        if let Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } = event
        {
            self.display_size = [size.width as f32, size.height as f32];
        }
    }

    fn prepare_frame(&mut self, imgui: &mut imgui::Context) -> Result<(), EditorError> {
        let io = imgui.io_mut();
        io.display_size = self.display_size;
        io.display_framebuffer_scale = [self.scale_factor, self.scale_factor];
        Ok(())
    }

    fn prepare_render(&mut self, _ui: &imgui::Ui) {}
}
