//! Application window and event loop handler.
//!
//! Key events are folded into one `FrameInput` between redraws. Each redraw
//! runs one session frame, then renders the resulting snapshot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::input::{FrameInput, GameAction, InputManager, RawInputEvent};
use crate::models::settings::{Settings, WindowSettings};
use crate::render::context::RenderError;
use crate::render::renderer::Renderer;
use crate::state::{FrameResult, Session};

/// Main application struct handling window events.
pub struct App {
    session: Session,
    input: InputManager,
    pending: FrameInput,
    window_settings: WindowSettings,
    font_path: PathBuf,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    error: Option<RenderError>,
}

impl App {
    pub fn new(settings: &Settings, session: Session) -> Self {
        Self {
            session,
            input: InputManager::new(&settings.keys),
            pending: FrameInput::default(),
            window_settings: settings.window.clone(),
            font_path: settings.font_path.clone(),
            window: None,
            renderer: None,
            error: None,
        }
    }

    /// Runs the application event loop (blocking) until the session quits.
    pub fn run(settings: &Settings, session: Session) -> Result<(), RenderError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(settings, session);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        log::info!("RENDER: Creating window...");
        let win_attr = Window::default_attributes()
            .with_title("Harmon")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.window_settings.width as f64,
                self.window_settings.height as f64,
            ));

        let window = Arc::new(event_loop.create_window(win_attr)?);
        self.window = Some(window.clone());

        log::info!("RENDER: Initializing WGPU...");
        let renderer = pollster::block_on(Renderer::new(window.clone(), &self.font_path))?;
        self.renderer = Some(renderer);

        window.request_redraw();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = std::mem::take(&mut self.pending);
        if self.session.frame(&input, Instant::now()) == FrameResult::Exit {
            event_loop.exit();
            return;
        }

        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };

        match renderer.render(&self.session.snapshot()) {
            Ok(()) => {}
            // Surface lost or outdated - reconfigure
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                renderer.resize(window.inner_size());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("RENDER: Out of memory!");
                event_loop.exit();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("RENDER: Timeout - frame dropped");
            }
            #[allow(unreachable_patterns)]
            Err(e) => log::error!("RENDER: {e:?}"),
        }
        window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.init_graphics(event_loop)
        {
            log::error!("RENDER: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::KeyboardInput { .. } => {
                if let Some(raw) = RawInputEvent::from_winit(&event)
                    && let Some(action) = self.input.process(raw)
                {
                    self.pending.push(action);
                }
            }
            WindowEvent::CloseRequested => {
                log::info!("RENDER: Close requested");
                let mut input = std::mem::take(&mut self.pending);
                input.push(GameAction::Quit);
                self.session.frame(&input, Instant::now());
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
