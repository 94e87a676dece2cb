//! Live window front end: winit event loop, softbuffer presentation, and
//! keyboard polling. The raycasting core knows nothing about any of it.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::Config;
use crate::error::{RaycastError, Result};
use crate::framebuffer::FrameBuffer;
use crate::game::{self, GameState};
use crate::renderer::{self, RenderSettings};
use crate::scaler::{ScaleLut, blit_nearest_stretch, build_scale_lut};
use crate::viewer::{Command, Viewer};
use crate::world::GridMap;

/// Held keys to at most one command per tick. Up wins over Down, Down over
/// Left, Left over Right.
pub fn command_for_keys(keys: &HashSet<KeyCode>) -> Option<Command> {
    [
        (KeyCode::ArrowUp, Command::Forward),
        (KeyCode::ArrowDown, Command::Backward),
        (KeyCode::ArrowLeft, Command::TurnLeft),
        (KeyCode::ArrowRight, Command::TurnRight),
    ]
    .into_iter()
    .find(|(key, _)| keys.contains(key))
    .map(|(_, command)| command)
}

#[inline]
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Escape | KeyCode::KeyQ)
}

/// Frame pacing plus FPS / playtime bookkeeping
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    last_frame: Instant,
    interval: Duration,
    frames: u32,
    window_start: Instant,
    fps: f32,
}

impl FrameClock {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            started: now,
            last_frame: now,
            interval: Duration::from_secs_f64(1.0 / target_fps.max(1) as f64),
            frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Earliest instant the next frame should be drawn
    pub fn next_deadline(&self) -> Instant {
        self.last_frame + self.interval
    }

    /// Instant to sleep until. A deadline already in the past is pushed one
    /// interval ahead so the loop never waits on a stale instant.
    pub fn wait_target(&self, now: Instant) -> Instant {
        let deadline = self.next_deadline();
        if deadline > now {
            deadline
        } else {
            now + self.interval
        }
    }

    /// Consume a frame slot without counting it as presented.
    pub fn skip(&mut self, now: Instant) {
        self.last_frame = now;
    }

    /// Record a presented frame. Returns true when the FPS estimate was
    /// refreshed (once per second).
    pub fn frame(&mut self, now: Instant) -> bool {
        self.last_frame = now;
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start).as_secs_f32();
        if elapsed >= 1.0 {
            self.fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.window_start = now;
            return true;
        }
        false
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn playtime(&self, now: Instant) -> Duration {
        now.duration_since(self.started)
    }

    pub fn caption(&self, now: Instant) -> String {
        format!(
            "FPS: {:.2}   Playtime: {:.2}",
            self.fps,
            self.playtime(now).as_secs_f32()
        )
    }
}

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    title: String,

    map: GridMap,
    state: GameState,
    settings: RenderSettings,

    // Internal frame at the configured resolution
    frame: FrameBuffer,
    scale_lut: ScaleLut,

    keys_down: HashSet<KeyCode>,
    clock: FrameClock,
    error: Option<RaycastError>,
}

impl App {
    fn new(config: &Config, map: GridMap, viewer: Viewer) -> Self {
        Self {
            window: None,
            surface: None,
            title: config.display.title.clone(),
            map,
            state: GameState::new(viewer),
            settings: config.render_settings(),
            frame: FrameBuffer::new(config.display.width, config.display.height),
            scale_lut: ScaleLut::default(),
            keys_down: HashSet::new(),
            clock: FrameClock::new(config.display.target_fps, Instant::now()),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RaycastError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(
                self.frame.width() as f64,
                self.frame.height() as f64,
            ));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| RaycastError::Window(format!("create window: {e}")))?,
        );
        let context = softbuffer::Context::new(window.clone())
            .map_err(|e| RaycastError::Window(format!("softbuffer context: {e}")))?;
        let surface = softbuffer::Surface::new(&context, window.clone())
            .map_err(|e| RaycastError::Window(format!("softbuffer surface: {e}")))?;

        let size = window.inner_size();
        self.rebuild_lut(size.width as usize, size.height as usize);
        info!(width = size.width, height = size.height, "window created");

        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn rebuild_lut(&mut self, dst_w: usize, dst_h: usize) {
        self.scale_lut = build_scale_lut(dst_w, dst_h, self.frame.width(), self.frame.height());
    }

    fn tick(&mut self) {
        let commands: Vec<Command> = command_for_keys(&self.keys_down).into_iter().collect();
        self.state = game::tick(&self.state, &commands, &self.map);
    }

    fn redraw(&mut self, id: WindowId) -> Result<()> {
        let size = match &self.window {
            Some(w) if w.id() == id => w.inner_size(),
            _ => return Ok(()),
        };
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // minimized: no input is applied and the pacing deadline moves on
            self.clock.skip(Instant::now());
            return Ok(());
        };

        self.tick();

        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) => (w, s),
            _ => return Ok(()),
        };
        surface
            .resize(dw, dh)
            .map_err(|e| RaycastError::Window(format!("resize surface: {e}")))?;

        renderer::render_frame(&mut self.frame, &self.state.viewer, &self.map, &self.settings);

        let mut buf = surface
            .buffer_mut()
            .map_err(|e| RaycastError::Window(format!("surface buffer: {e}")))?;
        blit_nearest_stretch(
            &mut buf,
            dw.get() as usize,
            self.frame.pixels(),
            self.frame.width(),
            &self.scale_lut,
        );
        buf.present()
            .map_err(|e| RaycastError::Window(format!("present: {e}")))?;

        let now = Instant::now();
        if self.clock.frame(now) {
            debug!(fps = self.clock.fps(), "frame rate");
        }
        window.set_title(&self.clock.caption(now));
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed if is_quit_key(code) => {
                    info!(?code, "quit key pressed");
                    event_loop.exit();
                }
                ElementState::Pressed => {
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw(id) {
                    self.fail(event_loop, err);
                }
            }

            WindowEvent::Resized(size) => {
                self.rebuild_lut(size.width as usize, size.height as usize);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.clock.next_deadline() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.wait_target(now)));
    }
}

/// Open the window and run until the user quits.
pub fn run(config: &Config, map: GridMap, viewer: Viewer) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|e| RaycastError::Window(format!("event loop: {e}")))?;

    let mut app = App::new(config, map, viewer);
    event_loop
        .run_app(&mut app)
        .map_err(|e| RaycastError::Window(format!("event loop: {e}")))?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
