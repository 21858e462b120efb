use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, Flow, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tessera".to_string(),
            initial_size: LogicalSize::new(600.0, 600.0),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current frame returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,

    /// Startup error reported from `Runtime::run` once the loop ends.
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn apply_commands(&mut self, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = self.window.as_ref() {
                        entry.with_window(|w| w.set_title(&title));
                    }
                }
                Command::Exit => self.exit_requested = true,
            }
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                self.failure = Some(e);
                self.exit_requested = true;
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Demos animate continuously.
        if let Some(entry) = self.window.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.exit_requested = true;
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.window.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.window.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let mut flow = Flow::Continue;

                if let Some(entry) = self.window.as_mut() {
                    let app = &mut self.app;
                    entry.with_mut(|fields| {
                        let ft: FrameTime = fields.clock.tick();

                        // Scope so `ctx` is dropped before the frame input is cleared.
                        {
                            let mut ctx = FrameCtx {
                                window: WindowCtx {
                                    id: fields.window.id(),
                                    window: fields.window,
                                },
                                gpu: fields.gpu,
                                input: fields.input_state,
                                input_frame: fields.input_frame,
                                time: ft,
                                runtime: &mut runtime_ctx,
                            };

                            flow = app.on_frame(&mut ctx);
                        }

                        fields.input_frame.clear();
                    });
                }

                if flow == Flow::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(runtime_ctx);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
