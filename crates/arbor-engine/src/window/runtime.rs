use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuConfig};
use crate::paint::Color;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub clear_color: Color,
    pub gpu: GpuConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "arbor".to_string(),
            initial_size: LogicalSize::new(960.0, 720.0),
            clear_color: Color::BLACK,
            gpu: GpuConfig::default(),
        }
    }
}

/// Single-window event loop driving an [`App`].
///
/// Redraws continuously; closing the window or returning
/// [`AppControl::Exit`] ends the loop.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState { config, app, entry: None, failure: None };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A> {
    config: RuntimeConfig,
    app: A,
    entry: Option<WindowEntry>,
    /// Setup error surfaced from `Runtime::run` after the loop exits.
    failure: Option<anyhow::Error>,
}

impl<A: App> RuntimeState<A> {
    fn create_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let gpu_config = self.config.gpu.clone();

        WindowEntryTryBuilder {
            clock: FrameClock::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_config)),
        }
        .try_build()
        .context("GPU initialization failed")
    }

    fn id(&self) -> Option<WindowId> {
        self.entry.as_ref().map(|e| e.borrow_window().id())
    }

    fn redraw(&mut self) -> AppControl {
        let Some(entry) = self.entry.as_mut() else { return AppControl::Continue };
        let app = &mut self.app;
        let clear_color = self.config.clear_color;

        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let mut ctx = FrameCtx { window: fields.window, gpu: fields.gpu, time, clear_color };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A: App> ApplicationHandler for RuntimeState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match self.create_entry(event_loop) {
            Ok(entry) => {
                log::info!("window \"{}\" ready", self.config.title);
                entry.borrow_window().request_redraw();
                self.entry = Some(entry);
            }
            Err(err) => {
                log::error!("{err:#}");
                self.failure = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = &self.entry {
            entry.borrow_window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.id() != Some(window_id) {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let size = entry.borrow_window().inner_size();
                    entry.with_gpu_mut(|gpu| gpu.resize(size));
                }
            }
            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
