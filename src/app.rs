use std::sync::Arc;
use std::time::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use sort_cycle::config::{CycleConfig, MAX_SPEED, MIN_SPEED};
use sort_cycle::motion::Tweener;
use sort_cycle::schedule::{CycleScheduler, SystemClock};
use sort_cycle::simulation::CellInstance;
use sort_cycle::sorting::Algorithm;

use crate::error::SetupError;
use crate::gpu::{cell_size, CellBuffers, GpuContext, RenderPipeline, ViewParams};

/// Speed change per key press
const SPEED_STEP: f32 = 1.5;

/// Render resources, created once per window
struct Renderer {
    gpu: GpuContext,
    cell_buffers: CellBuffers,
    render_pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scheduler: CycleScheduler<SystemClock, StdRng>,
    tweener: Tweener,
    instances: Vec<CellInstance>,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new(config: CycleConfig) -> Self {
        Self {
            window: None,
            renderer: None,
            scheduler: CycleScheduler::new(config, SystemClock::new(), StdRng::from_entropy()),
            tweener: Tweener::new(),
            instances: Vec::new(),
            fps_counter: FpsCounter::new(),
        }
    }

    /// Create the window and render context. A no-op once they exist.
    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SetupError> {
        if self.window.is_some() {
            return Ok(());
        }

        log::info!("Initializing sort cycle visualizer...");

        let window_attrs = Window::default_attributes()
            .with_title("Sort Cycle - Initializing...")
            .with_inner_size(winit::dpi::LogicalSize::new(960, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;

        let config = self.scheduler.config();
        let (cols, rows) = (config.cols, config.rows);
        log::info!("Grid size: {}x{}", cols, rows);

        let cell_buffers = CellBuffers::new(&gpu.device, (cols * rows) as usize);
        let render_pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = render_pipeline.create_bind_group(&gpu.device, &cell_buffers.view_buffer);

        self.scheduler.build_grid(cols, rows);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  B: Bubble sort");
        log::info!("  S: Selection sort");
        log::info!("  U: Unsort now");
        log::info!("  R: Rebuild grid");
        log::info!("  Up/Down: Faster/slower swaps");
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(Renderer {
            gpu,
            cell_buffers,
            render_pipeline,
            bind_group,
        });
        Ok(())
    }

    /// Advance the cycle by one frame: land finished animations, fire due
    /// timers, then let the stepper take its step.
    fn advance_cycle(&mut self) {
        let now = self.scheduler.now_ms();
        for ticket in self.tweener.advance(now) {
            self.scheduler.complete_motion(ticket);
        }
        self.scheduler.poll_timers();
        self.scheduler.on_frame(&mut self.tweener);
    }

    fn render(&mut self) {
        self.advance_cycle();

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let Some(grid) = self.scheduler.grid() else {
            return;
        };

        let size = cell_size(grid);
        self.instances.clear();
        self.instances.extend(grid.cells.iter().map(|cell| {
            let display = self.tweener.position_of(cell.id).unwrap_or(cell.position);
            CellInstance::new(cell, display, size)
        }));

        let gpu = &renderer.gpu;
        let (width, height) = gpu.size();
        renderer.cell_buffers.update_view(&gpu.queue, ViewParams::fit(grid, width, height));
        renderer
            .cell_buffers
            .upload(&gpu.device, &gpu.queue, &self.instances);

        // Get surface texture
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        renderer.render_pipeline.draw(
            &mut encoder,
            &view,
            &renderer.bind_group,
            &renderer.cell_buffers.instance_buffer,
            renderer.cell_buffers.count(),
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            self.update_title(fps);
        }
    }

    fn update_title(&mut self, fps: f64) {
        let ratio = self.scheduler.current_ratio();
        let phase = self.scheduler.phase();
        let algorithm = self.scheduler.state().algorithm;
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "Sort Cycle - {} - {} - disorder {:.2} - {:.0} FPS",
                algorithm, phase, ratio, fps
            ));
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::KeyB => self.scheduler.set_algorithm(Algorithm::Bubble),
            KeyCode::KeyS => self.scheduler.set_algorithm(Algorithm::Selection),

            KeyCode::KeyU => {
                log::info!("Unsort requested");
                self.scheduler.unsort_now();
            }

            // Rebuild drops in-flight animations; their tickets are stale anyway
            KeyCode::KeyR => {
                self.tweener.cancel_all();
                let config = self.scheduler.config();
                let (cols, rows) = (config.cols, config.rows);
                self.scheduler.build_grid(cols, rows);
            }

            KeyCode::ArrowUp => {
                let speed = (self.scheduler.config().speed * SPEED_STEP).min(MAX_SPEED);
                self.scheduler.set_speed(speed);
                log::info!("Speed: {:.2} swaps/s", speed);
            }
            KeyCode::ArrowDown => {
                let speed = (self.scheduler.config().speed / SPEED_STEP).max(MIN_SPEED);
                self.scheduler.set_speed(speed);
                log::info!("Speed: {:.2} swaps/s", speed);
            }

            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.initialize(event_loop) {
            log::error!("Setup failed: {}", e);
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
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
