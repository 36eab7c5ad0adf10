use std::sync::Arc;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::render::instance::{self, BoxInstance};
use crate::render::pipeline::SceneUniform;
use crate::render::GpuState;
use crate::scene::Scene;

/// Initial window size (logical pixels).
const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 720.0;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    scene: Option<Scene>,

    /// Scene creation time — the animation's t=0.
    started: Option<Instant>,
    last_frame_time: Option<Instant>,

    // Frame timing
    frame_stats: FrameStats,

    // Reusable instance buffer (avoid per-frame allocation)
    instance_buf: Vec<BoxInstance>,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            scene: None,
            started: None,
            last_frame_time: None,
            frame_stats: FrameStats::new(),
            instance_buf: Vec::new(),
        }
    }

    /// Run one frame: advance the scene to the current elapsed time, then
    /// upload and draw. Exactly one update is in flight per redraw.
    fn redraw(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_frame_time {
            self.frame_stats.record_frame(now.duration_since(last).as_secs_f64());
        }
        self.last_frame_time = Some(now);

        let (Some(scene), Some(gpu)) = (self.scene.as_mut(), self.gpu.as_mut()) else {
            return;
        };
        let Some(started) = self.started else {
            return;
        };

        // --- Update (pure math, no GPU) ---
        let t = started.elapsed().as_secs_f32();
        scene.update(t);
        instance::collect_instances(scene, &mut self.instance_buf);

        // --- Upload + render ---
        gpu.update_scene_uniform(&SceneUniform::new(&scene.camera, &scene.lights));
        gpu.update_instances(&self.instance_buf);
        if let Some(mut frame) = gpu.begin_frame() {
            gpu.draw_figure(&mut frame.encoder, &frame.view);
            gpu.finish_frame(frame.encoder, frame.output);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("Trotter")
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let size = window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);

        // Initialize wgpu + pipeline
        let gpu = GpuState::new(window.clone());
        self.gpu = Some(gpu);
        log::info!("wgpu + figure pipeline initialized");

        // Build the scene
        let aspect = size.width.max(1) as f32 / size.height.max(1) as f32;
        let scene = Scene::new(aspect);
        log::info!(
            "Scene built: {} figure parts, {} lights",
            scene.horse.part_count(),
            scene.lights.count()
        );
        self.scene = Some(scene);
        self.started = Some(Instant::now());
        log::info!("Starting animation loop");

        // Continuous animation loop
        event_loop.set_control_flow(ControlFlow::Poll);

        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(w) = &self.window {
            w.request_redraw();
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
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                }
                if let Some(scene) = &mut self.scene {
                    scene.camera.set_aspect(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            // Pointer input drives the orbit controller.
            other => {
                if let Some(scene) = &mut self.scene {
                    scene.orbit.process_window_event(&other);
                }
            }
        }
    }
}

/// Entry point — create event loop and run.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
