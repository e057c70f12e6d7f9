use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use orbital_cloud::config::{CAMERA_RESET, CAMERA_START, CONTROL_STEP};
use orbital_cloud::{
    ControlPanel, EvolutionEngine, PhaseClock, SampleField, StepReport, WallClock,
};

use crate::gpu::{CloudBuffers, GpuContext, GuideFlags, OrbitCamera, RenderPipeline};

/// Pixels of precise-scroll that count as one wheel line
const PIXELS_PER_LINE: f32 = 50.0;

/// GPU-side state, created once the window exists
struct Renderer {
    gpu: GpuContext,
    buffers: CloudBuffers,
    pipeline: RenderPipeline,
    bind_group: wgpu::BindGroup,
}

/// Left-button drag tracking for the orbit camera
#[derive(Default)]
struct DragState {
    active: bool,
    last_cursor: Option<(f64, f64)>,
}

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    field: SampleField,
    engine: EvolutionEngine,
    controls: ControlPanel,
    phase: PhaseClock,
    clock: WallClock,
    camera: OrbitCamera,
    drag: DragState,
    fps_counter: FpsCounter,
    last_report: Option<StepReport>,
}

impl App {
    /// Bind the engine to a freshly generated field
    pub fn new(field: SampleField) -> orbital_cloud::Result<Self> {
        let mut engine = EvolutionEngine::new();
        engine.bind(&field)?;
        let controls = ControlPanel::new();

        Ok(Self {
            window: None,
            renderer: None,
            field,
            engine,
            phase: PhaseClock::new(controls.phase_mode),
            controls,
            clock: WallClock::start(),
            camera: OrbitCamera::new(CAMERA_START, 1.0),
            drag: DragState::default(),
            fps_counter: FpsCounter::new(),
            last_report: None,
        })
    }

    /// Advance the phase and recompute visibility for this frame
    fn advance_simulation(&mut self) -> orbital_cloud::Result<()> {
        let params = self.controls.snapshot();
        let phase = self.phase.advance(self.clock.now_secs(), params.speed);
        let report = self.engine.step(&mut self.field, &params, phase)?;
        self.last_report = Some(report);
        self.camera.update();
        Ok(())
    }

    fn render(&mut self) {
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };
        let gpu = &renderer.gpu;

        // Upload this frame's visibility and camera
        renderer.buffers.update_visibility(&gpu.queue, &self.field);
        renderer
            .buffers
            .update_scene(&gpu.queue, self.camera.view_projection(), gpu.viewport());

        // Get surface texture
        let output = match gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface
                gpu.surface.configure(&gpu.device, &gpu.config);
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

        renderer.pipeline.draw(
            &mut encoder,
            &view,
            &gpu.depth_view,
            &renderer.bind_group,
            &renderer.buffers,
            GuideFlags {
                axes: self.controls.show_axes,
                grid: self.controls.show_grid,
            },
        );

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if let Some(fps) = self.fps_counter.tick() {
            if let (Some(window), Some(report)) = (&self.window, self.last_report) {
                window.set_title(&format!(
                    "Orbital Cloud - {:.0} FPS - {}/{} visible - {} phase",
                    fps,
                    report.visible,
                    report.population,
                    self.phase.mode().label()
                ));
            }
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        match key_code {
            // Probability threshold
            KeyCode::BracketLeft => {
                let threshold = self.controls.adjust_threshold(-CONTROL_STEP);
                log::info!("Threshold: {:.2}", threshold);
            }
            KeyCode::BracketRight => {
                let threshold = self.controls.adjust_threshold(CONTROL_STEP);
                log::info!("Threshold: {:.2}", threshold);
            }

            // Animation speed
            KeyCode::Minus => {
                let speed = self.controls.adjust_speed(-CONTROL_STEP);
                log::info!("Speed: {:.2}", speed);
            }
            KeyCode::Equal => {
                let speed = self.controls.adjust_speed(CONTROL_STEP);
                log::info!("Speed: {:.2}", speed);
            }

            // Mixture weights (cross-linked)
            KeyCode::KeyJ | KeyCode::KeyK => {
                let step = if key_code == KeyCode::KeyK {
                    CONTROL_STEP
                } else {
                    -CONTROL_STEP
                };
                let params = self.controls.snapshot();
                self.controls.set_weight_1s(params.weight_1s + step);
                self.log_weights();
            }
            KeyCode::KeyN | KeyCode::KeyM => {
                let step = if key_code == KeyCode::KeyM {
                    CONTROL_STEP
                } else {
                    -CONTROL_STEP
                };
                let params = self.controls.snapshot();
                self.controls.set_weight_2pz(params.weight_2pz + step);
                self.log_weights();
            }

            // Display toggles
            KeyCode::KeyX => {
                let on = self.controls.toggle_axes();
                log::info!("Axes: {}", if on { "ON" } else { "OFF" });
            }
            KeyCode::KeyG => {
                let on = self.controls.toggle_grid();
                log::info!("Grid: {}", if on { "ON" } else { "OFF" });
            }

            // Phase accumulation mode
            KeyCode::KeyP => {
                let mode = self.controls.toggle_phase_mode();
                self.phase.set_mode(mode);
                log::info!("Phase mode: {}", mode.label());
            }

            KeyCode::KeyR => {
                self.controls.reset();
                self.camera.set_position(CAMERA_RESET);
                log::info!("Reset: speed {:.1}", self.controls.snapshot().speed);
            }

            _ => {}
        }
    }

    fn log_weights(&self) {
        let params = self.controls.snapshot();
        log::info!("1s: {:.2}  2pz: {:.2}", params.weight_1s, params.weight_2pz);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing Orbital Cloud...");
        log::info!("Sample points: {}", self.field.len());

        let window_attrs = Window::default_attributes()
            .with_title("Orbital Cloud - Initializing...")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()));
        self.camera.resize(gpu.config.width, gpu.config.height);

        log::info!("Uploading point buffers...");
        let buffers = CloudBuffers::new(&gpu.device, &gpu.queue, &self.field);

        log::info!("Creating render pipeline...");
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format());
        let bind_group = pipeline.create_bind_group(&gpu.device, &buffers.scene_buffer);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Left drag: Orbit camera");
        log::info!("  Wheel: Zoom");
        log::info!("  [/]: Probability threshold");
        log::info!("  -/=: Animation speed");
        log::info!("  J/K: 1s proportion");
        log::info!("  N/M: 2pz proportion");
        log::info!("  X: Toggle axes");
        log::info!("  G: Toggle grid");
        log::info!("  P: Toggle absolute/delta phase mode");
        log::info!("  R: Reset");
        log::info!("  Escape: Quit");

        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(Renderer {
            gpu,
            buffers,
            pipeline,
            bind_group,
        });
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
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.drag.active = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some((x, y))) = (self.drag.active, self.drag.last_cursor) {
                    self.camera.drag((position.x - x) as f32, (position.y - y) as f32);
                }
                self.drag.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    renderer.gpu.resize(new_size);
                    self.camera.resize(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.advance_simulation() {
                    log::error!("Evolution step failed: {}", e);
                    event_loop.exit();
                    return;
                }
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
