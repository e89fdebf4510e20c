//! Bouncing Particle Field
//!
//! A fixed field of point sprites bouncing inside a square, rendered with
//! additive blending and passed through a green color-threshold post-process.

mod controls;
mod error;

use controls::OrbitControls;
use error::{AppError, GpuError};
use glam::Vec2;
use particle_field::FieldParams;
use particle_renderer::{
    Camera, PointRenderer, SpriteTexture, ThresholdParams, ThresholdPass, SPRITE_SIZE,
};
use particle_simulation::{FrameTick, ParticleBuffers, ParticleSimulation};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frames averaged for the FPS readout
const FRAME_TIME_WINDOW: usize = 100;

/// Frame statistics are logged at debug level this often
const STATS_INTERVAL: u64 = 600;

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    /// Non-sRGB format the frame is rendered through
    view_format: wgpu::TextureFormat,

    simulation: ParticleSimulation,
    buffers: ParticleBuffers,
    point_renderer: PointRenderer,
    threshold: ThresholdPass,
    camera: Camera,

    start_time: Instant,
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>, params: FieldParams) -> Result<Self, GpuError> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let (surface_format, view_format) =
            pick_surface_format(&surface_caps.formats).ok_or(GpuError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Motion advances once per frame, so pace frames to the display
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: if view_format != surface_format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create simulation
        let simulation = ParticleSimulation::new(params);
        let buffers = ParticleBuffers::new(&device, &simulation);
        log::info!("✓ Simulation initialized");

        // Create renderers
        let threshold = ThresholdPass::new(
            &device,
            view_format,
            config.width,
            config.height,
            ThresholdParams::default(),
        );
        let sprite = SpriteTexture::spark(&device, &queue, SPRITE_SIZE);
        let point_renderer = PointRenderer::new(&device, threshold.scene_format(), sprite);
        log::info!("✓ Renderer initialized ({:?} as {:?})", config.format, view_format);

        let camera = Camera::new(config.width, config.height);

        let now = Instant::now();
        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            simulation,
            buffers,
            point_renderer,
            threshold,
            camera,
            start_time: now,
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
            last_frame_time: now,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            log::debug!("Resizing to {}x{}", new_size.width, new_size.height);
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.threshold
                .resize(&self.device, self.config.width, self.config.height);
            self.camera.resize(new_size.width, new_size.height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Only a frame that will be presented advances the field
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let (output, tick) = acquire_then_step(
            || self.surface.get_current_texture(),
            &mut self.simulation,
            elapsed,
        )?;
        self.buffers.sync(&self.queue, &mut self.simulation);

        // Track frame time
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };

        if tick.frame % STATS_INTERVAL == 0 {
            log::debug!(
                "frame {}: dt={:.4}s, avg {:.2}ms ({:.0} FPS)",
                tick.frame,
                tick.delta,
                avg_frame_time,
                fps
            );
        }

        // Render
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        self.point_renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.threshold.scene_view,
            &self.camera,
            [self.config.width as f32, self.config.height as f32],
            self.buffers.position_buffer(),
            self.buffers.style_buffer(),
            self.buffers.particle_count(),
        );
        self.threshold.render(&mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok((fps, avg_frame_time))
    }
}

/// Pick the surface format and the format frames are rendered through.
///
/// The threshold output must reach the screen without sRGB encoding, so a
/// non-sRGB format is preferred; otherwise the first format is viewed through
/// its non-sRGB variant.
fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Option<(wgpu::TextureFormat, wgpu::TextureFormat)> {
    let format = formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()?;
    Some((format, format.remove_srgb_suffix()))
}

/// Acquire the frame's target, then advance the simulation by one step.
///
/// A failed acquisition leaves the simulation untouched, so the field never
/// runs ahead of the frames actually shown.
fn acquire_then_step<T, E>(
    acquire: impl FnOnce() -> Result<T, E>,
    simulation: &mut ParticleSimulation,
    elapsed: f32,
) -> Result<(T, FrameTick), E> {
    let target = acquire()?;
    let tick = simulation.step(elapsed);
    Ok((target, tick))
}

struct App {
    params: FieldParams,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    controls: OrbitControls,
    error: Option<AppError>,
}

impl App {
    fn new(params: FieldParams) -> Self {
        Self {
            params,
            window: None,
            gpu_state: None,
            controls: OrbitControls::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attributes = Window::default_attributes()
            .with_title("Bouncing Particles")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), self.params))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{}", e);
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
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyC),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.reset();
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.controls.mouse_input(button, state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    let viewport_height = gpu_state.config.height as f32;
                    self.controls.cursor_moved(
                        Vec2::new(position.x as f32, position.y as f32),
                        &mut gpu_state.camera,
                        viewport_height,
                    );
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    self.controls.mouse_wheel(delta, &mut gpu_state.camera);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render() {
                        Ok((fps, frame_time)) => {
                            window.set_title(&format!(
                                "Bouncing Particles - {:.0} FPS ({:.2}ms) - {} particles",
                                fps,
                                frame_time,
                                gpu_state.simulation.particle_count()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.reconfigure()
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Surface out of memory, exiting");
                            event_loop.exit()
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), AppError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting bouncing particle field...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(FieldParams::default());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
