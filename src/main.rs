use std::sync::Arc;

use glam::{IVec2, Mat4};
use winit::{
    event::*,
    event_loop::EventLoop,
    window::Window,
};

use teaview::{logging, ui, utils};
use teaview::controller::{LightingController, OrbitController};
use teaview::model::teapot;
use teaview::view::{render, GpuContext, PhongParamWriter};

const TEAPOT_SEGMENTS: usize = 48;

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    pipelines: render::Pipelines,
    depth_view: wgpu::TextureView,
    msaa_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    phong_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    grid_bind_group: wgpu::BindGroup,
    gizmo_buffer: wgpu::Buffer,
    gizmo_bind_group: wgpu::BindGroup,
    teapot_mesh: utils::MeshBuffer,
    grid_mesh: utils::MeshBuffer,
    sphere_mesh: utils::MeshBuffer,

    // egui
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,

    // Controllers
    orbit: OrbitController,
    lighting: LightingController,
    dragging: bool,

    // Frame timing
    last_frame_time: std::time::Instant,
    fps: f32,
    frame_count: u32,
    fps_timer: f32,
}

impl App {
    async fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();

        let gpu = GpuContext::new(window.clone(), size.width, size.height).await;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        let (_, depth_view) = render::create_depth_texture(&device, size.width, size.height);
        let (_, msaa_view) =
            render::create_msaa_texture(&device, config.format, size.width, size.height);

        // Meshes: teapot, wire plane, light gizmo sphere
        let teapot_mesh = teapot::generate(TEAPOT_SEGMENTS).upload(&device);
        let grid_mesh = utils::create_grid_mesh(10.0, 10).upload(&device);
        let sphere_mesh = utils::create_sphere_mesh(0.03, 12, 24).upload(&device);

        let scene = render::create_scene_resources(&device);
        let unlit = render::create_unlit_resources(&device, &scene.camera_buffer);

        let pipelines = render::create_pipelines(
            &device,
            config.format,
            &scene.bind_group_layout,
            &unlit.bind_group_layout,
        );

        // Controllers with their startup state
        let orbit = OrbitController::new(size.width, size.height);
        let lighting = LightingController::new();

        // Push every shader parameter once so the first frame is correct
        // without any UI interaction.
        {
            let mut sink = PhongParamWriter {
                queue: &queue,
                buffer: &scene.phong_buffer,
            };
            lighting.push_all(&mut sink);
        }

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            config.format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            pipelines,
            depth_view,
            msaa_view,
            camera_buffer: scene.camera_buffer,
            phong_buffer: scene.phong_buffer,
            scene_bind_group: scene.bind_group,
            grid_bind_group: unlit.grid_bind_group,
            gizmo_buffer: unlit.gizmo_buffer,
            gizmo_bind_group: unlit.gizmo_bind_group,
            teapot_mesh,
            grid_mesh,
            sphere_mesh,
            egui_renderer,
            egui_state,
            egui_ctx,
            orbit,
            lighting,
            dragging: false,
            last_frame_time: std::time::Instant::now(),
            fps: 0.0,
            frame_count: 0,
            fps_timer: 0.0,
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event
        let egui_captured = self
            .egui_state
            .on_window_event(self.window.as_ref(), event)
            .consumed;
        if egui_captured {
            return true;
        }

        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    self.dragging = *state == ElementState::Pressed;
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = IVec2::new(position.x as i32, position.y as i32);
                if self.dragging {
                    self.orbit.on_pointer_drag(pos);
                } else {
                    self.orbit.on_pointer_move(pos);
                }
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let increment = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 20.0,
                };
                self.orbit.on_wheel(increment);
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (_, depth_view) =
                render::create_depth_texture(&self.device, new_size.width, new_size.height);
            let (_, msaa_view) = render::create_msaa_texture(
                &self.device,
                self.config.format,
                new_size.width,
                new_size.height,
            );
            self.depth_view = depth_view;
            self.msaa_view = msaa_view;

            self.orbit.on_resize(new_size.width, new_size.height);
        }
    }

    fn update(&mut self, dt: f32) {
        // Update FPS
        self.frame_count += 1;
        self.fps_timer += dt;
        if self.fps_timer >= 1.0 {
            self.fps = self.frame_count as f32 / self.fps_timer;
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }

        // Upload per-frame camera data
        let camera = &self.orbit.camera;
        let camera_data = render::CameraUniform {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.to_array(),
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_data));

        // Light gizmo follows the light, shaded grayscale by intensity
        let light = &self.lighting.light;
        let gizmo_data = render::UnlitUniform {
            model: Mat4::from_translation(light.position).to_cols_array_2d(),
            color: [light.intensity, light.intensity, light.intensity, 1.0],
        };
        self.queue
            .write_buffer(&self.gizmo_buffer, 0, bytemuck::bytes_of(&gizmo_data));
    }

    fn render_ui(&mut self) -> (Vec<egui::epaint::ClippedShape>, egui::TexturesDelta) {
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let mut edits = Vec::new();
        let output = self.egui_ctx.run(raw_input, |ctx| {
            edits = ui::parameters_window(
                ctx,
                &self.lighting.material,
                &self.lighting.light,
                self.fps,
            );
        });
        self.egui_state
            .handle_platform_output(&self.window, output.platform_output);

        // Store reported edits and push each changed parameter, one named
        // value per control, to the shader sink.
        if !edits.is_empty() {
            let mut sink = PhongParamWriter {
                queue: &self.queue,
                buffer: &self.phong_buffer,
            };
            for edit in edits {
                self.lighting.apply_edit(edit, &mut sink);
            }
        }

        (output.shapes, output.textures_delta)
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (shapes, textures_delta) = self.render_ui();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let primitives = self
            .egui_ctx
            .tessellate(shapes, self.window.scale_factor() as f32);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        // Upload egui textures
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Teapot with Phong shading
            render_pass.set_pipeline(&self.pipelines.phong);
            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.teapot_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.teapot_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.teapot_mesh.index_count, 0, 0..1);

            // Reference grid
            render_pass.set_pipeline(&self.pipelines.lines);
            render_pass.set_bind_group(0, &self.grid_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.grid_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.grid_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.grid_mesh.index_count, 0, 0..1);

            // Light gizmo sphere
            render_pass.set_pipeline(&self.pipelines.unlit);
            render_pass.set_bind_group(0, &self.gizmo_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.sphere_mesh.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.sphere_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.sphere_mesh.index_count, 0, 0..1);
        }

        // Render egui on top of the resolved image
        {
            let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.egui_renderer
                .render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        // Cleanup egui textures
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() {
    logging::init();

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("teaview")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true);
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = pollster::block_on(App::new(window.clone()));
    tracing::info!("startup complete, entering event loop");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => {
                            let now = std::time::Instant::now();
                            let dt = (now - app.last_frame_time).as_secs_f32();
                            app.last_frame_time = now;

                            app.update(dt);

                            match app.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => app.resize(app.size),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => tracing::error!("surface error: {e:?}"),
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        })
        .unwrap();
}
