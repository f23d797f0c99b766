//! Frame submission: uploads the draw commands of one snapshot and presents.

use crate::models::engine::{InstanceRaw, PlayfieldLayout};
use crate::render::context::{RenderContext, RenderError};
use crate::render::draw::{DrawCommand, background_color, build_frame};
use crate::render::pipeline::{MAX_QUADS, create_instance_buffer, create_quad_pipeline, rect_instance};
use crate::render::text::load_text_brush;
use crate::shared::snapshot::RenderState;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use wgpu::{LoadOp, Operations, RenderPassColorAttachment, RenderPassDescriptor, StoreOp};
use wgpu_text::TextBrush;
use wgpu_text::glyph_brush::{Section, Text};
use winit::window::Window;

pub struct Renderer {
    pub ctx: RenderContext,
    quad_pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    text_brush: Option<TextBrush>,
    instances: Vec<InstanceRaw>,

    // FPS
    frame_count: u32,
    last_fps_update: Instant,
    current_fps: f64,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, font_path: &Path) -> Result<Self, RenderError> {
        let ctx = RenderContext::new(window).await?;
        let quad_pipeline = create_quad_pipeline(&ctx.device, ctx.config.format);
        let instance_buffer = create_instance_buffer(&ctx.device);
        let text_brush = load_text_brush(
            &ctx.device,
            ctx.config.width,
            ctx.config.height,
            ctx.config.format,
            font_path,
        );

        Ok(Self {
            ctx,
            quad_pipeline,
            instance_buffer,
            text_brush,
            instances: Vec::with_capacity(256),
            frame_count: 0,
            last_fps_update: Instant::now(),
            current_fps: 0.0,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        if let Some(brush) = self.text_brush.as_mut() {
            brush.resize_view(self.ctx.width(), self.ctx.height(), &self.ctx.queue);
        }
    }

    fn tick_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_update);
        if elapsed.as_secs_f64() >= 1.0 {
            self.current_fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_fps_update = now;
        }
    }

    pub fn render(&mut self, state: &RenderState) -> Result<(), wgpu::SurfaceError> {
        self.tick_fps();

        let (width, height) = (self.ctx.width(), self.ctx.height());
        let layout = PlayfieldLayout::new(width, height);
        let commands = build_frame(state, &layout, self.current_fps);

        self.instances.clear();
        let mut sections = Vec::new();
        for command in &commands {
            match command {
                DrawCommand::Rect { x, y, w, h, color } => {
                    self.instances
                        .push(rect_instance(*x, *y, *w, *h, *color, width, height));
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    scale,
                    color,
                } => sections.push(Section {
                    screen_position: (*x, *y),
                    bounds: (width, height),
                    text: vec![Text::new(text).with_scale(*scale).with_color(*color)],
                    ..Default::default()
                }),
            }
        }

        if self.instances.len() > MAX_QUADS {
            log::warn!(
                "RENDER: {} quads requested, drawing the first {}",
                self.instances.len(),
                MAX_QUADS
            );
            self.instances.truncate(MAX_QUADS);
        }

        if let Some(brush) = self.text_brush.as_mut()
            && let Err(e) = brush.queue(&self.ctx.device, &self.ctx.queue, sections)
        {
            log::warn!("RENDER: Failed to queue text: {}", e);
        }

        if !self.instances.is_empty() {
            self.ctx.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&self.instances),
            );
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        let [r, g, b, a] = background_color(state);
        {
            let mut render_pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.instances.is_empty() {
                render_pass.set_pipeline(&self.quad_pipeline);
                render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
                render_pass.draw(0..4, 0..self.instances.len() as u32);
            }

            if let Some(brush) = self.text_brush.as_ref() {
                brush.draw(&mut render_pass);
            }
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
