//! Immediate-mode 2D canvas.
//!
//! Screens record fill/stroke/image/text calls each frame; `flush` uploads
//! the accumulated mesh and replays it in one render pass. Consecutive quads
//! that share a texture merge into a single draw call, so a tiled background
//! costs one call no matter how many tiles it spans.

use std::collections::HashMap;

use wgpu::util::DeviceExt;
use wgpu_text::glyph_brush::ab_glyph::FontArc;
use wgpu_text::glyph_brush::{HorizontalAlign, Layout, OwnedSection, OwnedText};
use wgpu_text::{BrushBuilder, TextBrush};

use crate::pipeline::{CanvasUniform, CanvasVertex, SpritePipeline};
use crate::surface::{Color, Rect, Surface, TextAlign};
use crate::texture::Texture;

/// Slot 0 is always the 1x1 white texture used for solid fills.
const WHITE_SLOT: usize = 0;

struct DrawCall {
    texture_slot: usize,
    index_start: u32,
    index_count: u32,
}

pub struct Canvas {
    pipeline: SpritePipeline,

    uniform_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,

    vertices: Vec<CanvasVertex>,
    indices: Vec<u32>,
    draw_calls: Vec<DrawCall>,

    bind_groups: Vec<wgpu::BindGroup>,
    texture_sizes: Vec<(u32, u32)>,
    texture_slots: HashMap<String, usize>,

    brush: TextBrush<FontArc>,
    sections: Vec<OwnedSection>,

    /// Logical canvas size; everything screens draw is in these units.
    canvas_size: (f32, f32),
    /// Physical surface size in pixels. Text is rasterized in pixel space.
    pixel_size: (u32, u32),
}

impl Canvas {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        pixel_size: (u32, u32),
        font_bytes: Vec<u8>,
    ) -> Result<Self, String> {
        let pipeline = SpritePipeline::new(device, format);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Canvas Uniform Buffer"),
            contents: bytemuck::cast_slice(&[CanvasUniform {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = pipeline.create_camera_bind_group(device, &uniform_buffer);

        let vertex_capacity = 1024;
        let index_capacity = 1536;
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Vertex Buffer"),
            size: (vertex_capacity * std::mem::size_of::<CanvasVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Canvas Index Buffer"),
            size: (index_capacity * std::mem::size_of::<u32>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let white = Texture::solid(device, queue, [255, 255, 255, 255], "Canvas White");
        let white_bind_group = pipeline.create_texture_bind_group(device, &white);

        let font = FontArc::try_from_vec(font_bytes)
            .map_err(|e| format!("failed to parse canvas font: {e}"))?;
        let brush: TextBrush<FontArc> =
            BrushBuilder::using_font(font).build(device, pixel_size.0, pixel_size.1, format);

        Ok(Self {
            pipeline,
            uniform_buffer,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            vertex_capacity,
            index_capacity,
            vertices: Vec::new(),
            indices: Vec::new(),
            draw_calls: Vec::new(),
            bind_groups: vec![white_bind_group],
            texture_sizes: vec![(1, 1)],
            texture_slots: HashMap::new(),
            brush,
            sections: Vec::new(),
            canvas_size: (pixel_size.0 as f32, pixel_size.1 as f32),
            pixel_size,
        })
    }

    /// Upload a decoded image so `draw_image` can reference it by id.
    /// Registering the same id again replaces the previous texture.
    pub fn register_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: &str,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) {
        let texture = Texture::from_rgba8(device, queue, pixels, width, height, id);
        let bind_group = self.pipeline.create_texture_bind_group(device, &texture);
        match self.texture_slots.get(id) {
            Some(&slot) => {
                self.bind_groups[slot] = bind_group;
                self.texture_sizes[slot] = (width, height);
            }
            None => {
                let slot = self.bind_groups.len();
                self.bind_groups.push(bind_group);
                self.texture_sizes.push((width, height));
                self.texture_slots.insert(id.to_string(), slot);
            }
        }
    }

    pub fn has_image(&self, id: &str) -> bool {
        self.texture_slots.contains_key(id)
    }

    pub fn begin_frame(&mut self, canvas_width: f32, canvas_height: f32) {
        self.canvas_size = (canvas_width.max(1.0), canvas_height.max(1.0));
        self.vertices.clear();
        self.indices.clear();
        self.draw_calls.clear();
        self.sections.clear();
    }

    pub fn resize(&mut self, queue: &wgpu::Queue, pixel_width: u32, pixel_height: u32) {
        self.pixel_size = (pixel_width.max(1), pixel_height.max(1));
        self.brush
            .resize_view(self.pixel_size.0 as f32, self.pixel_size.1 as f32, queue);
    }

    fn push_quad(&mut self, texture_slot: usize, corners: [CanvasVertex; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

        match self.draw_calls.last_mut() {
            Some(call) if call.texture_slot == texture_slot => call.index_count += 6,
            _ => self.draw_calls.push(DrawCall {
                texture_slot,
                index_start: self.indices.len() as u32 - 6,
                index_count: 6,
            }),
        }
    }

    fn push_rect(&mut self, texture_slot: usize, dst: Rect, uv: Rect, tint: Color) {
        let (x0, y0) = (dst.x, dst.y);
        let (x1, y1) = (dst.x + dst.w, dst.y + dst.h);
        let (u0, v0) = (uv.x, uv.y);
        let (u1, v1) = (uv.x + uv.w, uv.y + uv.h);
        self.push_quad(
            texture_slot,
            [
                CanvasVertex {
                    position: [x0, y0],
                    uv: [u0, v0],
                    tint: tint.0,
                },
                CanvasVertex {
                    position: [x1, y0],
                    uv: [u1, v0],
                    tint: tint.0,
                },
                CanvasVertex {
                    position: [x1, y1],
                    uv: [u1, v1],
                    tint: tint.0,
                },
                CanvasVertex {
                    position: [x0, y1],
                    uv: [u0, v1],
                    tint: tint.0,
                },
            ],
        );
    }

    fn grow_buffers(&mut self, device: &wgpu::Device) {
        if self.vertices.len() > self.vertex_capacity {
            while self.vertex_capacity < self.vertices.len() {
                self.vertex_capacity *= 2;
            }
            self.vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Canvas Vertex Buffer"),
                size: (self.vertex_capacity * std::mem::size_of::<CanvasVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if self.indices.len() > self.index_capacity {
            while self.index_capacity < self.indices.len() {
                self.index_capacity *= 2;
            }
            self.index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Canvas Index Buffer"),
                size: (self.index_capacity * std::mem::size_of::<u32>()) as u64,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
    }

    pub fn flush(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) -> Result<(), String> {
        self.grow_buffers(device);
        if !self.vertices.is_empty() {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.indices));
        }

        // Quads live in canvas units; project them y-down over the surface.
        let view_proj = glam::Mat4::orthographic_rh(
            0.0,
            self.canvas_size.0,
            self.canvas_size.1,
            0.0,
            -1.0,
            1.0,
        );
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[CanvasUniform {
                view_proj: view_proj.to_cols_array_2d(),
            }]),
        );

        let borrowed: Vec<_> = self.sections.iter().map(|s| s.to_borrowed()).collect();
        self.brush
            .queue(device, queue, borrowed)
            .map_err(|e| format!("text queue failed: {e}"))?;

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Canvas Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for call in &self.draw_calls {
            render_pass.set_bind_group(1, &self.bind_groups[call.texture_slot], &[]);
            render_pass.draw_indexed(
                call.index_start..call.index_start + call.index_count,
                0,
                0..1,
            );
        }

        // Text goes on top of everything queued this frame.
        self.brush.draw(&mut render_pass);

        Ok(())
    }
}

impl Surface for Canvas {
    fn size(&self) -> (f32, f32) {
        self.canvas_size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_rect(WHITE_SLOT, rect, Rect::new(0.0, 0.0, 1.0, 1.0), color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        let t = thickness.max(1.0);
        let uv = Rect::new(0.0, 0.0, 1.0, 1.0);
        // Top, bottom, then the two sides between them.
        self.push_rect(WHITE_SLOT, Rect::new(rect.x, rect.y, rect.w, t), uv, color);
        self.push_rect(
            WHITE_SLOT,
            Rect::new(rect.x, rect.y + rect.h - t, rect.w, t),
            uv,
            color,
        );
        self.push_rect(
            WHITE_SLOT,
            Rect::new(rect.x, rect.y + t, t, rect.h - 2.0 * t),
            uv,
            color,
        );
        self.push_rect(
            WHITE_SLOT,
            Rect::new(rect.x + rect.w - t, rect.y + t, t, rect.h - 2.0 * t),
            uv,
            color,
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color, align: TextAlign) {
        // The brush rasterizes in pixel space, so positions and glyph size
        // scale by the canvas-to-pixel ratio.
        let sx = self.pixel_size.0 as f32 / self.canvas_size.0;
        let sy = self.pixel_size.1 as f32 / self.canvas_size.1;
        let layout = match align {
            TextAlign::Left => Layout::default_single_line(),
            TextAlign::Center => Layout::default_single_line().h_align(HorizontalAlign::Center),
        };
        let section = OwnedSection::default()
            .add_text(
                OwnedText::new(text.to_string())
                    .with_scale(size * sy)
                    .with_color(color.0),
            )
            .with_screen_position((x * sx, y * sy))
            .with_layout(layout);
        self.sections.push(section);
    }

    fn draw_image(&mut self, image_id: &str, src: Rect, dst: Rect) {
        let Some(&slot) = self.texture_slots.get(image_id) else {
            log::warn!("draw_image: no texture registered for '{image_id}'");
            return;
        };
        let (tw, th) = self.texture_sizes[slot];
        let uv = Rect::new(
            src.x / tw as f32,
            src.y / th as f32,
            src.w / tw as f32,
            src.h / th as f32,
        );
        self.push_rect(slot, dst, uv, Color::WHITE);
    }
}
