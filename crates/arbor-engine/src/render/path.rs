use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

// ── CPU tessellation ──────────────────────────────────────────────────────

/// Vertex layout (24 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  color  [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PathVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl PathVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PathVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Contiguous vertex range drawn with one pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub topology: Topology,
    pub vertices: Range<u32>,
}

/// Converts a draw list into vertices and ordered batches.
///
/// Fills are fan-triangulated from their first vertex, so they must be convex
/// (or at least star-shaped around that vertex). Strokes become line
/// segments, with a closing segment for closed outlines. Consecutive
/// commands of the same topology share a batch; recording order is kept.
///
/// Output buffers are cleared first and can be reused across frames.
pub fn tessellate(list: &DrawList, vertices: &mut Vec<PathVertex>, batches: &mut Vec<Batch>) {
    vertices.clear();
    batches.clear();

    for cmd in list.items() {
        let start = vertices.len() as u32;
        let color = cmd.color().to_array();
        let v = |p: crate::coords::Point2D| PathVertex { pos: [p.x, p.y], color };

        let topology = match cmd {
            DrawCmd::Fill(fill) => {
                let pts = &fill.points;
                for i in 1..pts.len().saturating_sub(1) {
                    vertices.extend([v(pts[0]), v(pts[i]), v(pts[i + 1])]);
                }
                Topology::Triangles
            }
            DrawCmd::Stroke(stroke) => {
                let pts = &stroke.points;
                for pair in pts.windows(2) {
                    vertices.extend([v(pair[0]), v(pair[1])]);
                }
                if stroke.closed && pts.len() > 2 {
                    vertices.extend([v(pts[pts.len() - 1]), v(pts[0])]);
                }
                Topology::Lines
            }
        };

        let end = vertices.len() as u32;
        if end == start {
            continue;
        }
        match batches.last_mut() {
            Some(last) if last.topology == topology && last.vertices.end == start => {
                last.vertices.end = end;
            }
            _ => batches.push(Batch { topology, vertices: start..end }),
        }
    }
}

// ── GPU renderer ──────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewUniform {
    half_extent: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

/// Renderer for a whole [`DrawList`]: fills and strokes in recording order.
///
/// Uses one vertex buffer per frame and two pipelines (triangle list and
/// line list) sharing a shader. World `[-1, 1]` spans the shorter viewport
/// axis.
#[derive(Default)]
pub struct PathRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    fill_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    view_ubo: Option<wgpu::Buffer>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,

    vertices: Vec<PathVertex>,
    batches: Vec<Batch>,
}

impl PathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) {
        tessellate(draw_list, &mut self.vertices, &mut self.batches);
        if self.batches.is_empty() {
            return;
        }

        self.ensure_pipelines(ctx);
        self.ensure_bindings(ctx);
        self.ensure_vertex_capacity(ctx, self.vertices.len());
        self.write_view_uniform(ctx);

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));

        let Some(fill_pipeline) = self.fill_pipeline.as_ref() else { return };
        let Some(line_pipeline) = self.line_pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("arbor path pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
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
            multiview_mask: None,
        });

        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        let mut bound: Option<Topology> = None;
        for batch in &self.batches {
            if bound != Some(batch.topology) {
                rpass.set_pipeline(match batch.topology {
                    Topology::Triangles => fill_pipeline,
                    Topology::Lines => line_pipeline,
                });
                bound = Some(batch.topology);
            }
            rpass.draw(batch.vertices.clone(), 0..1);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.fill_pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("arbor path shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/path.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("arbor path bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewUniform>() as u64,
                        ),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("arbor path pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let build = |label: &str, topology: wgpu::PrimitiveTopology| {
            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[PathVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        self.fill_pipeline = Some(build("arbor path fill pipeline", wgpu::PrimitiveTopology::TriangleList));
        self.line_pipeline = Some(build("arbor path line pipeline", wgpu::PrimitiveTopology::LineList));
        self.pipeline_format = Some(ctx.surface_format);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.view_ubo = None;
        log::debug!("path pipelines built for {:?}", ctx.surface_format);
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.view_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let view_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arbor path view ubo"),
            size: std::mem::size_of::<ViewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arbor path bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_ubo.as_entire_binding(),
            }],
        });

        self.view_ubo = Some(view_ubo);
        self.bind_group = Some(bind_group);
    }

    fn write_view_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.view_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewUniform {
                half_extent: ctx.viewport.world_half_extent(),
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("arbor path vbo"),
            size: (new_cap * std::mem::size_of::<PathVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Point2D;
    use crate::paint::Color;
    use crate::scene::Canvas;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(1.0, 1.0),
            Point2D::new(0.0, 1.0),
        ]
    }

    fn run(list: &DrawList) -> (Vec<PathVertex>, Vec<Batch>) {
        let (mut v, mut b) = (Vec::new(), Vec::new());
        tessellate(list, &mut v, &mut b);
        (v, b)
    }

    #[test]
    fn fill_is_fan_triangulated() {
        let mut list = DrawList::new();
        list.set_pen_color(Color::RED);
        list.fill_polygon(&square());

        let (v, b) = run(&list);
        assert_eq!(v.len(), 6);
        assert_eq!(b, vec![Batch { topology: Topology::Triangles, vertices: 0..6 }]);
        assert_eq!(v[3].pos, [0.0, 0.0]);
        assert_eq!(v[5].pos, [0.0, 1.0]);
        assert!(v.iter().all(|x| x.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn closed_stroke_adds_closing_segment() {
        let mut list = DrawList::new();
        list.stroke_polyline(&square(), true);
        list.stroke_polyline(&square(), false);

        let (v, b) = run(&list);
        // 4 segments closed + 3 open, merged into one line batch.
        assert_eq!(v.len(), 14);
        assert_eq!(b, vec![Batch { topology: Topology::Lines, vertices: 0..14 }]);
        assert_eq!(v[6].pos, [0.0, 1.0]);
        assert_eq!(v[7].pos, [0.0, 0.0]);
    }

    #[test]
    fn alternating_topologies_keep_order() {
        let mut list = DrawList::new();
        list.fill_polygon(&square());
        list.stroke_polyline(&square(), true);
        list.fill_polygon(&square());

        let (_, b) = run(&list);
        let kinds: Vec<Topology> = b.iter().map(|x| x.topology).collect();
        assert_eq!(kinds, vec![Topology::Triangles, Topology::Lines, Topology::Triangles]);
        assert_eq!(b[1].vertices, 6..14);
        assert_eq!(b[2].vertices, 14..20);
    }

    #[test]
    fn empty_list_produces_nothing() {
        let (v, b) = run(&DrawList::new());
        assert!(v.is_empty());
        assert!(b.is_empty());
    }
}
