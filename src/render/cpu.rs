use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::error::{ScrappersError, ScrappersResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::plan::{FramePlan, Paint};

/// CPU backend powered by `vello_cpu` for vector rasterization.
///
/// The render context is kept between frames and only rebuilt when the canvas size changes.
#[derive(Default)]
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuBackend {
    /// Create a backend with no allocated render context.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> ScrappersResult<R>,
    ) -> ScrappersResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> ScrappersResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| ScrappersError::render("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| ScrappersError::render("canvas height exceeds u16"))?;

        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(plan.clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));

            for op in &plan.ops {
                let path = bezpath_to_cpu(&op.path);
                match op.paint {
                    Paint::Fill(fill) => {
                        ctx.set_paint(color_to_cpu(fill));
                        ctx.fill_path(&path);
                    }
                    Paint::Stroke { color, width } => {
                        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                        ctx.set_paint(color_to_cpu(color));
                        ctx.stroke_path(&path);
                    }
                    Paint::FillStroke {
                        fill,
                        stroke,
                        width,
                    } => {
                        ctx.set_paint(color_to_cpu(fill));
                        ctx.fill_path(&path);
                        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                        ctx.set_paint(color_to_cpu(stroke));
                        ctx.stroke_path(&path);
                    }
                }
            }

            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);

            let mut data = pixmap.data_as_u8_slice().to_vec();
            unpremultiply_rgba8_in_place(&mut data);
            Ok(FrameRGBA {
                width: plan.canvas.width,
                height: plan.canvas.height,
                data,
            })
        })
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Pixmaps hold premultiplied alpha; frames leave the backend straight.
fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
