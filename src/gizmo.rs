use buildvolume_core::{gizmo_camera, Camera, GizmoFace};
use glam::{Vec2, Vec3};
use wasm_bindgen::JsCast;
use web_sys as web;

const CUBE_HALF: f32 = 0.35;
const AXIS_LEN: f32 = 0.5;

/// The orientation cube drawn into its own 2D canvas.
pub struct GizmoView {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl GizmoView {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for gizmo"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    /// Square side of the drawing surface in canvas pixels.
    fn side(&self) -> f32 {
        self.canvas.width().min(self.canvas.height()).max(1) as f32
    }

    /// Convert a CSS-pixel pointer offset to canvas pixels.
    pub fn to_canvas_px(&self, css: Vec2) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        let w = (rect.width() as f32).max(1.0);
        let h = (rect.height() as f32).max(1.0);
        Vec2::new(
            css.x / w * self.canvas.width() as f32,
            css.y / h * self.canvas.height() as f32,
        )
    }

    pub fn pick(&self, main: &Camera, canvas_px: Vec2) -> Option<GizmoFace> {
        buildvolume_core::pick_face(&gizmo_camera(main), canvas_px, self.side())
    }

    pub fn draw(&self, main: &Camera, light_theme: bool) {
        let cam = gizmo_camera(main);
        let side = self.side();
        let project = |p: Vec3| cam.world_to_screen(p, side, side);
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);

        // cube wireframe
        let stroke = if light_theme { "#4b5563" } else { "#9ca3af" };
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(1.0);
        for (a, b) in cube_edges() {
            if let (Some(pa), Some(pb)) = (project(a), project(b)) {
                ctx.begin_path();
                ctx.move_to(pa.x as f64, pa.y as f64);
                ctx.line_to(pb.x as f64, pb.y as f64);
                ctx.stroke();
            }
        }

        let axes = [
            (Vec3::X, "#ff5555"),
            (Vec3::Y, "#55ff55"),
            (Vec3::Z, "#5599ff"),
        ];
        ctx.set_line_width(2.0);
        for (dir, color) in axes {
            if let (Some(o), Some(t)) = (project(Vec3::ZERO), project(dir * AXIS_LEN)) {
                ctx.set_stroke_style_str(color);
                ctx.begin_path();
                ctx.move_to(o.x as f64, o.y as f64);
                ctx.line_to(t.x as f64, t.y as f64);
                ctx.stroke();
            }
        }

        // Far labels first so near ones paint on top
        let mut faces: Vec<(GizmoFace, f32)> = GizmoFace::ALL
            .iter()
            .map(|f| (*f, cam.eye.distance(f.label_position())))
            .collect();
        faces.sort_by(|a, b| b.1.total_cmp(&a.1));
        let font_px = (side * 0.11).round().max(9.0);
        ctx.set_font(&format!("600 {}px system-ui, sans-serif", font_px));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let text = if light_theme { "#111827" } else { "#e5e7eb" };
        ctx.set_fill_style_str(text);
        for (face, _) in faces {
            if let Some(p) = project(face.label_position()) {
                _ = ctx.fill_text(face.label(), p.x as f64, p.y as f64);
            }
        }
    }
}

fn cube_edges() -> impl Iterator<Item = (Vec3, Vec3)> {
    let c = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { -CUBE_HALF } else { CUBE_HALF },
            if i & 2 == 0 { -CUBE_HALF } else { CUBE_HALF },
            if i & 4 == 0 { -CUBE_HALF } else { CUBE_HALF },
        )
    };
    (0..8usize).flat_map(move |i| {
        [1usize, 2, 4]
            .into_iter()
            .filter(move |bit| i & bit == 0)
            .map(move |bit| (c(i), c(i | bit)))
    })
}
