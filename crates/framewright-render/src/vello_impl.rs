//! Vello-based painter implementation.

use kurbo::{Affine, BezPath, Point, Rect, Stroke};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill};
use vello::Scene;

use crate::renderer::Painter;

/// Widget text uses the system's sans-serif face.
const FONT_FAMILY: parley::GenericFamily = parley::GenericFamily::SansSerif;

/// Vello-based painter for GPU-accelerated 2D graphics.
pub struct VelloBackend {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached between frames).
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
    /// Applied to everything drawn; carries the window scale factor.
    transform: Affine,
}

impl Default for VelloBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloBackend {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            transform: Affine::IDENTITY,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Scale subsequent drawing by the window's scale factor.
    pub fn set_scale(&mut self, scale: f64) {
        self.transform = Affine::scale(scale);
    }
}

impl Painter for VelloBackend {
    fn reset(&mut self) {
        self.scene.reset();
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.scene
            .fill(Fill::NonZero, self.transform, color, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Color) {
        self.scene
            .stroke(&Stroke::new(width), self.transform, color, None, path);
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        let brush = Brush::Solid(color);

        let mut builder = self
            .layout_cx
            .ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Single(
            parley::FontFamily::Generic(FONT_FAMILY),
        )));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());

        let text_transform = self.transform * Affine::translate(origin.to_vec2());
        let mut glyph_count = 0;

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let glyph_xform = run
                    .synthesis()
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph {
                            id: glyph.id,
                            x: gx,
                            y: gy,
                        }
                    })
                    .collect();
                glyph_count += glyphs.len();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No usable system font: mark where the text would be.
        if glyph_count == 0 {
            let width = text.chars().count() as f64 * font_size as f64 * 0.6;
            let height = font_size as f64 * 1.2;
            let rect = Rect::from_origin_size(origin, (width.max(20.0), height));
            self.scene.fill(
                Fill::NonZero,
                self.transform,
                Color::from_rgba8(255, 100, 100, 100),
                None,
                &rect,
            );
            log::trace!("No glyphs for {text:?}");
        }
    }
}
