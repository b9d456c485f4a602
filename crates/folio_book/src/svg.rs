//! SVG export
//!
//! Replays a recorded display list as an SVG document. Every push becomes a
//! `<g>` and every pop closes it, so the output nests exactly like the
//! painting code. Gradients, ruling patterns, grain, clips and filters are
//! emitted as `<defs>` whose ids carry a per-book prefix, keeping several
//! books on one page from sharing clip paths.

use folio_core::paint::trim_float;
use folio_core::{
    Brush, ClipShape, Color, ColorFilter, DrawCommand, Gradient, NoiseStyle, Path, Pattern, Shadow,
    Size, Stroke, TextAlign, TextStyle, Transform,
};

/// Room around the book for staples, lift and tilt
pub const MARGIN: f32 = 12.0;

/// Serialize recorded commands into a standalone SVG document
pub fn commands_to_svg(commands: &[DrawCommand], size: Size, id_prefix: &str) -> String {
    let mut writer = SvgWriter::new(id_prefix);
    for command in commands {
        writer.command(command);
    }
    writer.finish(size)
}

struct SvgWriter<'a> {
    prefix: &'a str,
    defs: String,
    body: String,
    next_id: u32,
    depth: usize,
}

impl<'a> SvgWriter<'a> {
    fn new(prefix: &'a str) -> Self {
        Self {
            prefix,
            defs: String::new(),
            body: String::new(),
            next_id: 0,
            depth: 0,
        }
    }

    fn finish(mut self, size: Size) -> String {
        // Unbalanced pushes still produce well-formed XML
        while self.depth > 0 {
            self.close_group();
        }
        let width = size.width + 2.0 * MARGIN;
        let height = size.height + 2.0 * MARGIN;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} {x} {w} {h}">"#,
            w = trim_float(width),
            h = trim_float(height),
            x = trim_float(-MARGIN),
        );
        svg.push('\n');
        if !self.defs.is_empty() {
            svg.push_str("<defs>\n");
            svg.push_str(&self.defs);
            svg.push_str("</defs>\n");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{}-{}-{}", self.prefix, kind, self.next_id)
    }

    /// Append one element to `<defs>`
    fn def(&mut self, element: String) {
        self.defs.push_str(&element);
        self.defs.push('\n');
    }

    /// Append one element to the body
    fn emit(&mut self, element: String) {
        self.body.push_str(&element);
        self.body.push('\n');
    }

    fn open_group(&mut self, attrs: &str) {
        self.emit(format!("<g {attrs}>"));
        self.depth += 1;
    }

    fn close_group(&mut self) {
        if self.depth > 0 {
            self.body.push_str("</g>\n");
            self.depth -= 1;
        }
    }

    fn command(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::PushTransform(transform) => {
                let attrs = format!(r#"transform="{}""#, matrix(transform));
                self.open_group(&attrs);
            }
            DrawCommand::PushClip(shape) => {
                let id = self.id("clip");
                let path = match shape {
                    ClipShape::Rect(rect) => Path::rect(*rect),
                    ClipShape::Path(path) => path.clone(),
                };
                self.def(format!(
                    r#"<clipPath id="{id}"><path d="{}"/></clipPath>"#,
                    path.to_svg_data(),
                ));
                self.open_group(&format!(r#"clip-path="url(#{id})""#));
            }
            DrawCommand::PushOpacity(opacity) => {
                self.open_group(&format!(r#"opacity="{}""#, trim_float(opacity.clamp(0.0, 1.0))));
            }
            DrawCommand::PushFilter(filter) => {
                let id = self.filter_def(filter);
                self.open_group(&format!(r#"filter="url(#{id})""#));
            }
            DrawCommand::PopTransform
            | DrawCommand::PopClip
            | DrawCommand::PopOpacity
            | DrawCommand::PopFilter => self.close_group(),
            DrawCommand::FillPath { path, brush } => self.fill(path, brush),
            DrawCommand::StrokePath {
                path,
                stroke,
                brush,
            } => self.stroke(path, stroke, brush),
            DrawCommand::DrawInnerShadow { path, shadow } => self.inner_shadow(path, shadow),
            DrawCommand::DrawText {
                text,
                origin,
                style,
            } => self.text(text, origin.x, origin.y, style),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Paint
    // ─────────────────────────────────────────────────────────────────────

    fn fill(&mut self, path: &Path, brush: &Brush) {
        let d = path.to_svg_data();
        match brush {
            Brush::Solid(color) => {
                self.emit(format!(r#"<path d="{d}" {}/>"#, paint_attrs("fill", *color)));
            }
            Brush::Gradient(gradient) => {
                let id = self.gradient_def(gradient);
                self.emit(format!(r#"<path d="{d}" fill="url(#{id})"/>"#));
            }
            Brush::Pattern(pattern) => {
                for id in self.pattern_defs(pattern) {
                    self.emit(format!(r#"<path d="{d}" fill="url(#{id})"/>"#));
                }
            }
            Brush::Noise(noise) => {
                let id = self.noise_def(noise);
                self.emit(format!(r##"<path d="{d}" fill="#000" filter="url(#{id})"/>"##));
            }
        }
    }

    fn stroke(&mut self, path: &Path, stroke: &Stroke, brush: &Brush) {
        // Inside strokes rely on the enclosing clip to hide the outer half
        let width = if stroke.inside {
            stroke.width * 2.0
        } else {
            stroke.width
        };
        let paint = match brush {
            Brush::Solid(color) => paint_attrs("stroke", *color),
            Brush::Gradient(gradient) => {
                let id = self.gradient_def(gradient);
                format!(r#"stroke="url(#{id})""#)
            }
            Brush::Pattern(_) | Brush::Noise(_) => paint_attrs("stroke", Color::BLACK),
        };
        self.emit(format!(
            r#"<path d="{}" fill="none" {paint} stroke-width="{}"/>"#,
            path.to_svg_data(),
            trim_float(width),
        ));
    }

    /// Blurred band along the outline, offset and clipped to the inside
    fn inner_shadow(&mut self, path: &Path, shadow: &Shadow) {
        let band = 2.0 * (shadow.spread.max(0.0) + shadow.blur.max(0.0)).max(0.5);
        let mut filter_attr = String::new();
        if shadow.blur > 0.0 {
            let id = self.id("blur");
            self.def(format!(
                r#"<filter id="{id}" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="{}"/></filter>"#,
                trim_float(shadow.blur / 2.0),
            ));
            filter_attr = format!(r#" filter="url(#{id})""#);
        }
        let clip = self.id("clip");
        let d = path.to_svg_data();
        self.def(format!(r#"<clipPath id="{clip}"><path d="{d}"/></clipPath>"#));
        self.emit(format!(
            r#"<g clip-path="url(#{clip})"><path d="{d}" transform="translate({} {})" fill="none" {} stroke-width="{}"{filter_attr}/></g>"#,
            trim_float(shadow.offset_x),
            trim_float(shadow.offset_y),
            paint_attrs("stroke", shadow.color),
            trim_float(band),
        ));
    }

    fn text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let common = format!(
            r#"font-family="{}" font-size="{}" font-weight="{}" letter-spacing="{}" text-anchor="{anchor}" dominant-baseline="central""#,
            escape(&style.family),
            trim_float(style.size),
            style.weight.to_numeric(),
            trim_float(style.letter_spacing),
        );
        let content = escape(text);
        for shadow in &style.shadows {
            self.emit(format!(
                r#"<text x="{}" y="{}" {common} {}>{content}</text>"#,
                trim_float(x + shadow.offset_x),
                trim_float(y + shadow.offset_y),
                paint_attrs("fill", shadow.color),
            ));
        }
        self.emit(format!(
            r#"<text x="{}" y="{}" {common} {}>{content}</text>"#,
            trim_float(x),
            trim_float(y),
            paint_attrs("fill", style.color),
        ));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Definitions
    // ─────────────────────────────────────────────────────────────────────

    fn gradient_def(&mut self, gradient: &Gradient) -> String {
        let id = self.id("gradient");
        self.defs.push_str(&format!(
            r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            trim_float(gradient.start.x),
            trim_float(gradient.start.y),
            trim_float(gradient.end.x),
            trim_float(gradient.end.y),
        ));
        for stop in gradient.stops() {
            self.defs.push_str(&format!(
                r#"<stop offset="{}" {}/>"#,
                trim_float(stop.offset),
                color_attrs("stop-color", "stop-opacity", stop.color),
            ));
        }
        self.defs.push_str("</linearGradient>\n");
        id
    }

    /// One tile per line family; dots need a single tile
    fn pattern_defs(&mut self, pattern: &Pattern) -> Vec<String> {
        match pattern {
            Pattern::Stripes(sets) => sets
                .iter()
                .map(|set| {
                    let id = self.id("pattern");
                    let period = set.period.max(0.5);
                    // Tiles are drawn for a downward axis (180deg)
                    self.def(format!(
                        r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{p}" height="{p}" patternTransform="rotate({})"><rect y="{}" width="{p}" height="{}" {}/></pattern>"#,
                        trim_float(set.angle - 180.0),
                        trim_float(period - set.thickness),
                        trim_float(set.thickness),
                        paint_attrs("fill", set.ink),
                        p = trim_float(period),
                    ));
                    id
                })
                .collect(),
            Pattern::Dots(dots) => {
                let id = self.id("pattern");
                let spacing = dots.spacing.max(0.5);
                self.def(format!(
                    r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="{s}" height="{s}"><circle cx="{c}" cy="{c}" r="{}" {}/></pattern>"#,
                    trim_float(dots.radius),
                    paint_attrs("fill", dots.ink),
                    s = trim_float(spacing),
                    c = trim_float(spacing / 2.0),
                ));
                vec![id]
            }
        }
    }

    fn noise_def(&mut self, noise: &NoiseStyle) -> String {
        let id = self.id("grain");
        self.def(format!(
            r#"<filter id="{id}" x="0" y="0" width="100%" height="100%"><feTurbulence type="fractalNoise" baseFrequency="{}" numOctaves="{}" stitchTiles="stitch"/><feColorMatrix type="saturate" values="0"/><feComposite in2="SourceGraphic" operator="in"/></filter>"#,
            trim_float(noise.base_frequency),
            noise.octaves,
        ));
        id
    }

    fn filter_def(&mut self, filter: &ColorFilter) -> String {
        let id = self.id("filter");
        let slope = trim_float(filter.brightness);
        self.def(format!(
            r#"<filter id="{id}"><feComponentTransfer><feFuncR type="linear" slope="{slope}"/><feFuncG type="linear" slope="{slope}"/><feFuncB type="linear" slope="{slope}"/></feComponentTransfer><feColorMatrix type="saturate" values="{}"/></filter>"#,
            trim_float(filter.saturate),
        ));
        id
    }
}

/// `fill="#rrggbb"` plus `fill-opacity` when translucent
fn paint_attrs(name: &str, color: Color) -> String {
    color_attrs(name, &format!("{name}-opacity"), color)
}

fn color_attrs(name: &str, opacity_name: &str, color: Color) -> String {
    let [r, g, b] = color.to_rgb8();
    let mut attrs = format!(r##"{name}="#{r:02x}{g:02x}{b:02x}""##);
    if color.a < 1.0 {
        attrs.push_str(&format!(r#" {opacity_name}="{}""#, trim_float(color.a.max(0.0))));
    }
    attrs
}

fn matrix(transform: &Transform) -> String {
    let [a, b, c, d, e, f] = transform.to_affine().elements;
    format!(
        "matrix({} {} {} {} {} {})",
        trim_float(a),
        trim_float(b),
        trim_float(c),
        trim_float(d),
        trim_float(e),
        trim_float(f)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DrawContext, GradientStop, Point, RecordingContext, Rect};

    fn record(paint: impl FnOnce(&mut RecordingContext)) -> Vec<DrawCommand> {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        paint(&mut ctx);
        ctx.take_commands()
    }

    #[test]
    fn test_groups_nest() {
        let commands = record(|ctx| {
            ctx.push_transform(Transform::translate(3.0, 4.0));
            ctx.push_opacity(0.5);
            ctx.fill_path(&Path::rect(Rect::new(0.0, 0.0, 2.0, 2.0)), Color::WHITE.into());
            ctx.pop_opacity();
            ctx.pop_transform();
        });
        let svg = commands_to_svg(&commands, Size::new(10.0, 10.0), "b1");
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains(r#"<g transform="matrix(1 0 0 1 3 4)">"#));
        assert!(svg.contains(r#"<g opacity="0.5">"#));
        assert!(svg.contains(r##"fill="#ffffff""##));
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_ids_are_prefixed() {
        let commands = record(|ctx| {
            ctx.push_clip(ClipShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
            ctx.fill_path(
                &Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0)),
                Gradient::css_angle(
                    90.0,
                    [
                        GradientStop::new(0.0, Color::BLACK),
                        GradientStop::new(1.0, Color::BLACK.with_alpha(0.0)),
                    ],
                )
                .into(),
            );
            ctx.pop_clip();
        });
        let svg = commands_to_svg(&commands, Size::new(10.0, 10.0), "book-7");
        assert!(svg.contains(r#"<clipPath id="book-7-clip-1">"#));
        assert!(svg.contains(r#"<linearGradient id="book-7-gradient-2""#));
        assert!(svg.contains(r#"stop-opacity="0""#));
    }

    #[test]
    fn test_text_is_escaped_with_shadows() {
        let mut style = TextStyle::new(13.0).with_align(TextAlign::Center);
        style.shadows.push(Shadow::new(0.0, 1.0, 0.0, Color::BLACK.with_alpha(0.25)));
        let commands = record(|ctx| ctx.draw_text("A & B", Point::new(5.0, 5.0), &style));
        let svg = commands_to_svg(&commands, Size::new(10.0, 10.0), "b");
        assert_eq!(svg.matches("A &amp; B").count(), 2);
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"y="6""#));
    }

    #[test]
    fn test_unbalanced_push_is_closed() {
        let commands = record(|ctx| ctx.push_opacity(0.3));
        let svg = commands_to_svg(&commands, Size::new(10.0, 10.0), "b");
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }
}
