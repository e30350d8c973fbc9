use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        [point.x, point.y]
    }
}

/// Color SVG. En JSON se acepta `"nombre"`, `[r, g, b]` o `[r, g, b, a]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Named(name) => write!(f, "{}", name),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a),
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

impl fmt::Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StrokeLineCap::Butt => "butt",
            StrokeLineCap::Round => "round",
            StrokeLineCap::Square => "square",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            StrokeLineJoin::Arcs => "arcs",
            StrokeLineJoin::Bevel => "bevel",
            StrokeLineJoin::Miter => "miter",
            StrokeLineJoin::MiterClip => "miter-clip",
            StrokeLineJoin::Round => "round",
        };
        f.write_str(value)
    }
}

/// Atributos de trazo y relleno comunes a todas las figuras.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathAttrs {
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: Option<f64>,
    line_cap: Option<StrokeLineCap>,
    line_join: Option<StrokeLineJoin>,
}

impl fmt::Display for PathAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{}\"", fill)?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{}\"", stroke)?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{}\"", width)?;
        }
        if let Some(cap) = self.line_cap {
            write!(f, " stroke-linecap=\"{}\"", cap)?;
        }
        if let Some(join) = self.line_join {
            write!(f, " stroke-linejoin=\"{}\"", join)?;
        }
        Ok(())
    }
}

/// Setters encadenables de `PathAttrs` para cualquier figura.
pub trait PathProps: Sized {
    fn attrs_mut(&mut self) -> &mut PathAttrs;

    fn fill_color(mut self, color: impl Into<Color>) -> Self {
        self.attrs_mut().fill = Some(color.into());
        self
    }

    fn stroke_color(mut self, color: impl Into<Color>) -> Self {
        self.attrs_mut().stroke = Some(color.into());
        self
    }

    fn stroke_width(mut self, width: f64) -> Self {
        self.attrs_mut().stroke_width = Some(width);
        self
    }

    fn stroke_line_cap(mut self, cap: StrokeLineCap) -> Self {
        self.attrs_mut().line_cap = Some(cap);
        self
    }

    fn stroke_line_join(mut self, join: StrokeLineJoin) -> Self {
        self.attrs_mut().line_join = Some(join);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f64,
    attrs: PathAttrs,
}

impl Default for Circle {
    fn default() -> Self {
        Self {
            center: Point::default(),
            radius: 1.0,
            attrs: PathAttrs::default(),
        }
    }
}

impl Circle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    points: Vec<Point>,
    attrs: PathAttrs,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
            attrs: PathAttrs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    position: Point,
    offset: Point,
    font_size: u32,
    font_family: Option<String>,
    font_weight: Option<String>,
    data: String,
    attrs: PathAttrs,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            position: Point::default(),
            offset: Point::default(),
            font_size: 1,
            font_family: None,
            font_weight: None,
            data: String::new(),
            attrs: PathAttrs::default(),
        }
    }
}

impl Text {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.data
    }
}

impl PathProps for Circle {
    fn attrs_mut(&mut self) -> &mut PathAttrs {
        &mut self.attrs
    }
}

impl PathProps for Polyline {
    fn attrs_mut(&mut self) -> &mut PathAttrs {
        &mut self.attrs
    }
}

impl PathProps for Text {
    fn attrs_mut(&mut self) -> &mut PathAttrs {
        &mut self.attrs
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
            self.center.x, self.center.y, self.radius, self.attrs
        )
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<polyline points=\"")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{},{}", point.x, point.y)?;
        }
        write!(f, "\"{}/>", self.attrs)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<text x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
            self.position.x, self.position.y, self.offset.x, self.offset.y, self.font_size
        )?;
        if let Some(family) = &self.font_family {
            write!(f, " font-family=\"{}\"", family)?;
        }
        if let Some(weight) = &self.font_weight {
            write!(f, " font-weight=\"{}\"", weight)?;
        }
        write!(f, "{}>{}</text>", self.attrs, escape_text(&self.data))
    }
}

/// Escapa los caracteres reservados de XML.
pub fn escape_text(data: &str) -> String {
    let mut escaped = String::with_capacity(data.len());
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Circle(circle) => fmt::Display::fmt(circle, f),
            Object::Polyline(polyline) => fmt::Display::fmt(polyline, f),
            Object::Text(text) => fmt::Display::fmt(text, f),
        }
    }
}

impl From<Circle> for Object {
    fn from(circle: Circle) -> Self {
        Object::Circle(circle)
    }
}

impl From<Polyline> for Object {
    fn from(polyline: Polyline) -> Self {
        Object::Polyline(polyline)
    }
}

impl From<Text> for Object {
    fn from(text: Text) -> Self {
        Object::Text(text)
    }
}

/// Documento SVG 1.1. Los objetos se dibujan en el orden en que se agregan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">")?;
        for object in &self.objects {
            writeln!(f, "  {}", object)?;
        }
        write!(f, "</svg>")
    }
}
