use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SldError;

// ────────────────────────────────────────────────────────────────────────────
// Style / Rule
// ────────────────────────────────────────────────────────────────────────────

/// The version-agnostic style produced by reading an SLD document and
/// consumed by writing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_denominator: Option<ScaleDenominator>,
    #[serde(default)]
    pub symbolizers: Vec<Symbolizer>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleDenominator {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Expressions
// ────────────────────────────────────────────────────────────────────────────

/// A literal value carried by an [`Expression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

/// Either a literal or a (possibly nested) function invocation.
///
/// Property references are functions named `property` with the attribute
/// name as their only argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Literal(Value),
    Function(FunctionCall),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expression>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl Expression {
    pub fn string(s: impl Into<String>) -> Self {
        Expression::Literal(Value::String(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Expression::Literal(Value::Number(n))
    }

    pub fn property(name: impl Into<String>) -> Self {
        Expression::Function(FunctionCall::new("property", vec![Expression::string(name)]))
    }

    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function(FunctionCall::new(name, args))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expression::Literal(v) => Some(v),
            Expression::Function(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expression::Literal(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Expression::Literal(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Expression::Function(_))
    }

    /// Text form of a literal; `None` for functions.
    pub fn literal_text(&self) -> Option<String> {
        self.as_literal().map(|v| v.to_string())
    }
}

impl From<f64> for Expression {
    fn from(n: f64) -> Self {
        Expression::number(n)
    }
}

impl From<&str> for Expression {
    fn from(s: &str) -> Self {
        Expression::string(s)
    }
}

impl From<String> for Expression {
    fn from(s: String) -> Self {
        Expression::string(s)
    }
}

impl From<bool> for Expression {
    fn from(b: bool) -> Self {
        Expression::Literal(Value::Bool(b))
    }
}

impl From<FunctionCall> for Expression {
    fn from(f: FunctionCall) -> Self {
        Expression::Function(f)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filters
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "==")]
    EqualTo,
    #[serde(rename = "!=")]
    NotEqualTo,
    #[serde(rename = "*=")]
    Like,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqualTo,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqualTo,
}

/// A boolean-valued filter tree attached to a [`Rule`].
///
/// In comparison operands a string literal `property` names a feature
/// attribute; the compared `value` is a literal unless it is a function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    Comparison {
        operator: ComparisonOperator,
        property: Expression,
        value: Expression,
    },
    IsNull {
        property: Expression,
    },
    Between {
        property: Expression,
        lower: Expression,
        upper: Expression,
    },
    And {
        filters: Vec<Filter>,
    },
    Or {
        filters: Vec<Filter>,
    },
    Not {
        filter: Box<Filter>,
    },
    /// A raw SLD function used directly as a filter.
    Function {
        function: FunctionCall,
    },
}

impl Filter {
    pub fn comparison(
        operator: ComparisonOperator,
        property: impl Into<String>,
        value: impl Into<Expression>,
    ) -> Self {
        Filter::Comparison {
            operator,
            property: Expression::string(property),
            value: value.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Symbolizers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Symbolizer {
    Mark(MarkSymbolizer),
    Icon(IconSymbolizer),
    Line(LineSymbolizer),
    Fill(FillSymbolizer),
    Text(TextSymbolizer),
    Raster(RasterSymbolizer),
}

impl Symbolizer {
    /// Key used in [`UnsupportedProperties`], e.g. `"MarkSymbolizer"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Symbolizer::Mark(_) => "MarkSymbolizer",
            Symbolizer::Icon(_) => "IconSymbolizer",
            Symbolizer::Line(_) => "LineSymbolizer",
            Symbolizer::Fill(_) => "FillSymbolizer",
            Symbolizer::Text(_) => "TextSymbolizer",
            Symbolizer::Raster(_) => "RasterSymbolizer",
        }
    }
}

/// A point graphic. Used both as a top-level point symbolizer and nested as
/// the graphic stroke/fill of line and fill symbolizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum GraphicSymbolizer {
    Mark(MarkSymbolizer),
    Icon(IconSymbolizer),
}

impl From<GraphicSymbolizer> for Symbolizer {
    fn from(g: GraphicSymbolizer) -> Self {
        match g {
            GraphicSymbolizer::Mark(m) => Symbolizer::Mark(m),
            GraphicSymbolizer::Icon(i) => Symbolizer::Icon(i),
        }
    }
}

/// Built-in mark shapes, plus font glyphs addressed as `ttf://<font>#<code>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WellKnownName {
    Circle,
    #[default]
    Square,
    Triangle,
    Star,
    Cross,
    X,
    Diamond,
    VertLine,
    HorLine,
    Slash,
    BackSlash,
    Dot,
    Plus,
    Times,
    OpenArrow,
    ClosedArrow,
    Font(String),
}

impl WellKnownName {
    pub fn as_str(&self) -> &str {
        match self {
            WellKnownName::Circle => "circle",
            WellKnownName::Square => "square",
            WellKnownName::Triangle => "triangle",
            WellKnownName::Star => "star",
            WellKnownName::Cross => "cross",
            WellKnownName::X => "x",
            WellKnownName::Diamond => "diamond",
            WellKnownName::VertLine => "shape://vertline",
            WellKnownName::HorLine => "shape://horline",
            WellKnownName::Slash => "shape://slash",
            WellKnownName::BackSlash => "shape://backslash",
            WellKnownName::Dot => "shape://dot",
            WellKnownName::Plus => "shape://plus",
            WellKnownName::Times => "shape://times",
            WellKnownName::OpenArrow => "shape://oarrow",
            WellKnownName::ClosedArrow => "shape://carrow",
            WellKnownName::Font(s) => s,
        }
    }
}

impl FromStr for WellKnownName {
    type Err = SldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.to_ascii_lowercase().as_str() {
            "circle" => WellKnownName::Circle,
            "square" => WellKnownName::Square,
            "triangle" => WellKnownName::Triangle,
            "star" => WellKnownName::Star,
            "cross" => WellKnownName::Cross,
            "x" => WellKnownName::X,
            "diamond" => WellKnownName::Diamond,
            "shape://vertline" => WellKnownName::VertLine,
            "shape://horline" => WellKnownName::HorLine,
            "shape://slash" => WellKnownName::Slash,
            "shape://backslash" => WellKnownName::BackSlash,
            "shape://dot" => WellKnownName::Dot,
            "shape://plus" => WellKnownName::Plus,
            "shape://times" => WellKnownName::Times,
            "shape://oarrow" => WellKnownName::OpenArrow,
            "shape://carrow" => WellKnownName::ClosedArrow,
            _ if is_font_glyph(s) => WellKnownName::Font(s.to_string()),
            _ => {
                return Err(SldError::UnknownWellKnownName {
                    name: s.to_string(),
                });
            }
        };
        Ok(name)
    }
}

/// `ttf://<font name>#<char code>`
fn is_font_glyph(s: &str) -> bool {
    s.strip_prefix("ttf://")
        .and_then(|rest| rest.split_once('#'))
        .is_some_and(|(font, code)| !font.is_empty() && !code.is_empty())
}

impl TryFrom<String> for WellKnownName {
    type Error = SldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WellKnownName> for String {
    fn from(w: WellKnownName) -> Self {
        w.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkSymbolizer {
    pub well_known_name: WellKnownName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<[Expression; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<Vec<Expression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconSymbolizer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<[Expression; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_overlap: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LineSymbolizer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dasharray: Option<Vec<Expression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_offset: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perpendicular_offset: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic_stroke: Option<Box<GraphicSymbolizer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic_fill: Option<Box<GraphicSymbolizer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miter_limit: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillSymbolizer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<Expression>,
    /// Has no SLD counterpart; reported as unsupported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_dasharray: Option<Vec<Expression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_cap: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_join: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphic_fill: Option<Box<GraphicSymbolizer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub antialias: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Center,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// SLD `AnchorPoint` coordinates, (0, 0) being bottom-left.
    pub fn to_point(self) -> (f64, f64) {
        match self {
            Anchor::Center => (0.5, 0.5),
            Anchor::Left => (0.0, 0.5),
            Anchor::Right => (1.0, 0.5),
            Anchor::Top => (0.5, 1.0),
            Anchor::Bottom => (0.5, 0.0),
            Anchor::TopLeft => (0.0, 1.0),
            Anchor::TopRight => (1.0, 1.0),
            Anchor::BottomLeft => (0.0, 0.0),
            Anchor::BottomRight => (1.0, 0.0),
        }
    }

    /// Snap arbitrary anchor coordinates to the closest named anchor.
    pub fn from_point(x: f64, y: f64) -> Self {
        let col = if x < 0.25 { 0 } else if x > 0.75 { 2 } else { 1 };
        let row = if y < 0.25 { 0 } else if y > 0.75 { 2 } else { 1 };
        match (col, row) {
            (0, 0) => Anchor::BottomLeft,
            (1, 0) => Anchor::Bottom,
            (2, 0) => Anchor::BottomRight,
            (0, 1) => Anchor::Left,
            (2, 1) => Anchor::Right,
            (0, 2) => Anchor::TopLeft,
            (1, 2) => Anchor::Top,
            (2, 2) => Anchor::TopRight,
            _ => Anchor::Center,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Point,
    Line,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSymbolizer {
    /// Template such as `"Name: {{name}}"`, or a function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Vec<Expression>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halo_width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halo_color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halo_opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<[Expression; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perpendicular_offset: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_angle: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RasterSymbolizer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_map: Option<ColorMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_selection: Option<ChannelSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_enhancement: Option<ContrastEnhancement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_max: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_min: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue_rotate: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resampling: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturation: Option<Expression>,
}

// ────────────────────────────────────────────────────────────────────────────
// Raster sub-structures
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMapType {
    Ramp,
    Intervals,
    Values,
}

impl ColorMapType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMapType::Ramp => "ramp",
            ColorMapType::Intervals => "intervals",
            ColorMapType::Values => "values",
        }
    }
}

impl FromStr for ColorMapType {
    type Err = SldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ramp" => Ok(ColorMapType::Ramp),
            "intervals" => Ok(ColorMapType::Intervals),
            "values" => Ok(ColorMapType::Values),
            other => Err(SldError::InvalidValue {
                kind: "ColorMap type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorMap {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub map_type: Option<ColorMapType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_map_entries: Option<Vec<ColorMapEntry>>,
}

/// `color` is mandatory in SLD; it is optional here so that an incomplete
/// entry can be represented and rejected when written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorMapEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Expression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhancementType {
    Histogram,
    Normalize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContrastEnhancement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement_type: Option<EnhancementType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma_value: Option<Expression>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Channel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_channel_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_enhancement: Option<ContrastEnhancement>,
}

/// Band-to-channel assignment: three bands (RGB) or a single gray band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelSelection {
    #[serde(rename_all = "camelCase")]
    Rgb {
        red_channel: Channel,
        green_channel: Channel,
        blue_channel: Channel,
    },
    #[serde(rename_all = "camelCase")]
    Gray { gray_channel: Channel },
}

// ────────────────────────────────────────────────────────────────────────────
// Unsupported properties report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    None,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportInfo {
    Level(SupportLevel),
    Detailed { support: SupportLevel, info: String },
}

/// Properties of the written style that the target SLD version cannot
/// express, keyed by symbolizer kind (e.g. `"FillSymbolizer"`) and then by
/// property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedProperties {
    #[serde(rename = "Symbolizer", default)]
    pub symbolizer: IndexMap<String, IndexMap<String, SupportInfo>>,
}

impl UnsupportedProperties {
    pub fn is_empty(&self) -> bool {
        self.symbolizer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_names_parse_case_insensitively() {
        assert_eq!("Circle".parse::<WellKnownName>().unwrap(), WellKnownName::Circle);
        assert_eq!(
            "shape://carrow".parse::<WellKnownName>().unwrap(),
            WellKnownName::ClosedArrow
        );
        assert_eq!(
            "ttf://Webdings#0x68".parse::<WellKnownName>().unwrap(),
            WellKnownName::Font("ttf://Webdings#0x68".into())
        );
        assert!("ttf://Webdings".parse::<WellKnownName>().is_err());
        assert!("hexagon".parse::<WellKnownName>().is_err());
    }

    #[test]
    fn symbolizer_json_carries_kind_tag() {
        let sym = Symbolizer::Mark(MarkSymbolizer {
            well_known_name: WellKnownName::Diamond,
            radius: Some(5.0.into()),
            ..Default::default()
        });
        let json = serde_json::to_value(&sym).unwrap();
        assert_eq!(json["kind"], "Mark");
        assert_eq!(json["wellKnownName"], "diamond");
        assert_eq!(json["radius"], 5.0);
        let back: Symbolizer = serde_json::from_value(json).unwrap();
        assert_eq!(back, sym);
    }

    #[test]
    fn expression_json_is_literal_or_function() {
        let e: Expression =
            serde_json::from_str(r#"{"name":"strToUpperCase","args":[{"name":"property","args":["n"]}]}"#)
                .unwrap();
        assert_eq!(
            e,
            Expression::function("strToUpperCase", vec![Expression::property("n")])
        );
        let lit: Expression = serde_json::from_str("12.5").unwrap();
        assert_eq!(lit, Expression::number(12.5));
    }

    #[test]
    fn anchor_points_snap_to_names() {
        assert_eq!(Anchor::from_point(0.0, 0.0), Anchor::BottomLeft);
        assert_eq!(Anchor::from_point(0.5, 0.5), Anchor::Center);
        assert_eq!(Anchor::from_point(0.9, 1.0), Anchor::TopRight);
        for a in [Anchor::Top, Anchor::Left, Anchor::BottomRight] {
            let (x, y) = a.to_point();
            assert_eq!(Anchor::from_point(x, y), a);
        }
    }
}
