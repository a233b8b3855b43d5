use camino::Utf8PathBuf;
use sldstyle::model::*;
use sldstyle::{ParserConfig, SldStyleParser, SldVersion};

fn data(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn simple_diamond() -> Style {
    Style {
        name: "Simple Diamond".into(),
        rules: vec![Rule {
            name: "Small populated New Yorks".into(),
            symbolizers: vec![Symbolizer::Mark(MarkSymbolizer {
                well_known_name: WellKnownName::Diamond,
                color: Some(Expression::string("#FF0000")),
                radius: Some(Expression::number(5.0)),
                stroke_color: Some(Expression::string("#000000")),
                stroke_width: Some(Expression::number(2.0)),
                opacity: Some(Expression::number(1.0)),
                rotate: Some(Expression::number(45.0)),
                ..Default::default()
            })],
            ..Default::default()
        }],
    }
}

fn graphic_stroke_line() -> Style {
    Style {
        name: "Simple Line".into(),
        rules: vec![Rule {
            name: String::new(),
            symbolizers: vec![Symbolizer::Line(LineSymbolizer {
                graphic_stroke: Some(Box::new(GraphicSymbolizer::Mark(MarkSymbolizer {
                    well_known_name: WellKnownName::Circle,
                    color: Some(Expression::string("#FF0000")),
                    radius: Some(Expression::number(8.0)),
                    stroke_color: Some(Expression::string("#FFFFFF")),
                    stroke_width: Some(Expression::number(3.0)),
                    ..Default::default()
                }))),
                ..Default::default()
            })],
            ..Default::default()
        }],
    }
}

#[test]
fn reads_simple_diamond() {
    let parser = SldStyleParser::default();
    let result = parser
        .read_style_file(&data("point_simplediamond.sld"))
        .expect("read fixture");
    assert_eq!(result.output, simple_diamond());
    assert!(result.warnings.is_empty());
}

#[test]
fn reads_graphic_stroke_in_1_1_0() {
    let parser = SldStyleParser::default();
    let result = parser
        .read_style_file(&data("line_graphicStroke_2.sld"))
        .expect("read fixture");
    assert_eq!(result.output, graphic_stroke_line());
}

#[test]
fn simple_diamond_round_trips_in_both_versions() {
    for version in [SldVersion::V1_0_0, SldVersion::V1_1_0] {
        let parser = SldStyleParser::new(ParserConfig {
            sld_version: version,
            ..Default::default()
        });
        let written = parser.write_style(&simple_diamond()).expect("write");
        assert!(written.unsupported_properties.is_none());
        let read = parser.read_style(&written.output).expect("read back");
        assert_eq!(read.output, simple_diamond(), "SLD {}", version);
    }
}

#[test]
fn graphic_stroke_round_trips() {
    let parser = SldStyleParser::default();
    let written = parser.write_style(&graphic_stroke_line()).unwrap();
    assert!(written.output.contains("<GraphicStroke>"));
    assert!(written.output.contains("<Size>16</Size>"));
    let read = parser.read_style(&written.output).unwrap();
    assert_eq!(read.output, graphic_stroke_line());
}

#[test]
fn missing_file_is_an_io_error() {
    let parser = SldStyleParser::default();
    let err = parser.read_style_file(&data("does_not_exist.sld")).unwrap_err();
    assert!(matches!(err, sldstyle::SldError::Io { .. }));
}

#[test]
fn reads_from_temporary_file() -> anyhow::Result<()> {
    let parser = SldStyleParser::default();
    let written = parser.write_style(&simple_diamond())?;
    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), &written.output)?;
    let path = Utf8PathBuf::try_from(file.path().to_path_buf())?;
    assert_eq!(parser.read_style_file(&path)?.output, simple_diamond());
    Ok(())
}
