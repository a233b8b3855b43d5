use sldstyle::generator::{LabelToken, tokenize_label};
use sldstyle::model::*;
use sldstyle::{ParserConfig, SldStyleParser, SldVersion};

fn sld_with_label(label: &str) -> String {
    format!(
        r#"<StyledLayerDescriptor version="1.0.0" xmlns="http://www.opengis.net/sld" xmlns:ogc="http://www.opengis.net/ogc">
  <NamedLayer><Name>labels</Name><UserStyle><FeatureTypeStyle><Rule>
    <TextSymbolizer>
      <Label>{}</Label>
    </TextSymbolizer>
  </Rule></FeatureTypeStyle></UserStyle></NamedLayer>
</StyledLayerDescriptor>"#,
        label
    )
}

fn read_label(label: &str) -> Option<Expression> {
    let style = SldStyleParser::default()
        .read_style(&sld_with_label(label))
        .unwrap()
        .output;
    match &style.rules[0].symbolizers[0] {
        Symbolizer::Text(t) => t.label.clone(),
        other => panic!("expected a text symbolizer, got {:?}", other),
    }
}

fn text_style(text: TextSymbolizer) -> Style {
    Style {
        name: "labels".into(),
        rules: vec![Rule {
            name: "r".into(),
            symbolizers: vec![Symbolizer::Text(text)],
            ..Default::default()
        }],
    }
}

#[test]
fn literal_then_property() {
    assert_eq!(
        read_label("<ogc:Literal>foo</ogc:Literal><ogc:PropertyName>bar</ogc:PropertyName>"),
        Some(Expression::string("foo{{bar}}"))
    );
}

#[test]
fn interleaved_order_is_kept() {
    assert_eq!(
        read_label(
            "<ogc:PropertyName>bar</ogc:PropertyName><ogc:PropertyName>john</ogc:PropertyName><ogc:Literal>foo</ogc:Literal><ogc:PropertyName>doe</ogc:PropertyName>"
        ),
        Some(Expression::string("{{bar}}{{john}}foo{{doe}}"))
    );
}

#[test]
fn raw_text_counts_as_literal() {
    assert_eq!(
        read_label("Name: <ogc:PropertyName>name</ogc:PropertyName>"),
        Some(Expression::string("Name: {{name}}"))
    );
}

#[test]
fn functions_mixed_with_text_keep_every_part() {
    let expected = Expression::function(
        "Concatenate",
        vec![
            Expression::string("Name: "),
            Expression::function("strToUpperCase", vec![Expression::property("name")]),
            Expression::string(" ("),
            Expression::property("kind"),
            Expression::string(")"),
        ],
    );
    let label = read_label(
        "Name: <ogc:Function name=\"strToUpperCase\"><ogc:PropertyName>name</ogc:PropertyName></ogc:Function><ogc:Literal> (</ogc:Literal><ogc:PropertyName>kind</ogc:PropertyName><ogc:Literal>)</ogc:Literal>",
    );
    assert_eq!(label, Some(expected.clone()));

    let parser = SldStyleParser::default();
    let style = text_style(TextSymbolizer {
        label: Some(expected),
        ..Default::default()
    });
    let written = parser.write_style(&style).unwrap();
    assert_eq!(parser.read_style(&written.output).unwrap().output, style);
}

#[test]
fn templates_tokenize_back_in_order() {
    assert_eq!(
        tokenize_label("foo{{bar}}"),
        vec![
            LabelToken::Literal("foo".into()),
            LabelToken::Property("bar".into())
        ]
    );
}

#[test]
fn labels_round_trip() {
    let parser = SldStyleParser::default();
    for template in ["foo{{bar}}", "{{bar}}{{john}}foo{{doe}}", "  spaced  {{x}} out "] {
        let style = text_style(TextSymbolizer {
            label: Some(Expression::string(template)),
            ..Default::default()
        });
        let written = parser.write_style(&style).unwrap();
        let read = parser.read_style(&written.output).unwrap();
        assert_eq!(read.output, style, "template {:?}", template);
    }
}

#[test]
fn function_labels_round_trip() {
    let parser = SldStyleParser::default();
    let style = text_style(TextSymbolizer {
        label: Some(Expression::function(
            "strToUpperCase",
            vec![Expression::property("name")],
        )),
        ..Default::default()
    });
    let written = parser.write_style(&style).unwrap();
    let read = parser.read_style(&written.output).unwrap();
    assert_eq!(read.output, style);
}

#[test]
fn full_text_symbolizer_round_trips() {
    for version in [SldVersion::V1_0_0, SldVersion::V1_1_0] {
        let parser = SldStyleParser::new(ParserConfig {
            sld_version: version,
            ..Default::default()
        });
        let style = text_style(TextSymbolizer {
            label: Some(Expression::string("{{name}}")),
            font: Some(vec![Expression::string("Arial"), Expression::string("sans-serif")]),
            font_style: Some(Expression::string("italic")),
            font_weight: Some(Expression::string("bold")),
            size: Some(Expression::number(12.0)),
            color: Some(Expression::string("#333333")),
            opacity: Some(Expression::number(0.8)),
            halo_width: Some(Expression::number(2.0)),
            halo_color: Some(Expression::string("#FFFFFF")),
            halo_opacity: Some(Expression::number(0.5)),
            placement: Some(Placement::Point),
            anchor: Some(Anchor::BottomLeft),
            offset: Some([Expression::number(5.0), Expression::number(-2.0)]),
            rotate: Some(Expression::number(30.0)),
            ..Default::default()
        });
        let written = parser.write_style(&style).unwrap();
        let read = parser.read_style(&written.output).unwrap();
        assert_eq!(read.output, style, "SLD {}", version);
    }
}

#[test]
fn line_placement_round_trips() {
    let parser = SldStyleParser::default();
    let style = text_style(TextSymbolizer {
        label: Some(Expression::string("{{street}}")),
        placement: Some(Placement::Line),
        perpendicular_offset: Some(Expression::number(4.0)),
        ..Default::default()
    });
    let written = parser.write_style(&style).unwrap();
    assert!(written.output.contains("<LinePlacement>"));
    let read = parser.read_style(&written.output).unwrap();
    assert_eq!(read.output, style);
}
