use super::apply::apply_schema;
use super::model::Schema;
use super::parse::parse_schema;
use crate::catalog::fonts::FontCatalog;
use crate::foundation::value::{TextStyles, Value};
use crate::state::store::StateStore;
use crate::svg::selector::Selector;
use crate::svg::tree::SvgDocument;

const FRAME: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <config>
    <property name="frameColor" type="color" target="#frame-path" attr="fill" default="#79389F"/>
    <property name="missing" type="color" target="#no-such-node" attr="fill" default="red"/>
    <property name="frameRotation" type="range" target="--frame-rotation" min="0" max="360" default="0" unit="deg"/>
    <property name="textRotation" type="range" target="#frame-text" attr="rotate" default="0" unit="deg"/>
    <property name="frame-text" target="#frame-text" attr="textContent" default="#Hiring"/>
    <property name="fontFamily" type="select" target="--font-family" default="Inter, sans-serif"/>
  </config>
  <path id="frame-path" fill="#000"/>
  <text id="frame-text">placeholder</text>
</svg>"##;

fn load() -> (SvgDocument, Schema) {
    let doc = SvgDocument::parse(FRAME).unwrap();
    let schema = parse_schema(&doc);
    (doc, schema)
}

fn element_attr(doc: &SvgDocument, id: &str, attr: &str) -> Option<String> {
    let el = doc.query(&Selector::Id(id.into()))?;
    doc.attribute(el, attr).map(str::to_owned)
}

fn element_text(doc: &SvgDocument, id: &str) -> String {
    let el = doc.query(&Selector::Id(id.into())).unwrap();
    doc.text_content(el)
}

#[test]
fn defaults_apply_when_state_is_empty() {
    let (mut doc, schema) = load();
    let state = StateStore::default();
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    assert_eq!(element_attr(&doc, "frame-path", "fill").as_deref(), Some("#79389F"));
    assert_eq!(element_text(&doc, "frame-text"), "#Hiring");
    assert_eq!(element_attr(&doc, "frame-text", "rotate").as_deref(), Some("0deg"));
}

#[test]
fn missing_target_does_not_block_other_properties() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("frameColor", "#467031"), ("frame-text", "Open")]);
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    assert_eq!(element_attr(&doc, "frame-path", "fill").as_deref(), Some("#467031"));
    assert_eq!(element_text(&doc, "frame-text"), "Open");
}

#[test]
fn unit_suffix_lands_in_attributes_and_style_vars() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("frameRotation", 45.0), ("textRotation", 45.0)]);
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    assert_eq!(element_attr(&doc, "frame-text", "rotate").as_deref(), Some("45deg"));
    assert!(doc.to_markup().contains("--frame-rotation: 45deg;"));
}

#[test]
fn style_block_is_first_child_and_imports_only_selected_font() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("fontFamily", "Lato, sans-serif")]);
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    let root = doc.root();
    let first = doc.node(root).children[0];
    assert_eq!(doc.name(first), Some("style"));
    assert_eq!(doc.attribute(first, "data-fm-config"), Some(""));

    let css = doc.text_content(first);
    assert!(css.contains("family=Lato"));
    assert!(!css.contains("family=Inter"));
    assert!(css.contains("--font-family: Lato, sans-serif;"));
    assert!(css.starts_with("@import url('"));
}

#[test]
fn unknown_font_family_emits_no_import() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("fontFamily", "Georgia, serif")]);
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());
    assert!(!doc.to_markup().contains("@import"));
}

#[test]
fn config_element_is_removed() {
    let (mut doc, schema) = load();
    apply_schema(&mut doc, &schema, &StateStore::default(), &FontCatalog::builtin());
    assert!(doc.find_first_by_name("config").is_none());
    assert!(!doc.to_markup().contains("<property"));
}

#[test]
fn reapplying_unchanged_state_is_byte_identical() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("frameRotation", 90.0)]);
    state.set(
        "frame-textStyles",
        TextStyles {
            bold: true,
            italic: true,
            uppercase: true,
        },
    );
    let fonts = FontCatalog::builtin();

    apply_schema(&mut doc, &schema, &state, &fonts);
    let first = doc.to_markup();
    apply_schema(&mut doc, &schema, &state, &fonts);
    let second = doc.to_markup();

    assert_eq!(first, second);
    assert_eq!(second.matches("data-fm-config").count(), 1);
}

#[test]
fn text_styles_companion_uppercases_and_bolds() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("frame-text", "open to work")]);
    state.set(
        "frame-textStyles",
        TextStyles {
            bold: true,
            uppercase: true,
            ..TextStyles::default()
        },
    );
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    let el = doc.query(&Selector::Id("frame-text".into())).unwrap();
    assert_eq!(doc.text_content(el), "OPEN TO WORK");
    assert_eq!(doc.style_property(el, "font-weight").as_deref(), Some("bold"));
    assert_eq!(doc.style_property(el, "font-style").as_deref(), Some("normal"));
}

#[test]
fn italic_flag_sets_font_style() {
    let (mut doc, schema) = load();
    let state = StateStore::default();
    state.set(
        "frame-textStyles",
        TextStyles {
            italic: true,
            ..TextStyles::default()
        },
    );
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    let el = doc.query(&Selector::Id("frame-text".into())).unwrap();
    assert_eq!(doc.style_property(el, "font-style").as_deref(), Some("italic"));
    assert_eq!(doc.style_property(el, "font-weight").as_deref(), Some("normal"));
    assert_eq!(doc.text_content(el), "#Hiring");
}

#[test]
fn text_styles_require_structured_companion() {
    let (mut doc, schema) = load();
    let state = StateStore::new([("frame-textStyles", Value::from("bold"))]);
    apply_schema(&mut doc, &schema, &state, &FontCatalog::builtin());

    let el = doc.query(&Selector::Id("frame-text".into())).unwrap();
    assert_eq!(doc.style_property(el, "font-weight"), None);
}

#[test]
fn empty_schema_only_removes_config() {
    let markup = r#"<svg><config/><rect id="r"/></svg>"#;
    let mut doc = SvgDocument::parse(markup).unwrap();
    let schema = parse_schema(&doc);
    assert!(schema.is_empty());

    apply_schema(&mut doc, &schema, &StateStore::default(), &FontCatalog::builtin());
    assert_eq!(doc.to_markup(), r#"<svg><rect id="r"/></svg>"#);

    let mut bare = SvgDocument::parse(r#"<svg><rect/></svg>"#).unwrap();
    apply_schema(&mut bare, &Schema::default(), &StateStore::default(), &FontCatalog::builtin());
    assert_eq!(bare.to_markup(), r#"<svg><rect/></svg>"#);
}
