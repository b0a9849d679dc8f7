use std::cell::RefCell;
use std::rc::Rc;

use super::generate::{UiCatalog, generate_ui, sync_ui};
use super::panel::{Control, ControlPanel};
use crate::catalog::fonts::FontCatalog;
use crate::catalog::palettes::Palettes;
use crate::foundation::value::Value;
use crate::schema::model::Schema;
use crate::schema::parse::parse_schema;
use crate::state::store::StateStore;
use crate::svg::tree::SvgDocument;

fn schema_of(config: &str) -> Schema {
    let markup = format!("<svg>{config}</svg>");
    parse_schema(&SvgDocument::parse(&markup).unwrap())
}

fn build(schema: &Schema, state: &StateStore) -> ControlPanel {
    let palettes = Palettes::builtin();
    let fonts = FontCatalog::builtin();
    let mut panel = ControlPanel::new();
    generate_ui(
        schema,
        state,
        &mut panel,
        UiCatalog {
            palettes: &palettes,
            fonts: &fonts,
        },
    );
    panel
}

const MIXED: &str = r##"<config>
    <property name="zeta" label="Zeta text" default="hi"/>
    <property name="alpha" type="color" default="#467031"/>
    <property name="mid" type="range" min="0" max="360" step="1" default="0" unit="deg"/>
    <property name="shape" type="select" options="round|square" default="square"/>
    <property name="weird" type="sparkles"/>
    <property name="fontFamily" type="select" default="Lato, sans-serif"/>
</config>"##;

#[test]
fn controls_follow_declaration_order_and_skip_unknown_kinds() {
    let schema = schema_of(MIXED);
    let panel = build(&schema, &StateStore::default());

    let order: Vec<_> = panel.groups().iter().map(|g| g.property.as_str()).collect();
    assert_eq!(order, ["zeta", "alpha", "mid", "shape", "fontFamily"]);
    assert_eq!(panel.group("zeta").unwrap().label, "Zeta text");
    assert_eq!(panel.group("alpha").unwrap().label, "alpha");
    assert_eq!(panel.group("mid").unwrap().control_id, "control-mid");
}

#[test]
fn controls_start_from_state_or_default() {
    let schema = schema_of(MIXED);
    let state = StateStore::new([("zeta", "from state")]);
    let panel = build(&schema, &state);

    let Control::Text(text) = &panel.group("zeta").unwrap().control else {
        panic!("expected text input");
    };
    assert_eq!(text.value, "from state");
    assert_eq!(text.placeholder, "Zeta text");

    let Control::Color(palette) = &panel.group("alpha").unwrap().control else {
        panic!("expected palette");
    };
    assert_eq!(palette.swatches[palette.selected.unwrap()], "#467031");

    let Control::Range(slider) = &panel.group("mid").unwrap().control else {
        panic!("expected slider");
    };
    assert_eq!((slider.min, slider.max, slider.step), (0.0, 360.0, 1.0));
    assert_eq!(slider.readout, "0deg");

    let Control::Select(select) = &panel.group("shape").unwrap().control else {
        panic!("expected select");
    };
    assert_eq!(select.options[select.selected.unwrap()].value, "square");
}

#[test]
fn font_family_select_offers_catalog_families() {
    let schema = schema_of(MIXED);
    let panel = build(&schema, &StateStore::default());
    let Control::Select(select) = &panel.group("fontFamily").unwrap().control else {
        panic!("expected select");
    };
    assert_eq!(select.options.len(), FontCatalog::builtin().families.len());
    let chosen = &select.options[select.selected.unwrap()];
    assert_eq!(chosen.value, "Lato, sans-serif");
    assert_eq!(chosen.label, "Lato");
}

#[test]
fn select_without_options_offers_its_default() {
    let schema = schema_of(r#"<config><property name="s" type="select" default="only"/></config>"#);
    let panel = build(&schema, &StateStore::default());
    let Control::Select(select) = &panel.group("s").unwrap().control else {
        panic!("expected select");
    };
    assert_eq!(select.options.len(), 1);
    assert_eq!(select.selected, Some(0));
}

#[test]
fn user_input_writes_state_and_notifies() {
    let schema = schema_of(MIXED);
    let state = StateStore::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let _sub = state.subscribe(schema.names().map(str::to_owned).collect::<Vec<_>>(), move |name, v, _| {
        log.borrow_mut().push(format!("{name}={v}"));
    });
    let mut panel = build(&schema, &state);

    panel.input_text("zeta", "typed").unwrap();
    panel.choose_swatch("alpha", 0).unwrap();
    panel.input_range("mid", "90").unwrap();
    panel.choose_option("shape", "round").unwrap();

    assert_eq!(state.get("zeta"), Some(Value::from("typed")));
    assert_eq!(state.get("alpha"), Some(Value::from("#79389F")));
    assert_eq!(state.get("mid"), Some(Value::Number(90.0)));
    assert_eq!(state.get("shape"), Some(Value::from("round")));
    assert_eq!(seen.borrow().len(), 4);

    let Control::Range(slider) = &panel.group("mid").unwrap().control else {
        panic!("expected slider");
    };
    assert_eq!(slider.readout, "90deg");
}

#[test]
fn range_input_clamps_and_ignores_garbage() {
    let schema = schema_of(MIXED);
    let state = StateStore::default();
    let mut panel = build(&schema, &state);

    panel.input_range("mid", "400").unwrap();
    assert_eq!(state.get("mid"), Some(Value::Number(360.0)));

    panel.input_range("mid", "abc").unwrap();
    assert_eq!(state.get("mid"), Some(Value::Number(360.0)));
}

#[test]
fn mismatched_or_missing_controls_are_errors() {
    let schema = schema_of(MIXED);
    let mut panel = build(&schema, &StateStore::default());

    assert!(panel.input_text("mid", "x").is_err());
    assert!(panel.input_range("nope", "1").is_err());
    assert!(panel.choose_swatch("alpha", 999).is_err());
    assert!(panel.choose_option("shape", "hexagon").is_err());
    assert!(ControlPanel::new().input_text("zeta", "x").is_err());
}

#[test]
fn submit_routes_by_control_kind() {
    let schema = schema_of(MIXED);
    let state = StateStore::default();
    let mut panel = build(&schema, &state);

    panel.submit("alpha", "#ffffff").unwrap();
    panel.submit("mid", "12.5").unwrap();
    panel.submit("zeta", "hello").unwrap();

    assert_eq!(state.get("alpha"), Some(Value::from("#FFFFFF")));
    assert_eq!(state.get("mid"), Some(Value::Number(12.5)));
    assert_eq!(state.get("zeta"), Some(Value::from("hello")));
    assert!(panel.submit("alpha", "#123456").is_err());
}

#[test]
fn sync_pushes_programmatic_state_into_controls() {
    let schema = schema_of(MIXED);
    let state = StateStore::default();
    let mut panel = build(&schema, &state);

    state.seed([
        ("zeta", Value::from("seeded")),
        ("alpha", Value::from("black")),
        ("mid", Value::Number(180.0)),
        ("shape", Value::from("round")),
    ]);
    sync_ui(&schema, &state, &mut panel);

    let groups = panel.groups();
    assert!(matches!(&groups[0].control, Control::Text(t) if t.value == "seeded"));
    assert!(matches!(&groups[1].control, Control::Color(p) if p.swatches[p.selected.unwrap()] == "black"));
    assert!(matches!(&groups[2].control, Control::Range(s) if s.value == 180.0 && s.readout == "180deg"));
    assert!(matches!(&groups[3].control, Control::Select(s) if s.selected == Some(0)));
}

#[test]
fn empty_schema_renders_no_controls() {
    let panel = build(&Schema::default(), &StateStore::default());
    assert!(panel.is_empty());
}
