use crate::catalog::fonts::FontCatalog;
use crate::foundation::value::{TextStyles, Value};
use crate::schema::model::{PropertyDescriptor, PropertyKind, Schema, Target};
use crate::schema::parse::CONFIG_ELEMENT;
use crate::state::store::StateStore;
use crate::svg::selector::Selector;
use crate::svg::tree::{NodeId, SvgDocument};

/// Marker attribute of the generated style block.
pub const STYLE_BLOCK_MARKER: &str = "data-fm-config";
/// State key whose value selects the imported font family.
pub const FONT_FAMILY_KEY: &str = "fontFamily";

/// Write the current state into `doc` according to `schema`.
///
/// Each property's value is `state[name]`, falling back to its default. Style-variable targets
/// are coalesced into one marked `<style>` block at the start of the root element; element
/// targets get their text or attribute set. A missing element is logged and skipped. The
/// config element is removed afterwards.
///
/// Applying again with unchanged state leaves the serialized document unchanged.
#[tracing::instrument(level = "debug", skip_all, fields(properties = schema.len()))]
pub fn apply_schema(doc: &mut SvgDocument, schema: &Schema, state: &StateStore, fonts: &FontCatalog) {
    let mut css_vars = Vec::new();

    for prop in schema.iter() {
        let value = state
            .get(&prop.name)
            .unwrap_or_else(|| prop.default_value.clone());

        match &prop.target {
            Target::StyleVar(var) => {
                css_vars.push(format!("{var}: {};", prop.with_unit(&value)));
            }
            Target::Element(selector) => apply_to_element(doc, prop, selector, &value, state),
            Target::Unsupported(raw) => {
                tracing::debug!(property = %prop.name, target = %raw, "unsupported target ignored");
            }
        }
    }

    if !css_vars.is_empty() {
        let import = selected_font_family(schema, state)
            .and_then(|family| fonts.import_url(&family).map(str::to_owned));
        write_style_block(doc, import.as_deref(), &css_vars);
    }

    if let Some(config) = doc.find_first_by_name(CONFIG_ELEMENT) {
        doc.remove(config);
    }
}

fn apply_to_element(
    doc: &mut SvgDocument,
    prop: &PropertyDescriptor,
    selector: &Selector,
    value: &Value,
    state: &StateStore,
) {
    let Some(el) = doc.query(selector) else {
        tracing::warn!(property = %prop.name, target = %selector, "element not found");
        return;
    };

    if prop.writes_text_content() {
        doc.set_text_content(el, &value.to_string());
        if prop.kind == PropertyKind::Text
            && let Some(styles) = state.get(&prop.styles_key()).and_then(|v| v.as_styles())
        {
            apply_text_styles(doc, el, styles);
        }
    } else if let Some(attr) = &prop.attribute {
        doc.set_attribute(el, attr, &prop.with_unit(value));
    }
}

fn apply_text_styles(doc: &mut SvgDocument, el: NodeId, styles: TextStyles) {
    if styles.uppercase {
        let upper = doc.text_content(el).to_uppercase();
        doc.set_text_content(el, &upper);
    }
    let weight = if styles.bold { "bold" } else { "normal" };
    let style = if styles.italic { "italic" } else { "normal" };
    doc.set_style_property(el, "font-weight", weight);
    doc.set_style_property(el, "font-style", style);
}

fn selected_font_family(schema: &Schema, state: &StateStore) -> Option<String> {
    let from_state = state
        .get(FONT_FAMILY_KEY)
        .map(|v| v.to_string())
        .filter(|s| !s.is_empty());
    from_state.or_else(|| {
        schema
            .get(FONT_FAMILY_KEY)
            .map(|p| p.default_value.to_string())
            .filter(|s| !s.is_empty())
    })
}

fn write_style_block(doc: &mut SvgDocument, import: Option<&str>, css_vars: &[String]) {
    let marker = Selector::TagWithAttr {
        tag: "style".to_owned(),
        attr: STYLE_BLOCK_MARKER.to_owned(),
    };

    let style = match doc.query(&marker) {
        Some(existing) => existing,
        None => {
            let created = doc.create_element("style");
            doc.set_attribute(created, STYLE_BLOCK_MARKER, "");
            let root = doc.root();
            doc.prepend_child(root, created);
            created
        }
    };

    let mut css = String::new();
    if let Some(url) = import {
        css.push_str(&format!("@import url('{url}');\n"));
    }
    css.push_str(":root {\n");
    for line in css_vars {
        css.push_str("  ");
        css.push_str(line);
        css.push('\n');
    }
    css.push('}');

    doc.set_text_content(style, &css);
}
