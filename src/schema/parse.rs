use crate::foundation::value::{Value, parse_number_prefix};
use crate::schema::model::{PropertyDescriptor, PropertyKind, RangeBounds, Schema, Target};
use crate::svg::tree::{NodeId, SvgDocument};

/// Element holding the property declarations. Never rendered.
pub const CONFIG_ELEMENT: &str = "config";
/// Property declaration element inside [`CONFIG_ELEMENT`].
pub const PROPERTY_ELEMENT: &str = "property";
/// Separator of the `options` attribute of select properties.
pub const OPTIONS_DELIMITER: char = '|';

/// Parse the embedded configuration block of a frame document.
///
/// A missing config element yields an empty schema. Declarations without a `name` are dropped.
/// The document is not modified.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse_schema(doc: &SvgDocument) -> Schema {
    let mut schema = Schema::default();

    let Some(config) = doc.find_first_by_name(CONFIG_ELEMENT) else {
        tracing::warn!("no <{CONFIG_ELEMENT}> element found in frame");
        return schema;
    };

    for id in doc.descendants_of(config) {
        if doc.name(id) != Some(PROPERTY_ELEMENT) {
            continue;
        }
        if let Some(descriptor) = parse_property(doc, id) {
            schema.insert(descriptor);
        }
    }

    tracing::debug!(properties = schema.len(), "parsed frame schema");
    schema
}

fn parse_property(doc: &SvgDocument, id: NodeId) -> Option<PropertyDescriptor> {
    // Empty attributes count as absent.
    let attr = |name: &str| doc.attribute(id, name).filter(|v| !v.is_empty());

    let name = attr("name")?.to_owned();
    let kind = PropertyKind::parse(attr("type").unwrap_or_default());
    let raw_default = attr("default").unwrap_or_default();

    let default_value = match kind {
        PropertyKind::Range => Value::Number(parse_number_prefix(raw_default).unwrap_or(0.0)),
        _ => Value::Text(raw_default.to_owned()),
    };

    let range = (kind == PropertyKind::Range).then(|| {
        let fallback = RangeBounds::default();
        RangeBounds {
            min: number_or(attr("min"), fallback.min),
            max: number_or(attr("max"), fallback.max),
            step: number_or(attr("step"), fallback.step),
        }
    });

    let options = match (&kind, attr("options")) {
        (PropertyKind::Select, Some(raw)) => raw
            .split(OPTIONS_DELIMITER)
            .map(|s| s.trim().to_owned())
            .collect(),
        _ => Vec::new(),
    };

    let palette = match kind {
        PropertyKind::Color => attr("palette").map(str::to_owned),
        _ => None,
    };

    Some(PropertyDescriptor {
        label: attr("label").unwrap_or(name.as_str()).to_owned(),
        target: Target::parse(attr("target").unwrap_or_default()),
        attribute: attr("attr").map(str::to_owned),
        unit: attr("unit").unwrap_or_default().to_owned(),
        name,
        kind,
        default_value,
        range,
        options,
        palette,
    })
}

/// Zero, NaN and unparseable values fall back, like a falsy `parseFloat` result.
fn number_or(raw: Option<&str>, fallback: f64) -> f64 {
    raw.and_then(parse_number_prefix)
        .filter(|v| *v != 0.0 && !v.is_nan())
        .unwrap_or(fallback)
}
