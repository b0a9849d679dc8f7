use crate::catalog::fonts::{FontCatalog, primary_family};
use crate::catalog::palettes::Palettes;
use crate::foundation::value::Value;
use crate::schema::apply::FONT_FAMILY_KEY;
use crate::schema::model::{PropertyDescriptor, PropertyKind, Schema};
use crate::state::store::StateStore;
use crate::ui::panel::{
    ColorPalette, Control, ControlGroup, ControlPanel, RangeSlider, SelectInput, SelectOption,
    TextInput,
};

/// Option sources the generator needs besides the schema.
#[derive(Debug, Clone, Copy)]
pub struct UiCatalog<'a> {
    /// Named palettes for color controls.
    pub palettes: &'a Palettes,
    /// Font families for the `fontFamily` select.
    pub fonts: &'a FontCatalog,
}

/// Rebuild `panel` from `schema`, one labeled control per property in declaration order.
///
/// Controls start at `state[name]` (or the default) and write back to `state` on user input.
/// Properties of an unknown kind get no control.
#[tracing::instrument(level = "debug", skip_all, fields(properties = schema.len()))]
pub fn generate_ui(schema: &Schema, state: &StateStore, panel: &mut ControlPanel, catalog: UiCatalog<'_>) {
    panel.clear();
    panel.bind(state);

    for prop in schema.iter() {
        let current = current_value(prop, state);
        let control = match &prop.kind {
            PropertyKind::Text => Control::Text(TextInput {
                value: current.to_string(),
                placeholder: prop.label.clone(),
            }),
            PropertyKind::Color => {
                let swatches = catalog.palettes.resolve(prop.palette.as_deref()).to_vec();
                let selected = swatch_index(&swatches, &current);
                Control::Color(ColorPalette { swatches, selected })
            }
            PropertyKind::Range => {
                let bounds = prop.range.unwrap_or_default();
                let mut slider = RangeSlider {
                    min: bounds.min,
                    max: bounds.max,
                    step: bounds.step,
                    value: bounds.min,
                    unit: prop.unit.clone(),
                    readout: String::new(),
                };
                slider.show(current.as_number().unwrap_or(bounds.min));
                Control::Range(slider)
            }
            PropertyKind::Select => {
                let options: Vec<SelectOption> = select_values(prop, catalog.fonts)
                    .into_iter()
                    .map(|value| SelectOption {
                        label: primary_family(&value).to_owned(),
                        value,
                    })
                    .collect();
                let selected = option_index(&options, &current);
                Control::Select(SelectInput { options, selected })
            }
            PropertyKind::Unknown(kind) => {
                tracing::warn!(property = %prop.name, kind = %kind, "unknown property type, no control built");
                continue;
            }
        };

        panel.groups.push(ControlGroup {
            property: prop.name.clone(),
            label: prop.label.clone(),
            control_id: format!("control-{}", prop.name),
            control,
        });
    }
}

/// Push current state into the existing controls without rebuilding them.
pub fn sync_ui(schema: &Schema, state: &StateStore, panel: &mut ControlPanel) {
    for prop in schema.iter() {
        let current = current_value(prop, state);
        let Some(group) = panel.group_mut(&prop.name) else {
            continue;
        };
        match &mut group.control {
            Control::Text(input) => input.value = current.to_string(),
            Control::Color(palette) => {
                palette.selected = swatch_index(&palette.swatches, &current);
            }
            Control::Range(slider) => {
                if let Some(v) = current.as_number() {
                    slider.show(v);
                }
            }
            Control::Select(select) => {
                select.selected = option_index(&select.options, &current);
            }
        }
    }
}

fn current_value(prop: &PropertyDescriptor, state: &StateStore) -> Value {
    state
        .get(&prop.name)
        .unwrap_or_else(|| prop.default_value.clone())
}

fn select_values(prop: &PropertyDescriptor, fonts: &FontCatalog) -> Vec<String> {
    if prop.name == FONT_FAMILY_KEY {
        return fonts.families.clone();
    }
    if !prop.options.is_empty() {
        return prop.options.clone();
    }
    vec![prop.default_value.to_string()]
}

fn swatch_index(swatches: &[String], current: &Value) -> Option<usize> {
    let current = current.to_string();
    swatches.iter().position(|c| *c == current)
}

fn option_index(options: &[SelectOption], current: &Value) -> Option<usize> {
    let current = current.to_string();
    options.iter().position(|o| o.value == current)
}
