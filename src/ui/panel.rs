use crate::foundation::error::{FrameError, FrameResult};
use crate::foundation::value::{Value, parse_number_prefix};
use crate::state::store::StateStore;

/// Single-line text input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    /// Current text.
    pub value: String,
    /// Placeholder (the property label).
    pub placeholder: String,
}

/// Mutually exclusive color swatches.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    /// Swatch colors in palette order.
    pub swatches: Vec<String>,
    /// Index of the selected swatch; `None` when the current color is not in the palette.
    pub selected: Option<usize>,
}

/// Numeric slider with a `"<value><unit>"` readout.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Step.
    pub step: f64,
    /// Current value, within bounds.
    pub value: f64,
    /// Unit suffix of the readout.
    pub unit: String,
    /// Readout text shown next to the slider.
    pub readout: String,
}

impl RangeSlider {
    pub(crate) fn clamp(&self, v: f64) -> f64 {
        if self.min <= self.max {
            v.clamp(self.min, self.max)
        } else {
            v
        }
    }

    pub(crate) fn show(&mut self, v: f64) {
        self.value = self.clamp(v);
        self.readout = format!("{}{}", Value::Number(self.value), self.unit);
    }
}

/// One option of a [`SelectInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    /// Value written to state.
    pub value: String,
    /// Display text.
    pub label: String,
}

/// Drop-down.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectInput {
    /// Options in display order.
    pub options: Vec<SelectOption>,
    /// Index of the selected option; `None` when the current value is not offered.
    pub selected: Option<usize>,
}

/// Editable control of one property.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Text input.
    Text(TextInput),
    /// Color palette.
    Color(ColorPalette),
    /// Range slider.
    Range(RangeSlider),
    /// Drop-down.
    Select(SelectInput),
}

impl Control {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Color(_) => "color",
            Self::Range(_) => "range",
            Self::Select(_) => "select",
        }
    }
}

/// A labeled control bound to one state key.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlGroup {
    /// Property (and state key) the control edits.
    pub property: String,
    /// Label text.
    pub label: String,
    /// Stable control id, `control-<property>`.
    pub control_id: String,
    /// The control itself.
    pub control: Control,
}

/// Retained model of the generated control panel.
///
/// Controls are built by [`crate::generate_ui`]. User events enter through the `input_*` /
/// `choose_*` methods, which update the control and write state; state listeners take it from
/// there.
#[derive(Debug, Default)]
pub struct ControlPanel {
    store: Option<StateStore>,
    pub(crate) groups: Vec<ControlGroup>,
}

impl ControlPanel {
    /// Empty, unbound panel.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bind(&mut self, store: &StateStore) {
        self.store = Some(store.clone());
    }

    pub(crate) fn clear(&mut self) {
        self.groups.clear();
    }

    /// Control groups in display order.
    pub fn groups(&self) -> &[ControlGroup] {
        &self.groups
    }

    /// Group editing `property`.
    pub fn group(&self, property: &str) -> Option<&ControlGroup> {
        self.groups.iter().find(|g| g.property == property)
    }

    pub(crate) fn group_mut(&mut self, property: &str) -> Option<&mut ControlGroup> {
        self.groups.iter_mut().find(|g| g.property == property)
    }

    /// Number of controls.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the panel has no controls.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Text typed into a text input.
    pub fn input_text(&mut self, property: &str, raw: &str) -> FrameResult<()> {
        let input = match self.control_mut(property)? {
            Control::Text(input) => input,
            other => return Err(mismatch(property, "text", other)),
        };
        raw.clone_into(&mut input.value);
        self.write(property, Value::from(raw))
    }

    /// Swatch `index` picked in a color palette.
    pub fn choose_swatch(&mut self, property: &str, index: usize) -> FrameResult<()> {
        let palette = match self.control_mut(property)? {
            Control::Color(palette) => palette,
            other => return Err(mismatch(property, "color", other)),
        };
        let color = palette.swatches.get(index).cloned().ok_or_else(|| {
            FrameError::validation(format!("'{property}' has no swatch {index}"))
        })?;
        palette.selected = Some(index);
        self.write(property, Value::Text(color))
    }

    /// Slider moved; `raw` is the slider's string value.
    ///
    /// Unparseable input is ignored.
    pub fn input_range(&mut self, property: &str, raw: &str) -> FrameResult<()> {
        let slider = match self.control_mut(property)? {
            Control::Range(slider) => slider,
            other => return Err(mismatch(property, "range", other)),
        };
        let Some(parsed) = parse_number_prefix(raw).filter(|v| v.is_finite()) else {
            tracing::warn!(property, raw, "ignoring non-numeric range input");
            return Ok(());
        };
        slider.show(parsed);
        let value = slider.value;
        self.write(property, Value::Number(value))
    }

    /// Option with value `value` chosen in a drop-down.
    pub fn choose_option(&mut self, property: &str, value: &str) -> FrameResult<()> {
        let select = match self.control_mut(property)? {
            Control::Select(select) => select,
            other => return Err(mismatch(property, "select", other)),
        };
        let index = select
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| {
                FrameError::validation(format!("'{property}' has no option '{value}'"))
            })?;
        select.selected = Some(index);
        self.write(property, Value::from(value))
    }

    /// Route a raw string to whatever control edits `property`.
    ///
    /// Color controls take the swatch color itself.
    pub fn submit(&mut self, property: &str, raw: &str) -> FrameResult<()> {
        match self.control_mut(property)? {
            Control::Text(_) => self.input_text(property, raw),
            Control::Range(_) => self.input_range(property, raw),
            Control::Select(_) => self.choose_option(property, raw),
            Control::Color(palette) => {
                let index = palette
                    .swatches
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(raw))
                    .ok_or_else(|| {
                        FrameError::validation(format!("'{property}' palette has no '{raw}'"))
                    })?;
                self.choose_swatch(property, index)
            }
        }
    }

    fn control_mut(&mut self, property: &str) -> FrameResult<&mut Control> {
        self.group_mut(property)
            .map(|g| &mut g.control)
            .ok_or_else(|| FrameError::validation(format!("no control for '{property}'")))
    }

    fn write(&self, property: &str, value: Value) -> FrameResult<()> {
        let store = self
            .store
            .as_ref()
            .ok_or_else(|| FrameError::validation("control panel is not bound to a state store"))?;
        store.set(property, value);
        Ok(())
    }
}

fn mismatch(property: &str, wanted: &str, found: &Control) -> FrameError {
    FrameError::validation(format!(
        "'{property}' is a {} control, not {wanted}",
        found.kind_name()
    ))
}
