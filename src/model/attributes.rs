//! Attribute mapping between typed node state and the JSON document
//!
//! Each node variant (and the model itself) owns a typed attribute struct. An
//! [`AttributeMapper`] describes how those fields map to external document keys,
//! which default they carry, and which global key they inherit from when unset.
//! The [`AttributeRegistry`] bundles one mapper per variant and is owned by the model.

use serde_json::{json, Map, Value};

use crate::error::{LayoutError, Result};

// ============================================================================
// Mapper
// ============================================================================

/// One `(internal name, external key, default)` entry
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Field name used by [`AttributeTarget`] implementations
    pub name: &'static str,
    /// Key used in the serialized document
    pub key: &'static str,
    /// Value assumed when the document omits the key
    pub default: Value,
    /// Serialize even when equal to the default
    pub always_write: bool,
    /// Global key supplying the effective value when this attribute is unset
    pub inherit: Option<&'static str>,
}

impl Attribute {
    pub fn always_write(&mut self) -> &mut Self {
        self.always_write = true;
        self
    }
}

/// Something whose attributes can be read and written by internal name.
///
/// `get_attribute` returns `None` for attributes that are unset (and therefore
/// inherit a global default). `set_attribute(name, None)` resets an attribute.
pub trait AttributeTarget {
    fn get_attribute(&self, name: &str) -> Option<Value>;
    fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&Value>,
    ) -> std::result::Result<(), String>;
}

/// Registry of attribute conversions for one node variant
#[derive(Debug, Clone, Default)]
pub struct AttributeMapper {
    attributes: Vec<Attribute>,
}

impl AttributeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute with its own default
    pub fn add(&mut self, name: &'static str, key: &'static str, default: Value) -> &mut Attribute {
        let index = self.attributes.len();
        self.attributes.push(Attribute {
            name,
            key,
            default,
            always_write: false,
            inherit: None,
        });
        &mut self.attributes[index]
    }

    /// Register an attribute whose default comes from a model-level key
    pub fn add_inherited(
        &mut self,
        name: &'static str,
        key: &'static str,
        inherit: &'static str,
    ) -> &mut Attribute {
        let attr = self.add(name, key, Value::Null);
        attr.inherit = Some(inherit);
        attr
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Look up an attribute by its external key
    pub fn get(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// Populate `target` from a document map.
    ///
    /// Missing keys keep the target's defaults, unknown keys are ignored and
    /// values of the wrong type are logged and skipped.
    pub fn from_json(&self, json: &Map<String, Value>, target: &mut impl AttributeTarget) {
        for attr in &self.attributes {
            let Some(value) = json.get(attr.key) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            if let Err(reason) = target.set_attribute(attr.name, Some(value)) {
                tracing::warn!(key = attr.key, %reason, "ignoring malformed attribute");
            }
        }
    }

    /// Write the attributes of `source` that are set and differ from their default
    pub fn to_json(&self, source: &impl AttributeTarget, json: &mut Map<String, Value>) {
        for attr in &self.attributes {
            match source.get_attribute(attr.name) {
                Some(value) if attr.always_write || value != attr.default => {
                    json.insert(attr.key.to_string(), value);
                }
                _ => {}
            }
        }
    }

    /// Apply every recognized key in `json` to `target`, all or nothing.
    ///
    /// `null` resets an attribute to its default. Unknown keys are ignored.
    pub fn update<T>(&self, json: &Map<String, Value>, target: &mut T) -> Result<()>
    where
        T: AttributeTarget + Clone,
    {
        let mut staged = target.clone();
        for (key, value) in json {
            let Some(attr) = self.get(key) else {
                tracing::debug!(%key, "skipping unknown attribute");
                continue;
            };
            let value = (!value.is_null()).then_some(value);
            staged
                .set_attribute(attr.name, value)
                .map_err(|reason| LayoutError::invalid_attribute(attr.key, reason))?;
        }
        *target = staged;
        Ok(())
    }

    /// Effective attribute values of `source`, keyed externally, with unset
    /// attributes resolved through `globals`
    pub fn resolve(
        &self,
        source: &impl AttributeTarget,
        globals: &ModelAttributes,
        global_mapper: &AttributeMapper,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        for attr in &self.attributes {
            let value = source
                .get_attribute(attr.name)
                .or_else(|| {
                    let inherited = global_mapper.get(attr.inherit?)?;
                    globals.get_attribute(inherited.name)
                })
                .unwrap_or_else(|| attr.default.clone());
            out.insert(attr.key.to_string(), value);
        }
        out
    }
}

// ============================================================================
// Value conversions
// ============================================================================

fn to_bool(value: &Value) -> std::result::Result<bool, String> {
    value
        .as_bool()
        .ok_or_else(|| format!("expected a boolean, got {}", value))
}

fn to_size(value: &Value) -> std::result::Result<f64, String> {
    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(format!("expected a non-negative number, got {}", value)),
    }
}

fn to_weight(value: &Value) -> std::result::Result<f64, String> {
    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n),
        _ => Err(format!("expected a non-negative weight, got {}", value)),
    }
}

fn to_text(value: &Value) -> std::result::Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected a string, got {}", value))
}

/// Whole numbers are written as integers so documents keep their original form
fn number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        json!(n as i64)
    } else {
        json!(n)
    }
}

fn convert<T>(
    value: Option<&Value>,
    f: fn(&Value) -> std::result::Result<T, String>,
) -> std::result::Result<Option<T>, String> {
    value.map(f).transpose()
}

fn unknown(name: &str) -> String {
    format!("unknown attribute '{}'", name)
}

// ============================================================================
// Model attributes
// ============================================================================

/// Model-level defaults (the `global` section of a document)
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAttributes {
    pub splitter_size: f64,
    pub enable_edge_dock: bool,

    pub tab_enable_close: bool,
    pub tab_enable_drag: bool,
    pub tab_enable_rename: bool,
    pub tab_class_name: Option<String>,
    pub tab_icon: Option<String>,

    pub tab_set_enable_close: bool,
    pub tab_set_enable_drop: bool,
    pub tab_set_enable_drag: bool,
    pub tab_set_enable_divide: bool,
    pub tab_set_enable_maximize: bool,
    pub tab_set_class_name_tab_strip: Option<String>,
    pub tab_set_class_name_header: Option<String>,
    pub tab_set_enable_tab_strip: bool,
    pub tab_set_header_height: f64,
    pub tab_set_tab_strip_height: f64,
    pub tab_set_min_width: f64,
    pub tab_set_min_height: f64,
}

impl Default for ModelAttributes {
    fn default() -> Self {
        Self {
            splitter_size: 8.0,
            enable_edge_dock: true,
            tab_enable_close: true,
            tab_enable_drag: true,
            tab_enable_rename: true,
            tab_class_name: None,
            tab_icon: None,
            tab_set_enable_close: true,
            tab_set_enable_drop: true,
            tab_set_enable_drag: true,
            tab_set_enable_divide: true,
            tab_set_enable_maximize: true,
            tab_set_class_name_tab_strip: None,
            tab_set_class_name_header: None,
            tab_set_enable_tab_strip: true,
            tab_set_header_height: 20.0,
            tab_set_tab_strip_height: 20.0,
            tab_set_min_width: 0.0,
            tab_set_min_height: 0.0,
        }
    }
}

impl AttributeTarget for ModelAttributes {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "splitter_size" => number(self.splitter_size),
            "enable_edge_dock" => json!(self.enable_edge_dock),
            "tab_enable_close" => json!(self.tab_enable_close),
            "tab_enable_drag" => json!(self.tab_enable_drag),
            "tab_enable_rename" => json!(self.tab_enable_rename),
            "tab_class_name" => json!(self.tab_class_name),
            "tab_icon" => json!(self.tab_icon),
            "tab_set_enable_close" => json!(self.tab_set_enable_close),
            "tab_set_enable_drop" => json!(self.tab_set_enable_drop),
            "tab_set_enable_drag" => json!(self.tab_set_enable_drag),
            "tab_set_enable_divide" => json!(self.tab_set_enable_divide),
            "tab_set_enable_maximize" => json!(self.tab_set_enable_maximize),
            "tab_set_class_name_tab_strip" => json!(self.tab_set_class_name_tab_strip),
            "tab_set_class_name_header" => json!(self.tab_set_class_name_header),
            "tab_set_enable_tab_strip" => json!(self.tab_set_enable_tab_strip),
            "tab_set_header_height" => number(self.tab_set_header_height),
            "tab_set_tab_strip_height" => number(self.tab_set_tab_strip_height),
            "tab_set_min_width" => number(self.tab_set_min_width),
            "tab_set_min_height" => number(self.tab_set_min_height),
            _ => return None,
        };
        Some(value)
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&Value>,
    ) -> std::result::Result<(), String> {
        let d = Self::default();
        match name {
            "splitter_size" => {
                self.splitter_size = convert(value, to_size)?.unwrap_or(d.splitter_size)
            }
            "enable_edge_dock" => {
                self.enable_edge_dock = convert(value, to_bool)?.unwrap_or(d.enable_edge_dock)
            }
            "tab_enable_close" => {
                self.tab_enable_close = convert(value, to_bool)?.unwrap_or(d.tab_enable_close)
            }
            "tab_enable_drag" => {
                self.tab_enable_drag = convert(value, to_bool)?.unwrap_or(d.tab_enable_drag)
            }
            "tab_enable_rename" => {
                self.tab_enable_rename = convert(value, to_bool)?.unwrap_or(d.tab_enable_rename)
            }
            "tab_class_name" => self.tab_class_name = convert(value, to_text)?,
            "tab_icon" => self.tab_icon = convert(value, to_text)?,
            "tab_set_enable_close" => {
                self.tab_set_enable_close =
                    convert(value, to_bool)?.unwrap_or(d.tab_set_enable_close)
            }
            "tab_set_enable_drop" => {
                self.tab_set_enable_drop = convert(value, to_bool)?.unwrap_or(d.tab_set_enable_drop)
            }
            "tab_set_enable_drag" => {
                self.tab_set_enable_drag = convert(value, to_bool)?.unwrap_or(d.tab_set_enable_drag)
            }
            "tab_set_enable_divide" => {
                self.tab_set_enable_divide =
                    convert(value, to_bool)?.unwrap_or(d.tab_set_enable_divide)
            }
            "tab_set_enable_maximize" => {
                self.tab_set_enable_maximize =
                    convert(value, to_bool)?.unwrap_or(d.tab_set_enable_maximize)
            }
            "tab_set_class_name_tab_strip" => {
                self.tab_set_class_name_tab_strip = convert(value, to_text)?
            }
            "tab_set_class_name_header" => {
                self.tab_set_class_name_header = convert(value, to_text)?
            }
            "tab_set_enable_tab_strip" => {
                self.tab_set_enable_tab_strip =
                    convert(value, to_bool)?.unwrap_or(d.tab_set_enable_tab_strip)
            }
            "tab_set_header_height" => {
                self.tab_set_header_height =
                    convert(value, to_size)?.unwrap_or(d.tab_set_header_height)
            }
            "tab_set_tab_strip_height" => {
                self.tab_set_tab_strip_height =
                    convert(value, to_size)?.unwrap_or(d.tab_set_tab_strip_height)
            }
            "tab_set_min_width" => {
                self.tab_set_min_width = convert(value, to_size)?.unwrap_or(d.tab_set_min_width)
            }
            "tab_set_min_height" => {
                self.tab_set_min_height = convert(value, to_size)?.unwrap_or(d.tab_set_min_height)
            }
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

// ============================================================================
// Node attributes
// ============================================================================

/// Default weight of a row or tab set
pub const DEFAULT_WEIGHT: f64 = 100.0;

/// Default display name of a tab
pub const DEFAULT_TAB_NAME: &str = "[Unnamed Tab]";

/// Share of a parent row's main axis taken by a row or tab set
#[derive(Debug, Clone, PartialEq)]
pub struct Sizing {
    pub weight: f64,
    /// Fixed pixel width, used instead of the weight in horizontal rows
    pub width: Option<f64>,
    /// Fixed pixel height, used instead of the weight in vertical rows
    pub height: Option<f64>,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            weight: DEFAULT_WEIGHT,
            width: None,
            height: None,
        }
    }
}

impl AttributeTarget for Sizing {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        match name {
            "weight" => Some(number(self.weight)),
            "width" => self.width.map(number),
            "height" => self.height.map(number),
            _ => None,
        }
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&Value>,
    ) -> std::result::Result<(), String> {
        match name {
            "weight" => self.weight = convert(value, to_weight)?.unwrap_or(DEFAULT_WEIGHT),
            "width" => self.width = convert(value, to_size)?,
            "height" => self.height = convert(value, to_size)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

/// Per-tab-set state and overrides of the model defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabSetAttributes {
    pub sizing: Sizing,
    /// Index of the visible tab, `None` when the tab set is empty
    pub selected: Option<usize>,
    pub maximized: bool,
    /// Header title; a header band is only reserved when this is set
    pub name: Option<String>,
    pub enable_close: Option<bool>,
    pub enable_drop: Option<bool>,
    pub enable_drag: Option<bool>,
    pub enable_divide: Option<bool>,
    pub enable_maximize: Option<bool>,
    pub enable_tab_strip: Option<bool>,
    pub class_name_tab_strip: Option<String>,
    pub class_name_header: Option<String>,
    pub header_height: Option<f64>,
    pub tab_strip_height: Option<f64>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
}

impl TabSetAttributes {
    pub fn enable_close(&self, g: &ModelAttributes) -> bool {
        self.enable_close.unwrap_or(g.tab_set_enable_close)
    }

    pub fn enable_drop(&self, g: &ModelAttributes) -> bool {
        self.enable_drop.unwrap_or(g.tab_set_enable_drop)
    }

    pub fn enable_drag(&self, g: &ModelAttributes) -> bool {
        self.enable_drag.unwrap_or(g.tab_set_enable_drag)
    }

    pub fn enable_divide(&self, g: &ModelAttributes) -> bool {
        self.enable_divide.unwrap_or(g.tab_set_enable_divide)
    }

    pub fn enable_maximize(&self, g: &ModelAttributes) -> bool {
        self.enable_maximize.unwrap_or(g.tab_set_enable_maximize)
    }

    pub fn enable_tab_strip(&self, g: &ModelAttributes) -> bool {
        self.enable_tab_strip.unwrap_or(g.tab_set_enable_tab_strip)
    }

    pub fn header_height(&self, g: &ModelAttributes) -> f32 {
        self.header_height.unwrap_or(g.tab_set_header_height) as f32
    }

    pub fn tab_strip_height(&self, g: &ModelAttributes) -> f32 {
        self.tab_strip_height.unwrap_or(g.tab_set_tab_strip_height) as f32
    }

    pub fn min_width(&self, g: &ModelAttributes) -> f32 {
        self.min_width.unwrap_or(g.tab_set_min_width) as f32
    }

    pub fn min_height(&self, g: &ModelAttributes) -> f32 {
        self.min_height.unwrap_or(g.tab_set_min_height) as f32
    }

    /// Keep `selected` pointing at one of `len` tabs, or `None` when empty
    pub(crate) fn normalize_selected(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i < len => Some(i),
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }
}

impl AttributeTarget for TabSetAttributes {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        match name {
            "weight" | "width" | "height" => self.sizing.get_attribute(name),
            "selected" => self.selected.map(|s| json!(s)),
            "maximized" => Some(json!(self.maximized)),
            "name" => self.name.as_ref().map(|n| json!(n)),
            "enable_close" => self.enable_close.map(Value::Bool),
            "enable_drop" => self.enable_drop.map(Value::Bool),
            "enable_drag" => self.enable_drag.map(Value::Bool),
            "enable_divide" => self.enable_divide.map(Value::Bool),
            "enable_maximize" => self.enable_maximize.map(Value::Bool),
            "enable_tab_strip" => self.enable_tab_strip.map(Value::Bool),
            "class_name_tab_strip" => self.class_name_tab_strip.as_ref().map(|c| json!(c)),
            "class_name_header" => self.class_name_header.as_ref().map(|c| json!(c)),
            "header_height" => self.header_height.map(number),
            "tab_strip_height" => self.tab_strip_height.map(number),
            "min_width" => self.min_width.map(number),
            "min_height" => self.min_height.map(number),
            _ => None,
        }
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&Value>,
    ) -> std::result::Result<(), String> {
        match name {
            "weight" | "width" | "height" => return self.sizing.set_attribute(name, value),
            "selected" => {
                self.selected = match value {
                    None => None,
                    Some(v) => {
                        let index = v
                            .as_i64()
                            .ok_or_else(|| format!("expected an integer, got {}", v))?;
                        usize::try_from(index).ok()
                    }
                }
            }
            "maximized" => self.maximized = convert(value, to_bool)?.unwrap_or(false),
            "name" => self.name = convert(value, to_text)?,
            "enable_close" => self.enable_close = convert(value, to_bool)?,
            "enable_drop" => self.enable_drop = convert(value, to_bool)?,
            "enable_drag" => self.enable_drag = convert(value, to_bool)?,
            "enable_divide" => self.enable_divide = convert(value, to_bool)?,
            "enable_maximize" => self.enable_maximize = convert(value, to_bool)?,
            "enable_tab_strip" => self.enable_tab_strip = convert(value, to_bool)?,
            "class_name_tab_strip" => self.class_name_tab_strip = convert(value, to_text)?,
            "class_name_header" => self.class_name_header = convert(value, to_text)?,
            "header_height" => self.header_height = convert(value, to_size)?,
            "tab_strip_height" => self.tab_strip_height = convert(value, to_size)?,
            "min_width" => self.min_width = convert(value, to_size)?,
            "min_height" => self.min_height = convert(value, to_size)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

/// Per-tab state, overrides and opaque application payload
#[derive(Debug, Clone, PartialEq)]
pub struct TabAttributes {
    pub name: String,
    /// Component identifier used by the renderer to pick the pane content
    pub component: Option<String>,
    /// Opaque application payload, never interpreted by the engine
    pub config: Option<Value>,
    pub enable_close: Option<bool>,
    pub enable_drag: Option<bool>,
    pub enable_rename: Option<bool>,
    pub class_name: Option<String>,
    pub icon: Option<String>,
}

impl Default for TabAttributes {
    fn default() -> Self {
        Self {
            name: DEFAULT_TAB_NAME.to_string(),
            component: None,
            config: None,
            enable_close: None,
            enable_drag: None,
            enable_rename: None,
            class_name: None,
            icon: None,
        }
    }
}

impl TabAttributes {
    pub fn enable_close(&self, g: &ModelAttributes) -> bool {
        self.enable_close.unwrap_or(g.tab_enable_close)
    }

    pub fn enable_drag(&self, g: &ModelAttributes) -> bool {
        self.enable_drag.unwrap_or(g.tab_enable_drag)
    }

    pub fn enable_rename(&self, g: &ModelAttributes) -> bool {
        self.enable_rename.unwrap_or(g.tab_enable_rename)
    }

    pub fn class_name<'a>(&'a self, g: &'a ModelAttributes) -> Option<&'a str> {
        self.class_name.as_deref().or(g.tab_class_name.as_deref())
    }

    pub fn icon<'a>(&'a self, g: &'a ModelAttributes) -> Option<&'a str> {
        self.icon.as_deref().or(g.tab_icon.as_deref())
    }
}

impl AttributeTarget for TabAttributes {
    fn get_attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(json!(self.name)),
            "component" => self.component.as_ref().map(|c| json!(c)),
            "config" => self.config.clone(),
            "enable_close" => self.enable_close.map(Value::Bool),
            "enable_drag" => self.enable_drag.map(Value::Bool),
            "enable_rename" => self.enable_rename.map(Value::Bool),
            "class_name" => self.class_name.as_ref().map(|c| json!(c)),
            "icon" => self.icon.as_ref().map(|i| json!(i)),
            _ => None,
        }
    }

    fn set_attribute(
        &mut self,
        name: &str,
        value: Option<&Value>,
    ) -> std::result::Result<(), String> {
        match name {
            "name" => {
                self.name = convert(value, to_text)?.unwrap_or_else(|| DEFAULT_TAB_NAME.to_string())
            }
            "component" => self.component = convert(value, to_text)?,
            "config" => self.config = value.cloned(),
            "enable_close" => self.enable_close = convert(value, to_bool)?,
            "enable_drag" => self.enable_drag = convert(value, to_bool)?,
            "enable_rename" => self.enable_rename = convert(value, to_bool)?,
            "class_name" => self.class_name = convert(value, to_text)?,
            "icon" => self.icon = convert(value, to_text)?,
            _ => return Err(unknown(name)),
        }
        Ok(())
    }
}

// ============================================================================
// Registry
// ============================================================================

/// One mapper per node variant plus the model-level table
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    pub global: AttributeMapper,
    pub row: AttributeMapper,
    pub tab_set: AttributeMapper,
    pub tab: AttributeMapper,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeRegistry {
    pub fn new() -> Self {
        let d = ModelAttributes::default();

        let mut global = AttributeMapper::new();
        // splitter
        global.add("splitter_size", "splitterSize", number(d.splitter_size));
        global.add("enable_edge_dock", "enableEdgeDock", json!(d.enable_edge_dock));
        // tab
        global.add("tab_enable_close", "tabEnableClose", json!(d.tab_enable_close));
        global.add("tab_enable_drag", "tabEnableDrag", json!(d.tab_enable_drag));
        global.add("tab_enable_rename", "tabEnableRename", json!(d.tab_enable_rename));
        global.add("tab_class_name", "tabClassName", Value::Null);
        global.add("tab_icon", "tabIcon", Value::Null);
        // tabset
        global.add("tab_set_enable_close", "tabSetEnableClose", json!(d.tab_set_enable_close));
        global.add("tab_set_enable_drop", "tabSetEnableDrop", json!(d.tab_set_enable_drop));
        global.add("tab_set_enable_drag", "tabSetEnableDrag", json!(d.tab_set_enable_drag));
        global.add("tab_set_enable_divide", "tabSetEnableDivide", json!(d.tab_set_enable_divide));
        global.add(
            "tab_set_enable_maximize",
            "tabSetEnableMaximize",
            json!(d.tab_set_enable_maximize),
        );
        global.add("tab_set_class_name_tab_strip", "tabSetClassNameTabStrip", Value::Null);
        global.add("tab_set_class_name_header", "tabSetClassNameHeader", Value::Null);
        global.add(
            "tab_set_enable_tab_strip",
            "tabSetEnableTabStrip",
            json!(d.tab_set_enable_tab_strip),
        );
        global.add("tab_set_header_height", "tabSetHeaderHeight", number(d.tab_set_header_height));
        global.add(
            "tab_set_tab_strip_height",
            "tabSetTabStripHeight",
            number(d.tab_set_tab_strip_height),
        );
        global.add("tab_set_min_width", "tabSetMinWidth", number(d.tab_set_min_width));
        global.add("tab_set_min_height", "tabSetMinHeight", number(d.tab_set_min_height));

        let mut row = AttributeMapper::new();
        add_sizing(&mut row);

        let mut tab_set = AttributeMapper::new();
        add_sizing(&mut tab_set);
        tab_set.add("selected", "selected", json!(0));
        tab_set.add("maximized", "maximized", json!(false));
        tab_set.add("name", "name", Value::Null);
        tab_set.add_inherited("enable_close", "enableClose", "tabSetEnableClose");
        tab_set.add_inherited("enable_drop", "enableDrop", "tabSetEnableDrop");
        tab_set.add_inherited("enable_drag", "enableDrag", "tabSetEnableDrag");
        tab_set.add_inherited("enable_divide", "enableDivide", "tabSetEnableDivide");
        tab_set.add_inherited("enable_maximize", "enableMaximize", "tabSetEnableMaximize");
        tab_set.add_inherited("enable_tab_strip", "enableTabStrip", "tabSetEnableTabStrip");
        tab_set.add_inherited(
            "class_name_tab_strip",
            "classNameTabStrip",
            "tabSetClassNameTabStrip",
        );
        tab_set.add_inherited("class_name_header", "classNameHeader", "tabSetClassNameHeader");
        tab_set.add_inherited("header_height", "headerHeight", "tabSetHeaderHeight");
        tab_set.add_inherited("tab_strip_height", "tabStripHeight", "tabSetTabStripHeight");
        tab_set.add_inherited("min_width", "minWidth", "tabSetMinWidth");
        tab_set.add_inherited("min_height", "minHeight", "tabSetMinHeight");

        let mut tab = AttributeMapper::new();
        tab.add("name", "name", json!(DEFAULT_TAB_NAME)).always_write();
        tab.add("component", "component", Value::Null);
        tab.add("config", "config", Value::Null);
        tab.add_inherited("enable_close", "enableClose", "tabEnableClose");
        tab.add_inherited("enable_drag", "enableDrag", "tabEnableDrag");
        tab.add_inherited("enable_rename", "enableRename", "tabEnableRename");
        tab.add_inherited("class_name", "className", "tabClassName");
        tab.add_inherited("icon", "icon", "tabIcon");

        Self {
            global,
            row,
            tab_set,
            tab,
        }
    }
}

fn add_sizing(mapper: &mut AttributeMapper) {
    mapper.add("weight", "weight", number(DEFAULT_WEIGHT));
    mapper.add("width", "width", Value::Null);
    mapper.add("height", "height", Value::Null);
}
