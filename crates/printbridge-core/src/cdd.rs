// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cloud Device Description (CDD) capability schema.
//
// Only the printer description sections that PPD translation can populate
// are modelled here.  Field names serialize to the snake_case JSON keys the
// cloud service expects; optional fields are omitted when empty.  Fields
// marked `#[serde(skip)]` are connector-side bookkeeping and never leave the
// process.
//
// Every section with mutually-exclusive options is built through a
// constructor that settles the default flag, so an instance always carries
// exactly one default option.

use serde::{Deserialize, Serialize};

/// CDD version emitted by this connector.
pub const CDD_VERSION: &str = "1.0";

/// Locale used for every localized string.
pub const DEFAULT_LOCALE: &str = "EN";

/// Top-level cloud device description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudDeviceDescription {
    pub version: String,
    pub printer: PrinterDescriptionSection,
}

impl CloudDeviceDescription {
    pub fn new(printer: PrinterDescriptionSection) -> Self {
        Self {
            version: CDD_VERSION.into(),
            printer,
        }
    }
}

/// Printer capabilities, one optional section per capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterDescriptionSection {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub printing_speed: Option<PrintingSpeed>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vendor_capability: Option<Vec<VendorCapability>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duplex: Option<Duplex>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub margins: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dpi: Option<Dpi>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media_size: Option<MediaSize>,
}

// ---------------------------------------------------------------------------
// Localized strings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    pub locale: String,
    pub value: String,
}

/// Wrap a display string in the single-locale list CDD expects.
pub fn localized(value: impl Into<String>) -> Vec<LocalizedString> {
    vec![LocalizedString {
        locale: DEFAULT_LOCALE.into(),
        value: value.into(),
    }]
}

// ---------------------------------------------------------------------------
// Default-flag invariant
// ---------------------------------------------------------------------------

/// An option within a capability that offers mutually-exclusive choices.
pub trait Choice {
    fn is_default(&self) -> bool;
    fn set_default(&mut self, is_default: bool);
}

/// Leave exactly one option flagged as default: the first one already
/// flagged, or the first option when none is.
pub fn settle_default<T: Choice>(options: &mut [T]) {
    let chosen = options.iter().position(Choice::is_default).unwrap_or(0);
    for (i, option) in options.iter_mut().enumerate() {
        option.set_default(i == chosen);
    }
}

macro_rules! impl_choice {
    ($($ty:ty),* $(,)?) => {
        $(impl Choice for $ty {
            fn is_default(&self) -> bool {
                self.is_default
            }
            fn set_default(&mut self, is_default: bool) {
                self.is_default = is_default;
            }
        })*
    };
}

impl_choice!(
    ColorOption,
    DuplexOption,
    MarginsOption,
    DpiOption,
    MediaSizeOption,
    SelectCapabilityOption,
);

// ---------------------------------------------------------------------------
// Printing speed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintingSpeed {
    pub option: Vec<PrintingSpeedOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintingSpeedOption {
    pub speed_ppm: f32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub color_type: Option<Vec<ColorType>>,
}

// ---------------------------------------------------------------------------
// Vendor capabilities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VendorCapabilityType {
    Range,
    Select,
    TypedValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorCapability {
    pub id: String,
    #[serde(rename = "type")]
    pub capability_type: VendorCapabilityType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub select_cap: Option<SelectCapability>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub typed_value_cap: Option<TypedValueCapability>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name_localized: Option<Vec<LocalizedString>>,
}

impl VendorCapability {
    /// A select-from-list capability.
    pub fn select(id: impl Into<String>, display_name: &str, select: SelectCapability) -> Self {
        Self {
            id: id.into(),
            capability_type: VendorCapabilityType::Select,
            select_cap: Some(select),
            typed_value_cap: None,
            display_name_localized: Some(localized(display_name)),
        }
    }

    /// A free-form typed value capability.
    pub fn typed_value(
        id: impl Into<String>,
        display_name: &str,
        typed_value: TypedValueCapability,
    ) -> Self {
        Self {
            id: id.into(),
            capability_type: VendorCapabilityType::TypedValue,
            select_cap: None,
            typed_value_cap: Some(typed_value),
            display_name_localized: Some(localized(display_name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectCapability {
    pub option: Vec<SelectCapabilityOption>,
}

impl SelectCapability {
    /// Returns `None` when there is nothing to select.
    pub fn new(mut option: Vec<SelectCapabilityOption>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self { option })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectCapabilityOption {
    pub value: String,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub display_name_localized: Option<Vec<LocalizedString>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypedValueType {
    Boolean,
    Float,
    Integer,
    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValueCapability {
    pub value_type: TypedValueType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<String>,
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorType {
    StandardColor,
    StandardMonochrome,
    CustomColor,
    CustomMonochrome,
    Auto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub option: Vec<ColorOption>,
    /// PPD main keyword the options came from, needed to map a ticket back.
    #[serde(skip)]
    pub vendor_key: String,
}

impl Color {
    pub fn new(mut option: Vec<ColorOption>, vendor_key: impl Into<String>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self {
            option,
            vendor_key: vendor_key.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOption {
    pub vendor_id: String,
    #[serde(rename = "type")]
    pub color_type: ColorType,
    pub is_default: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_display_name_localized: Option<Vec<LocalizedString>>,
}

// ---------------------------------------------------------------------------
// Duplex
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuplexType {
    NoDuplex,
    LongEdge,
    ShortEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duplex {
    pub option: Vec<DuplexOption>,
    #[serde(skip)]
    pub vendor_key: String,
}

impl Duplex {
    pub fn new(mut option: Vec<DuplexOption>, vendor_key: impl Into<String>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self {
            option,
            vendor_key: vendor_key.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplexOption {
    #[serde(rename = "type")]
    pub duplex_type: DuplexType,
    pub is_default: bool,
    /// PPD option keyword selecting this mode.
    #[serde(skip)]
    pub vendor_id: String,
}

// ---------------------------------------------------------------------------
// Margins
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarginsType {
    Borderless,
    Standard,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub option: Vec<MarginsOption>,
}

impl Margins {
    pub fn new(mut option: Vec<MarginsOption>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self { option })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginsOption {
    #[serde(rename = "type")]
    pub margins_type: MarginsType,
    pub top_microns: i32,
    pub right_microns: i32,
    pub bottom_microns: i32,
    pub left_microns: i32,
    pub is_default: bool,
}

// ---------------------------------------------------------------------------
// DPI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dpi {
    pub option: Vec<DpiOption>,
}

impl Dpi {
    pub fn new(mut option: Vec<DpiOption>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self { option })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DpiOption {
    pub horizontal_dpi: i32,
    pub vertical_dpi: i32,
    pub is_default: bool,
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_display_name_localized: Option<Vec<LocalizedString>>,
}

// ---------------------------------------------------------------------------
// Media size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSize {
    pub option: Vec<MediaSizeOption>,
}

impl MediaSize {
    pub fn new(mut option: Vec<MediaSizeOption>) -> Option<Self> {
        if option.is_empty() {
            return None;
        }
        settle_default(&mut option);
        Some(Self { option })
    }
}

/// Media size name used for sizes that have no standard CDD name.
pub const MEDIA_SIZE_CUSTOM: &str = "CUSTOM";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSizeOption {
    /// CDD media size name, e.g. `NA_LETTER` or `ISO_A4`.
    pub name: String,
    pub width_microns: i32,
    pub height_microns: i32,
    pub is_continuous_feed: bool,
    pub is_default: bool,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub vendor_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_display_name_localized: Option<Vec<LocalizedString>>,
}
