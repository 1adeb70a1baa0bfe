// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Color entry (ColorModel, CMAndResolution, SelectColor) to color capability.

use once_cell::sync::Lazy;
use printbridge_core::cdd::{Color, ColorOption, ColorType, localized};
use regex::Regex;

use crate::entry::Entry;
use crate::statement::Statement;

static LOOKS_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:cmy|rgb|color)").unwrap());
static LOOKS_GRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:gray|black|mono)").unwrap());

/// `On - ProRes 1200`, `Off`: CMAndResolution style toggles.
static ON_OFF_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(?:on|off)\s*-?\s*").unwrap());

/// Rewrite on/off toggle translations into a readable color name.
///
/// Translations without the toggle prefix are returned unchanged.
pub fn cleanup_color_name(keyword: &str, translation: &str) -> String {
    let rest = ON_OFF_PREFIX.replace(translation, "");
    if rest == translation {
        return translation.to_owned();
    }

    let label = if LOOKS_GRAY.is_match(keyword) || LOOKS_GRAY.is_match(&rest) {
        "Gray"
    } else if LOOKS_COLOR.is_match(keyword) || LOOKS_COLOR.is_match(&rest) {
        "Color"
    } else {
        return rest.into_owned();
    };

    if rest.is_empty() {
        label.to_owned()
    } else {
        format!("{label}, {rest}")
    }
}

fn color_option(o: &Statement, color_type: ColorType) -> ColorOption {
    ColorOption {
        vendor_id: o.option_keyword.clone(),
        color_type,
        is_default: false,
        custom_display_name_localized: Some(localized(cleanup_color_name(
            &o.option_keyword,
            &o.translation,
        ))),
    }
}

/// A bucket with a single member is the standard mode; several members are
/// vendor variants of it.
fn bucket(options: &[&Statement], single: ColorType, several: ColorType) -> Vec<ColorOption> {
    let color_type = if options.len() == 1 { single } else { several };
    options.iter().map(|o| color_option(o, color_type)).collect()
}

pub fn convert_color(entry: &Entry) -> Option<Color> {
    let (mut color, mut gray, mut other) = (Vec::new(), Vec::new(), Vec::new());
    for o in &entry.options {
        if LOOKS_GRAY.is_match(&o.option_keyword) {
            gray.push(o);
        } else if LOOKS_COLOR.is_match(&o.option_keyword) {
            color.push(o);
        } else {
            other.push(o);
        }
    }

    let mut options = bucket(&color, ColorType::StandardColor, ColorType::CustomColor);
    options.extend(bucket(
        &gray,
        ColorType::StandardMonochrome,
        ColorType::CustomMonochrome,
    ));
    options.extend(
        other
            .iter()
            .map(|o| color_option(o, ColorType::CustomMonochrome)),
    );

    if let Some(default) = options
        .iter_mut()
        .find(|o| o.vendor_id == entry.default_value)
    {
        default.is_default = true;
    }
    Color::new(options, entry.main_keyword.as_str())
}
