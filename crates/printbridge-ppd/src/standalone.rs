// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stand-alone statements (`*HWMargins`, `*Throughput`) to capabilities.

use once_cell::sync::Lazy;
use printbridge_core::cdd::{
    Color, ColorType, Margins, MarginsOption, MarginsType, PrintingSpeed, PrintingSpeedOption,
};
use regex::Regex;

use crate::units::points_to_microns;

static HW_MARGINS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s+(\d+)\s+(\d+)\s+(\d+)$").unwrap());

/// `*HWMargins: "left bottom right top"` in points.
pub fn convert_margins(hw_margins: &str) -> Option<Margins> {
    let found = HW_MARGINS.captures(hw_margins)?;
    let mut points = [0_i64; 4];
    for (slot, group) in points.iter_mut().zip(1_usize..) {
        *slot = found[group].parse::<i32>().ok()?.into();
    }
    let [left, bottom, right, top] = points;

    let margins_type = if points.iter().any(|&p| p > 0) {
        MarginsType::Standard
    } else {
        MarginsType::Borderless
    };

    Margins::new(vec![MarginsOption {
        margins_type,
        top_microns: points_to_microns(top),
        right_microns: points_to_microns(right),
        bottom_microns: points_to_microns(bottom),
        left_microns: points_to_microns(left),
        is_default: true,
    }])
}

/// `*Throughput: "N"` pages per minute, annotated with the color modes it
/// applies to when the printer has a color section.
pub fn convert_printing_speed(throughput: &str, color: Option<&Color>) -> Option<PrintingSpeed> {
    let speed_ppm: i32 = throughput.trim().parse().ok()?;

    let color_type = color.map(|c| {
        let mut types: Vec<ColorType> = Vec::with_capacity(c.option.len());
        for o in &c.option {
            if !types.contains(&o.color_type) {
                types.push(o.color_type);
            }
        }
        types
    });

    Some(PrintingSpeed {
        option: vec![PrintingSpeedOption {
            speed_ppm: speed_ppm as f32,
            color_type,
        }],
    })
}
