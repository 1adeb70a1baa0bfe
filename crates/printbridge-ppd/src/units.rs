// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Physical unit conversion to micrometres.
//
// All conversions compute in single precision and round half-up by adding
// 0.5 before truncating, so results match other connector implementations
// bit for bit.

const MICRONS_PER_INCH: f32 = 25_400.0;
const MICRONS_PER_MM: f32 = 1_000.0;
const POINTS_PER_INCH: f32 = 72.0;

pub fn inches_to_microns(inches: f32) -> i32 {
    (inches * MICRONS_PER_INCH + 0.5) as i32
}

pub fn mm_to_microns(mm: f32) -> i32 {
    (mm * MICRONS_PER_MM + 0.5) as i32
}

/// Typographic points (1/72 inch) to micrometres.
pub fn points_to_microns(points: i64) -> i32 {
    ((points * 25_400) as f32 / POINTS_PER_INCH + 0.5) as i32
}

/// Unit a media dimension is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Inches,
    Millimetres,
}

impl Unit {
    pub fn to_microns(self, value: f32) -> i32 {
        match self {
            Unit::Inches => inches_to_microns(value),
            Unit::Millimetres => mm_to_microns(value),
        }
    }
}
