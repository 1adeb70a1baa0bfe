// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PageSize entry to media size capability.
//
// Well-known PPD page size keywords map to standard CDD media names through
// a static table.  Anything else is parsed as a custom `WIDTHxHEIGHT` size
// from the keyword or, failing that, its translation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use printbridge_core::cdd::{MEDIA_SIZE_CUSTOM, MediaSize, MediaSizeOption, localized};
use regex::Regex;
use tracing::debug;

use crate::entry::Entry;
use crate::units::Unit::{self, Inches, Millimetres};

const FULL_BLEED_SUFFIX: &str = ".FullBleed";

static CUSTOM_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d.]+)(?:mm|in)?x([\d.]+)(mm|in)?").unwrap());

/// A named page size: PPD keyword, CDD name, unit, width, height, display name.
type KnownSize = (&'static str, &'static str, Unit, f32, f32, &'static str);

#[rustfmt::skip]
static KNOWN_SIZES: &[KnownSize] = &[
    ("3x5", "NA_INDEX_3X5", Inches, 3.0, 5.0, "3x5"),
    ("4x6", "NA_INDEX_4X6", Inches, 4.0, 6.0, "4x6"),
    ("5x7", "NA_5X7", Inches, 5.0, 7.0, "5x7"),
    ("5x8", "NA_INDEX_5X8", Inches, 5.0, 8.0, "5x8"),
    ("6x9", "NA_6X9", Inches, 6.0, 9.0, "6x9"),
    ("6.5x9.5", "NA_C5", Inches, 6.5, 9.5, "6.5x9.5"),
    ("7x9", "NA_7X9", Inches, 7.0, 9.0, "7x9"),
    ("8x10", "NA_GOVT_LETTER", Inches, 8.0, 10.0, "8x10"),
    ("8x13", "NA_GOVT_LEGAL", Inches, 8.0, 13.0, "8x13"),
    ("9x11", "NA_9X11", Inches, 9.0, 11.0, "9x11"),
    ("10x11", "NA_10X11", Inches, 10.0, 11.0, "10x11"),
    ("10x13", "NA_10X13", Inches, 10.0, 13.0, "10x13"),
    ("10x14", "NA_10X14", Inches, 10.0, 14.0, "10x14"),
    ("10x15", "NA_10X15", Inches, 10.0, 15.0, "10x15"),
    ("11x12", "NA_11X12", Inches, 11.0, 12.0, "11x12"),
    ("11x14", "NA_EDP", Inches, 11.0, 14.0, "11x14"),
    ("11x15", "NA_11X15", Inches, 11.0, 15.0, "11x15"),
    ("11x17", "NA_LEDGER", Inches, 11.0, 17.0, "11x17"),
    ("12x18", "NA_ARCH_B", Inches, 12.0, 18.0, "12x18"),
    ("12x19", "NA_12X19", Inches, 12.0, 19.0, "12x19"),
    ("13x19", "NA_SUPER_B", Inches, 13.0, 19.0, "13x19"),
    ("EnvPersonal", "NA_PERSONAL", Inches, 3.625, 6.5, "EnvPersonal"),
    ("Monarch", "NA_MONARCH", Inches, 3.875, 7.5, "Monarch"),
    ("EnvMonarch", "NA_MONARCH", Inches, 3.875, 7.5, "Monarch"),
    ("Comm10", "NA_NUMBER_10", Inches, 4.125, 9.5, "Comm10"),
    ("EnvA2", "NA_A2", Inches, 4.375, 5.75, "EnvA2"),
    ("Env9", "NA_NUMBER_9", Inches, 3.875, 8.875, "Env9"),
    ("Env10", "NA_NUMBER_10", Inches, 4.125, 9.5, "Env10"),
    ("Env11", "NA_NUMBER_11", Inches, 4.5, 10.375, "Env11"),
    ("Env12", "NA_NUMBER_12", Inches, 4.75, 11.0, "Env12"),
    ("Env14", "NA_NUMBER_14", Inches, 5.0, 11.5, "Env14"),
    ("Statement", "NA_INVOICE", Inches, 5.5, 8.5, "Statement"),
    ("Executive", "NA_EXECUTIVE", Inches, 7.25, 10.5, "Executive"),
    ("Quarto", "NA_QUARTO", Inches, 8.5, 10.83, "Quarto"),
    ("EngQuatro", "CUSTOM", Inches, 8.0, 10.0, "English Quatro 8x10"),
    ("Letter", "NA_LETTER", Inches, 8.5, 11.0, "Letter"),
    ("LetterExtra", "NA_LETTER_EXTRA", Inches, 9.5, 12.0, "Letter Extra"),
    ("LetterPlus", "NA_LETTER_PLUS", Inches, 8.5, 12.69, "Letter Plus"),
    ("Legal", "NA_LEGAL", Inches, 8.5, 14.0, "Legal"),
    ("LegalExtra", "NA_LEGAL_EXTRA", Inches, 9.5, 15.0, "Legal Extra"),
    ("FanFoldGerman", "NA_FANFOLD_EUR", Inches, 8.5, 12.0, "FanFoldGerman"),
    ("Foolscap", "NA_FOOLSCAP", Inches, 8.5, 13.0, "Foolscap"),
    ("FanFoldGermanLegal", "NA_FOOLSCAP", Inches, 8.5, 13.0, "Fan Fold German Legal"),
    ("GovernmentLG", "NA_FOOLSCAP", Inches, 8.5, 13.0, "GovernmentLG"),
    ("SuperA", "NA_SUPER_A", Inches, 8.94, 14.0, "Super A"),
    ("SuperB", "NA_B_PLUS", Inches, 12.0, 19.17, "Super B"),
    ("Tabloid", "NA_LEDGER", Inches, 11.0, 17.0, "Tabloid"),
    ("Ledger", "NA_LEDGER", Inches, 11.0, 17.0, "Ledger"),
    ("ARCHA", "NA_ARCH_A", Inches, 9.0, 12.0, "Arch A"),
    ("ARCHB", "NA_ARCH_B", Inches, 12.0, 18.0, "Arch B"),
    ("ARCHC", "NA_ARCH_C", Inches, 18.0, 24.0, "Arch C"),
    ("ARCHD", "NA_ARCH_D", Inches, 24.0, 36.0, "Arch D"),
    ("ARCHE", "NA_ARCH_E", Inches, 36.0, 48.0, "Arch E"),
    ("AnsiC", "NA_C", Inches, 17.0, 22.0, "ANSI C"),
    ("AnsiD", "NA_D", Inches, 22.0, 34.0, "ANSI D"),
    ("AnsiE", "NA_E", Inches, 34.0, 44.0, "ANSI E"),
    ("AnsiF", "NA_F", Inches, 44.0, 68.0, "ANSI F"),
    ("F", "NA_F", Inches, 44.0, 68.0, "ANSI F"),
    ("roc16k", "ROC_16K", Inches, 7.75, 10.75, "16K (ROC)"),
    ("roc8k", "ROC_8K", Inches, 10.75, 15.5, "8K (ROC)"),
    ("PRC32K", "PRC_32K", Millimetres, 97.0, 151.0, "32K (PRC)"),
    ("EnvPRC1", "PRC_1", Millimetres, 102.0, 165.0, "EnvPRC1"),
    ("EnvPRC2", "PRC_2", Millimetres, 102.0, 176.0, "EnvPRC2"),
    ("EnvPRC4", "PRC_4", Millimetres, 110.0, 208.0, "EnvPRC4"),
    ("EnvPRC5", "PRC_5", Millimetres, 110.0, 220.0, "EnvPRC5"),
    ("EnvPRC8", "PRC_8", Millimetres, 120.0, 309.0, "EnvPRC8"),
    ("EnvPRC6", "PRC_6", Millimetres, 120.0, 230.0, "EnvPRC6"),
    ("EnvPRC3", "PRC_3", Millimetres, 125.0, 176.0, "EnvPRC3"),
    ("PRC16K", "PRC_16K", Millimetres, 146.0, 215.0, "PRC16K"),
    ("EnvPRC7", "PRC_7", Millimetres, 160.0, 230.0, "EnvPRC7"),
    ("A0", "ISO_A0", Millimetres, 841.0, 1189.0, "A0"),
    ("A1", "ISO_A1", Millimetres, 594.0, 841.0, "A1"),
    ("A2", "ISO_A2", Millimetres, 420.0, 594.0, "A2"),
    ("A3", "ISO_A3", Millimetres, 297.0, 420.0, "A3"),
    ("A3Extra", "ISO_A3_EXTRA", Millimetres, 322.0, 445.0, "A3 Extra"),
    ("A4", "ISO_A4", Millimetres, 210.0, 297.0, "A4"),
    ("A4Extra", "ISO_A4_EXTRA", Millimetres, 235.5, 322.3, "A4 Extra"),
    ("A4Tab", "ISO_A4_TAB", Millimetres, 225.0, 297.0, "A4 Tab"),
    ("A5", "ISO_A5", Millimetres, 148.0, 210.0, "A5"),
    ("A5Extra", "ISO_A5_EXTRA", Millimetres, 174.0, 235.0, "A5 Extra"),
    ("A6", "ISO_A6", Millimetres, 105.0, 148.0, "A6"),
    ("A7", "ISO_A7", Millimetres, 74.0, 105.0, "A7"),
    ("A8", "ISO_A8", Millimetres, 52.0, 74.0, "A8"),
    ("A9", "ISO_A9", Millimetres, 37.0, 52.0, "A9"),
    ("A10", "ISO_A10", Millimetres, 26.0, 37.0, "A10"),
    ("ISOB0", "ISO_B0", Millimetres, 1000.0, 1414.0, "B0 (ISO)"),
    ("ISOB1", "ISO_B1", Millimetres, 707.0, 1000.0, "B1 (ISO)"),
    ("ISOB2", "ISO_B2", Millimetres, 500.0, 707.0, "B2 (ISO)"),
    ("ISOB3", "ISO_B3", Millimetres, 353.0, 500.0, "B3 (ISO)"),
    ("ISOB4", "ISO_B4", Millimetres, 250.0, 353.0, "B4 (ISO)"),
    ("ISOB5", "ISO_B5", Millimetres, 176.0, 250.0, "B5 (ISO)"),
    ("EnvISOB5", "ISO_B5", Millimetres, 176.0, 250.0, "B5 Envelope (ISO)"),
    ("ISOB5Extra", "ISO_B5_EXTRA", Millimetres, 201.0, 276.0, "B5 Extra (ISO)"),
    ("ISOB6", "ISO_B6", Millimetres, 125.0, 176.0, "B6 (ISO)"),
    ("ISOB7", "ISO_B7", Millimetres, 88.0, 125.0, "B7 (ISO)"),
    ("ISOB8", "ISO_B8", Millimetres, 62.0, 88.0, "B8 (ISO)"),
    ("ISOB9", "ISO_B9", Millimetres, 44.0, 62.0, "B9 (ISO)"),
    ("ISOB10", "ISO_B10", Millimetres, 31.0, 44.0, "B10 (ISO)"),
    ("EnvC0", "ISO_C0", Millimetres, 917.0, 1297.0, "C0 (ISO)"),
    ("EnvC1", "ISO_C1", Millimetres, 648.0, 917.0, "C1 (ISO)"),
    ("EnvC2", "ISO_C2", Millimetres, 458.0, 648.0, "C2 (ISO)"),
    ("EnvC3", "ISO_C3", Millimetres, 324.0, 458.0, "C3 (ISO)"),
    ("EnvC4", "ISO_C4", Millimetres, 229.0, 324.0, "C4 (ISO)"),
    ("EnvC5", "ISO_C5", Millimetres, 162.0, 229.0, "C5 (ISO)"),
    ("EnvC6", "ISO_C6", Millimetres, 114.0, 162.0, "C6 (ISO)"),
    ("EnvC65", "ISO_C6C5", Millimetres, 114.0, 229.0, "C6c5 (ISO)"),
    ("EnvC7", "ISO_C7", Millimetres, 81.0, 114.0, "C7 (ISO)"),
    ("EnvDL", "ISO_DL", Millimetres, 110.0, 220.0, "DL Envelope"),
    ("DLEnv", "ISO_DL", Millimetres, 110.0, 220.0, "DL Envelope"),
    ("RA0", "ISO_RA0", Millimetres, 860.0, 1220.0, "RA0"),
    ("RA1", "ISO_RA1", Millimetres, 610.0, 860.0, "RA1"),
    ("RA2", "ISO_RA2", Millimetres, 430.0, 610.0, "RA2"),
    ("RA3", "CUSTOM", Millimetres, 305.0, 430.0, "RA3"),
    ("RA4", "CUSTOM", Millimetres, 215.0, 305.0, "RA4"),
    ("SRA0", "ISO_SRA0", Millimetres, 900.0, 1280.0, "SRA0"),
    ("SRA1", "ISO_SRA1", Millimetres, 640.0, 900.0, "SRA1"),
    ("SRA2", "ISO_SRA2", Millimetres, 450.0, 640.0, "SRA2"),
    ("SRA3", "CUSTOM", Millimetres, 320.0, 450.0, "SRA3"),
    ("SRA4", "CUSTOM", Millimetres, 225.0, 320.0, "SRA4"),
    ("JISB0", "JIS_B0", Millimetres, 1030.0, 1456.0, "B0 (JIS)"),
    ("B0JIS", "JIS_B0", Millimetres, 1030.0, 1456.0, "B0 (JIS)"),
    ("B0", "JIS_B0", Millimetres, 1030.0, 1456.0, "B0 (JIS)"),
    ("JISB1", "JIS_B1", Millimetres, 728.0, 1030.0, "B1 (JIS)"),
    ("B1JIS", "JIS_B1", Millimetres, 728.0, 1030.0, "B1 (JIS)"),
    ("B1", "JIS_B1", Millimetres, 728.0, 1030.0, "B1 (JIS)"),
    ("JISB2", "JIS_B2", Millimetres, 515.0, 728.0, "B2 (JIS)"),
    ("B2JIS", "JIS_B2", Millimetres, 515.0, 728.0, "B2 (JIS)"),
    ("B2", "JIS_B2", Millimetres, 515.0, 728.0, "B2 (JIS)"),
    ("JISB3", "JIS_B3", Millimetres, 364.0, 515.0, "B3 (JIS)"),
    ("B3JIS", "JIS_B3", Millimetres, 364.0, 515.0, "B3 (JIS)"),
    ("B3", "JIS_B3", Millimetres, 364.0, 515.0, "B3 (JIS)"),
    ("JISB4", "JIS_B4", Millimetres, 257.0, 364.0, "B4 (JIS)"),
    ("B4JIS", "JIS_B4", Millimetres, 257.0, 364.0, "B4 (JIS)"),
    ("B4", "JIS_B4", Millimetres, 257.0, 364.0, "B4 (JIS)"),
    ("JISB5", "JIS_B5", Millimetres, 182.0, 257.0, "B5 (JIS)"),
    ("B5JIS", "JIS_B5", Millimetres, 182.0, 257.0, "B5 (JIS)"),
    ("B5", "JIS_B5", Millimetres, 182.0, 257.0, "B5 (JIS)"),
    ("JISB6", "JIS_B6", Millimetres, 128.0, 182.0, "B6 (JIS)"),
    ("B6JIS", "JIS_B6", Millimetres, 128.0, 182.0, "B6 (JIS)"),
    ("B6", "JIS_B6", Millimetres, 128.0, 182.0, "B6 (JIS)"),
    ("JISB7", "JIS_B7", Millimetres, 91.0, 128.0, "B7 (JIS)"),
    ("B7JIS", "JIS_B7", Millimetres, 91.0, 128.0, "B7 (JIS)"),
    ("B7", "JIS_B7", Millimetres, 91.0, 128.0, "B7 (JIS)"),
    ("JISB8", "JIS_B8", Millimetres, 64.0, 91.0, "B8 (JIS)"),
    ("B8JIS", "JIS_B8", Millimetres, 64.0, 91.0, "B8 (JIS)"),
    ("B8", "JIS_B8", Millimetres, 64.0, 91.0, "B8 (JIS)"),
    ("JISB9", "JIS_B9", Millimetres, 45.0, 64.0, "B9 (JIS)"),
    ("B9JIS", "JIS_B9", Millimetres, 45.0, 64.0, "B9 (JIS)"),
    ("B9", "JIS_B9", Millimetres, 45.0, 64.0, "B9 (JIS)"),
    ("JISB10", "JIS_B10", Millimetres, 32.0, 45.0, "B10 (JIS)"),
    ("B10JIS", "JIS_B10", Millimetres, 32.0, 45.0, "B10 (JIS)"),
    ("B10", "JIS_B10", Millimetres, 32.0, 45.0, "B10 (JIS)"),
    ("EnvChou4", "JPN_CHOU4", Millimetres, 90.0, 205.0, "EnvChou4"),
    ("Hagaki", "JPN_HAGAKI", Millimetres, 100.0, 148.0, "Hagaki"),
    ("JapanesePostCard", "JPN_HAGAKI", Millimetres, 100.0, 148.0, "Japanese Postcard"),
    ("Postcard", "JPN_HAGAKI", Millimetres, 100.0, 148.0, "Postcard"),
    ("EnvYou4", "JPN_YOU4", Millimetres, 105.0, 235.0, "EnvYou4"),
    ("EnvChou3", "JPN_CHOU3", Millimetres, 120.0, 235.0, "EnvChou3"),
    ("Oufuku", "JPN_OUFUKU", Millimetres, 148.0, 200.0, "Oufuku"),
    ("DoublePostcardRotated", "JPN_OUFUKU", Millimetres, 148.0, 200.0, "Double Postcard Rotated"),
    ("EnvKaku2", "JPN_KAKU2", Millimetres, 240.0, 332.0, "EnvKaku2"),
    ("om_small-photo", "OM_SMALL_PHOTO", Millimetres, 100.0, 150.0, "Small Photo"),
    ("EnvItalian", "OM_ITALIAN", Millimetres, 110.0, 230.0, "EnvItalian"),
    ("om_large-photo", "OM_LARGE_PHOTO", Millimetres, 200.0, 300.0, "Large Photo"),
    ("Folio", "OM_FOLIO", Millimetres, 210.0, 330.0, "Folio"),
    ("FolioSP", "OM_FOLIO_SP", Millimetres, 215.0, 315.0, "FolioSP"),
    ("EnvInvite", "OM_INVITE", Millimetres, 220.0, 220.0, "EnvInvite"),
    ("8Kai", "CUSTOM", Inches, 10.5, 15.375, "8 Kai"),
    ("8K", "CUSTOM", Inches, 10.5, 15.375, "8 Kai"),
    ("16Kai", "CUSTOM", Inches, 7.6875, 10.5, "16 Kai"),
    ("16K", "CUSTOM", Inches, 7.6875, 10.5, "16 Kai"),
];

static BY_KEYWORD: Lazy<HashMap<&'static str, &'static KnownSize>> =
    Lazy::new(|| KNOWN_SIZES.iter().map(|size| (size.0, size)).collect());

fn known_size(keyword: &str) -> Option<MediaSizeOption> {
    let &(_, name, unit, width, height, display) = *BY_KEYWORD.get(keyword)?;
    Some(MediaSizeOption {
        name: name.to_owned(),
        width_microns: unit.to_microns(width),
        height_microns: unit.to_microns(height),
        is_continuous_feed: false,
        is_default: false,
        vendor_id: keyword.to_owned(),
        custom_display_name_localized: Some(localized(display)),
    })
}

/// Parse `WIDTHxHEIGHT[mm|in]` from the keyword, then from the translation.
/// The unit suffix after the height decides; no suffix means inches.
fn custom_size(keyword: &str, translation: &str) -> Option<MediaSizeOption> {
    let found = CUSTOM_SIZE
        .captures(keyword)
        .or_else(|| CUSTOM_SIZE.captures(translation))?;

    let width: f32 = found[1].parse().ok()?;
    let height: f32 = found[2].parse().ok()?;
    let unit = match found.get(3).map(|m| m.as_str()) {
        Some("mm") => Millimetres,
        _ => Inches,
    };

    Some(MediaSizeOption {
        name: MEDIA_SIZE_CUSTOM.to_owned(),
        width_microns: unit.to_microns(width),
        height_microns: unit.to_microns(height),
        is_continuous_feed: false,
        is_default: false,
        vendor_id: keyword.to_owned(),
        custom_display_name_localized: Some(localized(translation)),
    })
}

pub fn convert_media_size(entry: &Entry) -> Option<MediaSize> {
    let mut options = Vec::with_capacity(entry.options.len());
    for o in &entry.options {
        if o.option_keyword.ends_with(FULL_BLEED_SUFFIX) {
            continue;
        }
        let Some(mut size) = known_size(&o.option_keyword)
            .or_else(|| custom_size(&o.option_keyword, &o.translation))
        else {
            debug!(keyword = %o.option_keyword, "unrecognised page size; dropping");
            continue;
        };
        size.is_default = o.option_keyword == entry.default_value;
        options.push(size);
    }
    MediaSize::new(options)
}
