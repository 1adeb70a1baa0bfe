// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Manufacturer and model name normalisation.
//
// `*NickName` strings carry driver and firmware noise after the model
// ("LaserJet 4250 PS v3010.107 cups-team Letter+Duplex").  The noise tokens
// are stripped from the end one at a time until nothing more matches.

use once_cell::sync::Lazy;
use regex::Regex;

static MODEL_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\s+(",
        r"(w/)?PS2?3?(\(P\))?(,\s+[0-9\.]+)?|",
        r"pcl3?(,\s+\d+(\.\d+))*|",
        r"-|PXL|PDF|cups-team|CUPS\+Gutenprint\s+v\S+|\(?recommended\)?|",
        r"(A4|Letter)(\+Duplex)?|",
        r"Post[Ss]cript|BR-Script2?3?J?|",
        r"v[0-9\.]+|",
        r"\(?KPDL(-2)?\)?|",
        r"Foomatic/\S+|Epson Inkjet Printer Driver \(ESC/P-R\) for \S+|",
        r"(hpcups|hpijs|HPLIP),?\s+\d+(\.\d+)*|requires proprietary plugin",
        r")\s*$",
    ))
    .unwrap()
});

/// All-caps vendor names as printed in PPDs, and how to show them.
static MANUFACTURER_NAMES: &[(&str, &str)] = &[
    ("HEWLETT-PACKARD", "HP"),
    ("HEWLETT PACKARD", "HP"),
    ("KONICA MINOLTA", "Konica Minolta"),
    ("KONICAMINOLTA", "Konica Minolta"),
    ("RICOH", "Ricoh"),
    ("EPSON", "Epson"),
    ("CANON", "Canon"),
    ("BROTHER", "Brother"),
    ("KYOCERA", "Kyocera"),
    ("KYOCERA MITA", "Kyocera Mita"),
    ("LEXMARK", "Lexmark"),
    ("SAMSUNG", "Samsung"),
    ("XEROX", "Xerox"),
    ("SHARP", "Sharp"),
    ("TOSHIBA", "Toshiba"),
    ("OKI", "OKI"),
    ("OKI DATA CORP", "OKI"),
    ("DELL", "Dell"),
    ("GESTETNER", "Gestetner"),
    ("INFOTEC", "Infotec"),
    ("LANIER", "Lanier"),
    ("NRG", "NRG"),
    ("SAVIN", "Savin"),
];

/// Remove trailing driver noise from a model name, repeating until stable.
pub fn cleanup_model(model: &str) -> String {
    let mut model = model.to_owned();
    loop {
        let next = {
            let stripped = MODEL_NOISE.replace_all(&model, "");
            // The pattern needs leading whitespace; these suffixes attach directly.
            let stripped = stripped.strip_suffix(',').unwrap_or(&stripped);
            stripped.strip_suffix("(PS)").unwrap_or(stripped).to_owned()
        };
        if next == model {
            return model;
        }
        model = next;
    }
}

/// Display form of a manufacturer name.  Names not in the table are kept.
pub fn normalize_manufacturer(manufacturer: &str) -> String {
    MANUFACTURER_NAMES
        .iter()
        .find(|(raw, _)| raw.eq_ignore_ascii_case(manufacturer.trim()))
        .map_or_else(|| manufacturer.to_owned(), |(_, display)| (*display).to_owned())
}

/// Drop a leading copy of the manufacturer from the model, plus the spaces
/// after it.
pub fn strip_manufacturer(model: &str, manufacturer: &str) -> String {
    model
        .strip_prefix(manufacturer)
        .unwrap_or(model)
        .trim_start_matches(' ')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_noise_is_removed() {
        let cases = [
            ("C451 PS(P)", "C451"),
            ("MD-1000 Foomatic/md2k", "MD-1000"),
            ("M24 Foomatic/epson (recommended)", "M24"),
            ("LaserJet 2 w/PS Foomatic/Postscript (recommended)", "LaserJet 2"),
            ("8445 PS2", "8445"),
            ("AL-2600 PS3 v3016.103", "AL-2600"),
            ("AR-163FG PS, 1.1", "AR-163FG"),
            ("3212 PXL", "3212"),
            ("Aficio SP C431DN PDF cups-team recommended", "Aficio SP C431DN"),
            ("PIXMA Pro9000 - CUPS+Gutenprint v5.2.8-pre1", "PIXMA Pro9000"),
            ("LaserJet M401dne PS A4 cups-team recommended", "LaserJet M401dne"),
            ("LaserJet 4250 PS v3010.107 cups-team Letter+Duplex", "LaserJet 4250"),
            ("Designjet Z5200 PostScript - PS", "Designjet Z5200"),
            ("DCP-7025 BR-Script3", "DCP-7025"),
            ("HL-5070DN BR-Script3J", "HL-5070DN"),
            ("HL-1450 BR-Script2", "HL-1450"),
            ("FS-600 (KPDL-2) Foomatic/Postscript (recommended)", "FS-600"),
            (
                "XP-750 Series, Epson Inkjet Printer Driver (ESC/P-R) for Linux",
                "XP-750 Series",
            ),
            ("C5700(PS)", "C5700"),
            ("OfficeJet 7400 Foomatic/hpijs (recommended) - HPLIP 0.9.7", "OfficeJet 7400"),
            ("LaserJet p4015n, hpcups 3.13.9", "LaserJet p4015n"),
            (
                "Color LaserJet 3600 hpijs, 3.13.9, requires proprietary plugin",
                "Color LaserJet 3600",
            ),
            ("LaserJet 4250 pcl3, hpcups 3.13.9", "LaserJet 4250"),
            ("DesignJet T790 pcl, 1.0", "DesignJet T790"),
        ];
        for (input, expected) in cases {
            assert_eq!(cleanup_model(input), expected, "input: {input}");
        }
    }

    #[test]
    fn clean_models_are_untouched() {
        assert_eq!(cleanup_model("LaserJet 4250"), "LaserJet 4250");
        assert_eq!(cleanup_model(""), "");
    }

    #[test]
    fn manufacturers_are_title_cased() {
        assert_eq!(normalize_manufacturer("HEWLETT-PACKARD"), "HP");
        assert_eq!(normalize_manufacturer("KONICA MINOLTA"), "Konica Minolta");
        assert_eq!(normalize_manufacturer("Ricoh"), "Ricoh");
        assert_eq!(normalize_manufacturer("Acme Printing"), "Acme Printing");
    }

    #[test]
    fn manufacturer_prefix_is_stripped() {
        assert_eq!(strip_manufacturer("HP LaserJet 4250", "HP"), "LaserJet 4250");
        assert_eq!(strip_manufacturer("LaserJet 4250", "HP"), "LaserJet 4250");
        assert_eq!(strip_manufacturer("Ricoh", "Ricoh"), "");
    }
}
