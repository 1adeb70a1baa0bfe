// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Resolution entry to DPI capability.

use once_cell::sync::Lazy;
use printbridge_core::cdd::{Dpi, DpiOption, localized};
use regex::Regex;
use tracing::debug;

use crate::entry::Entry;

static RESOLUTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(?:x(\d+))?dpi$").unwrap());

/// `600dpi` or `1200x600dpi`; a missing vertical value repeats the
/// horizontal one.
fn parse_resolution(keyword: &str) -> Option<(i32, i32)> {
    let found = RESOLUTION.captures(keyword)?;
    let horizontal: i32 = found[1].parse().ok()?;
    let vertical = match found.get(2) {
        Some(v) => v.as_str().parse().ok()?,
        None => horizontal,
    };
    Some((horizontal, vertical))
}

pub fn convert_dpi(entry: &Entry) -> Option<Dpi> {
    let mut options = Vec::new();
    for o in &entry.options {
        let Some((horizontal_dpi, vertical_dpi)) = parse_resolution(&o.option_keyword) else {
            debug!(keyword = %o.option_keyword, "resolution keyword not in NNN[xMMM]dpi form; dropping");
            continue;
        };
        options.push(DpiOption {
            horizontal_dpi,
            vertical_dpi,
            is_default: o.option_keyword == entry.default_value,
            vendor_id: o.option_keyword.clone(),
            custom_display_name_localized: Some(localized(o.translation.as_str())),
        });
    }
    Dpi::new(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryKind;
    use crate::statement::Statement;

    #[test]
    fn parses_square_and_rectangular() {
        assert_eq!(parse_resolution("600dpi"), Some((600, 600)));
        assert_eq!(parse_resolution("1200x600dpi"), Some((1200, 600)));
        assert_eq!(parse_resolution("600x600"), None);
        assert_eq!(parse_resolution("99999999999dpi"), None);
    }

    #[test]
    fn non_matching_options_are_dropped() {
        let entry = Entry {
            main_keyword: "Resolution".into(),
            translation: "Resolution".into(),
            kind: EntryKind::PickOne,
            default_value: "1200x1200dpi".into(),
            options: vec![
                Statement::new("Resolution", "Draft", "Draft", ""),
                Statement::new("Resolution", "600dpi", "600 dpi", ""),
                Statement::new("Resolution", "1200x1200dpi", "1200 dpi", ""),
            ],
        };
        let dpi = convert_dpi(&entry).unwrap();
        assert_eq!(dpi.option.len(), 2);
        assert_eq!(dpi.option[0].vendor_id, "600dpi");
        assert!(!dpi.option[0].is_default);
        assert!(dpi.option[1].is_default);
        assert_eq!(dpi.option[1].custom_display_name_localized, Some(localized("1200 dpi")));
    }
}
