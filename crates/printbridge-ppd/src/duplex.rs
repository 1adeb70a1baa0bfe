// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Duplex entry (Duplex, KMDuplex) to duplex capability.

use printbridge_core::cdd::{Duplex, DuplexOption, DuplexType};

use crate::entry::Entry;
use crate::keywords;

/// Classify a duplex option keyword, including Konica Minolta synonyms and
/// the `1...`/`2...` sided-ness convention some drivers use.
fn duplex_type(keyword: &str) -> Option<DuplexType> {
    match keyword {
        keywords::NONE | keywords::FALSE | keywords::KM_DUPLEX_SINGLE => Some(DuplexType::NoDuplex),
        keywords::DUPLEX_NO_TUMBLE | keywords::TRUE | keywords::KM_DUPLEX_DOUBLE => {
            Some(DuplexType::LongEdge)
        }
        keywords::DUPLEX_TUMBLE | keywords::KM_DUPLEX_BOOKLET => Some(DuplexType::ShortEdge),
        k if k.starts_with('1') => Some(DuplexType::NoDuplex),
        k if k.starts_with('2') => Some(DuplexType::LongEdge),
        _ => None,
    }
}

pub fn convert_duplex(entry: &Entry) -> Option<Duplex> {
    let options = entry
        .options
        .iter()
        .filter_map(|o| {
            Some(DuplexOption {
                duplex_type: duplex_type(&o.option_keyword)?,
                is_default: o.option_keyword == entry.default_value,
                vendor_id: o.option_keyword.clone(),
            })
        })
        .collect();
    Duplex::new(options, entry.main_keyword.as_str())
}
