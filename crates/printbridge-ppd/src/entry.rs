// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// UI block to entry conversion.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::group::Block;
use crate::keywords;
use crate::statement::Statement;

/// Kind of user-selectable control declared by `*OpenUI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    PickOne,
    Boolean,
}

impl EntryKind {
    fn from_ui_type(value: &str) -> Option<Self> {
        match value {
            keywords::PICK_ONE => Some(Self::PickOne),
            keywords::BOOLEAN => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// One user-selectable control with its choices.
///
/// `options` is never empty and `default_value` always names one of the
/// options' keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub main_keyword: String,
    pub translation: String,
    pub kind: EntryKind,
    pub default_value: String,
    pub options: Vec<Statement>,
}

impl Entry {
    /// Build an entry from a UI block, or `None` when the block is unusable.
    pub fn from_block(block: &[Statement]) -> Option<Self> {
        let open_ui = block.first()?;
        let main_keyword = open_ui
            .option_keyword
            .trim_start_matches('*')
            .to_owned();
        if main_keyword.is_empty() {
            return None;
        }

        let kind = match EntryKind::from_ui_type(&open_ui.value) {
            Some(kind) => kind,
            None if open_ui.value == keywords::PICK_MANY => {
                warn!(keyword = %main_keyword, "PickMany UI entries are not supported; skipping");
                return None;
            }
            None => {
                debug!(keyword = %main_keyword, ui_type = %open_ui.value, "unknown UI type; skipping");
                return None;
            }
        };

        let translation = if open_ui.translation.is_empty() {
            main_keyword.clone()
        } else {
            open_ui.translation.clone()
        };

        let default_keyword = format!("{}{}", keywords::DEFAULT, main_keyword);
        let mut default_value = String::new();
        let mut options = Vec::new();
        for s in &block[1..] {
            if s.main_keyword == default_keyword {
                default_value = s.value.clone();
            } else if s.main_keyword.starts_with(&main_keyword) && !s.option_keyword.is_empty() {
                options.push(s.clone());
            }
        }

        let first = options.first()?;
        if !options.iter().any(|o| o.option_keyword == default_value) {
            default_value = first.option_keyword.clone();
        }

        Some(Self {
            main_keyword,
            translation,
            kind,
            default_value,
            options,
        })
    }
}

/// Entries indexed both ways the capability mappers need them.
///
/// When two blocks share a key the later one wins.
#[derive(Debug, Clone, Default)]
pub struct Entries {
    pub by_main_keyword: HashMap<String, Entry>,
    pub by_translation: HashMap<String, Entry>,
}

impl Entries {
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut entries = Self::default();
        for entry in blocks.iter().filter_map(|b| Entry::from_block(b)) {
            entries
                .by_translation
                .insert(entry.translation.clone(), entry.clone());
            entries.by_main_keyword.insert(entry.main_keyword.clone(), entry);
        }
        entries
    }

    pub fn get(&self, main_keyword: &str) -> Option<&Entry> {
        self.by_main_keyword.get(main_keyword)
    }

    pub fn by_translation(&self, translation: &str) -> Option<&Entry> {
        self.by_translation.get(translation)
    }

    /// The first entry present among `main_keywords`, in preference order.
    pub fn first_of(&self, main_keywords: &[&str]) -> Option<&Entry> {
        main_keywords.iter().find_map(|k| self.get(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::group_statements;
    use crate::statement::parse_statements;

    fn entries(ppd: &str) -> Entries {
        Entries::from_blocks(&group_statements(parse_statements(ppd)).ui)
    }

    #[test]
    fn pick_one_entry() {
        let e = entries(
            "*PPD-Adobe: \"4.3\"\n*OpenUI *OutputBin/Destination: PickOne\n*OrderDependency: 210 AnySetup *OutputBin\n*DefaultOutputBin: Bin1\n*OutputBin Standard/Internal Tray 1: \"\"\n*OutputBin Bin1/Internal Tray 2: \"\"\n*CloseUI: *OutputBin",
        );
        let bin = e.get("OutputBin").unwrap();
        assert_eq!(bin.kind, EntryKind::PickOne);
        assert_eq!(bin.translation, "Destination");
        assert_eq!(bin.default_value, "Bin1");
        assert_eq!(bin.options.len(), 2);
        assert!(e.by_translation("Destination").is_some());
    }

    #[test]
    fn translation_falls_back_to_keyword() {
        let e = entries(
            "*PPD-Adobe: \"4.3\"\n*OpenUI *Duplex: Boolean\n*DefaultDuplex: False\n*Duplex False: \"\"\n*Duplex True: \"\"\n*CloseUI: *Duplex",
        );
        let duplex = e.get("Duplex").unwrap();
        assert_eq!(duplex.kind, EntryKind::Boolean);
        assert_eq!(duplex.translation, "Duplex");
    }

    #[test]
    fn dangling_default_becomes_first_option() {
        let e = entries(
            "*PPD-Adobe: \"4.3\"\n*OpenUI *OutputBin/Destination: PickOne\n*DefaultOutputBin: FinProof\n*OutputBin Standard/Internal Tray 1: \"\"\n*OutputBin Bin1/Internal Tray 2: \"\"\n*CloseUI: *OutputBin",
        );
        assert_eq!(e.get("OutputBin").unwrap().default_value, "Standard");
    }

    #[test]
    fn pick_many_and_empty_blocks_are_skipped() {
        let e = entries(
            "*PPD-Adobe: \"4.3\"\n*OpenUI *Finishing/Finishing: PickMany\n*DefaultFinishing: None\n*Finishing None/None: \"\"\n*CloseUI: *Finishing\n*OpenUI *Empty/Empty: PickOne\n*DefaultEmpty: None\n*CloseUI: *Empty",
        );
        assert!(e.by_main_keyword.is_empty());
        assert!(e.by_translation.is_empty());
    }

    #[test]
    fn first_of_respects_preference() {
        let e = entries(
            "*PPD-Adobe: \"4.3\"\n*OpenUI *SelectColor/Select Color: PickOne\n*DefaultSelectColor: Color\n*SelectColor Color/Color: \"\"\n*CloseUI: *SelectColor\n*OpenUI *ColorModel/Color Mode: PickOne\n*DefaultColorModel: Gray\n*ColorModel Gray/Gray: \"\"\n*CloseUI: *ColorModel",
        );
        let chosen = e
            .first_of(&["ColorModel", "CMAndResolution", "SelectColor"])
            .unwrap();
        assert_eq!(chosen.main_keyword, "ColorModel");
    }
}
