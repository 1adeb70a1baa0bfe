// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Statement grouping and installable-option constraint filtering.
//
// PPDs declare optional hardware (a duplexer, an extra tray) inside an
// `InstallableOptions` group.  `*UIConstraints` then says which regular UI
// choices are unusable given a particular installed configuration.  The
// filter keeps only the choices valid for the configuration that is
// declared as installed by default.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::keywords;
use crate::statement::Statement;

/// `*A a *B b`: choosing `a` for `A` forbids `b` for `B`.
static CONSTRAINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\*([^\s\*]+)\s+(\S+)\s+\*([^\s\*]+)\s+(\S+)$").unwrap());

/// A UI block: the opening `OpenUI` statement followed by its contents.
pub type Block = Vec<Statement>;

/// Statements sorted by the structure they appeared in.
///
/// Sub-groups and non-installable groups carry no meaning for translation
/// and are flattened away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedStatements {
    /// Regular user-selectable options.
    pub ui: Vec<Block>,
    /// Options describing installed hardware.
    pub installables: Vec<Block>,
    pub constraints: Vec<Statement>,
    /// Statements outside any block, e.g. `*Manufacturer`.
    pub standalone: Vec<Statement>,
}

/// Walk the statements once, tracking whether a UI block and an
/// installable-options group are currently open.
pub fn group_statements(statements: Vec<Statement>) -> GroupedStatements {
    let mut grouped = GroupedStatements::default();
    let mut inside_ui = false;
    let mut inside_installable = false;

    for s in statements {
        match s.main_keyword.as_str() {
            keywords::OPEN_UI | keywords::JCL_OPEN_UI => {
                inside_ui = true;
                if inside_installable {
                    grouped.installables.push(vec![s]);
                } else {
                    grouped.ui.push(vec![s]);
                }
            }
            keywords::CLOSE_UI | keywords::JCL_CLOSE_UI => inside_ui = false,
            keywords::OPEN_GROUP => {
                if s.value.starts_with(keywords::INSTALLABLE_OPTIONS) {
                    inside_installable = true;
                }
            }
            keywords::CLOSE_GROUP => {
                if s.value.starts_with(keywords::INSTALLABLE_OPTIONS) {
                    inside_installable = false;
                }
            }
            keywords::OPEN_SUB_GROUP | keywords::CLOSE_SUB_GROUP => {}
            keywords::UI_CONSTRAINTS => grouped.constraints.push(s),
            _ => {
                if inside_installable {
                    if let Some(block) = grouped.installables.last_mut() {
                        block.push(s);
                    }
                } else if inside_ui {
                    if let Some(block) = grouped.ui.last_mut() {
                        block.push(s);
                    }
                } else {
                    grouped.standalone.push(s);
                }
            }
        }
    }

    grouped
}

impl GroupedStatements {
    /// Drop every regular UI choice forbidden by a constraint whose trigger
    /// is an installed-option default.  Returns the filtered UI blocks.
    pub fn filter_constraints(&self) -> Vec<Block> {
        let installed_defaults: HashSet<(&str, &str)> = self
            .installables
            .iter()
            .flatten()
            .filter_map(|s| {
                s.main_keyword
                    .strip_prefix(keywords::DEFAULT)
                    .map(|ui_keyword| (ui_keyword, s.value.as_str()))
            })
            .collect();

        let mut forbidden: HashSet<(&str, &str)> = HashSet::new();
        for s in &self.constraints {
            let Some(c) = CONSTRAINT.captures(&s.value) else {
                continue;
            };
            let (a, a_value, b, b_value) = (
                c.get(1).map_or("", |m| m.as_str()),
                c.get(2).map_or("", |m| m.as_str()),
                c.get(3).map_or("", |m| m.as_str()),
                c.get(4).map_or("", |m| m.as_str()),
            );
            if installed_defaults.contains(&(a, a_value)) {
                forbidden.insert((b, b_value));
            }
        }

        if !forbidden.is_empty() {
            debug!(count = forbidden.len(), "UI choices forbidden by installed options");
        }

        self.ui
            .iter()
            .map(|block| {
                block
                    .iter()
                    .filter(|s| {
                        !forbidden.contains(&(s.main_keyword.as_str(), s.option_keyword.as_str()))
                    })
                    .cloned()
                    .collect()
            })
            .collect()
    }
}
