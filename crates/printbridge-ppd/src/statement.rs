// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PPD statement scanner.
//
// A PPD is a sequence of directives, each starting with `*` at the beginning
// of a line:
//
//   *MainKeyword[ OptionKeyword][/Translation][: Value]
//
// Quoted values may span several lines and are terminated by an `*End`
// directive, which the scanner drops once the value has been captured.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::keywords;

/// Splits the document at every line break followed by a directive marker.
static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\r\n|\r|\n)\*").unwrap());

static STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^([^\s:/]+)",                     // Main keyword; required.
        r"(?:\s+([^/:]+))?",                // Option keyword.
        r"(?:/([^:]*))?",                   // Translation string.
        r#"(?::\s*(?:"([^"]*)"|(.*)))?\s*$"#, // Value, quoted first.
    ))
    .unwrap()
});

/// One parsed PPD directive.
///
/// `main_keyword` is never empty; the other fields are empty strings when
/// the directive omits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub main_keyword: String,
    pub option_keyword: String,
    pub translation: String,
    pub value: String,
}

impl Statement {
    pub fn new(main_keyword: &str, option_keyword: &str, translation: &str, value: &str) -> Self {
        Self {
            main_keyword: main_keyword.to_owned(),
            option_keyword: option_keyword.to_owned(),
            translation: translation.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Parse PPD text into its statements, in document order.
///
/// Comments (`*%`), queries (`*?`), `*End` markers, and lines that do not fit
/// the statement grammar are skipped.
pub fn parse_statements(ppd: &str) -> Vec<Statement> {
    let mut statements = Vec::new();

    for (i, line) in LINE_SPLIT.split(ppd).enumerate() {
        // Only the very first chunk still carries its directive marker.
        let line = if i == 0 {
            line.strip_prefix('*').unwrap_or(line)
        } else {
            line
        };
        if line.starts_with('%') || line.starts_with('?') {
            continue;
        }
        let Some(found) = STATEMENT.captures(line) else {
            continue;
        };

        let main_keyword = &found[1];
        if main_keyword == keywords::END {
            continue;
        }
        let group = |n: usize| found.get(n).map_or("", |m| m.as_str().trim());

        let quoted = group(4);
        let value = if quoted.is_empty() { group(5) } else { quoted };

        statements.push(Statement::new(main_keyword, group(2), group(3), value));
    }

    statements
}
