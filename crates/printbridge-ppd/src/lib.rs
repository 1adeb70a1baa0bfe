// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PrintBridge PPD: turns PostScript Printer Description text into cloud
// capability descriptors.
//
// The pipeline is a chain of pure functions:
//
//   text ─▶ statement ─▶ group (+ constraint filter) ─▶ entry ─▶ mappers
//
// Nothing here touches the network or the filesystem, so translations for
// different printers can run in parallel without coordination.

pub mod color;
pub mod duplex;
pub mod entry;
pub mod group;
pub mod keywords;
pub mod media;
pub mod model;
pub mod resolution;
pub mod standalone;
pub mod statement;
pub mod translate;
pub mod units;
pub mod vendor;

pub use entry::{Entries, Entry, EntryKind};
pub use statement::Statement;
pub use translate::{PpdTranslation, translate_ppd};
