// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PPD keywords the translator recognises.  Matching is case-sensitive.

// -- Structure --
pub const OPEN_UI: &str = "OpenUI";
pub const CLOSE_UI: &str = "CloseUI";
pub const JCL_OPEN_UI: &str = "JCLOpenUI";
pub const JCL_CLOSE_UI: &str = "JCLCloseUI";
pub const OPEN_GROUP: &str = "OpenGroup";
pub const CLOSE_GROUP: &str = "CloseGroup";
pub const OPEN_SUB_GROUP: &str = "OpenSubGroup";
pub const CLOSE_SUB_GROUP: &str = "CloseSubGroup";
pub const UI_CONSTRAINTS: &str = "UIConstraints";
pub const INSTALLABLE_OPTIONS: &str = "InstallableOptions";
pub const DEFAULT: &str = "Default";
pub const END: &str = "End";

// -- OpenUI types --
pub const PICK_ONE: &str = "PickOne";
pub const PICK_MANY: &str = "PickMany";
pub const BOOLEAN: &str = "Boolean";

// -- Capabilities --
pub const PAGE_SIZE: &str = "PageSize";
pub const COLOR_MODEL: &str = "ColorModel";
pub const CM_AND_RESOLUTION: &str = "CMAndResolution";
pub const SELECT_COLOR: &str = "SelectColor";
pub const DUPLEX: &str = "Duplex";
pub const KM_DUPLEX: &str = "KMDuplex";
pub const RESOLUTION: &str = "Resolution";
pub const OUTPUT_BIN: &str = "OutputBin";
pub const JOB_TYPE: &str = "JobType";
pub const LOCKED_PRINT: &str = "LockedPrint";
pub const LOCKED_PRINT_PASSWORD: &str = "LockedPrintPassword";
pub const PRINT_QUALITY_TRANSLATION: &str = "Print Quality";

// -- Stand-alone statements --
pub const MANUFACTURER: &str = "Manufacturer";
pub const NICK_NAME: &str = "NickName";
pub const HW_MARGINS: &str = "HWMargins";
pub const THROUGHPUT: &str = "Throughput";

// -- Duplex option keywords --
pub const NONE: &str = "None";
pub const FALSE: &str = "False";
pub const TRUE: &str = "True";
pub const DUPLEX_NO_TUMBLE: &str = "DuplexNoTumble";
pub const DUPLEX_TUMBLE: &str = "DuplexTumble";
pub const KM_DUPLEX_SINGLE: &str = "Single";
pub const KM_DUPLEX_DOUBLE: &str = "Double";
pub const KM_DUPLEX_BOOKLET: &str = "Booklet";

// Neither character may appear in PPD main or option keywords, so they are
// safe separators inside vendor capability IDs.  `A:B/C` reads as two
// options: A=B and C=<ticket value>.
pub const INTERNAL_KEY_SEPARATOR: &str = ":";
pub const INTERNAL_VALUE_SEPARATOR: &str = "/";
