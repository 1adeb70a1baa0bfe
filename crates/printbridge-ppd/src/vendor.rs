// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generic entries to vendor capabilities.

use printbridge_core::cdd::{
    SelectCapability, SelectCapabilityOption, TypedValueCapability, TypedValueType,
    VendorCapability, localized,
};

use crate::entry::{Entry, EntryKind};
use crate::keywords;

/// Display name of the Ricoh locked-print password capability.
pub const LOCKED_PRINT_PASSWORD_DISPLAY_NAME: &str = "Password (4 numbers)";

/// `JobType:LockedPrint/LockedPrintPassword`: selecting the password sets
/// `JobType=LockedPrint` and `LockedPrintPassword=<value>`.
pub fn locked_print_password_id() -> String {
    format!(
        "{}{}{}{}{}",
        keywords::JOB_TYPE,
        keywords::INTERNAL_KEY_SEPARATOR,
        keywords::LOCKED_PRINT,
        keywords::INTERNAL_VALUE_SEPARATOR,
        keywords::LOCKED_PRINT_PASSWORD,
    )
}

/// Pick-one entries become select capabilities, boolean entries become
/// typed boolean values carrying the declared default.
pub fn convert_vendor_capability(entry: &Entry) -> Option<VendorCapability> {
    match entry.kind {
        EntryKind::PickOne => {
            let options = entry
                .options
                .iter()
                .map(|o| SelectCapabilityOption {
                    value: o.option_keyword.clone(),
                    is_default: o.option_keyword == entry.default_value,
                    display_name_localized: Some(localized(o.translation.as_str())),
                })
                .collect();
            let select = SelectCapability::new(options)?;
            Some(VendorCapability::select(
                entry.main_keyword.as_str(),
                &entry.translation,
                select,
            ))
        }
        EntryKind::Boolean => Some(VendorCapability::typed_value(
            entry.main_keyword.as_str(),
            &entry.translation,
            TypedValueCapability {
                value_type: TypedValueType::Boolean,
                default: Some(entry.default_value.clone()),
            },
        )),
    }
}

/// Collapse Ricoh's `JobType` + `LockedPrintPassword` pair into a single
/// password field.  Only applies when `JobType` offers `LockedPrint`.
pub fn convert_locked_print_password(
    job_type: &Entry,
    _locked_print_password: &Entry,
) -> Option<VendorCapability> {
    job_type
        .options
        .iter()
        .any(|o| o.option_keyword == keywords::LOCKED_PRINT)
        .then(|| {
            VendorCapability::typed_value(
                locked_print_password_id(),
                LOCKED_PRINT_PASSWORD_DISPLAY_NAME,
                TypedValueCapability {
                    value_type: TypedValueType::String,
                    default: None,
                },
            )
        })
}
