// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PPD to cloud device description translation.

use printbridge_core::cdd::PrinterDescriptionSection;
use tracing::{debug, instrument};

use crate::color::convert_color;
use crate::duplex::convert_duplex;
use crate::entry::Entries;
use crate::group::group_statements;
use crate::keywords;
use crate::media::convert_media_size;
use crate::model::{cleanup_model, normalize_manufacturer, strip_manufacturer};
use crate::resolution::convert_dpi;
use crate::standalone::{convert_margins, convert_printing_speed};
use crate::statement::parse_statements;
use crate::vendor::{convert_locked_print_password, convert_vendor_capability};

/// Everything a PPD tells us about a printer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PpdTranslation {
    pub description: PrinterDescriptionSection,
    /// Empty when the PPD has no `*Manufacturer`.
    pub manufacturer: String,
    /// Empty when the PPD has no `*NickName`.
    pub model: String,
}

/// Translate PPD text.  Sections the PPD does not describe are left `None`;
/// malformed content degrades to missing sections rather than an error.
#[instrument(skip_all, fields(ppd_len = ppd.len()))]
pub fn translate_ppd(ppd: &str) -> PpdTranslation {
    let grouped = group_statements(parse_statements(ppd));
    let entries = Entries::from_blocks(&grouped.filter_constraints());

    let mut description = PrinterDescriptionSection {
        media_size: entries.get(keywords::PAGE_SIZE).and_then(convert_media_size),
        color: entries
            .first_of(&[
                keywords::COLOR_MODEL,
                keywords::CM_AND_RESOLUTION,
                keywords::SELECT_COLOR,
            ])
            .and_then(convert_color),
        duplex: entries
            .first_of(&[keywords::DUPLEX, keywords::KM_DUPLEX])
            .and_then(convert_duplex),
        dpi: entries.get(keywords::RESOLUTION).and_then(convert_dpi),
        ..Default::default()
    };

    let mut vendor = Vec::new();
    vendor.extend(
        entries
            .get(keywords::OUTPUT_BIN)
            .and_then(convert_vendor_capability),
    );
    if let (Some(job_type), Some(password)) = (
        entries.get(keywords::JOB_TYPE),
        entries.get(keywords::LOCKED_PRINT_PASSWORD),
    ) {
        vendor.extend(convert_locked_print_password(job_type, password));
    }
    vendor.extend(
        entries
            .by_translation(keywords::PRINT_QUALITY_TRANSLATION)
            .and_then(convert_vendor_capability),
    );
    description.vendor_capability = (!vendor.is_empty()).then_some(vendor);

    let mut manufacturer = String::new();
    let mut model = String::new();
    for s in &grouped.standalone {
        match s.main_keyword.as_str() {
            keywords::MANUFACTURER => manufacturer = s.value.clone(),
            keywords::NICK_NAME => model = cleanup_model(&s.value),
            keywords::HW_MARGINS => description.margins = convert_margins(&s.value),
            keywords::THROUGHPUT => {
                description.printing_speed =
                    convert_printing_speed(&s.value, description.color.as_ref());
            }
            _ => {}
        }
    }

    let display_manufacturer = normalize_manufacturer(&manufacturer);
    let mut model = strip_manufacturer(&model, &manufacturer);
    if display_manufacturer != manufacturer {
        model = strip_manufacturer(&model, &display_manufacturer);
    }

    debug!(
        manufacturer = %display_manufacturer,
        model = %model,
        "translated PPD"
    );

    PpdTranslation {
        description,
        manufacturer: display_manufacturer,
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{inches_to_microns, mm_to_microns};
    use printbridge_core::cdd::{
        ColorType, DuplexType, MEDIA_SIZE_CUSTOM, TypedValueType, VendorCapabilityType, localized,
    };

    fn describe(ppd: &str) -> PrinterDescriptionSection {
        translate_ppd(ppd).description
    }

    #[test]
    fn printing_speed_only() {
        let d = describe("*PPD-Adobe: \"4.3\"\n*Throughput: \"30\"");
        let speed = d.printing_speed.unwrap();
        assert_eq!(speed.option[0].speed_ppm, 30.0);
        assert!(speed.option[0].color_type.is_none());
        assert!(d.vendor_capability.is_none());
        assert!(d.media_size.is_none());
    }

    #[test]
    fn media_sizes() {
        let ppd = r#"*PPD-Adobe: "4.3"
*OpenUI *PageSize: PickOne
*DefaultPageSize: Letter
*PageSize A3/A3: ""
*PageSize ISOB5/B5 - ISO: ""
*PageSize B5/B5 - JIS: ""
*PageSize Letter/Letter: ""
*PageSize HalfLetter/5.5x8.5: ""
*CloseUI: *PageSize"#;
        let media = describe(ppd).media_size.unwrap();
        let summary: Vec<_> = media
            .option
            .iter()
            .map(|o| {
                (
                    o.name.as_str(),
                    o.width_microns,
                    o.height_microns,
                    o.is_default,
                    o.vendor_id.as_str(),
                    o.custom_display_name_localized.clone(),
                )
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("ISO_A3", mm_to_microns(297.0), mm_to_microns(420.0), false, "A3", Some(localized("A3"))),
                ("ISO_B5", mm_to_microns(176.0), mm_to_microns(250.0), false, "ISOB5", Some(localized("B5 (ISO)"))),
                ("JIS_B5", mm_to_microns(182.0), mm_to_microns(257.0), false, "B5", Some(localized("B5 (JIS)"))),
                ("NA_LETTER", 215_900, 279_400, true, "Letter", Some(localized("Letter"))),
                (
                    MEDIA_SIZE_CUSTOM,
                    inches_to_microns(5.5),
                    inches_to_microns(8.5),
                    false,
                    "HalfLetter",
                    Some(localized("5.5x8.5"))
                ),
            ]
        );
    }

    #[test]
    fn color_model_preferred_over_select_color() {
        let ppd = r#"*PPD-Adobe: "4.3"
*OpenUI  *SelectColor/Select Color: PickOne
*OrderDependency: 10 AnySetup *SelectColor
*DefaultSelectColor: Color
*SelectColor Color/Color:  "<</ProcessColorModel /DeviceCMYK>> setpagedevice"
*SelectColor Grayscale/Grayscale:  "<</ProcessColorModel /DeviceGray>> setpagedevice"
*CloseUI: *SelectColor
*OpenUI *ColorModel/Color Mode: PickOne
*DefaultColorModel: Gray
*ColorModel CMYK/Color: "(cmyk) RCsetdevicecolor"
*ColorModel Gray/Black and White: "(gray) RCsetdevicecolor"
*CloseUI: *ColorModel"#;
        let color = describe(ppd).color.unwrap();
        assert_eq!(color.vendor_key, "ColorModel");
        assert_eq!(color.option[1].vendor_id, "Gray");
        assert!(color.option[1].is_default);
    }

    #[test]
    fn select_color_alone() {
        let ppd = r#"*PPD-Adobe: "4.3"
*OpenUI  *SelectColor/Select Color: PickOne
*DefaultSelectColor: Color
*SelectColor Color/Color:  "<</ProcessColorModel /DeviceCMYK>> setpagedevice"
*SelectColor Grayscale/Grayscale:  "<</ProcessColorModel /DeviceGray>> setpagedevice"
*CloseUI: *SelectColor
"#;
        let color = describe(ppd).color.unwrap();
        assert_eq!(color.vendor_key, "SelectColor");
        assert_eq!(color.option[0].color_type, ColorType::StandardColor);
        assert!(color.option[0].is_default);
        assert_eq!(color.option[1].color_type, ColorType::StandardMonochrome);
        assert_eq!(color.option[1].custom_display_name_localized, Some(localized("Grayscale")));
    }

    #[test]
    fn cm_and_resolution_with_multi_line_values() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *CMAndResolution/Print Color as Gray: PickOne\n*OrderDependency: 20 AnySetup *CMAndResolution\n*DefaultCMAndResolution: CMYKImageRET3600\n*CMAndResolution CMYKImageRET3600/Off: \"\n  <</ProcessColorModel /DeviceCMYK /HWResolution [600 600] >> setpagedevice\"\n*End\n*CMAndResolution Gray600x600dpi/On: \"\n  <</ProcessColorModel /DeviceGray /HWResolution [600 600] >> setpagedevice\"\n*End\n*CloseUI: *CMAndResolution\n";
        let color = describe(ppd).color.unwrap();
        assert_eq!(color.vendor_key, "CMAndResolution");
        let names: Vec<_> = color
            .option
            .iter()
            .map(|o| (o.vendor_id.as_str(), o.color_type, o.is_default))
            .collect();
        assert_eq!(
            names,
            vec![
                ("CMYKImageRET3600", ColorType::StandardColor, true),
                ("Gray600x600dpi", ColorType::StandardMonochrome, false),
            ]
        );
        assert_eq!(color.option[0].custom_display_name_localized, Some(localized("Color")));
        assert_eq!(color.option[1].custom_display_name_localized, Some(localized("Gray")));
    }

    #[test]
    fn km_duplex_booklet() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI  *KMDuplex/Print Type: PickOne\n*OrderDependency: 5 AnySetup *KMDuplex\n*DefaultKMDuplex: Double\n*KMDuplex Single/1-Sided:  \"<< /Duplex false >> setpagedevice\n << /Layout 0 >> /KMOptions /ProcSet findresource /setKMoptions get exec\"\n*End\n*KMDuplex Double/2-Sided:  \"<< /Duplex true >> setpagedevice\n << /Layout 0 >> /KMOptions /ProcSet findresource /setKMoptions get exec\"\n*End\n*KMDuplex Booklet/Booklet:  \"<< /Duplex true >> setpagedevice\n << /Layout 1 >> /KMOptions /ProcSet findresource /setKMoptions get exec\"\n*End\n*CloseUI: *KMDuplex\n";
        let duplex = describe(ppd).duplex.unwrap();
        assert_eq!(duplex.vendor_key, "KMDuplex");
        let summary: Vec<_> = duplex
            .option
            .iter()
            .map(|o| (o.duplex_type, o.is_default, o.vendor_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (DuplexType::NoDuplex, false, "Single"),
                (DuplexType::LongEdge, true, "Double"),
                (DuplexType::ShortEdge, false, "Booklet"),
            ]
        );
    }

    #[test]
    fn duplex_preferred_over_km_duplex() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *KMDuplex/Duplex: Boolean\n*DefaultKMDuplex: False\n*KMDuplex False/Off: \"\"\n*KMDuplex True/On: \"\"\n*CloseUI: *KMDuplex\n*OpenUI *Duplex/Duplex: PickOne\n*DefaultDuplex: None\n*Duplex None/Off: \"\"\n*Duplex DuplexNoTumble/Long Edge: \"\"\n*CloseUI: *Duplex";
        let duplex = describe(ppd).duplex.unwrap();
        assert_eq!(duplex.vendor_key, "Duplex");
        assert_eq!(duplex.option.len(), 2);
        assert!(duplex.option[0].is_default);
    }

    #[test]
    fn resolutions() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *Resolution/Resolution: PickOne\n*DefaultResolution: 600dpi\n*Resolution 600dpi/600 dpi: \"\"\n*Resolution 1200x600dpi/1200x600 dpi: \"\"\n*Resolution 1200x1200dpi/1200 dpi: \"\"\n*CloseUI: *Resolution";
        let dpi = describe(ppd).dpi.unwrap();
        let summary: Vec<_> = dpi
            .option
            .iter()
            .map(|o| (o.horizontal_dpi, o.vertical_dpi, o.is_default, o.vendor_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (600, 600, true, "600dpi"),
                (1200, 600, false, "1200x600dpi"),
                (1200, 1200, false, "1200x1200dpi"),
            ]
        );
    }

    #[test]
    fn output_bin_with_dangling_default() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *OutputBin/Destination: PickOne\n*OrderDependency: 210 AnySetup *OutputBin\n*DefaultOutputBin: FinProof\n*OutputBin Standard/Internal Tray 1: \"\"\n*OutputBin Bin1/Internal Tray 2: \"\"\n*OutputBin External/External Tray: \"\"\n*CloseUI: *OutputBin";
        let vendor = describe(ppd).vendor_capability.unwrap();
        assert_eq!(vendor.len(), 1);
        assert_eq!(vendor[0].id, "OutputBin");
        assert_eq!(vendor[0].capability_type, VendorCapabilityType::Select);
        assert_eq!(vendor[0].display_name_localized, Some(localized("Destination")));
        let options = &vendor[0].select_cap.as_ref().unwrap().option;
        let defaults: Vec<_> = options.iter().map(|o| o.is_default).collect();
        assert_eq!(defaults, vec![true, false, false]);
        assert_eq!(options[0].display_name_localized, Some(localized("Internal Tray 1")));
    }

    #[test]
    fn print_quality_found_by_translation() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *HPPrintQuality/Print Quality: PickOne\n*DefaultHPPrintQuality: FastRes1200\n*HPPrintQuality FastRes1200/FastRes 1200: \"\"\n*HPPrintQuality 600dpi/600 dpi: \"\"\n*HPPrintQuality ProRes1200/ProRes 1200: \"\"\n*CloseUI: *HPPrintQuality";
        let vendor = describe(ppd).vendor_capability.unwrap();
        assert_eq!(vendor[0].id, "HPPrintQuality");
        assert_eq!(vendor[0].display_name_localized, Some(localized("Print Quality")));
        let options = &vendor[0].select_cap.as_ref().unwrap().option;
        assert_eq!(options.len(), 3);
        assert!(options[0].is_default);
    }

    #[test]
    fn ricoh_locked_print_password() {
        let ppd = r#"*PPD-Adobe: "4.3"
*OpenUI *JobType/JobType: PickOne
*FoomaticRIPOption JobType: enum CmdLine B
*OrderDependency: 255 AnySetup *JobType
*DefaultJobType: Normal
*JobType Normal/Normal: "%% FoomaticRIPOptionSetting: JobType=Normal"
*JobType SamplePrint/Sample Print: "%% FoomaticRIPOptionSetting: JobType=SamplePrint"
*JobType LockedPrint/Locked Print: ""
*JobType DocServer/Document Server: ""
*CloseUI: *JobType

*OpenUI *LockedPrintPassword/Locked Print Password (4-8 digits): PickOne
*FoomaticRIPOption LockedPrintPassword: password CmdLine C
*FoomaticRIPOptionMaxLength LockedPrintPassword:8
*FoomaticRIPOptionAllowedChars LockedPrintPassword: "0-9"
*OrderDependency: 255 AnySetup *LockedPrintPassword
*DefaultLockedPrintPassword: None
*LockedPrintPassword None/None: ""
*LockedPrintPassword 4001/4001: "%% FoomaticRIPOptionSetting: LockedPrintPassword=4001"
*LockedPrintPassword 4002/4002: "%% FoomaticRIPOptionSetting: LockedPrintPassword=4002"
*CloseUI: *LockedPrintPassword

*CustomLockedPrintPassword True/Custom Password: ""
*ParamCustomLockedPrintPassword Password: 1 passcode 4 8
"#;
        let vendor = describe(ppd).vendor_capability.unwrap();
        assert_eq!(vendor.len(), 1);
        assert_eq!(vendor[0].id, "JobType:LockedPrint/LockedPrintPassword");
        assert_eq!(vendor[0].capability_type, VendorCapabilityType::TypedValue);
        assert_eq!(vendor[0].display_name_localized, Some(localized("Password (4 numbers)")));
        assert_eq!(
            vendor[0].typed_value_cap.as_ref().unwrap().value_type,
            TypedValueType::String
        );
    }

    #[test]
    fn installed_options_constrain_duplex() {
        let ppd = r#"*PPD-Adobe: "4.3"
*OpenGroup: InstallableOptions/Options Installed
*OpenUI *OptionDuplex/Duplex Unit: Boolean
*DefaultOptionDuplex: False
*OptionDuplex True/Installed: ""
*OptionDuplex False/Not Installed: ""
*CloseUI: *OptionDuplex
*CloseGroup: InstallableOptions/Options Installed
*OpenUI *Duplex/Two-Sided: PickOne
*DefaultDuplex: DuplexNoTumble
*Duplex None/Off: ""
*Duplex DuplexNoTumble/Long Edge: ""
*Duplex DuplexTumble/Short Edge: ""
*CloseUI: *Duplex
*UIConstraints: *OptionDuplex False *Duplex DuplexNoTumble
*UIConstraints: *OptionDuplex False *Duplex DuplexTumble"#;
        let duplex = describe(ppd).duplex.unwrap();
        assert_eq!(duplex.option.len(), 1);
        assert_eq!(duplex.option[0].duplex_type, DuplexType::NoDuplex);
        assert!(duplex.option[0].is_default);
    }

    #[test]
    fn throughput_carries_color_types() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *ColorModel/Color Mode: PickOne\n*DefaultColorModel: Gray\n*ColorModel CMYK/Color: \"\"\n*ColorModel Gray/Black and White: \"\"\n*CloseUI: *ColorModel\n*Throughput: \"25\"\n*HWMargins: \"12 12 12 12\"";
        let d = describe(ppd);
        assert_eq!(
            d.printing_speed.unwrap().option[0].color_type,
            Some(vec![ColorType::StandardColor, ColorType::StandardMonochrome])
        );
        assert!(d.margins.is_some());
    }

    #[test]
    fn manufacturer_and_model() {
        let t = translate_ppd(
            "*PPD-Adobe: \"4.3\"\n*Manufacturer: \"HP\"\n*NickName: \"HP LaserJet 4250 PS v3010.107 cups-team Letter+Duplex\"",
        );
        assert_eq!(t.manufacturer, "HP");
        assert_eq!(t.model, "LaserJet 4250");

        let t = translate_ppd(
            "*PPD-Adobe: \"4.3\"\n*Manufacturer: \"KONICA MINOLTA\"\n*NickName: \"KONICA MINOLTA C451 PS(P)\"",
        );
        assert_eq!(t.manufacturer, "Konica Minolta");
        assert_eq!(t.model, "C451");
    }

    #[test]
    fn serialized_duplex_omits_ppd_bookkeeping() {
        let ppd = "*PPD-Adobe: \"4.3\"\n*OpenUI *Duplex/Duplex: PickOne\n*DefaultDuplex: None\n*Duplex None/Off: \"\"\n*Duplex DuplexNoTumble/Long Edge: \"\"\n*CloseUI: *Duplex";
        let json = serde_json::to_value(describe(ppd)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "duplex": {
                    "option": [
                        {"type": "NO_DUPLEX", "is_default": true},
                        {"type": "LONG_EDGE", "is_default": false}
                    ]
                }
            })
        );
    }

    #[test]
    fn garbage_yields_empty_description() {
        let t = translate_ppd("this is not a PPD\nat all");
        assert_eq!(t, PpdTranslation::default());
    }
}
