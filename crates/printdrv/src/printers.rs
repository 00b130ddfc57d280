//! # The driver registry
//!
//! One [`Printer`] per supported device, with all capability data in
//! constant tables. Drivers are looked up by their short key (`escp2-870`)
//! or by the full display name.

use thiserror::Error;

use crate::papers::papersize_by_name;
use crate::params::{Param, ParamClass};
use crate::vars::{OutputType, Vars};

/// A static (keyword, text) capability entry
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Choice {
    /// The option keyword
    pub name: &'static str,
    /// The human-readable text
    pub text: &'static str,
}

/// A supported resolution and its DPI pair
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The option keyword, e.g. `720x360dpi`
    pub name: &'static str,
    /// The human-readable text
    pub text: &'static str,
    /// Horizontal DPI; `-1` marks an entry the device cannot actually drive
    pub xdpi: i32,
    /// Vertical DPI; `-1` marks an entry the device cannot actually drive
    pub ydpi: i32,
}

/// Unprintable border widths of a device, in points
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Borders {
    /// Left border
    pub left: i32,
    /// Right border
    pub right: i32,
    /// Top border
    pub top: i32,
    /// Bottom border
    pub bottom: i32,
}

/// Bounds for variable ("Custom") page sizes, in points
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeLimit {
    /// Largest supported width
    pub max_width: i32,
    /// Largest supported height
    pub max_height: i32,
    /// Smallest supported width
    pub min_width: i32,
    /// Smallest supported height
    pub min_height: i32,
}

/// The printable region of the selected page.
///
/// Coordinates are positions, not widths: `left` and `right` are measured
/// from the left page edge, `top` and `bottom` from the top page edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ImageableArea {
    /// Left printable boundary
    pub left: i32,
    /// Right printable boundary
    pub right: i32,
    /// Lower printable boundary, measured from the top edge
    pub bottom: i32,
    /// Upper printable boundary, measured from the top edge
    pub top: i32,
}

/// One printer driver and its full capability set
#[derive(Debug)]
pub struct Printer {
    /// Short driver key, used as the output file stem
    pub driver: &'static str,
    /// Full display name; the first token is the manufacturer
    pub long_name: &'static str,
    /// Numeric model id
    pub model: i32,
    /// Color capability of the device
    pub output_type: OutputType,
    /// Supported page size names, in presentation order
    pub page_sizes: &'static [&'static str],
    /// Default page size name
    pub default_page_size: &'static str,
    /// Supported media types; empty when the device has no media switch
    pub media_types: &'static [Choice],
    /// Default media type keyword
    pub default_media_type: &'static str,
    /// Supported input slots; empty when the device has a single feed
    pub input_slots: &'static [Choice],
    /// Default input slot keyword
    pub default_input_slot: &'static str,
    /// Supported resolutions
    pub resolutions: &'static [Resolution],
    /// Default resolution keyword
    pub default_resolution: &'static str,
    /// Supported ink configurations; empty for single-ink devices
    pub ink_types: &'static [Choice],
    /// Default ink configuration keyword
    pub default_ink_type: &'static str,
    /// Supported dither algorithms
    pub dithers: &'static [Choice],
    /// Default dither algorithm keyword
    pub default_dither: &'static str,
    /// Unprintable borders applied to every page size
    pub borders: Borders,
    /// Variable page size bounds
    pub size_limit: SizeLimit,
}

impl Printer {
    /// The short driver key
    pub fn driver(&self) -> &'static str {
        self.driver
    }

    /// The full display name
    pub fn long_name(&self) -> &'static str {
        self.long_name
    }

    /// The numeric model id
    pub fn model(&self) -> i32 {
        self.model
    }

    /// The color capability of the device
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// A fresh settings snapshot for this device
    pub fn printvars(&self) -> Vars {
        Vars::new(self.output_type)
    }

    /// The ordered choices the driver exposes on `class`.
    ///
    /// Each call allocates a fresh list that the caller owns.
    pub fn parameters(&self, class: ParamClass) -> Vec<Param> {
        match class {
            ParamClass::PageSize => self
                .page_sizes
                .iter()
                .map(|&name| {
                    let text = papersize_by_name(name).map(|p| p.text).unwrap_or(name);
                    Param::new(name, text)
                })
                .collect(),
            ParamClass::MediaType => choices(self.media_types),
            ParamClass::InputSlot => choices(self.input_slots),
            ParamClass::Resolution => self
                .resolutions
                .iter()
                .map(|r| Param::new(r.name, r.text))
                .collect(),
            ParamClass::InkType => choices(self.ink_types),
            ParamClass::DitherAlgorithm => choices(self.dithers),
        }
    }

    /// The default keyword for `class`
    pub fn default_parameter(&self, class: ParamClass) -> &'static str {
        match class {
            ParamClass::PageSize => self.default_page_size,
            ParamClass::MediaType => self.default_media_type,
            ParamClass::InputSlot => self.default_input_slot,
            ParamClass::Resolution => self.default_resolution,
            ParamClass::InkType => self.default_ink_type,
            ParamClass::DitherAlgorithm => self.default_dither,
        }
    }

    /// The physical page dimensions under the current `PageSize` selection.
    ///
    /// For `Custom` this reports the largest supported size.
    pub fn media_size(&self, vars: &Vars) -> (i32, i32) {
        let name = vars.get(ParamClass::PageSize).unwrap_or(self.default_page_size);
        if name == "Custom" {
            return (self.size_limit.max_width, self.size_limit.max_height);
        }
        match papersize_by_name(name) {
            Some(p) if p.width > 0 && p.height > 0 => (p.width, p.height),
            _ => papersize_by_name(self.default_page_size)
                .map(|p| (p.width, p.height))
                .unwrap_or((612, 792)),
        }
    }

    /// The printable region under the current `PageSize` selection
    pub fn imageable_area(&self, vars: &Vars) -> ImageableArea {
        let (width, height) = self.media_size(vars);
        ImageableArea {
            left: self.borders.left,
            right: width - self.borders.right,
            bottom: height - self.borders.bottom,
            top: self.borders.top,
        }
    }

    /// The variable page size bounds of the device
    pub fn size_limit(&self, _vars: &Vars) -> SizeLimit {
        self.size_limit
    }

    /// Resolve the currently selected `Resolution` keyword to a DPI pair.
    ///
    /// Returns `(-1, -1)` when the selection is missing or unknown.
    pub fn describe_resolution(&self, vars: &Vars) -> (i32, i32) {
        let name = vars.get(ParamClass::Resolution);
        match name.and_then(|n| self.resolutions.iter().find(|r| r.name == n)) {
            Some(r) => (r.xdpi, r.ydpi),
            None => {
                log::debug!(
                    "no resolution data for {:?} on {}",
                    name.unwrap_or(""),
                    self.driver
                );
                (-1, -1)
            }
        }
    }
}

fn choices(table: &'static [Choice]) -> Vec<Param> {
    table.iter().map(|c| Param::new(c.name, c.text)).collect()
}

/// A model name that matches no known driver
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Driver not found: {0}")]
pub struct UnknownDriver(pub String);

static DITHER_ALGORITHMS: &[Choice] = &[
    Choice {
        name: "Adaptive",
        text: "Adaptive Hybrid",
    },
    Choice {
        name: "Ordered",
        text: "Ordered",
    },
    Choice {
        name: "Fast",
        text: "Fast",
    },
    Choice {
        name: "VeryFast",
        text: "Very Fast",
    },
    Choice {
        name: "Floyd",
        text: "Hybrid Floyd-Steinberg",
    },
];

static EPSON_MEDIA: &[Choice] = &[
    Choice {
        name: "Plain",
        text: "Plain Paper",
    },
    Choice {
        name: "Postcard",
        text: "Postcard",
    },
    Choice {
        name: "GlossyFilm",
        text: "Glossy Film",
    },
    Choice {
        name: "Transparency",
        text: "Transparencies",
    },
    Choice {
        name: "Envelope",
        text: "Envelopes",
    },
    Choice {
        name: "Matte",
        text: "Matte Paper",
    },
    Choice {
        name: "Coated",
        text: "Photo Quality Inkjet Paper",
    },
    Choice {
        name: "GlossyPhoto",
        text: "Premium Glossy Photo Paper",
    },
];

static EPSON_INKS: &[Choice] = &[
    Choice {
        name: "PhotoCMYK",
        text: "Six Color Photo",
    },
    Choice {
        name: "PhotoCMY",
        text: "Five Color Photo Composite",
    },
    Choice {
        name: "CMYK",
        text: "Four Color Standard",
    },
    Choice {
        name: "RGB",
        text: "Three Color Composite",
    },
];

static EPSON_RESOLUTIONS: &[Resolution] = &[
    Resolution {
        name: "180dpi",
        text: "180 DPI",
        xdpi: 180,
        ydpi: 180,
    },
    Resolution {
        name: "360x180dpi",
        text: "360 x 180 DPI",
        xdpi: 360,
        ydpi: 180,
    },
    Resolution {
        name: "360dpi",
        text: "360 DPI",
        xdpi: 360,
        ydpi: 360,
    },
    Resolution {
        name: "720x360dpi",
        text: "720 x 360 DPI",
        xdpi: 720,
        ydpi: 360,
    },
    Resolution {
        name: "720dpi",
        text: "720 DPI",
        xdpi: 720,
        ydpi: 720,
    },
    Resolution {
        name: "1440x720dpi",
        text: "1440 x 720 DPI",
        xdpi: 1440,
        ydpi: 720,
    },
];

static CANON_MEDIA: &[Choice] = &[
    Choice {
        name: "Plain",
        text: "Plain Paper",
    },
    Choice {
        name: "Transparency",
        text: "Transparencies",
    },
    Choice {
        name: "BackPrint",
        text: "Back Print Film",
    },
    Choice {
        name: "Fabric",
        text: "Fabric Sheets",
    },
    Choice {
        name: "Envelope",
        text: "Envelope",
    },
    Choice {
        name: "Coated",
        text: "High Resolution Paper",
    },
    Choice {
        name: "GlossyPhoto",
        text: "Glossy Photo Paper",
    },
    Choice {
        name: "Other",
        text: "Other",
    },
];

static CANON_INKS: &[Choice] = &[
    Choice {
        name: "CMYK",
        text: "Four Color Standard",
    },
    Choice {
        name: "PhotoCMY",
        text: "Five Color Photo Composite",
    },
];

static CANON_RESOLUTIONS: &[Resolution] = &[
    Resolution {
        name: "360x360dpi",
        text: "360 x 360 DPI",
        xdpi: 360,
        ydpi: 360,
    },
    Resolution {
        name: "720x360dpi",
        text: "720 x 360 DPI",
        xdpi: 720,
        ydpi: 360,
    },
    Resolution {
        name: "1440x720dpi",
        text: "1440 x 720 DPI",
        xdpi: 1440,
        ydpi: 720,
    },
];

static LASERJET_SLOTS: &[Choice] = &[
    Choice {
        name: "Default",
        text: "Default Source",
    },
    Choice {
        name: "Tray1",
        text: "Tray 1",
    },
    Choice {
        name: "Tray2",
        text: "Tray 2",
    },
    Choice {
        name: "Manual",
        text: "Manual Feed",
    },
];

static LASERJET_RESOLUTIONS: &[Resolution] = &[
    Resolution {
        name: "150dpi",
        text: "150 DPI",
        xdpi: 150,
        ydpi: 150,
    },
    Resolution {
        name: "300dpi",
        text: "300 DPI",
        xdpi: 300,
        ydpi: 300,
    },
];

static PS_RESOLUTIONS: &[Resolution] = &[Resolution {
    name: "300dpi",
    text: "300 DPI",
    xdpi: 300,
    ydpi: 300,
}];

static PRINTERS: &[Printer] = &[
    Printer {
        driver: "ps",
        long_name: "Generic PostScript Printer",
        model: 0,
        output_type: OutputType::Color,
        page_sizes: &["Letter", "Legal", "Tabloid", "Executive", "A3", "A4", "A5", "B5"],
        default_page_size: "Letter",
        media_types: &[],
        default_media_type: "",
        input_slots: &[],
        default_input_slot: "",
        resolutions: PS_RESOLUTIONS,
        default_resolution: "300dpi",
        ink_types: &[],
        default_ink_type: "",
        dithers: DITHER_ALGORITHMS,
        default_dither: "Adaptive",
        borders: Borders {
            left: 18,
            right: 18,
            top: 18,
            bottom: 18,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 1008,
            min_width: 72,
            min_height: 72,
        },
    },
    Printer {
        driver: "ps2",
        long_name: "Generic PostScript Level 2 Printer",
        model: 1,
        output_type: OutputType::Color,
        page_sizes: &["Letter", "Legal", "Tabloid", "Executive", "A3", "A4", "A5", "B5"],
        default_page_size: "Letter",
        media_types: &[],
        default_media_type: "",
        input_slots: &[],
        default_input_slot: "",
        resolutions: PS_RESOLUTIONS,
        default_resolution: "300dpi",
        ink_types: &[],
        default_ink_type: "",
        dithers: DITHER_ALGORITHMS,
        default_dither: "Adaptive",
        borders: Borders {
            left: 18,
            right: 18,
            top: 18,
            bottom: 18,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 1008,
            min_width: 72,
            min_height: 72,
        },
    },
    Printer {
        driver: "escp2-870",
        long_name: "EPSON Stylus Photo 870",
        model: 29,
        output_type: OutputType::Color,
        page_sizes: &[
            "Letter", "Legal", "Executive", "A4", "A5", "A6", "B5", "Postcard", "w288h432",
            "Env10", "EnvDL", "Custom",
        ],
        default_page_size: "Letter",
        media_types: EPSON_MEDIA,
        default_media_type: "Plain",
        input_slots: &[],
        default_input_slot: "",
        resolutions: EPSON_RESOLUTIONS,
        default_resolution: "360dpi",
        ink_types: EPSON_INKS,
        default_ink_type: "PhotoCMYK",
        dithers: DITHER_ALGORITHMS,
        default_dither: "Adaptive",
        borders: Borders {
            left: 9,
            right: 9,
            top: 9,
            bottom: 40,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 3168,
            min_width: 72,
            min_height: 72,
        },
    },
    Printer {
        driver: "bjc-6000",
        long_name: "CANON BJC 6000",
        model: 3,
        output_type: OutputType::Color,
        page_sizes: &["Letter", "Legal", "A4", "A5", "Env10", "EnvDL", "Custom"],
        default_page_size: "Letter",
        media_types: CANON_MEDIA,
        default_media_type: "Plain",
        input_slots: &[
            Choice {
                name: "Auto",
                text: "Auto Sheet Feeder",
            },
            Choice {
                name: "Manual",
                text: "Manual with Pause",
            },
            Choice {
                name: "ManualNP",
                text: "Manual without Pause",
            },
        ],
        default_input_slot: "Auto",
        resolutions: CANON_RESOLUTIONS,
        default_resolution: "360x360dpi",
        ink_types: CANON_INKS,
        default_ink_type: "CMYK",
        dithers: DITHER_ALGORITHMS,
        default_dither: "Adaptive",
        borders: Borders {
            left: 10,
            right: 10,
            top: 7,
            bottom: 29,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 1008,
            min_width: 72,
            min_height: 72,
        },
    },
    Printer {
        driver: "pcl-4l",
        long_name: "HP LaserJet 4L",
        model: 4,
        output_type: OutputType::Gray,
        page_sizes: &["Letter", "Legal", "Executive", "A4", "Env10", "EnvDL"],
        default_page_size: "Letter",
        media_types: &[],
        default_media_type: "",
        input_slots: LASERJET_SLOTS,
        default_input_slot: "Default",
        resolutions: LASERJET_RESOLUTIONS,
        default_resolution: "300dpi",
        ink_types: &[],
        default_ink_type: "",
        dithers: DITHER_ALGORITHMS,
        default_dither: "Adaptive",
        borders: Borders {
            left: 18,
            right: 18,
            top: 12,
            bottom: 12,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 1008,
            min_width: 72,
            min_height: 72,
        },
    },
];

/// All registered drivers, in presentation order
pub fn known_printers() -> &'static [Printer] {
    PRINTERS
}

/// Look up a driver by its short key
pub fn printer_by_driver(driver: &str) -> Option<&'static Printer> {
    PRINTERS.iter().find(|p| p.driver == driver)
}

/// Look up a driver by its full display name
pub fn printer_by_long_name(long_name: &str) -> Option<&'static Printer> {
    PRINTERS.iter().find(|p| p.long_name == long_name)
}

/// Look up a driver by short key first, then by display name
pub fn find_printer(name: &str) -> Result<&'static Printer, UnknownDriver> {
    printer_by_driver(name)
        .or_else(|| printer_by_long_name(name))
        .ok_or_else(|| UnknownDriver(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{find_printer, known_printers, printer_by_driver, printer_by_long_name};
    use crate::params::ParamClass;
    use crate::vars::OutputType;

    #[test]
    fn registry_lookups() {
        assert!(printer_by_driver("escp2-870").is_some());
        assert!(printer_by_long_name("EPSON Stylus Photo 870").is_some());
        assert!(printer_by_driver("EPSON Stylus Photo 870").is_none());
        let err = find_printer("no-such-model").unwrap_err();
        assert_eq!(err.to_string(), "Driver not found: no-such-model");
    }

    #[test]
    fn driver_keys_are_unique() {
        let printers = known_printers();
        for (i, a) in printers.iter().enumerate() {
            for b in &printers[i + 1..] {
                assert_ne!(a.driver, b.driver);
            }
        }
    }

    #[test]
    fn page_size_params_carry_registry_text() {
        let p = printer_by_driver("escp2-870").unwrap();
        let sizes = p.parameters(ParamClass::PageSize);
        let four_by_six = sizes.iter().find(|s| s.name == "w288h432").unwrap();
        assert_eq!(four_by_six.text, "4 x 6 in.");
        assert!(sizes.iter().any(|s| s.name == "Custom"));

        let mono = printer_by_driver("pcl-4l").unwrap();
        assert!(!mono
            .parameters(ParamClass::PageSize)
            .iter()
            .any(|s| s.name == "Custom"));
    }

    #[test]
    fn imageable_area_is_top_down() {
        let p = printer_by_driver("escp2-870").unwrap();
        let mut v = p.printvars();
        v.set(ParamClass::PageSize, "Letter");
        assert_eq!(p.media_size(&v), (612, 792));
        let area = p.imageable_area(&v);
        assert_eq!(area.left, 9);
        assert_eq!(area.right, 612 - 9);
        assert_eq!(area.top, 9);
        assert_eq!(area.bottom, 792 - 40);
    }

    #[test]
    fn custom_selection_uses_size_limit() {
        let p = printer_by_driver("escp2-870").unwrap();
        let mut v = p.printvars();
        v.set(ParamClass::PageSize, "Custom");
        let limit = p.size_limit(&v);
        assert_eq!(p.media_size(&v), (limit.max_width, limit.max_height));
    }

    #[test]
    fn resolution_lookup() {
        let p = printer_by_driver("escp2-870").unwrap();
        let mut v = p.printvars();
        v.set(ParamClass::Resolution, "720x360dpi");
        assert_eq!(p.describe_resolution(&v), (720, 360));
        v.set(ParamClass::Resolution, "9999dpi");
        assert_eq!(p.describe_resolution(&v), (-1, -1));
        let fresh = p.printvars();
        assert_eq!(p.describe_resolution(&fresh), (-1, -1));
    }

    #[test]
    fn generic_postscript_drivers_are_registered() {
        assert!(printer_by_driver("ps").is_some());
        assert!(printer_by_driver("ps2").is_some());
    }

    #[test]
    fn mono_and_color_capabilities() {
        assert_eq!(
            printer_by_driver("pcl-4l").unwrap().output_type(),
            OutputType::Gray
        );
        assert_eq!(
            printer_by_driver("bjc-6000").unwrap().output_type(),
            OutputType::Color
        );
    }
}
