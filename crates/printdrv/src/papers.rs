//! # Named media sizes
//!
//! Nominal dimensions for the media size names drivers report. All values
//! are PostScript points (1/72 in). `Custom` is a real entry with zero
//! dimensions; it marks variable-size support rather than a printable size.

/// A named media size
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaperSize {
    /// The PPD option keyword, e.g. `A4`
    pub name: &'static str,
    /// The human-readable text for the keyword
    pub text: &'static str,
    /// Nominal width in points
    pub width: i32,
    /// Nominal height in points
    pub height: i32,
}

static PAPER_SIZES: &[PaperSize] = &[
    PaperSize {
        name: "Letter",
        text: "Letter",
        width: 612,
        height: 792,
    },
    PaperSize {
        name: "Legal",
        text: "Legal",
        width: 612,
        height: 1008,
    },
    PaperSize {
        name: "Tabloid",
        text: "Tabloid",
        width: 792,
        height: 1224,
    },
    PaperSize {
        name: "Executive",
        text: "Executive",
        width: 522,
        height: 756,
    },
    PaperSize {
        name: "Postcard",
        text: "Postcard",
        width: 283,
        height: 416,
    },
    PaperSize {
        name: "w288h432",
        text: "4 x 6 in.",
        width: 288,
        height: 432,
    },
    PaperSize {
        name: "A3",
        text: "A3",
        width: 842,
        height: 1191,
    },
    PaperSize {
        name: "A4",
        text: "A4",
        width: 595,
        height: 842,
    },
    PaperSize {
        name: "A5",
        text: "A5",
        width: 420,
        height: 595,
    },
    PaperSize {
        name: "A6",
        text: "A6",
        width: 297,
        height: 420,
    },
    PaperSize {
        name: "B5",
        text: "B5 (JIS)",
        width: 516,
        height: 729,
    },
    PaperSize {
        name: "Env10",
        text: "Envelope #10",
        width: 297,
        height: 684,
    },
    PaperSize {
        name: "EnvDL",
        text: "Envelope DL",
        width: 312,
        height: 624,
    },
    PaperSize {
        name: "Custom",
        text: "Custom",
        width: 0,
        height: 0,
    },
];

/// Look up a media size by its option keyword
pub fn papersize_by_name(name: &str) -> Option<&'static PaperSize> {
    PAPER_SIZES.iter().find(|p| p.name == name)
}
