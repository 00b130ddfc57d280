//! The PPD emitter.
//!
//! [`write_ppd`] produces one complete PPD document per driver. Section
//! order is fixed: header, page sizes, custom-size block, color model,
//! media types, input slots, resolutions, the `STP` vendor group, fonts,
//! footer. No section is ever revisited.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use ppd_out::{PpdError, PpdWriter};
use printdrv::{papersize_by_name, OutputType, ParamClass, Printer};
use thiserror::Error;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PostScript language level advertised in every PPD
const PS_LEVEL: u32 = 2;

/// Extension of the generated files, depending on output compression
#[cfg(feature = "gz")]
pub const PPD_EXT: &str = ".ppd.gz";
/// Extension of the generated files, depending on output compression
#[cfg(not(feature = "gz"))]
pub const PPD_EXT: &str = ".ppd";

// CUPS raster colorspace and pixel order codes
const CUPS_CSPACE_W: u32 = 0;
const CUPS_CSPACE_RGB: u32 = 1;
const CUPS_CSPACE_K: u32 = 3;
const CUPS_CSPACE_CMYK: u32 = 6;
const CUPS_ORDER_CHUNKED: u32 = 0;

/// Failure while producing one driver's PPD file
#[derive(Debug, Error)]
pub enum EmitError {
    /// The output directory could not be created (fatal for the batch)
    #[error("Cannot create directory {}", .path.display())]
    Prefix {
        /// the requested output directory
        path: PathBuf,
        /// the underlying OS error
        source: io::Error,
    },
    /// The destination file could not be opened
    #[error("Unable to create file \"{}\"", .path.display())]
    Create {
        /// the destination file
        path: PathBuf,
        /// the underlying OS error
        source: io::Error,
    },
    /// The document could not be written out
    #[error("Failed while writing \"{}\"", .path.display())]
    Write {
        /// the destination file
        path: PathBuf,
        /// the writer failure
        source: PpdError,
    },
}

/// The drivers that pass PostScript through unmodified and get no PPD
pub fn is_generic_postscript(driver: &str) -> bool {
    driver == "ps" || driver == "ps2"
}

/// One numeric tone/color adjustment, in fixed-point thousandths
#[derive(Debug, Copy, Clone)]
pub struct AdjustOption {
    /// PPD keyword, e.g. `stpGamma`
    pub name: &'static str,
    /// Human-readable text
    pub text: &'static str,
    /// Lowest selectable value
    pub low: i32,
    /// Highest selectable value
    pub high: i32,
    /// Configured default value
    pub defval: i32,
    /// Distance between selectable values
    pub step: i32,
}

/// The eight numeric adjustments, computed once before the driver loop
/// and read-only afterwards.
#[derive(Debug)]
pub struct AdjustRanges([AdjustOption; 8]);

impl AdjustRanges {
    /// Build the table from the driver library's settings snapshots
    pub fn from_driver_settings() -> Self {
        let lower = printdrv::minimum_settings();
        let upper = printdrv::maximum_settings();
        let defaults = printdrv::default_settings();
        let knob = |name, text, low: f32, high: f32, defval: f32| AdjustOption {
            name,
            text,
            low: (1000.0 * low) as i32,
            high: (1000.0 * high) as i32,
            defval: (1000.0 * defval) as i32,
            step: 50,
        };
        Self([
            knob(
                "stpBrightness",
                "Brightness",
                lower.brightness,
                upper.brightness,
                defaults.brightness,
            ),
            knob(
                "stpContrast",
                "Contrast",
                lower.contrast,
                upper.contrast,
                defaults.contrast,
            ),
            knob("stpGamma", "Gamma", lower.gamma, upper.gamma, defaults.gamma),
            knob(
                "stpDensity",
                "Density",
                lower.density,
                upper.density,
                defaults.density,
            ),
            knob("stpCyan", "Cyan", lower.cyan, upper.cyan, defaults.cyan),
            knob(
                "stpMagenta",
                "Magenta",
                lower.magenta,
                upper.magenta,
                defaults.magenta,
            ),
            knob(
                "stpYellow",
                "Yellow",
                lower.yellow,
                upper.yellow,
                defaults.yellow,
            ),
            knob(
                "stpSaturation",
                "Saturation",
                lower.saturation,
                upper.saturation,
                defaults.saturation,
            ),
        ])
    }

    /// The adjustments that apply to a device: the first four for
    /// grayscale devices, all eight for color devices.
    pub fn for_output(&self, output: OutputType) -> &[AdjustOption] {
        match output {
            OutputType::Color => &self.0,
            OutputType::Gray => &self.0[..4],
        }
    }
}

/// A media size accepted for one driver, margins already flipped into
/// bottom-up PostScript coordinates
struct PaperEntry {
    name: String,
    text: String,
    width: i32,
    height: i32,
    left: i32,
    right: i32,
    bottom: i32,
    top: i32,
}

fn pagedevice_color(cspace: u32) -> String {
    format!(
        "<</cupsColorSpace {}/cupsColorOrder {}/cupsBitsPerColor 8>>setpagedevice",
        cspace, CUPS_ORDER_CHUNKED
    )
}

/// Emit the complete PPD document for `p` to `out`
pub fn emit_ppd<W: Write>(
    p: &Printer,
    ranges: &AdjustRanges,
    out: &mut PpdWriter<W>,
) -> Result<(), PpdError> {
    let driver = p.driver();
    let long_name = p.long_name();
    let manufacturer = long_name.split_whitespace().next().unwrap_or(long_name);
    let color = p.output_type() == OutputType::Color;
    let mut v = p.printvars();

    out.magic()?;
    out.comment("PPD file for CUPS.")?;
    out.quoted("FormatVersion", "4.3")?;
    out.quoted("FileVersion", VERSION)?;
    out.attr("LanguageVersion", "English")?;
    out.attr("LanguageEncoding", "ISOLatin1")?;
    out.quoted("PCFileName", &format!("{}.ppd", driver))?;
    out.quoted("Manufacturer", manufacturer)?;
    out.quoted("Product", &format!("(ppd-tool v{})", VERSION))?;
    out.quoted("ModelName", driver)?;
    out.quoted("ShortNickName", long_name)?;
    out.quoted("NickName", &format!("{}, CUPS v{}", long_name, VERSION))?;
    if PS_LEVEL == 2 {
        out.quoted("PSVersion", "(2017.000) 705")?;
    } else {
        out.quoted("PSVersion", "(3010.000) 705")?;
    }
    out.quoted("LanguageLevel", &PS_LEVEL.to_string())?;
    out.attr("ColorDevice", if color { "True" } else { "False" })?;
    out.attr("DefaultColorSpace", if color { "RGB" } else { "Gray" })?;
    out.attr("FileSystem", "False")?;
    out.attr("LandscapeOrientation", "Plus90")?;
    out.attr("TTRasterizer", "Type42")?;
    out.attr("cupsVersion", "1.1")?;
    out.quoted("cupsModelNumber", &p.model().to_string())?;
    out.attr("cupsManualCopies", "True")?;
    out.quoted("cupsFilter", "application/vnd.cups-raster 100 rastertoprinter")?;
    if manufacturer.eq_ignore_ascii_case("EPSON") {
        out.quoted("cupsFilter", "application/vnd.cups-command 33 commandtoepson")?;
    }
    out.blank()?;

    // Page sizes. The driver may adjust geometry per selection, so media
    // size and imageable area are re-queried with each size selected.
    let variable_sizes = {
        let opts = p.parameters(ParamClass::PageSize);
        let defopt = p.default_parameter(ParamClass::PageSize);
        let mut variable_sizes = false;
        let mut papers: Vec<PaperEntry> = Vec::with_capacity(opts.len());

        for opt in &opts {
            let size = match papersize_by_name(&opt.name) {
                Some(size) => size,
                None => {
                    warn!("Unable to look up size {}!", opt.name);
                    continue;
                }
            };
            if opt.name == "Custom" {
                variable_sizes = true;
                continue;
            }
            if size.width <= 0 || size.height <= 0 {
                continue;
            }

            v.set(ParamClass::PageSize, &opt.name);
            let (width, height) = p.media_size(&v);
            let area = p.imageable_area(&v);

            papers.push(PaperEntry {
                name: opt.name.clone(),
                text: opt.text.clone(),
                width,
                height,
                left: area.left,
                right: area.right,
                bottom: height - area.bottom,
                top: height - area.top,
            });
        }

        out.attr("VariableSizes", if variable_sizes { "true" } else { "false" })?;
        out.blank()?;

        out.open_ui("PageSize", None)?;
        out.order_dependency(10, "AnySetup", "PageSize")?;
        out.default_attr("PageSize", defopt)?;
        for e in &papers {
            out.option(
                "PageSize",
                &e.name,
                &e.text,
                &format!(
                    "<</PageSize[{} {}]/ImagingBBox null>>setpagedevice",
                    e.width, e.height
                ),
            )?;
        }
        out.close_ui("PageSize")?;
        out.blank()?;

        out.open_ui("PageRegion", None)?;
        out.order_dependency(10, "AnySetup", "PageRegion")?;
        out.default_attr("PageRegion", defopt)?;
        for e in &papers {
            out.option(
                "PageRegion",
                &e.name,
                &e.text,
                &format!(
                    "<</PageRegion[{} {}]/ImagingBBox null>>setpagedevice",
                    e.width, e.height
                ),
            )?;
        }
        out.close_ui("PageRegion")?;
        out.blank()?;

        out.default_attr("ImageableArea", defopt)?;
        for e in &papers {
            out.option(
                "ImageableArea",
                &e.name,
                &e.text,
                &format!("{} {} {} {}", e.left, e.bottom, e.right, e.top),
            )?;
        }
        out.blank()?;

        out.default_attr("PaperDimension", defopt)?;
        for e in &papers {
            out.option(
                "PaperDimension",
                &e.name,
                &e.text,
                &format!("{} {}", e.width, e.height),
            )?;
        }
        out.blank()?;

        variable_sizes
    };

    if variable_sizes {
        let limit = p.size_limit(&v);
        v.set(ParamClass::PageSize, "Custom");
        let (width, height) = p.media_size(&v);
        let area = p.imageable_area(&v);

        out.quoted("MaxMediaWidth", &limit.max_width.to_string())?;
        out.quoted("MaxMediaHeight", &limit.max_height.to_string())?;
        out.attr(
            "HWMargins",
            &format!(
                "{} {} {} {}",
                area.left,
                height - area.bottom,
                width - area.right,
                area.top
            ),
        )?;
        out.quoted(
            "CustomPageSize True",
            "pop pop pop <</PageSize[5 -2 roll]/ImagingBBox null>>setpagedevice",
        )?;
        out.attr(
            "ParamCustomPageSize Width",
            &format!("1 points {} {}", limit.min_width, limit.max_width),
        )?;
        out.attr(
            "ParamCustomPageSize Height",
            &format!("2 points {} {}", limit.min_height, limit.max_height),
        )?;
        out.attr("ParamCustomPageSize WidthOffset", "3 points 0 0")?;
        out.attr("ParamCustomPageSize HeightOffset", "4 points 0 0")?;
        out.attr("ParamCustomPageSize Orientation", "5 int 0 0")?;
        out.blank()?;
    }

    out.open_ui("ColorModel", None)?;
    out.order_dependency(10, "AnySetup", "ColorModel")?;
    out.default_attr("ColorModel", if color { "RGB" } else { "Gray" })?;
    out.option("ColorModel", "Gray", "Grayscale", &pagedevice_color(CUPS_CSPACE_W))?;
    out.option(
        "ColorModel",
        "Black",
        "Black & White",
        &pagedevice_color(CUPS_CSPACE_K),
    )?;
    if color {
        out.option("ColorModel", "RGB", "Color", &pagedevice_color(CUPS_CSPACE_RGB))?;
        out.option(
            "ColorModel",
            "CMYK",
            "Raw CMYK",
            &pagedevice_color(CUPS_CSPACE_CMYK),
        )?;
    }
    out.close_ui("ColorModel")?;
    out.blank()?;

    let media = p.parameters(ParamClass::MediaType);
    if !media.is_empty() {
        out.open_ui("MediaType", Some("Media Type"))?;
        out.order_dependency(10, "AnySetup", "MediaType")?;
        out.default_attr("MediaType", p.default_parameter(ParamClass::MediaType))?;
        for opt in &media {
            out.option(
                "MediaType",
                &opt.name,
                &opt.text,
                &format!("<</MediaType({})>>setpagedevice", opt.name),
            )?;
        }
        out.close_ui("MediaType")?;
        out.blank()?;
    }

    let slots = p.parameters(ParamClass::InputSlot);
    if !slots.is_empty() {
        out.open_ui("InputSlot", Some("Media Source"))?;
        out.order_dependency(10, "AnySetup", "InputSlot")?;
        out.default_attr("InputSlot", p.default_parameter(ParamClass::InputSlot))?;
        for opt in &slots {
            out.option(
                "InputSlot",
                &opt.name,
                &opt.text,
                &format!("<</MediaClass({})>>setpagedevice", opt.name),
            )?;
        }
        out.close_ui("InputSlot")?;
        out.blank()?;
    }

    let resolutions = p.parameters(ParamClass::Resolution);
    out.open_ui("Resolution", Some("Resolution"))?;
    out.order_dependency(20, "AnySetup", "Resolution")?;
    out.default_attr("Resolution", p.default_parameter(ParamClass::Resolution))?;
    for (i, opt) in resolutions.iter().enumerate() {
        v.set(ParamClass::Resolution, &opt.name);
        let (xdpi, ydpi) = p.describe_resolution(&v);
        if xdpi == -1 || ydpi == -1 {
            continue;
        }
        out.option(
            "Resolution",
            &opt.name,
            &opt.text,
            &format!(
                "<</HWResolution[{} {}]/cupsCompression {}>>setpagedevice",
                xdpi, ydpi, i
            ),
        )?;
    }
    out.close_ui("Resolution")?;
    out.blank()?;

    out.open_group("STP")?;

    out.open_ui("stpImageType", Some("Image Type"))?;
    out.order_dependency(10, "AnySetup", "stpImageType")?;
    out.default_attr("stpImageType", "LineArt")?;
    out.option(
        "stpImageType",
        "LineArt",
        "Line Art",
        "<</cupsRowCount 0>>setpagedevice",
    )?;
    out.option(
        "stpImageType",
        "SolidTone",
        "Solid Colors",
        "<</cupsRowCount 1>>setpagedevice",
    )?;
    out.option(
        "stpImageType",
        "Continuous",
        "Photograph",
        "<</cupsRowCount 2>>setpagedevice",
    )?;
    out.close_ui("stpImageType")?;
    out.blank()?;

    let dithers = p.parameters(ParamClass::DitherAlgorithm);
    out.open_ui("stpDither", Some("Dither Algorithm"))?;
    out.order_dependency(10, "AnySetup", "stpDither")?;
    out.default_attr("stpDither", p.default_parameter(ParamClass::DitherAlgorithm))?;
    for (i, opt) in dithers.iter().enumerate() {
        out.option_spaced(
            "stpDither",
            &opt.name,
            &opt.text,
            &format!("<</cupsRowStep {}>>setpagedevice", i),
        )?;
    }
    out.close_ui("stpDither")?;
    out.blank()?;

    let inks = p.parameters(ParamClass::InkType);
    if !inks.is_empty() {
        out.open_ui("stpInkType", Some("Ink Type"))?;
        out.order_dependency(20, "AnySetup", "stpInkType")?;
        out.default_attr("stpInkType", p.default_parameter(ParamClass::InkType))?;
        for opt in &inks {
            out.option(
                "stpInkType",
                &opt.name,
                &opt.text,
                &format!("<</OutputType({})>>setpagedevice", opt.name),
            )?;
        }
        out.close_ui("stpInkType")?;
        out.blank()?;
    }

    for knob in ranges.for_output(p.output_type()) {
        out.open_ui(knob.name, Some(knob.text))?;
        // fixed default keyword, not the configured value
        out.default_attr(knob.name, "1000")?;
        for j in (knob.low..=knob.high).step_by(knob.step as usize) {
            out.numeric_choice(knob.name, j)?;
        }
        out.close_ui(knob.name)?;
        out.blank()?;
    }

    out.close_group("STP")?;
    out.blank()?;

    out.default_attr("Font", "Courier")?;
    for &(name, status, version, charset) in FONTS {
        out.font(name, status, version, charset, "ROM")?;
    }
    out.blank()?;
    out.comment(&format!("End of {}.ppd", driver))?;

    Ok(())
}

/// Write the PPD file for `p` below `prefix`.
///
/// The generic PostScript drivers are skipped without touching the
/// filesystem. The prefix directory is created when absent.
pub fn write_ppd(
    p: &Printer,
    prefix: &Path,
    ranges: &AdjustRanges,
    verbose: bool,
) -> Result<(), EmitError> {
    if is_generic_postscript(p.driver()) {
        return Ok(());
    }

    fs::create_dir_all(prefix).map_err(|source| EmitError::Prefix {
        path: prefix.to_path_buf(),
        source,
    })?;

    let path = prefix.join(format!("{}{}", p.driver(), PPD_EXT));
    let file = File::create(&path).map_err(|source| EmitError::Create {
        path: path.clone(),
        source,
    })?;

    if verbose {
        info!("Writing {} ...", path.display());
    } else {
        eprint!(".");
    }

    let mut out = PpdWriter::from(make_stream(file));
    emit_ppd(p, ranges, &mut out).map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;
    let stream = out.finish().map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;
    close_stream(stream).map_err(|source| EmitError::Write {
        path,
        source: PpdError::Io(source),
    })?;
    Ok(())
}

#[cfg(feature = "gz")]
fn make_stream(file: File) -> flate2::write::GzEncoder<File> {
    flate2::write::GzEncoder::new(file, flate2::Compression::default())
}

#[cfg(not(feature = "gz"))]
fn make_stream(file: File) -> io::BufWriter<File> {
    io::BufWriter::new(file)
}

#[cfg(feature = "gz")]
fn close_stream(mut stream: flate2::write::GzEncoder<File>) -> io::Result<()> {
    stream.try_finish()
}

#[cfg(not(feature = "gz"))]
fn close_stream(mut stream: io::BufWriter<File>) -> io::Result<()> {
    stream.flush()
}

/// The standard font complement, identical for every driver:
/// (name, status, version, charset); the location is always `ROM`.
#[rustfmt::skip]
static FONTS: &[(&str, &str, &str, &str)] = &[
    ("AvantGarde-Book", "Standard", "001.006S", "Standard"),
    ("AvantGarde-BookOblique", "Standard", "001.006S", "Standard"),
    ("AvantGarde-Demi", "Standard", "001.007S", "Standard"),
    ("AvantGarde-DemiOblique", "Standard", "001.007S", "Standard"),
    ("Bookman-Demi", "Standard", "001.004S", "Standard"),
    ("Bookman-DemiItalic", "Standard", "001.004S", "Standard"),
    ("Bookman-Light", "Standard", "001.004S", "Standard"),
    ("Bookman-LightItalic", "Standard", "001.004S", "Standard"),
    ("Courier", "Standard", "002.004S", "Standard"),
    ("Courier-Bold", "Standard", "002.004S", "Standard"),
    ("Courier-BoldOblique", "Standard", "002.004S", "Standard"),
    ("Courier-Oblique", "Standard", "002.004S", "Standard"),
    ("Helvetica", "Standard", "001.006S", "Standard"),
    ("Helvetica-Bold", "Standard", "001.007S", "Standard"),
    ("Helvetica-BoldOblique", "Standard", "001.007S", "Standard"),
    ("Helvetica-Narrow", "Standard", "001.006S", "Standard"),
    ("Helvetica-Narrow-Bold", "Standard", "001.007S", "Standard"),
    ("Helvetica-Narrow-BoldOblique", "Standard", "001.007S", "Standard"),
    ("Helvetica-Narrow-Oblique", "Standard", "001.006S", "Standard"),
    ("Helvetica-Oblique", "Standard", "001.006S", "Standard"),
    ("NewCenturySchlbk-Bold", "Standard", "001.009S", "Standard"),
    ("NewCenturySchlbk-BoldItalic", "Standard", "001.007S", "Standard"),
    ("NewCenturySchlbk-Italic", "Standard", "001.006S", "Standard"),
    ("NewCenturySchlbk-Roman", "Standard", "001.007S", "Standard"),
    ("Palatino-Bold", "Standard", "001.005S", "Standard"),
    ("Palatino-BoldItalic", "Standard", "001.005S", "Standard"),
    ("Palatino-Italic", "Standard", "001.005S", "Standard"),
    ("Palatino-Roman", "Standard", "001.005S", "Standard"),
    ("Symbol", "Special", "001.007S", "Special"),
    ("Times-Bold", "Standard", "001.007S", "Standard"),
    ("Times-BoldItalic", "Standard", "001.009S", "Standard"),
    ("Times-Italic", "Standard", "001.007S", "Standard"),
    ("Times-Roman", "Standard", "001.007S", "Standard"),
    ("ZapfChancery-MediumItalic", "Standard", "001.007S", "Standard"),
    ("ZapfDingbats", "Special", "001.004S", "Standard"),
];

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ppd_out::PpdWriter;
    use printdrv::printers::{Borders, Printer, Resolution, SizeLimit};
    use printdrv::{printer_by_driver, OutputType};

    use super::{
        emit_ppd, is_generic_postscript, write_ppd, AdjustOption, AdjustRanges, EmitError, FONTS,
        PPD_EXT,
    };

    fn render(p: &Printer) -> String {
        render_with(p, &AdjustRanges::from_driver_settings())
    }

    fn render_with(p: &Printer, ranges: &AdjustRanges) -> String {
        let mut out = PpdWriter::from(Vec::new());
        emit_ppd(p, ranges, &mut out).unwrap();
        String::from_utf8(out.finish().unwrap()).unwrap()
    }

    fn count_prefix(text: &str, prefix: &str) -> usize {
        text.lines().filter(|l| l.starts_with(prefix)).count()
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ppd-tool-emit-{}", tag));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    /// A driver with data the registry would never carry: an unknown page
    /// size name and a resolution the device cannot drive.
    static ODD_PRINTER: Printer = Printer {
        driver: "odd-1",
        long_name: "ODDMAKER Model One",
        model: 99,
        output_type: OutputType::Gray,
        page_sizes: &["Letter", "Quarto"],
        default_page_size: "Letter",
        media_types: &[],
        default_media_type: "",
        input_slots: &[],
        default_input_slot: "",
        resolutions: &[
            Resolution {
                name: "300x300dpi",
                text: "300 x 300 DPI",
                xdpi: 300,
                ydpi: 300,
            },
            Resolution {
                name: "badres",
                text: "Broken",
                xdpi: -1,
                ydpi: -1,
            },
            Resolution {
                name: "600x600dpi",
                text: "600 x 600 DPI",
                xdpi: 600,
                ydpi: 600,
            },
        ],
        default_resolution: "300x300dpi",
        ink_types: &[],
        default_ink_type: "",
        dithers: &[],
        default_dither: "",
        borders: Borders {
            left: 10,
            right: 10,
            top: 10,
            bottom: 10,
        },
        size_limit: SizeLimit {
            max_width: 612,
            max_height: 1008,
            min_width: 72,
            min_height: 72,
        },
    };

    #[test]
    fn one_quadruple_per_accepted_size() {
        let p = printer_by_driver("escp2-870").unwrap();
        let text = render(p);
        // 11 accepted sizes; `Custom` only raises the variable-sizes flag
        assert_eq!(count_prefix(&text, "*PageSize "), 11);
        assert_eq!(count_prefix(&text, "*PageRegion "), 11);
        assert_eq!(count_prefix(&text, "*ImageableArea "), 11);
        assert_eq!(count_prefix(&text, "*PaperDimension "), 11);
        assert_eq!(count_prefix(&text, "*DefaultPageSize: "), 1);
        assert!(text.contains("*DefaultPageSize: Letter\n"));
    }

    #[test]
    fn unknown_size_is_skipped_silently() {
        let text = render(&ODD_PRINTER);
        assert_eq!(count_prefix(&text, "*PageSize "), 1);
        assert!(!text.contains("Quarto"));
    }

    #[test]
    fn generic_postscript_is_a_no_op() {
        let prefix = scratch_dir("skip");
        let ranges = AdjustRanges::from_driver_settings();
        for &driver in &["ps", "ps2"] {
            assert!(is_generic_postscript(driver));
            let p = printer_by_driver(driver).unwrap();
            write_ppd(p, &prefix, &ranges, false).unwrap();
        }
        // skipped before any directory or file was created
        assert!(!prefix.exists());
    }

    #[test]
    fn write_ppd_creates_the_file() {
        let prefix = scratch_dir("write");
        let ranges = AdjustRanges::from_driver_settings();
        let p = printer_by_driver("pcl-4l").unwrap();
        write_ppd(p, &prefix, &ranges, false).unwrap();
        assert!(prefix.join(format!("pcl-4l{}", PPD_EXT)).is_file());
        fs::remove_dir_all(&prefix).unwrap();
    }

    #[test]
    fn open_failure_is_reported_per_file() {
        let prefix = scratch_dir("blocked");
        // a directory squatting on the destination path makes create fail
        let blocker = prefix.join(format!("pcl-4l{}", PPD_EXT));
        fs::create_dir_all(&blocker).unwrap();
        let ranges = AdjustRanges::from_driver_settings();
        let p = printer_by_driver("pcl-4l").unwrap();
        match write_ppd(p, &prefix, &ranges, false) {
            Err(EmitError::Create { path, .. }) => assert_eq!(path, blocker),
            _ => panic!("expected a create error"),
        }
        fs::remove_dir_all(&prefix).unwrap();
    }

    #[test]
    fn color_gets_eight_adjustments_mono_four() {
        let color = render(printer_by_driver("escp2-870").unwrap());
        for knob in &[
            "stpBrightness",
            "stpContrast",
            "stpGamma",
            "stpDensity",
            "stpCyan",
            "stpMagenta",
            "stpYellow",
            "stpSaturation",
        ] {
            assert!(color.contains(&format!("*OpenUI *{}/", knob)), "{}", knob);
        }

        let mono = render(printer_by_driver("pcl-4l").unwrap());
        for knob in &["stpBrightness", "stpContrast", "stpGamma", "stpDensity"] {
            assert!(mono.contains(&format!("*OpenUI *{}/", knob)), "{}", knob);
        }
        for knob in &["stpCyan", "stpMagenta", "stpYellow", "stpSaturation"] {
            assert!(!mono.contains(knob), "{}", knob);
        }
    }

    #[test]
    fn adjustment_choice_counts_match_the_ranges() {
        let ranges = AdjustRanges::from_driver_settings();
        let text = render(printer_by_driver("escp2-870").unwrap());
        for knob in ranges.for_output(OutputType::Color) {
            let expected = ((knob.high - knob.low) / knob.step + 1) as usize;
            assert_eq!(
                count_prefix(&text, &format!("*{} ", knob.name)),
                expected,
                "{}",
                knob.name
            );
        }
        // labels are the value in thousandths, three decimals
        assert!(text.contains("*stpBrightness 250/0.250: \"\"\n"));
        assert!(text.contains("*stpGamma 100/0.100: \"\"\n"));
    }

    #[test]
    fn default_keyword_ignores_the_configured_value() {
        // documented default mismatch: the emitted default stays 1000
        // even when the configured default differs
        let knob = AdjustOption {
            name: "stpBrightness",
            text: "Brightness",
            low: 0,
            high: 2000,
            defval: 1500,
            step: 50,
        };
        let ranges = AdjustRanges([knob; 8]);
        let text = render_with(printer_by_driver("pcl-4l").unwrap(), &ranges);
        assert!(text.contains("*DefaultstpBrightness: 1000\n"));
        assert!(!text.contains("*DefaultstpBrightness: 1500"));
    }

    #[test]
    fn variable_sizes_and_custom_block_are_coupled() {
        let with = render(printer_by_driver("escp2-870").unwrap());
        assert!(with.contains("*VariableSizes: true\n"));
        assert!(with.contains("*CustomPageSize True: \"pop pop pop"));
        assert!(with.contains("*ParamCustomPageSize Width: 1 points 72 612\n"));
        assert!(with.contains("*ParamCustomPageSize Height: 2 points 72 3168\n"));
        assert!(with.contains("*MaxMediaWidth: \"612\"\n"));
        assert!(with.contains("*MaxMediaHeight: \"3168\"\n"));

        let without = render(printer_by_driver("pcl-4l").unwrap());
        assert!(without.contains("*VariableSizes: false\n"));
        assert!(!without.contains("*CustomPageSize"));
        assert!(!without.contains("*ParamCustomPageSize"));
    }

    #[test]
    fn invalid_resolution_is_dropped() {
        let text = render(&ODD_PRINTER);
        assert!(text.contains("*Resolution 300x300dpi/"));
        assert!(!text.contains("badres"));
        // the compression hint keeps the position in the driver's list
        assert!(text.contains("/cupsCompression 0>>setpagedevice"));
        assert!(text.contains("*Resolution 600x600dpi/600 x 600 DPI:\t\"<</HWResolution[600 600]/cupsCompression 2>>setpagedevice\"\n"));
    }

    #[test]
    fn imageable_area_uses_flipped_margins() {
        // Letter on escp2-870: borders left/right 9, top 9, bottom 40
        let text = render(printer_by_driver("escp2-870").unwrap());
        assert!(text.contains("*ImageableArea Letter/Letter:\t\"9 40 603 783\"\n"));
        assert!(text.contains("*PaperDimension Letter/Letter:\t\"612 792\"\n"));
    }

    #[test]
    fn epson_gets_the_command_filter() {
        let epson = render(printer_by_driver("escp2-870").unwrap());
        assert!(epson.contains("commandtoepson"));
        let canon = render(printer_by_driver("bjc-6000").unwrap());
        assert!(!canon.contains("commandtoepson"));
    }

    #[test]
    fn empty_parameter_classes_omit_the_whole_group() {
        let epson = render(printer_by_driver("escp2-870").unwrap());
        assert!(!epson.contains("*OpenUI *InputSlot"));
        assert!(epson.contains("*OpenUI *MediaType/Media Type: PickOne"));
        assert!(epson.contains("*OpenUI *stpInkType/Ink Type: PickOne"));

        let laser = render(printer_by_driver("pcl-4l").unwrap());
        assert!(laser.contains("*OpenUI *InputSlot/Media Source: PickOne"));
        assert!(!laser.contains("*OpenUI *MediaType"));
        assert!(!laser.contains("*OpenUI *stpInkType"));
    }

    #[test]
    fn color_model_follows_capability() {
        let color = render(printer_by_driver("bjc-6000").unwrap());
        assert!(color.contains("*DefaultColorModel: RGB\n"));
        assert!(color.contains("*ColorModel RGB/Color:"));
        assert!(color.contains("*ColorModel CMYK/Raw CMYK:"));

        let mono = render(printer_by_driver("pcl-4l").unwrap());
        assert!(mono.contains("*DefaultColorModel: Gray\n"));
        assert!(mono.contains("*ColorModel Gray/Grayscale:"));
        assert!(mono.contains("*ColorModel Black/Black & White:"));
        assert!(!mono.contains("*ColorModel RGB/"));
        assert!(!mono.contains("*ColorModel CMYK/"));
    }

    #[test]
    fn ui_and_group_scopes_nest_lifo() {
        for p in printdrv::known_printers() {
            let text = render(p);
            let mut stack: Vec<String> = Vec::new();
            for line in text.lines() {
                if let Some(rest) = line.strip_prefix("*OpenUI *") {
                    let key = rest.split(|c| c == '/' || c == ':').next().unwrap();
                    stack.push(format!("ui {}", key));
                } else if let Some(rest) = line.strip_prefix("*CloseUI: *") {
                    assert_eq!(stack.pop().as_deref(), Some(format!("ui {}", rest).as_str()));
                } else if let Some(rest) = line.strip_prefix("*OpenGroup: ") {
                    stack.push(format!("group {}", rest));
                } else if let Some(rest) = line.strip_prefix("*CloseGroup: ") {
                    assert_eq!(
                        stack.pop().as_deref(),
                        Some(format!("group {}", rest).as_str())
                    );
                }
            }
            assert!(stack.is_empty(), "unbalanced scopes for {}", p.driver());
        }
    }

    #[test]
    fn font_list_is_invariant_across_drivers() {
        let epson = render(printer_by_driver("escp2-870").unwrap());
        let laser = render(printer_by_driver("pcl-4l").unwrap());
        let fonts = |text: &str| -> Vec<String> {
            text.lines()
                .filter(|l| l.starts_with("*Font "))
                .map(str::to_string)
                .collect()
        };
        assert_eq!(fonts(&epson), fonts(&laser));
        assert_eq!(fonts(&epson).len(), FONTS.len());
        assert_eq!(FONTS.len(), 35);
        assert!(epson.contains("*DefaultFont: Courier\n"));
        assert!(epson.contains("*Font ZapfDingbats: Special \"(001.004S)\" Standard ROM\n"));
    }

    #[test]
    fn document_ends_with_the_driver_footer() {
        let text = render(printer_by_driver("bjc-6000").unwrap());
        assert!(text.ends_with("*%End of bjc-6000.ppd\n"));
        assert!(text.starts_with("*PPD-Adobe: \"4.3\"\n"));
    }
}
