//! # Print variables
//!
//! A [`Vars`] value is a snapshot of everything that can be selected for a
//! print run: the output type, one keyword per parameter class, and the
//! eight numeric tone/color adjustments. Geometry queries on a printer are
//! answered relative to such a snapshot (most importantly the selected
//! `PageSize`).

use std::collections::BTreeMap;

use crate::params::ParamClass;

/// Whether a device renders color or grayscale output
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OutputType {
    /// Single-channel grayscale output
    Gray,
    /// Full color output
    Color,
}

/// Bounds for the numeric adjustments: (low, high, default)
const BRIGHTNESS: (f32, f32, f32) = (0.0, 2.0, 1.0);
const CONTRAST: (f32, f32, f32) = (0.0, 2.0, 1.0);
const GAMMA: (f32, f32, f32) = (0.1, 4.0, 1.0);
const DENSITY: (f32, f32, f32) = (0.1, 2.0, 1.0);
const CYAN: (f32, f32, f32) = (0.0, 4.0, 1.0);
const MAGENTA: (f32, f32, f32) = (0.0, 4.0, 1.0);
const YELLOW: (f32, f32, f32) = (0.0, 4.0, 1.0);
const SATURATION: (f32, f32, f32) = (0.0, 9.0, 1.0);

/// A mutable snapshot of print settings
#[derive(Debug, Clone)]
pub struct Vars {
    output_type: OutputType,
    selections: BTreeMap<ParamClass, String>,
    /// Brightness adjustment
    pub brightness: f32,
    /// Contrast adjustment
    pub contrast: f32,
    /// Gamma correction
    pub gamma: f32,
    /// Ink density
    pub density: f32,
    /// Cyan balance
    pub cyan: f32,
    /// Magenta balance
    pub magenta: f32,
    /// Yellow balance
    pub yellow: f32,
    /// Color saturation
    pub saturation: f32,
}

impl Vars {
    /// A snapshot with default adjustments and no selections
    pub fn new(output_type: OutputType) -> Self {
        Self {
            output_type,
            selections: BTreeMap::new(),
            brightness: BRIGHTNESS.2,
            contrast: CONTRAST.2,
            gamma: GAMMA.2,
            density: DENSITY.2,
            cyan: CYAN.2,
            magenta: MAGENTA.2,
            yellow: YELLOW.2,
            saturation: SATURATION.2,
        }
    }

    /// The output type of this snapshot
    pub fn output_type(&self) -> OutputType {
        self.output_type
    }

    /// Select `name` on the given parameter class
    pub fn set(&mut self, class: ParamClass, name: &str) {
        self.selections.insert(class, name.to_string());
    }

    /// The current selection on the given parameter class, if any
    pub fn get(&self, class: ParamClass) -> Option<&str> {
        self.selections.get(&class).map(String::as_str)
    }
}

fn with_adjustments(pick: impl Fn((f32, f32, f32)) -> f32) -> Vars {
    let mut v = Vars::new(OutputType::Color);
    v.brightness = pick(BRIGHTNESS);
    v.contrast = pick(CONTRAST);
    v.gamma = pick(GAMMA);
    v.density = pick(DENSITY);
    v.cyan = pick(CYAN);
    v.magenta = pick(MAGENTA);
    v.yellow = pick(YELLOW);
    v.saturation = pick(SATURATION);
    v
}

/// The lower bound of every numeric adjustment
pub fn minimum_settings() -> Vars {
    with_adjustments(|(low, _, _)| low)
}

/// The upper bound of every numeric adjustment
pub fn maximum_settings() -> Vars {
    with_adjustments(|(_, high, _)| high)
}

/// The default value of every numeric adjustment
pub fn default_settings() -> Vars {
    with_adjustments(|(_, _, default)| default)
}
