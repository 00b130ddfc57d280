//! Command line options

use std::path::PathBuf;

use clap::Parser;

const EXAMPLES: &str = "EXAMPLES:
    LANG=de_DE ppd-tool -p ppd -c /usr/share/locale
    ppd-tool -L -c /usr/share/locale
    ppd-tool -M -v
";

/// Generate PPD files for CUPS from the built-in printer drivers
#[derive(Parser)]
#[clap(name = "ppd-tool", version, after_help = EXAMPLES)]
pub struct Options {
    /// Output PPDs in this directory
    #[clap(long, short = 'p', default_value = "ppd")]
    pub prefix: PathBuf,
    /// Base directory for locale data
    #[clap(long = "localedir", short = 'c', default_value = "/usr/share/locale")]
    pub localedir: PathBuf,
    /// Output PPDs translated with messages for this locale
    #[clap(long, short = 'l')]
    pub locale: Option<String>,
    /// Verbose mode
    #[clap(long, short = 'v')]
    pub verbose: bool,
    /// Quiet mode
    #[clap(long, short = 'q')]
    pub quiet: bool,
    /// List available translations (message catalogs) and exit
    #[clap(long = "list-locales", short = 'L')]
    pub list_locales: bool,
    /// List available printer models and exit
    #[clap(long = "list-models", short = 'M')]
    pub list_models: bool,
    /// Printer models to output, by driver key or quoted full name.
    ///
    /// All models are written when none are given.
    pub models: Vec<String>,
}

impl Options {
    /// Whether per-file progress should be reported
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }
}
