//! The `-M` model listing

use prettytable::{format, row, Table};
use printdrv::known_printers;

use super::ppd::is_generic_postscript;

/// Print the known models, excluding the generic PostScript drivers.
///
/// Verbose mode adds the full display name in a second column.
pub fn print_models(verbose: bool) {
    if verbose {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["Driver", "Model"]);
        for p in known_printers() {
            if is_generic_postscript(p.driver()) {
                continue;
            }
            table.add_row(row![p.driver(), p.long_name()]);
        }
        table.printstd();
    } else {
        for p in known_printers() {
            if is_generic_postscript(p.driver()) {
                continue;
            }
            println!("{}", p.driver());
        }
    }
}
