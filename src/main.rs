//! # PPD generator for CUPS
//!
//! Walks the driver registry and writes one PPD file per printer model.

use color_eyre::eyre::{self, WrapErr};

use ppd_tool::cli::{
    self, langs, models,
    opt::Options,
    ppd::{write_ppd, AdjustRanges},
};
use printdrv::{find_printer, known_printers};

fn run(opt: Options) -> eyre::Result<()> {
    if opt.list_locales {
        langs::print_locales(&opt.localedir);
        return Ok(());
    }
    if opt.list_models {
        models::print_models(opt.verbose);
        return Ok(());
    }

    if let Some(locale) = &opt.locale {
        langs::bind_locale(&opt.localedir, locale)
            .wrap_err_with(|| format!("Failed to select output locale `{}`", locale))?;
    }

    let verbose = opt.is_verbose();
    let ranges = AdjustRanges::from_driver_settings();

    if opt.models.is_empty() {
        for printer in known_printers() {
            write_ppd(printer, &opt.prefix, &ranges, verbose)?;
        }
    } else {
        for name in &opt.models {
            let printer = find_printer(name)?;
            write_ppd(printer, &opt.prefix, &ranges, verbose)?;
        }
    }

    if !verbose {
        eprintln!(" done.");
    }
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    let opt: Options = cli::init()?;
    run(opt)
}
