//! Message catalog discovery and locale binding.
//!
//! Translations live under `<base>/<locale>/LC_MESSAGES/`; a locale counts
//! as available when its compiled catalog file exists there.

use std::env;
use std::io;
use std::path::Path;

use color_eyre::eyre::{self, eyre};
use log::warn;

/// File name of the compiled message catalog
pub const CATALOG: &str = "ppd-tool.mo";

fn has_catalog(base: &Path, locale: &str) -> bool {
    base.join(locale).join("LC_MESSAGES").join(CATALOG).is_file()
}

/// The locales under `base` that carry a message catalog, sorted
pub fn available_locales(base: &Path) -> io::Result<Vec<String>> {
    let mut locales = Vec::new();
    for entry in base.read_dir()? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            if has_catalog(base, &name) {
                locales.push(name);
            }
        }
    }
    locales.sort();
    Ok(locales)
}

/// Print one locale per line for the `-L` listing
pub fn print_locales(base: &Path) {
    let locales = available_locales(base).unwrap_or_else(|e| {
        warn!("Cannot scan locale directory {}: {}", base.display(), e);
        Vec::new()
    });
    for locale in locales {
        println!("{}", locale);
    }
}

/// Bind the requested output locale for this process.
///
/// Fails when no catalog exists for `locale` under `base`.
pub fn bind_locale(base: &Path, locale: &str) -> eyre::Result<()> {
    let locales = available_locales(base).unwrap_or_default();
    if !locales.iter().any(|l| l == locale) {
        return Err(eyre!(
            "cannot load message catalog {} for locale {} under {}",
            CATALOG,
            locale,
            base.display()
        ));
    }
    for var in &[
        "LC_CTYPE",
        "LC_COLLATE",
        "LC_TIME",
        "LC_NUMERIC",
        "LC_MONETARY",
        "LC_MESSAGES",
        "LC_ALL",
        "LANG",
    ] {
        env::remove_var(var);
    }
    env::set_var("LC_ALL", locale);
    env::set_var("LANG", locale);
    Ok(())
}
