use std::io::Write;

use geoip::Property;

use crate::error::Result;

/// Prints the property vocabulary, one name and category per line.
pub fn run<W: Write>(out: &mut W) -> Result<()> {
    for p in Property::all() {
        writeln!(out, "{}\t{}", p, p.category())?;
    }

    Ok(())
}
