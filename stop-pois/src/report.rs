//! Plain-text report of food near each stop.

use std::io::{self, Write};

use crate::pipeline::StopResult;
use crate::taxonomy::CategoryTaxonomy;

/// Rule printed under each stop name.
const RULE: &str = "-----------";

/// Write each stop's name followed by its food businesses, one per line.
///
/// Stops keep their route order and businesses their search order. Stops
/// without any food still get a header.
pub fn write_report<W: Write>(
    out: &mut W,
    results: &[StopResult],
    taxonomy: &CategoryTaxonomy,
) -> io::Result<()> {
    for result in results {
        let (food, _) = result.partition_food(taxonomy);

        writeln!(out)?;
        writeln!(out)?;
        writeln!(out, "{}", result.stop.name)?;
        writeln!(out, "{RULE}")?;
        for business in food {
            writeln!(out, "{}", business.name)?;
        }
    }
    out.flush()
}
