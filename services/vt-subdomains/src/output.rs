//! Result rendering
//!
//! The sorted subdomain list is the only thing written to stdout; logs go to
//! stderr so the output can be piped straight into other tools.

use std::io::{self, Write};
use vt_client::SubdomainSet;

/// Write one identifier per line in lexicographic order.
pub fn write_subdomains<W: Write>(out: &mut W, results: &SubdomainSet) -> io::Result<()> {
    for id in results.iter() {
        writeln!(out, "{id}")?;
    }
    out.flush()
}
