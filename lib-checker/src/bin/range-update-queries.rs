// CSES 1651 Range Update Queries
use std::io::{self, BufWriter, Write};

use lib_checker::{init_logging, range_update_queries};
use proconio::source::once::OnceSource;

fn main() -> anyhow::Result<()> {
    init_logging();
    let mut source = OnceSource::new(io::stdin().lock());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    range_update_queries(&mut source, &mut out)?;
    out.flush()?;
    Ok(())
}
