use std::io::{self, BufWriter, Write};

use clap::Parser;
use lib_checker::{init_logging, run, Config};
use proconio::source::once::OnceSource;

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = Config::parse();
    let mut source = OnceSource::new(io::stdin().lock());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(&config, &mut source, &mut out)?;
    out.flush()?;
    Ok(())
}
