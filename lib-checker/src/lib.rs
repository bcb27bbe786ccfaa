use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use fenwick::Fenwick;
use proconio::{input, source::once::OnceSource};
use query::{Mode, QueryError};
use segtree::{LazySegtree, Segtree};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// `1 k u`: 位置kにuを演算, `2 a b`: 区間[a, b]の集約値
    Fenwick,
    /// `1 k u`: 位置kをuに変更, `2 a b`: 区間[a, b]の集約値
    Segtree,
    /// `1 a b u`: 区間[a, b]にuを作用, `2 a b`: 区間[a, b]の集約値
    Lazy,
}

/// 標準入力の`n q`, 数列, `q`個のクエリを読んで答えを出力する。位置は1-indexed。
#[derive(Debug, Clone, Parser)]
#[command(about = "Answer range queries read from stdin")]
pub struct Config {
    #[arg(long, value_enum, default_value_t = Variant::Segtree)]
    pub variant: Variant,

    /// sum, min, max, xor, prod, freq
    #[arg(long, default_value = "sum")]
    pub mode: String,
}

/// `RUST_LOG`で出力レベルを指定する。答えと混ざらないよう標準エラー出力に書く。
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("failed to install the log subscriber: {e}");
    }
}

/// 1-indexedの位置`k`を0-indexedに直す。`k == 0`は範囲外。
pub fn zero_based(k: usize, len: usize) -> query::Result<usize> {
    k.checked_sub(1)
        .ok_or(QueryError::IndexOutOfRange { index: k, len })
}

pub fn run<R: BufRead, W: Write>(
    config: &Config,
    source: &mut OnceSource<R>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mode = config.mode.parse::<Mode>()?;
    input! {
        from &mut *source,
        n: usize,
        q: usize,
        values: [i64; n],
    }
    tracing::info!(variant = ?config.variant, %mode, n, q, "answering queries");
    if config.variant == Variant::Fenwick && !mode.is_invertible() {
        tracing::warn!(%mode, "only prefix queries (a = 1) can be answered");
    }
    match config.variant {
        Variant::Fenwick => run_fenwick(mode, values, q, source, out),
        Variant::Segtree => run_segtree(mode, values, q, source, out),
        Variant::Lazy => run_lazy(mode, values, q, source, out),
    }
}

fn run_fenwick<R: BufRead, W: Write>(
    mode: Mode,
    values: Vec<i64>,
    q: usize,
    source: &mut OnceSource<R>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut ft = Fenwick::from_iter_op(values, mode);
    for i in 0..q {
        input! {
            from &mut *source,
            t: u8,
        }
        let context = || format!("query #{}", i + 1);
        match t {
            1 => {
                input! {
                    from &mut *source,
                    k: usize,
                    u: i64,
                }
                ft.update(k, u).with_context(context)?;
            }
            2 => {
                input! {
                    from &mut *source,
                    a: usize,
                    b: usize,
                }
                let v = ft.range_query(a, b).with_context(context)?;
                writeln!(out, "{v}")?;
            }
            _ => bail!("unknown query type {t} at {}", context()),
        }
    }
    Ok(())
}

fn run_segtree<R: BufRead, W: Write>(
    mode: Mode,
    values: Vec<i64>,
    q: usize,
    source: &mut OnceSource<R>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut segtree = Segtree::from_iter_op(values, mode);
    for i in 0..q {
        input! {
            from &mut *source,
            t: u8,
        }
        let context = || format!("query #{}", i + 1);
        match t {
            1 => {
                input! {
                    from &mut *source,
                    k: usize,
                    u: i64,
                }
                let k = zero_based(k, segtree.len()).with_context(context)?;
                segtree.update(k, u).with_context(context)?;
            }
            2 => {
                input! {
                    from &mut *source,
                    a: usize,
                    b: usize,
                }
                let a = zero_based(a, segtree.len()).with_context(context)?;
                let v = segtree.query(a..b).with_context(context)?;
                writeln!(out, "{v}")?;
            }
            _ => bail!("unknown query type {t} at {}", context()),
        }
    }
    Ok(())
}

fn run_lazy<R: BufRead, W: Write>(
    mode: Mode,
    values: Vec<i64>,
    q: usize,
    source: &mut OnceSource<R>,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut segtree = LazySegtree::from_iter_op(values, mode);
    for i in 0..q {
        input! {
            from &mut *source,
            t: u8,
            a: usize,
            b: usize,
        }
        let context = || format!("query #{}", i + 1);
        let a = zero_based(a, segtree.len()).with_context(context)?;
        match t {
            1 => {
                input! {
                    from &mut *source,
                    u: i64,
                }
                segtree.apply_range(a..b, u).with_context(context)?;
            }
            2 => {
                let v = segtree.query(a..b).with_context(context)?;
                writeln!(out, "{v}")?;
            }
            _ => bail!("unknown query type {t} at {}", context()),
        }
    }
    Ok(())
}

/// CSES 1651 Range Update Queries
///
/// `1 a b u`: 区間[a, b]にuを加算, `2 k`: 位置kの値
pub fn range_update_queries<R: BufRead, W: Write>(
    source: &mut OnceSource<R>,
    out: &mut W,
) -> anyhow::Result<()> {
    input! {
        from &mut *source,
        n: usize,
        q: usize,
        x: [i64; n],
    }
    let mut segtree = LazySegtree::from_iter_op(x, Mode::Sum);
    for i in 0..q {
        input! {
            from &mut *source,
            t: u8,
        }
        let context = || format!("query #{}", i + 1);
        match t {
            1 => {
                input! {
                    from &mut *source,
                    a: usize,
                    b: usize,
                    u: i64,
                }
                let a = zero_based(a, n).with_context(context)?;
                segtree.apply_range(a..b, u).with_context(context)?;
            }
            2 => {
                input! {
                    from &mut *source,
                    k: usize,
                }
                let k = zero_based(k, n).with_context(context)?;
                writeln!(out, "{}", segtree.get(k).with_context(context)?)?;
            }
            _ => bail!("unknown query type {t} at {}", context()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_test() {
        assert_eq!(zero_based(1, 3), Ok(0));
        assert_eq!(
            zero_based(0, 3),
            Err(QueryError::IndexOutOfRange { index: 0, len: 3 })
        );
    }

    #[test]
    fn init_logging_twice_test() {
        init_logging();
        init_logging();
        tracing::info!("still running");
    }

    #[test]
    fn config_test() {
        let config = Config::parse_from(["range-query"]);
        assert_eq!(config.variant, Variant::Segtree);
        assert_eq!(config.mode, "sum");

        let config = Config::parse_from(["range-query", "--variant", "lazy", "--mode", "max"]);
        assert_eq!(config.variant, Variant::Lazy);
        assert_eq!(config.mode, "max");

        assert!(Config::try_parse_from(["range-query", "--variant", "splay"]).is_err());
    }
}
