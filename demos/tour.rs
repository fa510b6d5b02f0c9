// Walks a container of integers through every traversal order,
// then shows removal, the end sentinel and snapshot behaviour.
//
//   cargo run --example tour -- 7 15 6 1 2 --order middle-out -vv

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use env_logger::Env;
use orderly::{Container, Error, Order};

#[derive(Parser, Debug)]
#[command(
    about = "Tour the traversal orders of a container",
    long_about = None
)]
struct Cli {
    /// Values to add, in insertion order
    #[arg(default_values_t = [42, 17, 23, 17, 99, 5])]
    values: Vec<i64>,

    /// Orders to print (all of them if omitted)
    #[arg(short, long = "order", value_name = "ORDER")]
    orders: Vec<Order>,

    /// Values to remove after the traversals
    #[arg(short, long = "remove", value_name = "VALUE")]
    removals: Vec<i64>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger(&cli, Env::default()).init();

    let mut container: Container<i64> =
        cli.values.iter().copied().collect();
    println!("size {}: {container}", container.size());

    let orders = if cli.orders.is_empty() {
        Order::ALL.to_vec()
    } else {
        cli.orders.clone()
    };
    for order in orders {
        print_order(&container, order)?;
    }

    for value in &cli.removals {
        if container.contains(value) {
            let count = container.count(value);
            log::debug!("{value} occurs {count} times before removal");
        }
        match container.remove(value) {
            Ok(count) => println!("removed {count} × {value}: {container}"),
            Err(Error::NotFound) => println!("{value} is not in {container}"),
            Err(e) => return Err(e.into()),
        }
    }

    end_sentinel(&container);
    snapshot();
    Ok(())
}

// The flags set the level; a filter in the environment (`RUST_LOG` by
// default) overrides them.
fn logger(cli: &Cli, env: Env) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(cli.verbose.log_level_filter())
        .parse_env(env)
        .format_timestamp(None);
    builder
}

// Uses the cursor protocol directly, as a hand-written loop would.
fn print_order(container: &Container<i64>, order: Order) -> Result<()> {
    let mut it = container.begin_order(order);
    let end = container.end_order(order);
    let mut line = Vec::with_capacity(it.len());
    while it != end {
        line.push(it.get(container)?.to_string());
        it.advance()?;
    }
    println!("{order:>10}: {}", line.join(" "));
    Ok(())
}

fn end_sentinel(container: &Container<i64>) {
    let mut it = container.begin_ascending();
    let steps = std::iter::from_fn(|| it.advance().ok()).count();
    log::debug!("reached the end sentinel after {steps} steps");
    if let Err(e) = it.advance() {
        println!("advancing again: {e}");
    }
    if let Err(e) = it.get(container) {
        println!("reading the sentinel: {e}");
    }
}

fn snapshot() {
    let mut container: Container<i64> = [10, 20, 30].into_iter().collect();
    let mut it = container.begin_ascending();
    println!("snapshot of {container} starts at {:?}", it.get(&container));

    container.add(5);
    if let Err(e) = container.remove(&20) {
        log::warn!("unexpected: {e}");
    }
    let stale = it.is_stale(&container);
    println!("container is now {container}; cursor stale: {stale}");

    if it.advance().is_ok() {
        println!("old cursor reads {:?}", it.get(&container));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn verbosity_flags() {
        let level = |args: &[&str]| {
            let cli = Cli::try_parse_from(args).unwrap();
            cli.verbose.log_level_filter()
        };
        assert_eq!(level(&["tour"]), LevelFilter::Info);
        assert_eq!(level(&["tour", "-v"]), LevelFilter::Debug);
        assert_eq!(level(&["tour", "-vv"]), LevelFilter::Trace);
        assert_eq!(level(&["tour", "-q"]), LevelFilter::Warn);
    }

    #[test]
    fn environment_overrides_flags() {
        let cli = Cli::try_parse_from(["tour", "-v"]).unwrap();
        let unset = Env::new().filter("TOUR_LOG_UNSET");
        assert_eq!(logger(&cli, unset).build().filter(), LevelFilter::Debug);

        std::env::set_var("TOUR_LOG_WARN", "warn");
        let set = Env::new().filter("TOUR_LOG_WARN");
        assert_eq!(logger(&cli, set).build().filter(), LevelFilter::Warn);
    }

    #[test]
    fn orders_and_removals() {
        let args = ["tour", "1", "2", "-o", "side-cross", "-r", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.values, [1, 2]);
        assert_eq!(cli.orders, [Order::SideCross]);
        assert_eq!(cli.removals, [2]);
    }
}
