//! Parse a unix socket DSN and bind it into a config struct.
//!
//! Run with `cargo run --example basic`, optionally with `DSNKIT_DEBUG=1`
//! and the `tracing-subscriber` feature to see binder events.

use dsnkit::{Bind, Dsn};

#[derive(Debug, Default, Bind)]
struct Options {
    #[dsn("timeout")]
    timeout: u32,
    #[dsn("tag")]
    tags: Vec<String>,
}

#[derive(Debug, Default, Bind)]
struct Config {
    #[dsn("scheme")]
    scheme: String,
    #[dsn("address")]
    address: String,
    #[dsn("query")]
    options: Options,
    #[dsn("query.limit")]
    limit: i32,
}

fn main() -> Result<(), dsnkit::Error> {
    dsnkit::logging::init();

    let dsn = Dsn::parse("unix:///var/lib/wss.sock?timeout=3&tag=game&tag=any&limit=5")?;

    let mut config = Config::default();
    dsn.bind(&mut config)?;

    println!("{:#?}", config);
    Ok(())
}
