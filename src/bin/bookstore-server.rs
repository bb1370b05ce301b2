//! this binary starts the bookstore server
//! to see the list of options, type: `bookstore-server --help`

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;

use bookstore::{BookstoreError, BookstoreServer, JsonStore, MemoryStore, Result, SessionRegistry, Store};
use clap::{arg_enum, crate_version, value_t, App, Arg};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum StoreKind {
        json,
        memory
    }
}

const DEFAULT_ADDRESS: &str = "127.0.0.1:3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LOG_LEVEL: &str = "info";
// overrides the port of the default address when --addr is not given
const PORT_ENV: &str = "PORT";

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    addr: SocketAddr,
    store: StoreKind,
    data_dir: PathBuf,
    log_level: Level,
}

impl Opt {
    /// validates the command line parameters
    /// returns `Ok<Opt>` if everything is valid
    /// # Errors
    /// returns [`BookstoreError::Parsing`] if one of the parameters is invalid
    ///
    fn build(addr: &str, store: StoreKind, data_dir: &str, log_level: &str) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            BookstoreError::Parsing(format!("could not parse {} into an IP address and port", &addr))
        })?;
        let log_level = Level::from_str(log_level)
            .map_err(|_| BookstoreError::Parsing(format!("unknown log level: {}", log_level)))?;

        Ok(Opt {
            addr,
            store,
            data_dir: PathBuf::from(data_dir),
            log_level,
        })
    }
}

#[tokio::main]
async fn main() {
    // parse command line args
    let matches = App::new("bookstore-server")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("a book catalog and review service")
        .arg(Arg::with_name("addr")
            .long("addr")
            .value_name("IP_ADDR:PORT")
            .help("sets the IP_ADDR:PORT that the server listens on")
            .default_value(DEFAULT_ADDRESS))
        .arg(Arg::with_name("store")
            .long("store")
            .value_name("STORE")
            .help("sets the storage engine to use, either 'json' or 'memory'")
            .possible_values(&StoreKind::variants())
            .default_value("json"))
        .arg(Arg::with_name("data-dir")
            .long("data-dir")
            .value_name("DIR")
            .help("sets the directory holding books.json and users.json")
            .default_value(DEFAULT_DATA_DIR))
        .arg(Arg::with_name("log-level")
            .long("log-level")
            .value_name("LEVEL")
            .help("sets the maximum log level: error, warn, info, debug or trace")
            .default_value(DEFAULT_LOG_LEVEL))
        .get_matches();

    let addr = listen_addr(
        matches.value_of("addr").unwrap_or(DEFAULT_ADDRESS),
        matches.occurrences_of("addr") > 0,
        env::var(PORT_ENV).ok(),
    );
    let store = value_t!(matches, "store", StoreKind).unwrap_or(StoreKind::json);
    let data_dir = matches.value_of("data-dir").unwrap_or(DEFAULT_DATA_DIR);
    let log_level = matches.value_of("log-level").unwrap_or(DEFAULT_LOG_LEVEL);

    let opt = match Opt::build(&addr, store, data_dir, log_level) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // set up a tracing subscriber to log to STDERR
    subscriber_config(opt.log_level);

    // start the server
    if let Err(e) = run(opt).await {
        eprintln!("{}", e);
        exit(1);
    }
}

/// chooses the address to listen on. An explicit --addr wins over the PORT environment variable,
/// which otherwise replaces the port of the default address.
fn listen_addr(addr: &str, explicit: bool, port: Option<String>) -> String {
    match port {
        Some(port) if !explicit => format!("127.0.0.1:{}", port),
        _ => addr.to_string(),
    }
}

async fn run(opt: Opt) -> Result<()> {
    info!("bookstore-server {}", env!("CARGO_PKG_VERSION"));
    info!("Storage engine: {}", opt.store);

    match opt.store {
        StoreKind::json => {
            info!("Data directory: {:?}", opt.data_dir);
            run_with_store(JsonStore::open(&opt.data_dir)?, opt.addr).await
        }
        StoreKind::memory => run_with_store(MemoryStore::seeded()?, opt.addr).await,
    }
}

async fn run_with_store<S: Store>(store: S, addr: SocketAddr) -> Result<()> {
    let server = BookstoreServer::new(store, SessionRegistry::new());
    server.run(addr).await
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config(level: Level) {
    let subscriber = FmtSubscriber::builder()
        // all spans/events at `level` or more severe will be written
        .with_max_level(level)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not set the tracing subscriber: {}", e);
    }
}
