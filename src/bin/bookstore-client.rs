//! The bookstore-client executable supports the following command line arguments:
//!
//! `bookstore-client books`
//!
//!     List every book in the catalog.
//!
//! `bookstore-client isbn <ISBN>` / `author <AUTHOR>` / `title <TITLE>`
//!
//!     Find a book by ISBN, or the books whose author or title contains the given text.
//!
//! `bookstore-client reviews <ISBN>`
//!
//!     List the reviews of a book.
//!
//! `bookstore-client register <USERNAME> <PASSWORD>` / `login <USERNAME> <PASSWORD>`
//!
//!     Register a new account, or log in and print the session token.
//!
//! `bookstore-client review <ISBN> <RATING> <COMMENT> --token <TOKEN>`
//!
//!     Add, or modify, your review of a book.
//!
//! `bookstore-client unreview <ISBN> --token <TOKEN>`
//!
//!     Delete your review of a book.
//!
//! Every command accepts `--url BASE_URL`, defaulting to http://127.0.0.1:3000/api.
//! Results are printed as JSON. An error is printed to STDERR with a non-zero exit code.

use std::process::exit;

use bookstore::{BookstoreClient, BookstoreError, Result};
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use serde::Serialize;
use serde_json::Number;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const DEFAULT_URL: &str = "http://127.0.0.1:3000/api";

/// the requests the client can make
#[derive(Debug)]
enum Command {
    Books,
    Isbn(String),
    Author(String),
    Title(String),
    Reviews(String),
    Register { username: String, password: String },
    Login { username: String, password: String },
    Review { isbn: String, rating: Number, comment: String, token: String },
    Unreview { isbn: String, token: String },
}

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    /// base url of the server's api
    url: String,
    cmd: Command,
}

fn main() {
    // configure a subscriber that will log messages to STDERR
    subscriber_config();

    let token_arg = || {
        Arg::with_name("token")
            .long("token")
            .value_name("TOKEN")
            .help("the session token returned by `login`")
            .required(true)
    };

    let matches = App::new("bookstore-client")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("talks to a bookstore server")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(vec![
            SubCommand::with_name("books").about("List every book in the catalog"),
            SubCommand::with_name("isbn")
                .about("Get the book with the given ISBN")
                .arg(Arg::with_name("ISBN").required(true).index(1)),
            SubCommand::with_name("author")
                .about("Find books whose author contains AUTHOR")
                .arg(Arg::with_name("AUTHOR").required(true).index(1)),
            SubCommand::with_name("title")
                .about("Find books whose title contains TITLE")
                .arg(Arg::with_name("TITLE").required(true).index(1)),
            SubCommand::with_name("reviews")
                .about("List the reviews of a book")
                .arg(Arg::with_name("ISBN").required(true).index(1)),
            SubCommand::with_name("register")
                .about("Register a new account")
                .arg(Arg::with_name("USERNAME").required(true).index(1))
                .arg(Arg::with_name("PASSWORD").required(true).index(2)),
            SubCommand::with_name("login")
                .about("Log in and print a session token")
                .arg(Arg::with_name("USERNAME").required(true).index(1))
                .arg(Arg::with_name("PASSWORD").required(true).index(2)),
            SubCommand::with_name("review")
                .about("Add or modify your review of a book")
                .arg(Arg::with_name("ISBN").required(true).index(1))
                .arg(Arg::with_name("RATING").required(true).index(2))
                .arg(Arg::with_name("COMMENT").required(true).index(3))
                .arg(token_arg()),
            SubCommand::with_name("unreview")
                .about("Delete your review of a book")
                .arg(Arg::with_name("ISBN").required(true).index(1))
                .arg(token_arg()),
        ])
        .arg(Arg::with_name("url")
            .long("url")
            .value_name("BASE_URL")
            .help("sets the base url of the server's api")
            .global(true)
            .default_value(DEFAULT_URL))
        .get_matches();

    // parse commands into an Opt struct, then run it
    if let Err(e) = parse_options(&matches).and_then(run) {
        eprintln!("{}", e);
        exit(1);
    }
}

/// runs the specified command on a [`BookstoreClient`] and prints the result
fn run(opt: Opt) -> Result<()> {
    let client = BookstoreClient::new(&opt.url)?;
    match opt.cmd {
        Command::Books => print(&client.books()?),
        Command::Isbn(isbn) => print(&client.book_by_isbn(&isbn)?),
        Command::Author(author) => print(&client.books_by_author(&author)?),
        Command::Title(title) => print(&client.books_by_title(&title)?),
        Command::Reviews(isbn) => print(&client.reviews(&isbn)?),
        Command::Register { username, password } => print(&client.register(&username, &password)?),
        Command::Login { username, password } => print(&client.login(&username, &password)?),
        Command::Review { isbn, rating, comment, token } => {
            print(&client.put_review(&token, &isbn, rating, &comment)?)
        }
        Command::Unreview { isbn, token } => print(&client.delete_review(&token, &isbn)?),
    }
}

/// parses the matches from the command line into an [`Opt`] struct
fn parse_options(matches: &ArgMatches) -> Result<Opt> {
    let cmd = match matches.subcommand() {
        ("books", Some(_)) => Command::Books,
        ("isbn", Some(args)) => Command::Isbn(value(args, "ISBN")?),
        ("author", Some(args)) => Command::Author(value(args, "AUTHOR")?),
        ("title", Some(args)) => Command::Title(value(args, "TITLE")?),
        ("reviews", Some(args)) => Command::Reviews(value(args, "ISBN")?),
        ("register", Some(args)) => Command::Register {
            username: value(args, "USERNAME")?,
            password: value(args, "PASSWORD")?,
        },
        ("login", Some(args)) => Command::Login {
            username: value(args, "USERNAME")?,
            password: value(args, "PASSWORD")?,
        },
        ("review", Some(args)) => {
            let rating = value(args, "RATING")?;
            Command::Review {
                isbn: value(args, "ISBN")?,
                rating: rating.parse().map_err(|_| {
                    BookstoreError::Parsing(format!("could not parse {} into a rating", rating))
                })?,
                comment: value(args, "COMMENT")?,
                token: value(args, "token")?,
            }
        }
        ("unreview", Some(args)) => Command::Unreview {
            isbn: value(args, "ISBN")?,
            token: value(args, "token")?,
        },
        (other, _) => return Err(BookstoreError::Parsing(format!("unknown command: {}", other))),
    };

    // --url is global, so it is also visible on the subcommand's matches
    let url = matches
        .subcommand()
        .1
        .and_then(|args| args.value_of("url"))
        .or_else(|| matches.value_of("url"))
        .unwrap_or(DEFAULT_URL)
        .to_string();

    Ok(Opt { url, cmd })
}

/// returns the value of the required argument `name`
fn value(args: &ArgMatches, name: &str) -> Result<String> {
    args.value_of(name)
        .map(String::from)
        .ok_or_else(|| BookstoreError::Parsing(format!("missing argument {}", name)))
}

/// prints `value` to STDOUT as pretty JSON
fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        // the client only reports problems
        .with_max_level(Level::WARN)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not set the tracing subscriber: {}", e);
    }
}
