// src/bin/llx.rs

//! Driver program _llx_ drives the [_llxlib_].
//!
//! Processes user-passed command-line arguments and the properties file,
//! builds one [`ExtractRequest`], then runs a [`LogExtractor`].
//!
//! Progress and warnings are printed to STDERR by a [`Logger`].
//! STDOUT is only written when passed `--offsets-only`.
//!
//! [_llxlib_]: llxlib
//! [`ExtractRequest`]: llxlib::readers::logextractor::ExtractRequest
//! [`LogExtractor`]: llxlib::readers::logextractor::LogExtractor
//! [`Logger`]: llxlib::printer::logger::Logger

#![allow(non_camel_case_types)]

use std::path::Path;
use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::{
    ArgAction,
    Parser,
    ValueEnum,
};
use ::const_format::concatcp;
use ::llxlib::data::datetime::{
    current_year,
    DatePattern,
    Year,
    REQUESTED_DATE_FORMAT,
};
use ::llxlib::printer::logger::{
    ColorChoice,
    Logger,
};
use ::llxlib::properties::{
    Properties,
    PROPERTIES_FILE_DEFAULT,
};
use ::llxlib::readers::logextractor::{
    ExtractRequest,
    LogExtractor,
};
use ::si_trace_print::stack::stack_offset_set;
#[allow(unused_imports)]
use ::si_trace_print::{
    defn,
    defo,
    defx,
    defñ,
};

// --------------------
// command-line parsing

/// general error exit value
const EXIT_ERR: u8 = 1;

/// one-line startup banner
const BANNER: &str = concatcp!("~ llx v", env!("CARGO_PKG_VERSION"));

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    ValueEnum, // from `clap`
)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

#[cfg(debug_assertions)]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "\nDEBUG BUILD";
#[cfg(not(debug_assertions))]
const CLI_HELP_AFTER_NOTE_DEBUG: &str = "";

/// `--help` _afterword_ message.
const CLI_HELP_AFTER: &str = concatcp!(
    "\
START_DATE and END_DATE are inclusive, day precision, format \"",
    REQUESTED_DATE_FORMAT,
    "\", e.g. \"02/01/2024\".
Log lines are assumed roughly ordered by date. Lines that do not match the
log line regex are skipped while searching and copied with their neighbors.

Properties (JSON object file, overridden by --prop):
    log_line_regex     regex matching one log line
    regex_group_nb     capture group holding the date substring
    log_date_format    strftime format of the date substring, without a year

A requested date not present in the file falls back to the start or end of
the file.",
    CLI_HELP_AFTER_NOTE_DEBUG,
);

// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "llx",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(Large Log Extractor)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path of the log file to extract from.
    #[clap(required = true, verbatim_doc_comment)]
    input: String,

    /// Path of the file to write. Missing parent directories are created.
    #[clap(required = true, verbatim_doc_comment)]
    output: String,

    /// First date to extract, "DD/MM/YYYY".
    #[clap(required = true, verbatim_doc_comment)]
    start_date: String,

    /// Last date to extract, "DD/MM/YYYY".
    #[clap(required = true, verbatim_doc_comment)]
    end_date: String,

    /// Year of the dates in the log. Log lines do not carry a year.
    /// Default is the current year.
    #[clap(long, verbatim_doc_comment)]
    log_year: Option<Year>,

    /// Set property PROPERTY to VALUE, overriding the properties file.
    /// May be passed more than once.
    #[clap(
        long,
        num_args = 2,
        value_names = ["PROPERTY", "VALUE"],
        action = ArgAction::Append,
        verbatim_doc_comment,
    )]
    prop: Vec<String>,

    /// Path of the JSON properties file. A missing file is ignored.
    #[clap(
        long,
        default_value_t = String::from(PROPERTIES_FILE_DEFAULT),
        verbatim_doc_comment,
    )]
    properties: String,

    /// Print more messages. Pass twice for debug messages.
    #[clap(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Print no messages.
    #[clap(short = 'q', long)]
    quiet: bool,

    /// Print messages without tags or colors, and no banner.
    #[clap(long)]
    raw: bool,

    /// Choose to print to terminal using colors.
    #[clap(
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,

    /// Resolve the byte offsets and print "START END" to STDOUT.
    /// Do not write OUTPUT.
    #[clap(long, verbatim_doc_comment)]
    offsets_only: bool,
}

/// Load the properties file then apply `--prop` overrides.
fn load_properties(args: &CLI_Args) -> anyhow::Result<Properties> {
    defn!("({:?})", args.properties);
    let mut properties = Properties::from_file(Path::new(&args.properties))
        .with_context(|| format!("cannot load properties file {:?}", args.properties))?;
    // clap guarantees `num_args = 2` per occurrence
    for pair in args.prop.chunks(2) {
        if let [key, value] = pair {
            properties.set(key, value);
        }
    }
    defx!("{:?}", properties);

    Ok(properties)
}

/// Run the extraction described by `args`.
fn run(
    args: &CLI_Args,
    logger: Logger,
) -> anyhow::Result<()> {
    defn!();
    let properties: Properties = load_properties(args)?;
    if let Some(path) = properties.path() {
        logger.debug(format!("Loaded properties file {:?}", path).as_str());
    }
    let pattern: DatePattern = DatePattern::from_properties(&properties).context("bad log line configuration")?;
    logger.info(
        format!(
            "Using date format {:?} on regex group {} of {:?}",
            pattern.format(),
            pattern.group(),
            pattern.regex_str(),
        )
        .as_str(),
    );
    let year: Year = args.log_year.unwrap_or_else(current_year);
    logger.verbose(format!("Using log year {}", year).as_str());
    let request = ExtractRequest::new(
        args.input.clone(),
        args.output.clone(),
        args.start_date.as_str(),
        args.end_date.as_str(),
        Some(year),
    )?;
    let extractor = LogExtractor::new(pattern, logger);
    if args.offsets_only {
        let range = extractor.resolve_range(&request)?;
        println!("{} {}", range.start, range.end);
    } else {
        extractor.extract(&request)?;
    }
    defx!();

    Ok(())
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let args = CLI_Args::parse();
    defo!("{:?}", args);

    // map `CLI_Color_Choice` to `ColorChoice`
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let logger = Logger::new(color_choice, args.verbose, args.quiet, args.raw);
    if !args.raw && !args.quiet {
        eprintln!("{}", BANNER);
    }

    let exitcode: ExitCode = match run(&args, logger) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            logger.error(format!("{:#}", err).as_str());
            ExitCode::from(EXIT_ERR)
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
