use clap::{App, AppSettings, Arg, ArgMatches};
use log::{debug, info};
use std::path::PathBuf;
use std::process;

use csvmap::{build_with_stats, split_list, write_output, BuildOptions, Input, Output};

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("csvmap")
        .version("0.1.0")
        .author("Abraham Toriz <categulario@gmail.com>")
        .about("Converts csv rows into a json object keyed by some of their columns")
        .setting(AppSettings::ArgRequiredElseHelp)
        .arg(
            Arg::with_name("keyColNames")
                .short("k")
                .long("keyColNames")
                .value_name("COLUMNS")
                .help("Comma separated columns that form the key")
                .required(true),
        )
        .arg(
            Arg::with_name("valColNames")
                .short("v")
                .long("valColNames")
                .value_name("COLUMNS")
                .help("Comma separated columns that form the value. The whole row if absent"),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .value_name("FILES")
                .help("Comma separated input files. Standard input if absent")
                .conflicts_with("INPUT"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("OUTPUT")
                .help("Output filename. Standard output if absent"),
        )
        .arg(
            Arg::with_name("duplicateKeys")
                .short("d")
                .long("duplicateKeys")
                .help("Collect the values of rows sharing a key in a list"),
        )
        .arg(
            Arg::with_name("keyDelimiter")
                .short("D")
                .long("keyDelimiter")
                .value_name("DELIMITER")
                .help("Joins the columns of a composite key [default: _]"),
        )
        .arg(
            Arg::with_name("encoding")
                .short("e")
                .long("encoding")
                .value_name("LABEL")
                .help("Encoding of the input files [default: utf-8]"),
        )
        .arg(
            Arg::with_name("INPUT")
                .value_name("INPUT")
                .help("Input file, as an alternative to --input"),
        )
}

fn options_from(matches: &ArgMatches) -> BuildOptions {
    let key_columns = matches.value_of("keyColNames").map(split_list).unwrap_or_default();
    let mut options = BuildOptions::new(key_columns)
        .duplicate_keys(matches.is_present("duplicateKeys"));

    if let Some(list) = matches.value_of("valColNames") {
        options = options.value_columns(split_list(list));
    }

    if let Some(delimiter) = matches.value_of("keyDelimiter") {
        options = options.key_delimiter(delimiter);
    }

    if let Some(label) = matches.value_of("encoding") {
        options = options.encoding(label);
    }

    if let Some(list) = matches.value_of("input") {
        for path in split_list(list) {
            options = options.input(Input::Path(PathBuf::from(path)));
        }
    } else if let Some(arg) = matches.value_of("INPUT") {
        options = options.input(Input::detect(arg));
    }

    options
}

fn output_from(matches: &ArgMatches) -> Output {
    matches
        .value_of("output")
        .map(|p| Output::Path(PathBuf::from(p)))
        .unwrap_or(Output::Stdout)
}

fn run(matches: &ArgMatches) -> csvmap::Result<()> {
    let (map, stats) = build_with_stats(options_from(matches))?;

    info!(
        "{} keys from {} rows in {} sources",
        map.len(),
        stats.rows,
        stats.sources
    );

    write_output(&map, &output_from(matches))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = app().get_matches();

    if let Err(e) = run(&matches) {
        debug!("build failed: {:?}", e);
        eprintln!("csvmap: {}", e);
        process::exit(1);
    }
}
