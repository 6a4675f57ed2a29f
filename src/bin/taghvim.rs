extern crate taghvim as lib;

use flexi_logger::{FileSpec, Logger};
use itertools::Itertools;
use std::path::PathBuf;
use structopt::StructOpt;

use lib::digits::to_ascii_digits;
use lib::events::Dispatcher;
use lib::grid::DayCell;
use lib::jalali::JalaliDate;
use lib::locale::JalaliFormatter;
use lib::picker::{Clock, SystemClock};
use lib::widget::{DatePicker, PickerProps};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "taghvim",
    about = "Prints the Persian calendar page of a month."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "date",
        help = "Persian date to select (Y/M/D, either digit script)"
    )]
    pub date: Option<String>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

/// Saturday-first weekday header, ش (shanbeh) through ج (jom'e).
const WEEKDAY_HEADER: [&str; 7] = ["ش", "ی", "د", "س", "چ", "پ", "ج"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let dispatcher = Dispatcher::new();
    let props = PickerProps::new(args.date, config.placeholder.clone(), false);
    let widget = DatePicker::mount(
        props,
        &dispatcher,
        Box::new(SystemClock),
        Box::new(JalaliFormatter),
        Box::new(|event| log::info!("selected {} ({})", event.persian_text, event.gregorian)),
    );

    let today = SystemClock.today();
    let localize = |line: String| {
        if config.ascii_digits {
            to_ascii_digits(&line)
        } else {
            line
        }
    };

    println!("{}", localize(widget.header_label()));
    println!("{}", WEEKDAY_HEADER.iter().join("   "));

    for row in &widget.month_cells().into_iter().chunks(7) {
        let line = row
            .map(|cell| match cell {
                DayCell::Day(date) if date == today => {
                    format!("{}{:>2}", config.today_symbol, JalaliDate::from_gregorian(date).day)
                }
                DayCell::Day(date) => format!(" {:>2}", JalaliDate::from_gregorian(date).day),
                DayCell::Empty => "   ".to_owned(),
            })
            .join(" ");
        if config.ascii_digits {
            println!("{}", line);
        } else {
            println!("{}", lib::digits::to_persian_digits(&line));
        }
    }

    println!();
    println!("{}", localize(widget.display_text()));

    Ok(())
}
