use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Command, arg, value_parser};
use log::LevelFilter;
use std::time::SystemTime;

use datecompare::report::write_reports;
use datecompare::*;

fn init_logger(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

/// 用chrono, time, jiff, std分别做同样的五件事, 打印结果和耗时
fn main() -> Result<()> {
    let matches = Command::new("datecompare")
        .version("0.1.0")
        .about("Run the same date/time operations through chrono, time, jiff and std")
        .arg(
            arg!(-z --zone <ZONE> "IANA time zone \"now\" is converted into")
                .default_value(DEFAULT_ZONE),
        )
        .arg(
            arg!(-l --locale <LOCALE> "locale for the next-week value, pt-br or en")
                .default_value("pt-br"),
        )
        .arg(
            arg!(--"local-zone" <ZONE> "IANA time zone treated as local (default: system zone)")
                .required(false),
        )
        .arg(
            arg!(--at <RFC3339> "pin \"now\" to this instant, e.g. 2023-10-16T17:05:09Z")
                .required(false),
        )
        .arg(
            arg!(-o --only <LIBRARY> "run only these libraries: chrono, time, jiff, std")
                .required(false)
                .action(ArgAction::Append),
        )
        .arg(
            arg!(-f --format <FORMAT> "output format: table, csv or json")
                .default_value("table")
                .value_parser(value_parser!(String)),
        )
        .arg(arg!(-v --verbose ... "more logging, repeat for more"))
        .get_matches();

    init_logger(matches.get_count("verbose"))?;

    let zone = matches
        .get_one::<String>("zone")
        .cloned()
        .unwrap_or_else(|| DEFAULT_ZONE.to_owned());
    let locale: Locale = match matches.get_one::<String>("locale") {
        Some(tag) => tag.parse()?,
        None => Locale::default(),
    };
    let local_zone = matches.get_one::<String>("local-zone").cloned();
    let now = match matches.get_one::<String>("at") {
        Some(text) => {
            let ts: jiff::Timestamp = text
                .parse()
                .with_context(|| format!("--at expects an RFC 3339 instant, got {}", text))?;
            Some(SystemTime::from(ts))
        }
        None => None,
    };
    let format: OutputFormat = match matches.get_one::<String>("format") {
        Some(name) => name.parse()?,
        None => OutputFormat::default(),
    };
    let libraries = match matches.get_many::<String>("only") {
        Some(names) => names
            .map(|name| name.parse::<Library>())
            .collect::<Result<Vec<_>>>()?,
        None => Library::built(),
    };

    let settings = Settings {
        zone,
        local_zone,
        locale,
        now,
    };
    log::info!("running {:?} with {:?}", libraries, settings);

    let results = run_all(&libraries, &settings);
    let total = results.len();
    let mut reports = Vec::with_capacity(total);
    let mut failed = 0;
    // failures were already logged by run_all
    for (_, res) in results {
        match res {
            Ok(report) => reports.push(report),
            Err(_) => failed += 1,
        }
    }

    write_reports(std::io::stdout().lock(), &reports, format)?;

    if failed > 0 {
        return Err(anyhow!("{} of {} probes failed", failed, total));
    }
    Ok(())
}
