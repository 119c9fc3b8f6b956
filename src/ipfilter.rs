// ipfilter -- sort a list of dotted addresses and select from it
// =============================================================================
// USAGE: see Usage below (./ipfilter -h)
// INPUT: one address per line from STDIN or [file], e.g.
//            113.162.145.156\t111\t0
//        only the field before the first TAB is used, the rest is ignored
// OUTPUT: the addresses sorted in descending order, one per line, followed by
//         the matches of every requested filter, in request order
// NOTE:   components are compared as strings unless -n is given, so by default
//         46.0.0.1 sorts above 222.0.0.1

mod config;
mod error;
mod iputils;

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use env_logger::Builder;
use log::{debug, info, LevelFilter};

use config::TaskConfig;
use error::{Error, Result};
use iputils::filter::{FilterSpec, Query};
use iputils::order::{sort_descending, Collation};
use iputils::{read_pool, Address};

const HELP: &str = "\
Usage: ipfilter [OPTIONS] [file]

When [file] is empty or -, read addresses from STDIN
OPTIONS:
-h   print this help message
-c   path to task config (JSON)
-f   filter by position, e.g. -f 46,70 or -f 2=46 or -f *,46 (repeatable)
-a   filter by any position, e.g. -a 46 (repeatable)
-F   print only filter results, not the whole sorted list
-n   compare all-digit components as numbers
-v   more log output on STDERR, -v -v for debug
";

struct AppArgs {
    config: Option<PathBuf>,
    filters: Vec<FilterSpec>,
    any: Vec<String>,
    filtered_only: bool,
    numeric: bool,
    verbosity: u8,
    input: PathBuf,
}

fn parse_path(s: &std::ffi::OsStr) -> std::result::Result<PathBuf, &'static str> {
    Ok(s.into())
}

fn get_option() -> Result<AppArgs> {
    let mut pargs = pico_args::Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let mut verbosity = 0;
    while pargs.contains(["-v", "--verbose"]) {
        verbosity += 1;
    }

    let args = AppArgs {
        config: pargs.opt_value_from_os_str(["-c", "--config"], parse_path)?,
        filters: pargs.values_from_str(["-f", "--filter"])?,
        any: pargs.values_from_str(["-a", "--any"])?,
        filtered_only: pargs.contains(["-F", "--filtered-only"]),
        numeric: pargs.contains(["-n", "--numeric"]),
        verbosity,
        input: pargs
            .opt_free_from_os_str(parse_path)?
            .unwrap_or_else(|| PathBuf::from("-")),
    };

    // anything left over is a typo or an option we don't have, "-" is stdin
    let input = args.input.as_os_str();
    if input != "-" && input.to_string_lossy().starts_with('-') {
        return Err(Error::Usage(format!("unknown option {:?}", input)));
    }
    let rest = pargs.finish();
    if !rest.is_empty() {
        return Err(Error::Usage(format!("unexpected arguments {:?}", rest)));
    }

    Ok(args)
}

// I/O helpers
fn openfile(path: &Path) -> io::Result<BufReader<Box<dyn Read>>> {
    let input: Box<dyn Read + 'static> = if path.as_os_str() == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(std::fs::File::open(path)?)
    };

    Ok(BufReader::new(input))
}

fn print_pool<W: Write>(out: &mut W, pool: &[Address]) -> io::Result<()> {
    for ip in pool {
        writeln!(out, "{}", ip)?;
    }
    Ok(())
}

struct Task {
    collation: Collation,
    queries: Vec<Query>,
    filtered_only: bool,
}

// config queries run first, then -f, then -a
fn task(args: &AppArgs) -> Result<Task> {
    let (mut collation, mut queries) = match &args.config {
        Some(path) => {
            let cfg = TaskConfig::load(path)?;
            (cfg.collation(), cfg.queries()?)
        }
        None => (Collation::default(), vec![]),
    };
    if args.numeric {
        collation = Collation::Numeric;
    }
    queries.extend(args.filters.iter().cloned().map(Query::At));
    queries.extend(args.any.iter().cloned().map(Query::Any));
    Ok(Task {
        collation,
        queries,
        filtered_only: args.filtered_only,
    })
}

fn run<R: BufRead, W: Write>(input: R, out: &mut W, task: &Task) -> Result<()> {
    let mut pool = read_pool(input)?;
    info!("read {} addresses", pool.len());

    sort_descending(&mut pool, task.collation);
    if !task.filtered_only {
        print_pool(out, &pool)?;
    }

    for q in &task.queries {
        let matched = q.apply(&pool);
        debug!("{} matched {} of {}", q, matched.len(), pool.len());
        print_pool(out, &matched)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args = match get_option() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    let level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let result = task(&args).and_then(|t| {
        let input = openfile(&args.input)?;
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        run(input, &mut out, &t)
    });

    if let Err(e) = result {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}
