use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use prm::operations::{open_paths_file, open_roots, remove_plugins, sized_paths};
use prm::query::apply_query;
use prm::registry::scan_all;
use prm::report::{write_by_name, write_count, write_json, write_paths, write_sizes};
use prm::{Config, PluginFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "prm",
    version,
    about = "List, filter and remove installed audio plugins (AAX, AU, CLAP, VST, VST3, drivers)"
)]
struct Args {
    /// Case-insensitive plugin name filter; words are joined with spaces
    query: Vec<String>,

    /// Narrow results by format (aax, au, clap, vst, vst3, driver)
    #[arg(short = 'f', value_name = "FORMAT")]
    format: Option<String>,

    /// Count results
    #[arg(short = 'c')]
    count: bool,

    /// Print paths of results
    #[arg(short = 'p')]
    print_paths: bool,

    /// Sort results by size (automatically displays paths)
    #[arg(short = 's')]
    by_size: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Move plugins to trash (will ask for confirmation)
    #[arg(long)]
    delete: bool,

    /// Open all plugin paths
    #[arg(long)]
    open: bool,

    /// Open paths.txt file
    #[arg(long)]
    paths: bool,

    /// Show debug logging on stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

const LONG_FLAGS: [&str; 4] = ["delete", "open", "paths", "json"];

/// Accepts `-delete` style long flags by rewriting them to `--delete`.
/// Arguments after a `--` separator are left alone.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut positional_only = false;
    args.into_iter()
        .map(|arg| {
            if positional_only {
                return arg;
            }
            if arg == "--" {
                positional_only = true;
                return arg;
            }
            let flag = arg.to_str().and_then(|s| s.strip_prefix('-'));
            match flag {
                Some(name) if LONG_FLAGS.contains(&name) => OsString::from(format!("--{name}")),
                _ => arg,
            }
        })
        .collect()
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse_from(normalize_args(std::env::args_os()));
    init_tracing(args.verbose);

    // Failures are reported, never turned into a nonzero exit.
    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let platform = prm::platform::host();
    let config = Config::locate()?;
    let roots = config.load_paths(platform.as_ref());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.open {
        open_roots(&roots, platform.as_ref(), &mut out)?;
        return Ok(());
    }
    if args.paths {
        open_paths_file(&config, platform.as_ref())?;
        return Ok(());
    }

    let format = match args.format.as_deref().map(PluginFormat::from_tag).transpose() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    let grouping = apply_query(&scan_all(&roots), &args.query.join(" "), format);

    if args.delete {
        let stdin = io::stdin();
        remove_plugins(&grouping, platform.as_ref(), &mut stdin.lock(), &mut out)?;
        return Ok(());
    }

    if args.json {
        write_json(&grouping, &mut out)?;
    } else if args.by_size {
        write_sizes(&sized_paths(&grouping), &mut out)?;
    } else if args.print_paths {
        write_paths(&grouping, &mut out)?;
    } else {
        write_by_name(&grouping, &mut out)?;
    }
    if args.count {
        write_count(&grouping, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
