use std::{ffi::OsString, io::Write, path::PathBuf};

use ray_footprint::{histogram::BINS, Figure, Rays};
use structopt::{clap::ErrorKind, StructOpt};

const USAGE: &str = "Usage: plot <h5-file>";

#[derive(Debug, StructOpt)]
#[structopt(name = "plot", about = "Footprints of the rays on the optical elements")]
struct Opt {
    /// Path to the ray tracer HDF5 output file
    #[structopt(parse(from_os_str))]
    path: PathBuf,
    /// Number of histogram bins along each axis
    #[structopt(short, long)]
    bins: Option<usize>,
    /// Save the figure to a ".svg" or ".png" file instead of showing it
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
    /// Write the hits to a CSV file
    #[structopt(long, parse(from_os_str))]
    csv: Option<PathBuf>,
    /// Print a summary of the hits
    #[structopt(short, long)]
    summary: bool,
}

/// Parses the command line, `None` if it is not a single HDF5 file path with options
fn parse_args<I>(args: I) -> Option<Opt>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    match Opt::from_iter_safe(args) {
        Ok(opt) => Some(opt),
        Err(e) if matches!(e.kind, ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed) => {
            e.exit()
        }
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }
}

/// Plots the footprints, writing the usage to `out` if the command line is invalid
fn run<I, W>(args: I, out: &mut W) -> anyhow::Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    W: Write,
{
    let Some(opt) = parse_args(args) else {
        writeln!(out, "{}", USAGE)?;
        return Ok(());
    };

    let hits = Rays::from_h5(&opt.path)?.hits();
    if opt.summary {
        hits.summary();
    }
    if let Some(path) = opt.csv {
        hits.to_csv(path)?;
    }

    let figure = Figure::new(hits.footprints()).bins(opt.bins.unwrap_or(BINS));
    match opt.output {
        Some(path) => figure.save(path)?,
        #[cfg(feature = "viewer")]
        None => ray_footprint::viewer::show(&figure)?,
        #[cfg(not(feature = "viewer"))]
        None => anyhow::bail!("built without the viewer, save the figure with --output"),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    run(std::env::args_os(), &mut std::io::stdout())
}
