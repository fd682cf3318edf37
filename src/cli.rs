// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::{
    job,
    options::{parse_override, IsoOptions, Method, OutputFormat, Selection},
};
use crate::core::net::HttpTransport;
use crate::error::Result;
use crate::file::resolve_out_path;
use crate::log::{self, Sink};
use crate::progress::{Progress, Step};
use crate::runner;

#[derive(Parser, Debug, Default)]
#[command(name = "isoget")]
#[command(about = "Drive the ISODISTORT web forms from a parent CIF to a saved output file", long_about = None)]
pub struct Args {
    /// Parent structure file (CIF)
    pub parent: Option<PathBuf>,

    /// Output file, or a directory (trailing separator) for the default name
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    /// ISODISTORT method: 3 (subgroup) or 4 (mode decomposition)
    #[arg(short, long, value_name = "N")]
    pub method: Option<Method>,

    /// Output format (see --list-formats)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Distortion to pick, counting from 1 at the top of the list
    #[arg(short, long, value_name = "N", conflicts_with = "structure")]
    pub selection: Option<usize>,

    /// Distorted structure to decompose (implies method 4)
    #[arg(long, value_name = "FILE")]
    pub structure: Option<PathBuf>,

    /// Form field for the method step, e.g. --set basis11=0 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_set, action = ArgAction::Append)]
    pub set: Vec<(String, String)>,

    /// TOML job file; flags given here override it
    #[arg(long, value_name = "FILE")]
    pub job: Option<PathBuf>,

    /// Also download *.zip archives referenced by the output
    #[arg(long, action = ArgAction::SetTrue)]
    pub archives: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the distortions the server offers (method 3) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub list: bool,

    /// Print the accepted output formats and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub list_formats: bool,

    /// Debug-level logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,
}

fn parse_set(s: &str) -> Result<(String, String)> {
    parse_override(s)
}

/// Job file first, then every flag that was given on top.
pub fn options_from_args(args: &Args) -> Result<IsoOptions> {
    let mut opts = match &args.job {
        Some(path) => job::load(path)?,
        None => IsoOptions::default(),
    };

    if let Some(p) = &args.parent { opts.parent = p.clone(); }
    if let Some(m) = args.method { opts.method = m; }
    if let Some(f) = args.format { opts.format = f; }
    if let Some(n) = args.selection { opts.selection = Selection::Ordinal(n); }
    if let Some(p) = &args.structure {
        opts.selection = Selection::Structure(p.clone());
        opts.method = Method::Decomposition;
    }
    for (k, v) in &args.set {
        opts.set_override(k.as_str(), v.as_str());
    }
    if args.archives { opts.fetch_archives = true; }
    if let Some(t) = args.timeout { opts.timeout_secs = t; }

    if let Some(o) = &args.out {
        let default = IsoOptions::default_out_path(&opts.parent, opts.format);
        opts.output = Some(resolve_out_path(o, &default)?);
    }
    Ok(opts)
}

/// Progress lines on stderr, so stdout only carries results.
struct StderrProgress {
    total: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn step_done(&mut self, step: Step) {
        eprintln!("[{}/{}] done", step.number(), self.total);
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    log::init(args.verbose, Sink::Stderr);

    if args.list_formats {
        for f in OutputFormat::ALL {
            println!("{f}\t.{}", f.ext());
        }
        return Ok(());
    }

    let opts = options_from_args(&args)?;

    if args.list {
        opts.validate()?;
        let transport = HttpTransport::new(Duration::from_secs(opts.timeout_secs))?;
        for (i, caption) in runner::list_distortions(&opts, &transport)?.iter().enumerate() {
            println!("{}\t{caption}", i + 1);
        }
        return Ok(());
    }

    let mut progress = StderrProgress { total: 0 };
    let summary = runner::run_default(&opts, Some(&mut progress))?;

    println!("{}", summary.output.display());
    for p in &summary.archives {
        println!("{}", p.display());
    }
    for f in &summary.failed_archives {
        eprintln!("archive {} not saved: {}", f.reference, f.error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("isoget").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn flags_map_onto_options() {
        let args = parse(&["MnTe.cif", "-f", "TOPAS", "-s", "3", "--set", "basis11=0", "--set", "subgroupsym=194", "--archives"]);
        let opts = options_from_args(&args).unwrap();
        assert_eq!(opts.parent, PathBuf::from("MnTe.cif"));
        assert_eq!(opts.format, OutputFormat::Topas);
        assert_eq!(opts.selection, Selection::Ordinal(3));
        assert_eq!(opts.overrides.get("basis11"), Some("0"));
        assert_eq!(opts.overrides.get("subgroupsym"), Some("194"));
        assert!(opts.fetch_archives);
        assert_eq!(opts.output, None);
    }

    #[test]
    fn structure_implies_method_four() {
        let args = parse(&["parent.cif", "--structure", "distorted.cif"]);
        let opts = options_from_args(&args).unwrap();
        assert_eq!(opts.method, Method::Decomposition);
        assert_eq!(opts.selection, Selection::Structure(PathBuf::from("distorted.cif")));
    }

    #[test]
    fn bad_values_are_rejected_by_the_parser() {
        let base = ["isoget", "p.cif"];
        assert!(Args::try_parse_from(base.iter().chain(&["-f", "gsas"])).is_err());
        assert!(Args::try_parse_from(base.iter().chain(&["-m", "2"])).is_err());
        assert!(Args::try_parse_from(base.iter().chain(&["--set", "novalue"])).is_err());
        assert!(Args::try_parse_from(base.iter().chain(&["-s", "2", "--structure", "d.cif"])).is_err());
    }
}
