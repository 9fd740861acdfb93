use clap::{ArgAction, Parser};
use mp4probe::{
    BoxEvent, BoxSink, ProbeStats, probe_file,
    render::{json_line, text_line},
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Print the box tree of an MP4/ISOBMFF file")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Emit one JSON object per box instead of the indented text tree
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Only print boxes up to this depth (the whole file is still parsed)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log to stderr (-v debug, -vv trace); RUST_LOG applies otherwise
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Writes each event to `out` as it arrives. The first write failure is
/// kept and everything after it is dropped.
struct Printer<W: Write> {
    out: W,
    json: bool,
    max_depth: Option<usize>,
    failed: Option<anyhow::Error>,
}

impl<W: Write> Printer<W> {
    fn new(out: W, json: bool, max_depth: Option<usize>) -> Self {
        Printer {
            out,
            json,
            max_depth,
            failed: None,
        }
    }

    fn line(&self, e: &BoxEvent) -> anyhow::Result<String> {
        if self.json {
            Ok(json_line(e)?)
        } else {
            Ok(text_line(e))
        }
    }

    /// Flush and merge output failures with the outcome of the walk.
    /// When both fail, the walk error is returned with the write error
    /// attached as context.
    fn finish(mut self, result: anyhow::Result<ProbeStats>) -> anyhow::Result<ProbeStats> {
        if self.failed.is_none() {
            if let Err(err) = self.out.flush() {
                self.failed = Some(err.into());
            }
        }
        match (self.failed, result) {
            (None, result) => result,
            (Some(write_err), Ok(_)) => Err(write_err.context("writing output")),
            (Some(write_err), Err(probe_err)) => {
                tracing::error!("writing output failed: {write_err:#}");
                Err(probe_err.context(format!("writing output also failed: {write_err:#}")))
            }
        }
    }
}

impl<W: Write> BoxSink for Printer<W> {
    fn on_box(&mut self, e: &BoxEvent) {
        if self.failed.is_some() || self.max_depth.is_some_and(|max| e.depth > max) {
            return;
        }
        let res = self.line(e).and_then(|mut l| {
            l.push('\n');
            self.out.write_all(l.as_bytes()).map_err(Into::into)
        });
        if let Err(err) = res {
            self.failed = Some(err);
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut printer = Printer::new(io::stdout().lock(), args.json, args.max_depth);
    let result = probe_file(&args.path, &mut printer);
    let stats = printer.finish(result)?;
    tracing::info!(
        boxes = stats.boxes,
        top_level = stats.top_level,
        max_depth = stats.max_depth,
        "done"
    );
    Ok(())
}
