use crate::{
    boxes::BoxEvent,
    walker::{BoxSink, ProbeStats, probe},
};
use anyhow::Context;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Walk every box in the file at `path`, handing each event to `sink` as soon
/// as it is read.
///
/// # Parameters
/// - `path`: MP4/ISOBMFF file to open
/// - `sink`: receives one [`BoxEvent`] per box, in pre-order
///
/// # Returns
/// Traversal counters on success. On error, events for boxes read before
/// the failure have already been delivered to `sink`.
///
/// The file is opened here and closed when this function returns, on every
/// path.
///
/// # Example
/// ```no_run
/// use mp4probe::{probe_file, render::text_line};
///
/// probe_file("video.mp4", &mut |e: &mp4probe::BoxEvent| println!("{}", text_line(e)))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn probe_file<P: AsRef<Path>, S: BoxSink + ?Sized>(
    path: P,
    sink: &mut S,
) -> anyhow::Result<ProbeStats> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut r = BufReader::new(f);
    let stats = probe(&mut r, sink).with_context(|| format!("probing {}", path.display()))?;
    Ok(stats)
}

/// Walk `r` to the end and return all events in pre-order.
///
/// ```
/// let data = [0, 0, 0, 8, b'f', b'r', b'e', b'e'];
/// let events = mp4probe::collect_events(&mut &data[..])?;
/// assert_eq!(events.len(), 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn collect_events<R: Read>(r: &mut R) -> anyhow::Result<Vec<BoxEvent>> {
    let mut events = Vec::new();
    probe(r, &mut |e: &BoxEvent| events.push(*e))?;
    Ok(events)
}
