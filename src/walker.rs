use crate::boxes::{BoxEvent, Mp4Box};
use crate::known_boxes::is_container;
use crate::parser::{ReadOutcome, Result, read_box};
use std::io::Read;

/// Receives one event per visited box, in pre-order.
pub trait BoxSink {
    fn on_box(&mut self, event: &BoxEvent);
}

impl<F: FnMut(&BoxEvent)> BoxSink for F {
    fn on_box(&mut self, event: &BoxEvent) {
        self(event)
    }
}

/// Counters gathered over a successful traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    pub boxes: usize,
    pub top_level: usize,
    pub max_depth: usize,
}

/// A container whose payload is still being split into children.
struct Frame {
    payload: Vec<u8>,
    pos: usize,
    offset: i64,
    depth: usize,
}

impl Frame {
    fn enter(b: Mp4Box) -> Option<Frame> {
        if !is_container(b.header.typ) {
            return None;
        }
        tracing::debug!(
            typ = %b.header.typ,
            offset = b.offset,
            depth = b.depth,
            "entering container"
        );
        Some(Frame {
            payload: b.payload,
            pos: 0,
            offset: b.offset,
            depth: b.depth,
        })
    }
}

/// Emit `mp4box` and, if its type is a container, every box nested in its
/// payload.
///
/// Depth-first pre-order: a box is reported before its children and a
/// child's subtree is finished before the next sibling is read. Child
/// offsets are the parent's offset plus the sizes of earlier siblings.
/// Nesting is tracked on the heap, so deeply nested input cannot exhaust
/// the thread stack.
pub fn walk<S: BoxSink + ?Sized>(mp4box: Mp4Box, sink: &mut S) -> Result<ProbeStats> {
    let mut stats = ProbeStats::default();
    visit(mp4box, sink, &mut stats)?;
    Ok(stats)
}

/// Read and walk every top-level box of `r` until it runs out.
///
/// Events are emitted as soon as each box is read. The first format or
/// I/O error aborts the whole traversal; events already emitted stay
/// emitted.
pub fn probe<R: Read, S: BoxSink + ?Sized>(r: &mut R, sink: &mut S) -> Result<ProbeStats> {
    let mut stats = ProbeStats::default();
    let mut offset: i64 = 0;
    loop {
        match read_box(r).map_err(|e| e.at(offset))? {
            ReadOutcome::EndOfStream => break,
            ReadOutcome::Box(mut b) => {
                b.offset = offset;
                b.depth = 0;
                offset += i64::from(b.header.size);
                stats.top_level += 1;
                visit(b, sink, &mut stats)?;
            }
        }
    }
    tracing::debug!(
        boxes = stats.boxes,
        top_level = stats.top_level,
        max_depth = stats.max_depth,
        bytes = offset,
        "probe finished"
    );
    Ok(stats)
}

fn emit<S: BoxSink + ?Sized>(b: &Mp4Box, sink: &mut S, stats: &mut ProbeStats) {
    stats.boxes += 1;
    stats.max_depth = stats.max_depth.max(b.depth);
    sink.on_box(&b.event());
}

fn visit<S: BoxSink + ?Sized>(root: Mp4Box, sink: &mut S, stats: &mut ProbeStats) -> Result<()> {
    emit(&root, sink, stats);
    let mut stack: Vec<Frame> = Frame::enter(root).into_iter().collect();

    while let Some(frame) = stack.last_mut() {
        let child_offset = frame.offset + frame.pos as i64;
        let mut rest = &frame.payload[frame.pos..];
        let before = rest.len();
        let outcome = read_box(&mut rest).map_err(|e| e.at(child_offset))?;
        let consumed = before - rest.len();

        match outcome {
            ReadOutcome::EndOfStream => {
                stack.pop();
            }
            ReadOutcome::Box(mut child) => {
                frame.pos += consumed;
                child.offset = child_offset;
                child.depth = frame.depth + 1;
                // Last child: the parent has nothing left to read.
                if frame.pos == frame.payload.len() {
                    stack.pop();
                }
                emit(&child, sink, stats);
                if let Some(f) = Frame::enter(child) {
                    stack.push(f);
                }
            }
        }
    }
    Ok(())
}
