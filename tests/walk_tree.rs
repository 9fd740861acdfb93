use mp4probe::boxes::FourCC;
use mp4probe::{BoxEvent, ParseError, collect_events, probe};

fn bx(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

fn events(data: &[u8]) -> Vec<BoxEvent> {
    collect_events(&mut &data[..]).expect("walk failed")
}

fn summary(evs: &[BoxEvent]) -> Vec<(String, u32, usize, i64)> {
    evs.iter()
        .map(|e| (e.typ.to_string(), e.size, e.depth, e.offset))
        .collect()
}

fn s(typ: &str, size: u32, depth: usize, offset: i64) -> (String, u32, usize, i64) {
    (typ.to_string(), size, depth, offset)
}

#[test]
fn single_free_box() {
    let evs = events(&bx(b"free", &[]));
    assert_eq!(summary(&evs), [s("free", 8, 0, 0)]);
}

#[test]
fn moov_with_mvhd() {
    let data = bx(b"moov", &bx(b"mvhd", &[]));
    assert_eq!(data.len(), 16);
    assert_eq!(
        summary(&events(&data)),
        [s("moov", 16, 0, 0), s("mvhd", 8, 1, 0)]
    );
}

#[test]
fn size_below_minimum_aborts_without_events() {
    let mut data = 4u32.to_be_bytes().to_vec();
    data.extend_from_slice(b"free");

    let mut seen = Vec::new();
    let err = probe(&mut &data[..], &mut |e: &BoxEvent| seen.push(*e)).unwrap_err();
    assert!(seen.is_empty());
    assert!(matches!(err.kind(), ParseError::SizeBelowMinimum { size: 4 }));
    assert_eq!(err.offset(), Some(0));
}

#[test]
fn empty_input_is_clean() {
    let empty: [u8; 0] = [];
    let mut seen = Vec::new();
    let stats = probe(&mut &empty[..], &mut |e: &BoxEvent| seen.push(*e)).unwrap();
    assert!(seen.is_empty());
    assert_eq!(stats.boxes, 0);
    assert_eq!(stats.top_level, 0);
}

#[test]
fn truncated_payload_at_top_level() {
    let mut data = 20u32.to_be_bytes().to_vec();
    data.extend_from_slice(b"mdat");
    data.extend_from_slice(&[0u8; 10]);

    let err = collect_events(&mut &data[..]).unwrap_err();
    let err = err.downcast_ref::<ParseError>().expect("parse error");
    assert!(matches!(
        err.kind(),
        ParseError::TruncatedPayload {
            expected: 12,
            available: 10
        }
    ));
}

#[test]
fn sibling_offsets_accumulate() {
    let mut data = bx(b"ftyp", &[0u8; 16]);
    data.extend(bx(b"free", &[]));
    data.extend(bx(b"mdat", &[7u8; 100]));

    let evs = events(&data);
    assert_eq!(
        summary(&evs),
        [s("ftyp", 24, 0, 0), s("free", 8, 0, 24), s("mdat", 108, 0, 32)]
    );
    for w in evs.windows(2) {
        assert_eq!(w[1].offset, w[0].offset + i64::from(w[0].size));
    }
}

#[test]
fn nested_tree_is_pre_order() {
    let stbl = bx(b"stbl", &[bx(b"stsd", &[0u8; 8]), bx(b"stts", &[0u8; 4])].concat());
    let minf = bx(b"minf", &[bx(b"vmhd", &[0u8; 12]), stbl].concat());
    let mdia = bx(b"mdia", &[bx(b"mdhd", &[0u8; 24]), minf].concat());
    let trak = bx(b"trak", &[bx(b"tkhd", &[0u8; 84]), mdia].concat());
    let moov = bx(b"moov", &[bx(b"mvhd", &[0u8; 100]), trak].concat());
    let mut data = bx(b"ftyp", &[0u8; 8]);
    data.extend(moov);

    let evs = events(&data);
    assert_eq!(
        summary(&evs),
        [
            s("ftyp", 16, 0, 0),
            s("moov", 320, 0, 16),
            s("mvhd", 108, 1, 16),
            s("trak", 204, 1, 124),
            s("tkhd", 92, 2, 124),
            s("mdia", 104, 2, 216),
            s("mdhd", 32, 3, 216),
            s("minf", 64, 3, 248),
            s("vmhd", 20, 4, 248),
            s("stbl", 36, 4, 268),
            s("stsd", 16, 5, 268),
            s("stts", 12, 5, 284),
        ]
    );

    // depth never jumps more than one level past the enclosing box
    let mut open: Vec<usize> = Vec::new();
    for e in &evs {
        open.truncate(e.depth);
        assert_eq!(open.len(), e.depth);
        open.push(e.depth);
    }
}

#[test]
fn children_fill_container_payload() {
    let kids = [bx(b"mfhd", &[0u8; 8]), bx(b"traf", &bx(b"trun", &[0u8; 12]))].concat();
    let data = bx(b"moof", &kids);

    let evs = events(&data);
    let child_total: u32 = evs.iter().filter(|e| e.depth == 1).map(|e| e.size).sum();
    assert_eq!(child_total as usize, kids.len());
    assert_eq!(evs[0].size as usize - 8, kids.len());
}

#[test]
fn leaf_payloads_are_never_walked() {
    // Looks like boxes inside, but neither tag is a container.
    let inner = bx(b"moov", &bx(b"mvhd", &[]));
    let mut data = bx(b"udta", &inner);
    data.extend(bx(b"mdat", &inner));
    data.extend(bx(b"edts", &inner));

    let evs = events(&data);
    assert_eq!(evs.len(), 3);
    assert!(evs.iter().all(|e| e.depth == 0));
}

#[test]
fn trailing_partial_header_in_container() {
    let mut payload = bx(b"mvhd", &[]);
    payload.extend_from_slice(&[0, 0, 0]);
    let data = bx(b"moov", &payload);

    let mut seen = Vec::new();
    let err = probe(&mut &data[..], &mut |e: &BoxEvent| seen.push(*e)).unwrap_err();
    assert_eq!(seen.len(), 2);
    assert!(matches!(err.kind(), ParseError::TruncatedHeader { available: 3 }));
    assert_eq!(err.offset(), Some(8));
}

#[test]
fn child_larger_than_parent_payload() {
    let mut payload = 64u32.to_be_bytes().to_vec();
    payload.extend_from_slice(b"mvhd");
    payload.extend_from_slice(&[0u8; 8]);
    let data = bx(b"moov", &payload);

    let err = collect_events(&mut &data[..]).unwrap_err();
    let err = err.downcast_ref::<ParseError>().expect("parse error");
    assert!(matches!(
        err.kind(),
        ParseError::TruncatedPayload {
            expected: 56,
            available: 8
        }
    ));
}

#[test]
fn error_after_siblings_keeps_earlier_events() {
    let mut data = bx(b"ftyp", &[0u8; 8]);
    data.extend(bx(b"free", &[]));
    data.extend_from_slice(&[0, 0, 0, 2, b'b', b'a', b'd', b'!']);

    let mut seen = Vec::new();
    let err = probe(&mut &data[..], &mut |e: &BoxEvent| seen.push(e.typ)).unwrap_err();
    assert_eq!(seen, [FourCC(*b"ftyp"), FourCC(*b"free")]);
    assert_eq!(err.offset(), Some(24));
    assert!(err.is_format());
}

#[test]
fn same_input_same_events() {
    let data = [
        bx(b"ftyp", &[1u8; 12]),
        bx(b"moov", &[bx(b"mvhd", &[2u8; 20]), bx(b"trak", &bx(b"tkhd", &[]))].concat()),
        bx(b"mdat", &[3u8; 33]),
    ]
    .concat();
    assert_eq!(events(&data), events(&data));
}
