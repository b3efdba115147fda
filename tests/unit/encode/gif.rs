use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;
use std::io::BufReader;

fn cfg(frames: u32) -> SinkConfig {
    SinkConfig {
        width: 6,
        height: 4,
        interval_ms: 100,
        frames,
    }
}

fn frame(color: Rgba8) -> FrameRGBA {
    FrameRGBA::solid(Canvas { width: 6, height: 4 }, color)
}

#[test]
fn writes_a_looping_gif_with_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/out.gif");
    let mut sink = GifSink::new(&path, GifSinkOpts::default());
    sink.begin(cfg(3)).unwrap();
    for (i, c) in [Rgba8::WHITE, Rgba8::BLACK, Rgba8::rgb(200, 0, 0)].into_iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), &frame(c)).unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.frames_written(), 3);

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    // NETSCAPE2.0 application extension carries the loop count
    assert!(bytes.windows(11).any(|w| w == b"NETSCAPE2.0"));

    let decoder = GifDecoder::new(BufReader::new(std::fs::File::open(&path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    let (num, den) = frames[0].delay().numer_denom_ms();
    assert_eq!(num / den, 100);
}

#[test]
fn push_before_begin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("a.gif"), GifSinkOpts::default());
    assert!(sink.push_frame(FrameIndex(0), &frame(Rgba8::WHITE)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn mismatched_frame_size_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("a.gif"), GifSinkOpts::default());
    sink.begin(cfg(1)).unwrap();
    let small = FrameRGBA::solid(Canvas { width: 2, height: 2 }, Rgba8::WHITE);
    let err = sink.push_frame(FrameIndex(0), &small).unwrap_err();
    assert!(matches!(err, DriftMapError::Encode(_)));
}

#[test]
fn speed_out_of_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut sink = GifSink::new(dir.path().join("a.gif"), GifSinkOpts { speed: 0 });
    assert!(sink.begin(cfg(1)).is_err());
}
