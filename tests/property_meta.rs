//! Property-based tests for entry classification through the public API.
//!
//! Uses proptest to verify the resolver invariants hold for arbitrary
//! interleavings of score, image, and unrelated entries.

use proptest::prelude::*;
use scorepack::{PackageReader, SourceStream};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[derive(Debug, Clone, Copy)]
enum Kind {
    Score,
    Image,
    Other,
}

fn entry_name(index: usize, kind: Kind) -> String {
    match kind {
        Kind::Score => format!("score{index}.mscx"),
        Kind::Image => format!("Pictures/img{index}.png"),
        Kind::Other => format!("other{index}.txt"),
    }
}

fn build_archive(layout: &[Kind]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (index, kind) in layout.iter().enumerate() {
        writer.start_file(entry_name(index, *kind), options).unwrap();
        writer.write_all(format!("payload{index}").as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn layout_strategy() -> impl Strategy<Value = Vec<Kind>> {
    prop::collection::vec(
        prop_oneof![Just(Kind::Score), Just(Kind::Image), Just(Kind::Other)],
        0..12,
    )
}

proptest! {
    #[test]
    fn last_score_wins_and_images_keep_order(layout in layout_strategy()) {
        let bytes = build_archive(&layout);
        let mut reader = PackageReader::from_stream(SourceStream::owned(Cursor::new(bytes)));
        reader.open().unwrap();
        let meta = reader.meta().unwrap().clone();

        let expected_score = layout
            .iter()
            .enumerate()
            .filter(|(_, kind)| matches!(kind, Kind::Score))
            .map(|(index, kind)| entry_name(index, *kind))
            .last();
        prop_assert_eq!(meta.score_path, expected_score);

        let expected_images: Vec<String> = layout
            .iter()
            .enumerate()
            .filter(|(_, kind)| matches!(kind, Kind::Image))
            .map(|(index, kind)| entry_name(index, *kind))
            .collect();
        prop_assert_eq!(meta.image_paths, expected_images);
    }

    #[test]
    fn score_bytes_come_from_the_winning_candidate(layout in layout_strategy()) {
        let bytes = build_archive(&layout);
        let mut reader = PackageReader::from_stream(SourceStream::owned(Cursor::new(bytes)));
        reader.open().unwrap();

        let last_score = layout
            .iter()
            .enumerate()
            .filter(|(_, kind)| matches!(kind, Kind::Score))
            .map(|(index, _)| index)
            .last();
        let expected = match last_score {
            Some(index) => format!("payload{index}").into_bytes(),
            None => Vec::new(),
        };
        prop_assert_eq!(reader.read_score().unwrap(), expected);
    }
}
