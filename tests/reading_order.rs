mod common;

use common::synthetic_image::{grid_sheet, SheetSpec};
use manuscript_grid::{reading_order, sequence_cell_files, ArtifactOptions, CellId, GridSegmenter, SegmentationParams};

fn ids(pairs: &[(u32, u32)]) -> Vec<CellId> {
    pairs.iter().map(|&(r, c)| CellId::new(r, c)).collect()
}

#[test]
fn two_by_two_block_reads_right_to_left() {
    let cells = ids(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
    assert_eq!(reading_order(cells), ids(&[(1, 2), (2, 2), (1, 1), (2, 1)]));
}

#[test]
fn written_directory_sequences_like_in_memory_cells() {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let segmenter = GridSegmenter::new(SegmentationParams::default()).unwrap();
    let mut page = segmenter.segment(&grid_sheet(SheetSpec::default())).unwrap();
    page.write_to(dir.path(), &ArtifactOptions::default()).unwrap();

    let in_memory: Vec<CellId> = page.cells().reading_order().iter().map(|c| c.id).collect();
    // Unrelated images in the output dir must not be picked up as cells.
    let from_disk: Vec<CellId> = sequence_cell_files(dir.path(), "png")
        .unwrap()
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(from_disk, in_memory);
    assert_eq!(from_disk[0], CellId::new(1, 5));
    assert_eq!(from_disk[3], CellId::new(4, 5));
    assert_eq!(from_disk[4], CellId::new(1, 4));
}
