//! Integration tests for ragged-to-dense extraction
//!
//! Verifies the rectangularity contract: every grab yields an array shaped
//! `[frames][max_points][max_dims]` with zero in every cell outside a
//! frame's actual extent, and def lines never count as box points.

use rstest::rstest;

use pos::pos::file::PosFile;
use pos::pos::testing::{box_frame, data_frame};

#[test]
fn test_three_ragged_data_frames() {
    // dims [2, 3, 2], row counts [4, 5, 3] -> shape [3][5][3]
    let source = format!(
        "{}{}{}",
        data_frame(
            &["x", "y"],
            &[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0], &[7.0, 8.0]],
        ),
        data_frame(
            &["x", "y", "z"],
            &[
                &[1.0, 1.0, 1.0],
                &[2.0, 2.0, 2.0],
                &[3.0, 3.0, 3.0],
                &[4.0, 4.0, 4.0],
                &[5.0, 5.0, 5.0],
            ],
        ),
        data_frame(&["x", "y"], &[&[9.0, 9.0], &[8.0, 8.0], &[7.0, 7.0]]),
    );
    let file = PosFile::from_string(source).unwrap();
    let grab = file.grab_data().unwrap();

    assert_eq!(grab.array.shape(), (3, 5, 3));
    assert_eq!(grab.point_counts, vec![4, 5, 3]);
    assert!(grab.frame_errors.is_empty());

    // frame 0: rows 4 and beyond, and column 2, are padding
    assert_eq!(grab.array.get(0, 0, 0), 1.0);
    assert_eq!(grab.array.get(0, 3, 1), 8.0);
    assert_eq!(grab.array.get(0, 0, 2), 0.0);
    assert_eq!(grab.array.get(0, 4, 0), 0.0);
    assert_eq!(grab.array.get(0, 4, 2), 0.0);

    // frame 1 fills the whole slab
    assert_eq!(grab.array.get(1, 4, 2), 5.0);

    // frame 2: rows 3..5 are padding
    assert_eq!(grab.array.get(2, 2, 0), 7.0);
    assert_eq!(grab.array.get(2, 3, 0), 0.0);
    assert_eq!(grab.array.get(2, 4, 1), 0.0);
}

#[test]
fn test_box_frames_exclude_defs_from_points() {
    // frame 0: 2 defs + 3 geometry rows -> 3 points, def_count 2
    let source = format!(
        "{}{}",
        box_frame(
            &["lx", "ly"],
            &[&["A", "sphere", "1.0"], &["B", "sphere", "0.5"]],
            &[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]],
        ),
        box_frame(&["lx", "ly"], &[&["C", "cube"]], &[&[7.0, 8.0], &[9.0, 10.0]]),
    );
    let file = PosFile::from_string(source).unwrap();
    let index = file.index();
    let grab = file.grab_box().unwrap();

    assert_eq!(index.nbox(), 2);
    assert_eq!(index.box_frames()[0].def_count, 2);
    assert_eq!(index.box_frames()[1].def_count, 1);
    assert_eq!(grab.point_counts, vec![3, 2]);
    assert_eq!(grab.array.shape(), (2, 3, 2));
    assert_eq!(grab.array.frame(0), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    // frame 1 row 2 is padding
    assert_eq!(grab.array.frame(1), &[7.0, 8.0, 9.0, 10.0, 0.0, 0.0]);
}

#[rstest]
#[case(&["x"], 1)]
#[case(&["x", "y"], 2)]
#[case(&["x", "y", "z", "w"], 4)]
fn test_dim_count_follows_labels(#[case] labels: &[&str], #[case] dims: usize) {
    let row: Vec<f32> = (0..dims).map(|d| d as f32).collect();
    let file = PosFile::from_string(data_frame(labels, &[&row])).unwrap();

    assert_eq!(file.index().data_frames()[0].dim_count, dims);
    let grab = file.grab_data().unwrap();
    assert_eq!(grab.array.shape(), (1, 1, dims));
    for dim in 0..dims {
        assert_eq!(grab.array.get(0, 0, dim), dim as f32);
    }
}

#[rstest]
#[case("nan")]
#[case("1.5.2")]
#[case("two")]
fn test_invalid_tokens_fail_the_frame(#[case] token: &str) {
    let source = format!("#[data] x y\n1 {}\n#[done]\n", token);
    let file = PosFile::from_string(source).unwrap();
    let grab = file.grab_data().unwrap();

    assert_eq!(grab.frame_errors.len(), 1);
    assert_eq!(grab.frame_errors[0].frame, 0);
    assert_eq!(grab.array.frame(0), &[0.0, 0.0]);
}

#[test]
fn test_failed_frame_does_not_stop_the_grab() {
    let source = format!(
        "{}#[data] x\noops\n#[done]\n{}",
        data_frame(&["x"], &[&[1.0]]),
        data_frame(&["x"], &[&[3.0]]),
    );
    let file = PosFile::from_string(source).unwrap();
    let grab = file.grab_data().unwrap();

    assert_eq!(grab.frame_errors.len(), 1);
    assert_eq!(grab.frame_errors[0].frame, 1);
    assert_eq!(grab.array.get(0, 0, 0), 1.0);
    assert_eq!(grab.array.get(1, 0, 0), 0.0);
    assert_eq!(grab.array.get(2, 0, 0), 3.0);
}

#[test]
fn test_data_grab_ignores_box_frames_entirely() {
    let source = format!(
        "{}{}",
        box_frame(&["lx"], &[], &[&[99.0]]),
        data_frame(&["x"], &[&[1.0]]),
    );
    let file = PosFile::from_string(source).unwrap();
    let grab = file.grab_data().unwrap();

    assert_eq!(grab.array.shape(), (1, 1, 1));
    assert_eq!(grab.array.get(0, 0, 0), 1.0);
}
