//! Validates max-flow computation and grid segmentation behavior

use ndarray::Array2;
use permcut::flow::{FlowNetwork, segment};

#[test]
fn test_textbook_network_flow_value() {
    // The six-node example from Cormen et al., maximum flow 23
    let mut network = FlowNetwork::new(6);
    let edges = [
        (0, 1, 16),
        (0, 2, 13),
        (1, 3, 12),
        (2, 1, 4),
        (2, 4, 14),
        (3, 2, 9),
        (3, 5, 20),
        (4, 3, 7),
        (4, 5, 4),
    ];
    for (from, to, capacity) in edges {
        assert!(network.add_edge(from, to, capacity).is_ok());
    }
    assert_eq!(network.max_flow(0, 5).ok(), Some(23));
}

#[test]
fn test_flow_is_consumed_by_first_run() {
    let mut network = FlowNetwork::new(2);
    assert!(network.add_edge(0, 1, 8).is_ok());
    assert_eq!(network.max_flow(0, 1).ok(), Some(8));
    assert_eq!(network.max_flow(0, 1).ok(), Some(0));
}

#[test]
fn test_out_of_range_endpoint_rejected() {
    let mut network = FlowNetwork::new(3);
    assert!(network.add_edge(0, 7, 1).is_err());
    assert!(network.add_edge(0, 1, -1).is_err());
}

#[test]
fn test_cut_side_contains_source() {
    let mut network = FlowNetwork::new(4);
    for (from, to, capacity) in [(0, 1, 5), (1, 2, 1), (2, 3, 5)] {
        assert!(network.add_edge(from, to, capacity).is_ok());
    }
    let Ok((flow, source_side)) = network.min_cut(0, 3) else {
        unreachable!("Valid terminals");
    };
    assert_eq!(flow, 1);
    // The 1-capacity middle edge is the bottleneck; nodes 0 and 1 stay on
    // the source side
    assert_eq!(source_side.get(0).map(|bit| *bit), Some(true));
    assert_eq!(source_side.get(1).map(|bit| *bit), Some(true));
    assert_eq!(source_side.get(2).map(|bit| *bit), Some(false));
    assert_eq!(source_side.get(3).map(|bit| *bit), Some(false));
}

#[test]
fn test_dark_half_becomes_foreground() {
    // Two lightly textured regions: dark columns [10, 20] and bright
    // columns [240, 250]. Per row the cheapest cut severs the dark source
    // arcs (10 + 20), the bright sink arcs (15 + 5), and the 220 boundary
    // penalty, totalling 270.
    let rows = 4;
    let column_values = [10i64, 20, 240, 250];
    let intensities = Array2::from_shape_fn((rows, column_values.len()), |(_, col)| {
        column_values.get(col).copied().unwrap_or(0)
    });

    let Ok(segmentation) = segment(&intensities) else {
        unreachable!("Valid intensity grid");
    };
    assert_eq!(segmentation.cut_value, 270 * rows as i64);
    for ((_, col), &foreground) in segmentation.foreground.indexed_iter() {
        assert_eq!(foreground, col < 2, "column {col} on the wrong side");
    }
}

#[test]
fn test_uniform_midtone_image_is_background() {
    // Sink arcs (127) are cheaper than source arcs (128), so every pixel
    // stays on the source side
    let intensities = Array2::from_elem((3, 4), 128i64);
    let Ok(segmentation) = segment(&intensities) else {
        unreachable!("Valid intensity grid");
    };
    assert_eq!(segmentation.cut_value, 127 * 12);
    assert_eq!(segmentation.foreground_count(), 0);
}

#[test]
fn test_single_pixel_goes_to_nearer_terminal() {
    let dark = Array2::from_elem((1, 1), 10i64);
    let Ok(segmentation) = segment(&dark) else {
        unreachable!("Valid intensity grid");
    };
    assert_eq!(segmentation.foreground_count(), 1);
    assert_eq!(segmentation.cut_value, 10);

    let bright = Array2::from_elem((1, 1), 200i64);
    let Ok(segmentation) = segment(&bright) else {
        unreachable!("Valid intensity grid");
    };
    assert_eq!(segmentation.foreground_count(), 0);
    assert_eq!(segmentation.cut_value, 55);
}
