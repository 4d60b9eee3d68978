//! Clearance enforcement on random lanes

use codecity::layout::{enforce_min_gap, Lane, LaneNode, Span};
use proptest::prelude::*;

const EPSILON: f64 = 1e-9;

fn lane() -> impl Strategy<Value = Lane> {
    (
        prop::collection::vec((0u32..200, 1u32..12), 0..12),
        prop::collection::vec(0u32..220, 0..12),
    )
        .prop_map(|(spans, nodes)| Lane {
            spans: spans
                .into_iter()
                .enumerate()
                .map(|(i, (start, width))| {
                    let start = f64::from(start) / 2.0;
                    Span::new(format!("s{}", i), start, start + f64::from(width) / 2.0)
                })
                .collect(),
            nodes: nodes
                .into_iter()
                .enumerate()
                .map(|(i, at)| LaneNode::new(format!("n{}", i), f64::from(at) / 2.0))
                .collect(),
        })
}

#[test]
fn test_min_gap_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(lane(), 0u32..8), |(lane, buffer)| {
            let buffer = f64::from(buffer) / 2.0;
            let (out, inserted) = enforce_min_gap(&lane, buffer);

            prop_assert_eq!(out.spans.len(), lane.spans.len());
            prop_assert!(inserted >= 0.0);
            for pair in out.spans.windows(2) {
                prop_assert!(pair[1].start - pair[0].end >= buffer - EPSILON);
            }
            for span in &out.spans {
                let original = lane.spans.iter().find(|s| s.owner == span.owner).unwrap();
                prop_assert!((span.width() - original.width()).abs() < EPSILON);
                prop_assert!(span.start >= original.start - EPSILON);
                prop_assert!(span.start - original.start <= inserted + EPSILON);
            }

            // nodes keep their relative order and only ever move forward
            for (before, after) in lane.nodes.iter().zip(&out.nodes) {
                prop_assert_eq!(&before.owner, &after.owner);
                prop_assert!(after.position >= before.position - EPSILON);
            }
            for (i, a) in lane.nodes.iter().enumerate() {
                for (j, b) in lane.nodes.iter().enumerate() {
                    if a.position < b.position {
                        prop_assert!(out.nodes[i].position <= out.nodes[j].position + EPSILON);
                    }
                }
            }
            Ok(())
        })
        .unwrap();
}
