use outline_curator::{Block, LearningType, Module, Outline, Segment, SegmentCoord, SelectionState};
use proptest::prelude::*;

fn learning_type() -> impl Strategy<Value = LearningType> {
    // 视频多一些，才容易碰到上限
    prop_oneof![
        3 => Just(LearningType::Video),
        1 => Just(LearningType::Reading),
        1 => Just(LearningType::Assignment),
        1 => Just(LearningType::Quiz),
        1 => Just(LearningType::Discussion),
    ]
}

/// 标题里带上下标，方便检查顺序
fn outline_strategy() -> impl Strategy<Value = Outline> {
    prop::collection::vec(
        prop::collection::vec(prop::collection::vec(learning_type(), 1..12), 1..4),
        1..4,
    )
    .prop_map(|modules| {
        Outline::new(
            modules
                .into_iter()
                .enumerate()
                .map(|(m, blocks)| Module {
                    module_title: format!("{}", m),
                    blocks: blocks
                        .into_iter()
                        .enumerate()
                        .map(|(b, segments)| Block {
                            block_title: format!("{}", b),
                            segments: segments
                                .into_iter()
                                .enumerate()
                                .map(|(s, t)| Segment::new(format!("{}.{}.{}", m, b, s), t))
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        )
    })
}

/// 把任意下标折回大纲范围内
fn fit(outline: &Outline, (m, b, s): (usize, usize, usize)) -> SegmentCoord {
    let m = m % outline.modules.len();
    let blocks = &outline.modules[m].blocks;
    let b = b % blocks.len();
    let s = s % blocks[b].segments.len();
    SegmentCoord::new(m, b, s)
}

fn raw_coords() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0usize..8, 0usize..8, 0usize..16), 0..80)
}

proptest! {
    #[test]
    fn video_cap_never_exceeded_by_toggle(outline in outline_strategy(),
                                          ops in raw_coords(),
                                          cap in 1usize..5) {
        let mut state = SelectionState::with_cap(cap);
        for raw in ops {
            let coord = fit(&outline, raw);
            let before = state.clone();
            match state.toggle(&outline, coord) {
                Ok(_) => {}
                Err(e) => {
                    prop_assert!(e.is_capacity_exceeded());
                    prop_assert_eq!(&state, &before);
                }
            }
            for m in 0..outline.modules.len() {
                prop_assert!(state.video_count(m) <= cap);
            }
        }
    }

    #[test]
    fn toggle_twice_is_identity(outline in outline_strategy(),
                                ops in raw_coords(),
                                pick in (0usize..8, 0usize..8, 0usize..16),
                                cap in 1usize..8) {
        let mut state = SelectionState::with_cap(cap);
        for raw in ops {
            let _ = state.toggle(&outline, fit(&outline, raw));
        }

        let before = state.clone();
        let coord = fit(&outline, pick);
        let _ = state.toggle(&outline, coord);
        let _ = state.toggle(&outline, coord);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn reduce_keeps_outline_order(outline in outline_strategy(), ops in raw_coords()) {
        let mut state = SelectionState::new();
        for raw in ops {
            let _ = state.toggle(&outline, fit(&outline, raw));
        }

        let reduced = state.reduce(&outline).unwrap();
        prop_assert_eq!(reduced.segment_count(), state.len());

        let module_idx: Vec<usize> = reduced
            .modules
            .iter()
            .map(|m| m.module_title.parse().unwrap())
            .collect();
        prop_assert!(module_idx.windows(2).all(|w| w[0] < w[1]));

        for module in &reduced.modules {
            let block_idx: Vec<usize> = module
                .blocks
                .iter()
                .map(|b| b.block_title.parse().unwrap())
                .collect();
            prop_assert!(block_idx.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(module.blocks.iter().all(|b| !b.segments.is_empty()));
        }
    }
}

#[test]
fn reduce_of_empty_selection_is_empty() {
    let outline = Outline::new(vec![Module {
        module_title: "0".to_string(),
        blocks: vec![Block {
            block_title: "0".to_string(),
            segments: vec![Segment::new("x", LearningType::Video)],
        }],
    }]);
    assert!(SelectionState::new().reduce(&outline).unwrap().modules.is_empty());
}
