//! 大纲展示 - 业务能力层
//!
//! 把大纲和当前选择渲染成文本树

use std::fmt::Write;

use crate::models::outline::Outline;
use crate::models::selection::SegmentCoord;
use crate::services::selection_state::SelectionState;

/// 渲染大纲
///
/// 标记含义：`[x]` 已选，`[ ]` 可选，`[-]` 模块视频已达上限不可选
pub fn render(outline: &Outline, selection: &SelectionState) -> String {
    let mut out = String::new();

    if outline.is_empty() {
        out.push_str("(大纲为空)\n");
        return out;
    }

    let _ = writeln!(
        out,
        "Select up to {} video segments per Module",
        selection.cap()
    );

    for (m, module) in outline.modules.iter().enumerate() {
        let _ = writeln!(
            out,
            "📦 Module: {}  [video {}/{}]",
            module.module_title,
            selection.video_count(m),
            selection.cap()
        );

        for (b, block) in module.blocks.iter().enumerate() {
            let _ = writeln!(out, "    Block: {}", block.block_title);

            for (s, segment) in block.segments.iter().enumerate() {
                let coord = SegmentCoord::new(m, b, s);
                let (marker, learning_type, video_type) = match selection.entry(coord) {
                    Some(entry) => ("[x]", entry.custom_learning_type, entry.custom_video_type),
                    None if !selection.can_select(outline, coord) => {
                        ("[-]", segment.learning_type, segment.video_type)
                    }
                    None => ("[ ]", segment.learning_type, segment.video_type),
                };

                let _ = write!(
                    out,
                    "        {} {} {} ({}",
                    marker, coord, segment.segment_title, learning_type
                );
                if let (true, Some(video_type)) = (learning_type.is_video(), video_type) {
                    let _ = write!(out, " / {}", video_type);
                }
                out.push_str(")\n");
            }
        }
    }

    let _ = writeln!(out, "已选择 {} 个片段", selection.len());
    out
}
