
use crate::config::ListConfig;
use crate::list::MountedList;
use crate::render::{Frame, ListStatus};
use crate::source::{MockSource, catalog};

fn source(len: usize) -> MockSource {
    MockSource::new(catalog::generate(len))
}

fn config(page_size: usize, viewport_rows: usize) -> ListConfig {
    ListConfig {
        page_size,
        viewport_rows,
        ..ListConfig::default()
    }
}

/// Row count and status of a frame, for compact assertions
fn summary(frame: &Frame) -> (usize, &'static str) {
    let status = match frame.status {
        ListStatus::Idle => "idle",
        ListStatus::Loading => "loading",
        ListStatus::EndOfList => "end",
        ListStatus::Failed(_) => "failed",
    };
    (frame.rows.len(), status)
}

/// Drain frames until the list reports its end
async fn frames_until_end(list: &mut MountedList) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(frame) = list.next_frame().await {
        let done = frame.is_end_of_list();
        frames.push(frame);
        if done {
            break;
        }
    }
    frames
}
