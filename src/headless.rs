use serde::Serialize;

use crate::camera::CameraState;
use crate::core::{Action, InputState};
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct NearestNode {
    pub id: String,
    pub distance: f32,
    pub lightness: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    fn of(values: impl Iterator<Item = f32>) -> Option<Self> {
        values.fold(None, |acc, v| match acc {
            None => Some(Range { min: v, max: v }),
            Some(r) => Some(Range {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }
}

/// Summary of a windowless run
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessReport {
    pub steps: u64,
    pub held: Vec<Action>,
    pub camera: CameraState,
    pub nearest: Option<NearestNode>,
    pub lightness: Option<Range>,
    pub scale: Option<Range>,
}

/// Step the session `frames` times holding `held`, then summarize it
pub fn run_headless(session: &mut Session, held: &[Action], frames: u32) -> HeadlessReport {
    let input = InputState::holding(held);
    log::info!("Running {} headless steps holding {:?}", frames, held);

    session.run(&input, frames);
    report(session, held)
}

pub fn report(session: &Session, held: &[Action]) -> HeadlessReport {
    let nearest = session.nearest_node().map(|(node, distance)| NearestNode {
        id: node.id().to_string(),
        distance,
        lightness: node.visual.lightness,
        scale: node.visual.scale,
    });

    HeadlessReport {
        steps: session.steps(),
        held: held.to_vec(),
        camera: *session.camera(),
        nearest,
        lightness: Range::of(session.nodes().iter().map(|n| n.visual.lightness)),
        scale: Range::of(session.nodes().iter().map(|n| n.visual.scale)),
    }
}
