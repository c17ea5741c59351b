// ABOUTME: The stage transition tables, declared as data
// ABOUTME: Ordinary edges belong to the assignee; override edges to supervisors

use super::stage::Stage;

/// Forward-flow edges the assignee may take without justification.
pub const ORDINARY_EDGES: &[(Stage, Stage)] = &[
    (Stage::NotStarted, Stage::Started),
    (Stage::Started, Stage::LocalDone),
    (Stage::LocalDone, Stage::LiveDone),
    (Stage::LiveDone, Stage::Review),
    (Stage::LiveDone, Stage::Completed),
];

/// Supervisor edges, each requiring a non-empty reason: a reset to start
/// from anywhere, a force-complete from any unfinished stage, and the
/// forward pushes along the main line.
pub const OVERRIDE_EDGES: &[(Stage, Stage)] = &[
    // Reset to start
    (Stage::Started, Stage::NotStarted),
    (Stage::LocalDone, Stage::NotStarted),
    (Stage::LiveDone, Stage::NotStarted),
    (Stage::Review, Stage::NotStarted),
    (Stage::Completed, Stage::NotStarted),
    // Force complete
    (Stage::NotStarted, Stage::Completed),
    (Stage::Started, Stage::Completed),
    (Stage::LocalDone, Stage::Completed),
    (Stage::LiveDone, Stage::Completed),
    (Stage::Review, Stage::Completed),
    // Forward pushes
    (Stage::NotStarted, Stage::Started),
    (Stage::Started, Stage::LocalDone),
    (Stage::LocalDone, Stage::LiveDone),
];

/// Whether the assignee may take `from -> to` as an ordinary transition.
pub fn is_ordinary(from: Stage, to: Stage) -> bool {
    ORDINARY_EDGES.contains(&(from, to))
}

/// Whether a supervisor may take `from -> to` as an override.
pub fn is_override(from: Stage, to: Stage) -> bool {
    OVERRIDE_EDGES.contains(&(from, to))
}

/// Ordinary targets reachable from a stage, in table order.
pub fn ordinary_targets(from: Stage) -> Vec<Stage> {
    ORDINARY_EDGES
        .iter()
        .filter(|(f, _)| *f == from)
        .map(|(_, t)| *t)
        .collect()
}

/// Override targets reachable from a stage, in table order.
pub fn override_targets(from: Stage) -> Vec<Stage> {
    OVERRIDE_EDGES
        .iter()
        .filter(|(f, _)| *f == from)
        .map(|(_, t)| *t)
        .collect()
}
