//! Navigation tasks: guiding a player toward a warp.
//!
//! Pathing belongs to the host. The flow only starts, checks, and clears
//! tasks through [`Navigator`].

use std::collections::HashMap;

use crate::model::Warp;

/// The host's navigation service, keyed by player xuid.
pub trait Navigator {
    fn has_task(&self, xuid: &str) -> bool;
    fn clear_task(&mut self, xuid: &str);
    fn new_task(&mut self, xuid: &str, target: &Warp);
}

/// In-memory navigator: remembers one target per player.
#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: HashMap<String, Warp>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self, xuid: &str) -> Option<&Warp> {
        self.tasks.get(xuid)
    }
}

impl Navigator for TaskBoard {
    fn has_task(&self, xuid: &str) -> bool {
        self.tasks.contains_key(xuid)
    }

    fn clear_task(&mut self, xuid: &str) {
        if let Some(warp) = self.tasks.remove(xuid) {
            tracing::debug!(xuid, warp = %warp.name, "navigation cleared");
        }
    }

    fn new_task(&mut self, xuid: &str, target: &Warp) {
        tracing::info!(
            xuid,
            warp = %target.name,
            x = target.pos.x,
            y = target.pos.y,
            z = target.pos.z,
            dim = target.pos.dim_id,
            "navigation started"
        );
        self.tasks.insert(xuid.to_string(), target.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::{Position, WarpPlayer};

    fn warp(name: &str) -> Warp {
        Warp::new(
            WarpPlayer {
                name: "Steve".into(),
                real_name: "Steve".into(),
                xuid: "1".into(),
            },
            Position::new(0.0, 64.0, 0.0, 0),
            name,
            None,
        )
    }

    #[test]
    fn new_task_replaces_previous_target() {
        let mut board = TaskBoard::new();
        board.new_task("1", &warp("A"));
        board.new_task("1", &warp("B"));

        assert!(board.has_task("1"));
        assert_eq!(board.target("1").unwrap().name, "B");
    }

    #[test]
    fn clear_task_is_idempotent() {
        let mut board = TaskBoard::new();
        board.new_task("1", &warp("A"));
        board.clear_task("1");
        board.clear_task("1");

        assert!(!board.has_task("1"));
    }
}
