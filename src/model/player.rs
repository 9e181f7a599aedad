//! Players: the live host identity and the snapshot stored in each warp.

use serde::{Deserialize, Serialize};

use super::{position::Position, warp::Warp};

/// The creator of a warp, captured when the warp was made.
///
/// Never updated afterwards: a renamed player keeps the old name on old warps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarpPlayer {
    /// Display name.
    pub name: String,

    /// Account name.
    pub real_name: String,

    /// Stable unique player id.
    pub xuid: String,
}

/// A player as the host currently sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub real_name: String,
    pub xuid: String,

    /// Host permission level. Anything above zero counts as elevated.
    pub perm_level: u8,

    /// Where the player is standing right now.
    pub pos: Position,
}

impl Player {
    pub fn snapshot(&self) -> WarpPlayer {
        WarpPlayer {
            name: self.name.clone(),
            real_name: self.real_name.clone(),
            xuid: self.xuid.clone(),
        }
    }

    pub fn is_elevated(&self) -> bool {
        self.perm_level > 0
    }

    /// Owners and elevated players may delete a warp.
    pub fn can_delete(&self, warp: &Warp) -> bool {
        warp.player.xuid == self.xuid || self.is_elevated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steve(perm_level: u8) -> Player {
        Player {
            name: "Steve".into(),
            real_name: "steve_real".into(),
            xuid: "2535400000000001".into(),
            perm_level,
            pos: Position::new(0.0, 70.0, 0.0, 0),
        }
    }

    fn warp_by(xuid: &str) -> Warp {
        Warp::new(
            WarpPlayer {
                name: "Alex".into(),
                real_name: "alex".into(),
                xuid: xuid.into(),
            },
            Position::new(10.0, 64.0, 10.0, 0),
            "Spawn",
            None,
        )
    }

    #[test]
    fn snapshot_copies_identity() {
        let snap = steve(0).snapshot();
        assert_eq!(snap.name, "Steve");
        assert_eq!(snap.real_name, "steve_real");
        assert_eq!(snap.xuid, "2535400000000001");
    }

    #[test]
    fn owner_can_delete_own_warp() {
        assert!(steve(0).can_delete(&warp_by("2535400000000001")));
    }

    #[test]
    fn others_cannot_delete_unless_elevated() {
        let warp = warp_by("2535400000000999");
        assert!(!steve(0).can_delete(&warp));
        assert!(steve(1).can_delete(&warp));
    }

    #[test]
    fn snapshot_uses_host_field_names() {
        let json = serde_json::to_value(steve(0).snapshot()).unwrap();
        assert_eq!(json["realName"], "steve_real");
    }
}
