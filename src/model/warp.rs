//! Warp records: a named, saved position.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Position, WarpPlayer};

/// A saved warp.
///
/// Warps carry no synthetic id. Two warps are the same warp when every field
/// matches, which is how the store finds a warp to delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warp {
    /// Who created the warp.
    pub player: WarpPlayer,

    pub pos: Position,

    /// Non-empty. Checked by whoever collects it from the player.
    pub name: String,

    /// When the warp was created.
    pub date: Timestamp,

    /// Optional free-text description. Stored as `null` when absent.
    #[serde(default)]
    pub desc: Option<String>,
}

impl Warp {
    /// Builds a new warp stamped with the current instant.
    pub fn new(
        player: WarpPlayer,
        pos: Position,
        name: impl Into<String>,
        desc: Option<String>,
    ) -> Self {
        Self {
            player,
            pos,
            name: name.into(),
            date: Timestamp::now(),
            desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    fn creator() -> WarpPlayer {
        WarpPlayer {
            name: "Steve".into(),
            real_name: "Steve".into(),
            xuid: "2535400000000001".into(),
        }
    }

    #[test]
    fn builder_stamps_current_instant() {
        let before = Timestamp::now();
        let warp = Warp::new(creator(), Position::new(1.0, 2.0, 3.0, 0), "Home", None);
        let after = Timestamp::now();

        assert!(warp.date >= before);
        assert!(warp.date <= after + SignedDuration::from_secs(1));
    }

    #[test]
    fn builder_date_serializes_as_parsable_iso_8601() {
        let warp = Warp::new(creator(), Position::new(1.0, 2.0, 3.0, 0), "Home", None);
        let json = serde_json::to_value(&warp).unwrap();

        let date = json["date"].as_str().unwrap();
        let parsed: Timestamp = date.parse().unwrap();
        assert_eq!(parsed, warp.date);
    }

    #[test]
    fn missing_description_is_written_as_null() {
        let warp = Warp::new(creator(), Position::new(1.0, 2.0, 3.0, 0), "Home", None);
        let json = serde_json::to_value(&warp).unwrap();

        assert!(json["desc"].is_null());
    }

    #[test]
    fn reads_records_with_millisecond_dates() {
        let json = r#"{
            "player": { "name": "Steve", "realName": "Steve", "xuid": "2535400000000001" },
            "pos": { "x": 12.5, "y": 64, "z": -30.25, "dimId": 1 },
            "name": "Fortress",
            "date": "2023-07-04T09:05:03.120Z",
            "desc": null
        }"#;

        let warp: Warp = serde_json::from_str(json).unwrap();
        assert_eq!(warp.name, "Fortress");
        assert_eq!(warp.pos, Position::new(12.5, 64.0, -30.25, 1));
        assert_eq!(warp.date, "2023-07-04T09:05:03.12Z".parse::<Timestamp>().unwrap());
        assert_eq!(warp.desc, None);
    }

    #[test]
    fn tolerates_missing_description() {
        let json = r#"{
            "player": { "name": "Steve", "realName": "Steve", "xuid": "1" },
            "pos": { "x": 0, "y": 0, "z": 0, "dimId": 0 },
            "name": "Origin",
            "date": "2023-07-04T09:05:03Z"
        }"#;

        let warp: Warp = serde_json::from_str(json).unwrap();
        assert_eq!(warp.desc, None);
    }

    #[test]
    fn equality_covers_nested_fields() {
        let a = Warp::new(creator(), Position::new(1.0, 2.0, 3.0, 0), "Home", None);
        let mut b = a.clone();
        assert_eq!(a, b);

        b.pos.dim_id = 1;
        assert_ne!(a, b);

        let mut c = a.clone();
        c.player.name = "Renamed".into();
        assert_ne!(a, c);
    }
}
