//! Positions in the game world and the dimensions they live in.

use serde::{Deserialize, Serialize};

/// A point in the world: three coordinates plus the dimension id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,

    /// Raw dimension id as the host reports it. See [`Dimension`].
    pub dim_id: i32,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64, dim_id: i32) -> Self {
        Self { x, y, z, dim_id }
    }

    pub fn dimension(&self) -> Dimension {
        Dimension::from_id(self.dim_id)
    }
}

/// The dimension a position belongs to.
///
/// Every id maps to a variant; ids the host may add later land in `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Overworld,
    Nether,
    End,
    Unknown(i32),
}

impl Dimension {
    /// The dimensions a player can pick when creating a warp, in dropdown order.
    pub const SELECTABLE: [Self; 3] = [Self::Overworld, Self::Nether, Self::End];

    pub fn from_id(id: i32) -> Self {
        match id {
            0 => Self::Overworld,
            1 => Self::Nether,
            2 => Self::End,
            other => Self::Unknown(other),
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Self::Overworld => 0,
            Self::Nether => 1,
            Self::End => 2,
            Self::Unknown(id) => id,
        }
    }
}
