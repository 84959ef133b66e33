use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
    Z,
}

impl AxisDirection {
    /// Material slot used when a face on this axis is highlighted (0 is the base material).
    pub const fn highlight_material(self) -> u8 {
        match self {
            AxisDirection::X => 1,
            AxisDirection::Y => 2,
            AxisDirection::Z => 3,
        }
    }

    const fn unit(self) -> DVec3 {
        match self {
            AxisDirection::X => DVec3::X,
            AxisDirection::Y => DVec3::Y,
            AxisDirection::Z => DVec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSign {
    Positive,
    Negative,
}

impl AxisSign {
    pub const fn scalar(self) -> f64 {
        match self {
            AxisSign::Positive => 1.0,
            AxisSign::Negative => -1.0,
        }
    }
}

/// Raised when a normal does not name one of the six cube faces.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("normal ({x}, {y}, {z}) is not an axis-aligned unit face normal")]
pub struct FaceNormalError {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One face of the orientation cube, identified by the axis its outward normal points along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeFace {
    direction: AxisDirection,
    sign: AxisSign,
}

impl CubeFace {
    pub const POS_X: CubeFace = CubeFace::positive(AxisDirection::X);
    pub const NEG_X: CubeFace = CubeFace::negative(AxisDirection::X);
    pub const POS_Y: CubeFace = CubeFace::positive(AxisDirection::Y);
    pub const NEG_Y: CubeFace = CubeFace::negative(AxisDirection::Y);
    pub const POS_Z: CubeFace = CubeFace::positive(AxisDirection::Z);
    pub const NEG_Z: CubeFace = CubeFace::negative(AxisDirection::Z);

    /// Faces in geometry-group order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::POS_X,
        CubeFace::NEG_X,
        CubeFace::POS_Y,
        CubeFace::NEG_Y,
        CubeFace::POS_Z,
        CubeFace::NEG_Z,
    ];

    pub const fn new(direction: AxisDirection, sign: AxisSign) -> Self {
        Self { direction, sign }
    }

    pub const fn positive(direction: AxisDirection) -> Self {
        Self {
            direction,
            sign: AxisSign::Positive,
        }
    }

    pub const fn negative(direction: AxisDirection) -> Self {
        Self {
            direction,
            sign: AxisSign::Negative,
        }
    }

    /// Identify a face from the normal reported by an axis-aligned box intersection.
    ///
    /// Exactly one component must be `+1` or `-1` and the other two `0`. Anything else
    /// means the raycaster handed over a bad hit and is rejected rather than rounded.
    pub fn from_normal(normal: DVec3) -> Result<Self, FaceNormalError> {
        let reject = || FaceNormalError {
            x: normal.x,
            y: normal.y,
            z: normal.z,
        };

        let mut found = None;
        for (direction, component) in [
            (AxisDirection::X, normal.x),
            (AxisDirection::Y, normal.y),
            (AxisDirection::Z, normal.z),
        ] {
            let sign = if component == 1.0 {
                AxisSign::Positive
            } else if component == -1.0 {
                AxisSign::Negative
            } else if component == 0.0 {
                continue;
            } else {
                return Err(reject());
            };
            if found.is_some() {
                return Err(reject());
            }
            found = Some(CubeFace::new(direction, sign));
        }
        found.ok_or_else(reject)
    }

    /// Outward face normal, a unit vector along one world axis.
    pub fn normal(self) -> DVec3 {
        self.direction.unit() * self.sign.scalar()
    }

    /// Index of this face's geometry group: +X, -X, +Y, -Y, +Z, -Z.
    pub const fn index(self) -> usize {
        let axis = match self.direction {
            AxisDirection::X => 0,
            AxisDirection::Y => 1,
            AxisDirection::Z => 2,
        };
        let offset = match self.sign {
            AxisSign::Positive => 0,
            AxisSign::Negative => 1,
        };
        axis * 2 + offset
    }

    pub const fn highlight_material(self) -> u8 {
        self.direction.highlight_material()
    }

    pub const fn signed_label(&self) -> &'static str {
        match (self.direction, self.sign) {
            (AxisDirection::X, AxisSign::Positive) => "+X",
            (AxisDirection::X, AxisSign::Negative) => "-X",
            (AxisDirection::Y, AxisSign::Positive) => "+Y",
            (AxisDirection::Y, AxisSign::Negative) => "-Y",
            (AxisDirection::Z, AxisSign::Positive) => "+Z",
            (AxisDirection::Z, AxisSign::Negative) => "-Z",
        }
    }
}

impl std::fmt::Display for CubeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.signed_label())
    }
}
