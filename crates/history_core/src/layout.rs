//! Presentation choices that differ between large and small screens.

use serde::{Deserialize, Serialize};

/// Screens at least this wide (logical points) get the wide layout.
pub const WIDE_MIN_WIDTH: f32 = 768.0;

/// Horizontal margin on each side of a tile, as a fraction of the row width.
pub const TILE_MARGIN_FRACTION: f32 = 0.025;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    /// Desktop and web windows.
    Wide,
    /// Phone-sized screens.
    #[default]
    Narrow,
}

impl FormFactor {
    pub fn from_width(width: f32) -> Self {
        if width >= WIDE_MIN_WIDTH {
            FormFactor::Wide
        } else {
            FormFactor::Narrow
        }
    }

    pub fn columns(self) -> usize {
        match self {
            FormFactor::Wide => 4,
            FormFactor::Narrow => 2,
        }
    }

    pub fn tile_width_fraction(self) -> f32 {
        match self {
            FormFactor::Wide => 0.20,
            FormFactor::Narrow => 0.45,
        }
    }

    pub fn banner_width_fraction(self) -> f32 {
        match self {
            FormFactor::Wide => 0.50,
            FormFactor::Narrow => 0.85,
        }
    }

    pub fn tile_margin_fraction(self) -> f32 {
        TILE_MARGIN_FRACTION
    }
}
