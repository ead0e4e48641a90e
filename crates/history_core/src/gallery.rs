//! The history gallery modal: local view state, user interactions and the
//! toolkit-independent description of what the modal shows.

use crate::{FormFactor, PhotoRecord};

pub const TITLE: &str = "Investigated photos";
pub const BACK_LABEL: &str = "Go back";

/// Which photo, if any, is shown enlarged above the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Collapsed,
    Enlarged {
        uri: String,
    },
}

impl ViewState {
    pub fn enlarged_uri(&self) -> Option<&str> {
        match self {
            ViewState::Collapsed => None,
            ViewState::Enlarged { uri } => Some(uri),
        }
    }

    pub fn is_enlarged(&self) -> bool {
        matches!(self, ViewState::Enlarged { .. })
    }
}

/// A discrete user action on the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Tile at this position in the record list was tapped.
    TileTapped(usize),
    /// The enlarged overlay was tapped anywhere.
    EnlargedTapped,
    GoBackTapped,
}

/// One grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile<'a> {
    pub index: usize,
    /// Stable widget key, derived from the record id.
    pub key: String,
    pub uri: &'a str,
    pub caption: String,
}

/// Everything the visible modal displays for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalFrame<'a> {
    pub title: &'static str,
    pub form_factor: FormFactor,
    pub columns: usize,
    pub tiles: Vec<Tile<'a>>,
    pub enlarged: Option<&'a str>,
    pub back_label: &'static str,
}

impl<'a> ModalFrame<'a> {
    /// Tiles grouped into grid rows; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile<'a>]> {
        self.tiles.chunks(self.columns.max(1))
    }
}

/// Gallery of investigated photos with a tap-to-enlarge viewer.
///
/// Visibility and the records belong to the caller and are passed in on every
/// call; the modal itself only remembers which photo is enlarged.
#[derive(Debug, Clone, Default)]
pub struct GalleryModal {
    view: ViewState,
}

impl GalleryModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Describe the modal for rendering, or `None` while it is hidden.
    pub fn frame<'a>(
        &'a self,
        visible: bool,
        records: &'a [PhotoRecord],
        form_factor: FormFactor,
    ) -> Option<ModalFrame<'a>> {
        if !visible {
            return None;
        }
        let tiles = records
            .iter()
            .enumerate()
            .map(|(index, record)| Tile {
                index,
                key: record.id.to_string(),
                uri: record.uri.as_str(),
                caption: caption(record),
            })
            .collect();
        Some(ModalFrame {
            title: TITLE,
            form_factor,
            columns: form_factor.columns(),
            tiles,
            enlarged: self.view.enlarged_uri(),
            back_label: BACK_LABEL,
        })
    }

    /// Apply one user interaction. `on_close` runs only for the go-back
    /// button; hiding the modal is then up to the caller.
    pub fn handle<F>(&mut self, interaction: Interaction, records: &[PhotoRecord], on_close: F)
    where
        F: FnOnce(),
    {
        match interaction {
            Interaction::TileTapped(index) => match records.get(index) {
                Some(record) => {
                    tracing::debug!("enlarging {} ({})", record.id, record.uri);
                    self.view = ViewState::Enlarged {
                        uri: record.uri.clone(),
                    };
                }
                None => {
                    tracing::warn!(
                        "tap on tile {index} ignored, only {} records",
                        records.len()
                    );
                }
            },
            Interaction::EnlargedTapped => {
                if self.view.is_enlarged() {
                    tracing::debug!("minimizing enlarged photo");
                }
                self.view = ViewState::Collapsed;
            }
            Interaction::GoBackTapped => {
                tracing::debug!("closing history");
                on_close();
            }
        }
    }
}

pub fn caption(record: &PhotoRecord) -> String {
    format!("Predicted: {}", record.predicted_class)
}
