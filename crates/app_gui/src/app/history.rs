//! egui rendering of the investigated-photos gallery.

use eframe::egui;
use history_core::{FormFactor, GalleryModal, Interaction, ModalFrame, PhotoRecord, Tile};

const FADE_SECS: f32 = 0.2;

const MODAL_BG: egui::Color32 = egui::Color32::from_rgb(0xff, 0xb7, 0x03);
const BANNER_BG: egui::Color32 = egui::Color32::from_rgb(0xfb, 0x85, 0x00);
const TILE_BG: egui::Color32 = egui::Color32::from_rgb(0x8e, 0xca, 0xe6);
const TILE_BORDER: egui::Color32 = egui::Color32::from_rgb(0x21, 0x9e, 0xbc);
const BUTTON_BG: egui::Color32 = egui::Color32::from_rgb(0x02, 0x30, 0x47);
const TEXT: egui::Color32 = egui::Color32::WHITE;

/// Height kept free below the grid for the go-back button.
const FOOTER_HEIGHT: f32 = 80.0;

/// The gallery modal as drawn in the desktop app. Visibility and records stay
/// with the caller.
#[derive(Default)]
pub struct HistoryModal {
    modal: GalleryModal,
    /// Fixed layout from settings; follows the window width when `None`.
    form_factor: Option<FormFactor>,
}

impl HistoryModal {
    pub fn new(form_factor: Option<FormFactor>) -> Self {
        Self {
            modal: GalleryModal::new(),
            form_factor,
        }
    }

    /// Draw the modal for this frame and apply whatever the user tapped.
    pub fn show<F>(
        &mut self,
        ctx: &egui::Context,
        visible: bool,
        records: &[PhotoRecord],
        on_close: F,
    ) where
        F: FnOnce(),
    {
        let opacity =
            ctx.animate_bool_with_time(egui::Id::new("history_fade"), visible, FADE_SECS);
        let screen = ctx.content_rect();
        let form = self
            .form_factor
            .unwrap_or_else(|| FormFactor::from_width(screen.width()));

        let Some(frame) = self.modal.frame(visible, records, form) else {
            return;
        };
        let mut interaction = None;

        egui::Area::new(egui::Id::new("history_modal"))
            .fixed_pos(screen.min)
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);
                ui.set_min_size(screen.size());
                ui.set_max_size(screen.size());
                ui.painter().rect_filled(screen, 0.0, MODAL_BG);
                if let Some(tapped) = draw_gallery(ui, &frame, screen.width()) {
                    interaction = Some(tapped);
                }
            });

        let enlarged_opacity = ctx.animate_bool_with_time(
            egui::Id::new("history_enlarged_fade"),
            frame.enlarged.is_some(),
            FADE_SECS,
        );
        if let Some(uri) = frame.enlarged
            && draw_enlarged(ctx, uri, screen, enlarged_opacity)
        {
            interaction = Some(Interaction::EnlargedTapped);
        }

        if let Some(interaction) = interaction {
            self.modal.handle(interaction, records, on_close);
            ctx.request_repaint();
        }
    }
}

fn draw_gallery(ui: &mut egui::Ui, frame: &ModalFrame<'_>, width: f32) -> Option<Interaction> {
    let mut tapped = None;
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        draw_banner(ui, frame.title, width * frame.form_factor.banner_width_fraction());
        ui.add_space(20.0);

        let grid_height = (ui.available_height() - FOOTER_HEIGHT).max(0.0);
        let grid = GridMetrics::new(ui, frame.form_factor, ui.available_width());
        egui::ScrollArea::vertical()
            .id_salt("history_scroll")
            .max_height(grid_height)
            .auto_shrink([false; 2])
            .show_rows(ui, grid.row_height, frame.rows().count(), |ui, range| {
                if let Some(index) = draw_rows(ui, frame, &grid, range) {
                    tapped = Some(Interaction::TileTapped(index));
                }
            });

        ui.add_space(10.0);
        let back = egui::Button::new(
            egui::RichText::new(frame.back_label)
                .color(TEXT)
                .size(18.0),
        )
        .fill(BUTTON_BG)
        .corner_radius(25.0)
        .min_size(egui::vec2(200.0, 48.0));
        if ui.add(back).clicked() {
            tapped = Some(Interaction::GoBackTapped);
        }
    });
    tapped
}

fn draw_banner(ui: &mut egui::Ui, title: &str, width: f32) {
    egui::Frame::new()
        .fill(BANNER_BG)
        .corner_radius(10.0)
        .shadow(egui::Shadow {
            offset: [0, 2],
            blur: 4,
            spread: 0,
            color: egui::Color32::from_black_alpha(77),
        })
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(width);
            ui.vertical_centered(|ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(title).size(28.0).strong().color(TEXT))
                        .selectable(false),
                );
            });
        });
}

const TILE_PADDING: i8 = 10;
const TILE_BORDER_WIDTH: f32 = 3.0;
const ROW_GAP: f32 = 20.0;

/// Fixed tile geometry, so the scroll area can skip rows that are off screen.
struct GridMetrics {
    margin: f32,
    /// Image side inside a tile.
    image_side: f32,
    tile_height: f32,
    row_height: f32,
}

impl GridMetrics {
    fn new(ui: &egui::Ui, form: FormFactor, row_width: f32) -> Self {
        let margin = row_width * form.tile_margin_fraction();
        let tile_width = row_width * form.tile_width_fraction();
        let chrome = 2.0 * (TILE_PADDING as f32 + TILE_BORDER_WIDTH);
        let image_side = (tile_width - chrome).max(16.0);
        let caption = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let tile_height = chrome + image_side + 10.0 + caption + 2.0 * spacing;
        Self {
            margin,
            image_side,
            tile_height,
            row_height: tile_height + ROW_GAP,
        }
    }
}

/// Draws only the grid rows in `range`. Returns the record index of a tapped tile.
fn draw_rows(
    ui: &mut egui::Ui,
    frame: &ModalFrame<'_>,
    grid: &GridMetrics,
    range: std::ops::Range<usize>,
) -> Option<usize> {
    let mut tapped = None;
    let row_width = ui.available_width();
    for row in frame.rows().skip(range.start).take(range.len()) {
        ui.allocate_ui_with_layout(
            egui::vec2(row_width, grid.row_height),
            egui::Layout::left_to_right(egui::Align::Min),
            |ui| {
                ui.set_height(grid.row_height);
                ui.spacing_mut().item_spacing.x = grid.margin * 2.0;
                ui.add_space(grid.margin);
                for tile in row {
                    if draw_tile(ui, tile, grid).clicked() {
                        tapped = Some(tile.index);
                    }
                }
            },
        );
    }
    tapped
}

fn draw_tile(ui: &mut egui::Ui, tile: &Tile<'_>, grid: &GridMetrics) -> egui::Response {
    ui.push_id(&tile.key, |ui| {
        let framed = egui::Frame::new()
            .fill(TILE_BG)
            .stroke(egui::Stroke::new(TILE_BORDER_WIDTH, TILE_BORDER))
            .corner_radius(10.0)
            .inner_margin(egui::Margin::same(TILE_PADDING))
            .show(ui, |ui| {
                ui.set_width(grid.image_side);
                let chrome = 2.0 * (TILE_PADDING as f32 + TILE_BORDER_WIDTH);
                ui.set_min_height(grid.tile_height - chrome);
                ui.vertical_centered(|ui| {
                    ui.add(
                        egui::Image::new(tile.uri)
                            .fit_to_exact_size(egui::vec2(grid.image_side, grid.image_side))
                            .corner_radius(10.0),
                    );
                    ui.add_space(10.0);
                    ui.add(
                        egui::Label::new(egui::RichText::new(&tile.caption).color(TEXT))
                            .selectable(false)
                            .truncate(),
                    );
                });
            });
        framed
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    })
    .inner
}

/// Transparent overlay with one photo; any click on it reports `true`.
fn draw_enlarged(ctx: &egui::Context, uri: &str, screen: egui::Rect, opacity: f32) -> bool {
    let mut clicked = false;
    egui::Area::new(egui::Id::new("history_enlarged"))
        .fixed_pos(screen.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            let response = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            let side = screen.width().min(screen.height()) * 0.9;
            let rect = egui::Rect::from_center_size(screen.center(), egui::vec2(side, side));
            ui.put(
                rect,
                egui::Image::new(uri)
                    .fit_to_exact_size(rect.size())
                    .corner_radius(10.0),
            );
            clicked = response.clicked();
        });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;
    use history_core::ViewState;
    use std::sync::{Arc, Mutex};

    const SCREEN: egui::Vec2 = egui::vec2(1024.0, 768.0);

    fn records(count: u64) -> Vec<PhotoRecord> {
        (1..=count)
            .map(|i| PhotoRecord::new(i, format!("file:///does/not/exist/{i}.jpg"), "Koolmees"))
            .collect()
    }

    fn input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN)),
            events,
            ..Default::default()
        }
    }

    fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Runs frames on a fixed 1024x768 screen with the wide layout.
    struct Harness {
        ctx: egui::Context,
        modal: HistoryModal,
        rows: Vec<PhotoRecord>,
        closed: usize,
    }

    impl Harness {
        fn new(rows: Vec<PhotoRecord>) -> Self {
            Self {
                ctx: egui::Context::default(),
                modal: HistoryModal::new(Some(FormFactor::Wide)),
                rows,
                closed: 0,
            }
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            let Self {
                ctx,
                modal,
                rows,
                closed,
            } = self;
            let _ = ctx.run(input(events), |ctx| {
                modal.show(ctx, true, &rows[..], || *closed += 1);
            });
        }

        fn idle(&mut self, frames: usize) {
            for _ in 0..frames {
                self.frame(Vec::new());
            }
        }

        fn click(&mut self, x: f32, y: f32) {
            let pos = egui::pos2(x, y);
            self.frame(vec![egui::Event::PointerMoved(pos), press(pos, true)]);
            self.frame(vec![press(pos, false)]);
            self.idle(2);
        }
    }

    /// Records every image URI egui asks for and never finishes loading.
    #[derive(Default)]
    struct RecordingLoader {
        requested: Mutex<Vec<String>>,
    }

    impl egui::load::ImageLoader for RecordingLoader {
        fn id(&self) -> &str {
            "history_tests::RecordingLoader"
        }

        fn load(
            &self,
            _ctx: &egui::Context,
            uri: &str,
            _size_hint: egui::load::SizeHint,
        ) -> egui::load::ImageLoadResult {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(uri.to_string());
            }
            Ok(egui::load::ImagePoll::Pending { size: None })
        }

        fn forget(&self, _uri: &str) {}

        fn forget_all(&self) {}

        fn byte_size(&self) -> usize {
            0
        }
    }

    #[test]
    fn hidden_modal_never_closes() {
        let ctx = egui::Context::default();
        let rows = records(2);
        let mut modal = HistoryModal::new(Some(FormFactor::Narrow));
        let mut closed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            modal.show(ctx, false, &rows, || closed = true);
        });
        assert!(!closed);
        assert_eq!(modal.modal.view_state(), &ViewState::Collapsed);
    }

    #[test]
    fn visible_modal_without_input_keeps_state() {
        let mut harness = Harness::new(records(2));
        harness.idle(3);
        assert_eq!(harness.closed, 0);
        assert_eq!(harness.modal.modal.view_state(), &ViewState::Collapsed);
    }

    #[test]
    fn empty_history_renders() {
        let mut harness = Harness::new(Vec::new());
        harness.idle(2);
        assert_eq!(harness.modal.modal.view_state(), &ViewState::Collapsed);
    }

    #[test]
    fn clicking_first_tile_enlarges_it() {
        let mut harness = Harness::new(records(3));
        harness.idle(2);
        harness.click(100.0, 200.0);
        assert_eq!(
            harness.modal.modal.view_state(),
            &ViewState::Enlarged {
                uri: "file:///does/not/exist/1.jpg".into()
            }
        );
        assert_eq!(harness.closed, 0);
    }

    #[test]
    fn clicking_enlarged_overlay_collapses() {
        let mut harness = Harness::new(records(3));
        harness.idle(2);
        harness.click(100.0, 200.0);
        assert!(harness.modal.modal.view_state().is_enlarged());

        harness.click(SCREEN.x / 2.0, SCREEN.y / 2.0);
        assert_eq!(harness.modal.modal.view_state(), &ViewState::Collapsed);
        assert_eq!(harness.closed, 0);
    }

    #[test]
    fn go_back_button_closes_once_per_click() {
        let mut harness = Harness::new(records(3));
        harness.idle(2);
        harness.click(SCREEN.x / 2.0, 720.0);
        assert_eq!(harness.closed, 1);
        assert_eq!(harness.modal.modal.view_state(), &ViewState::Collapsed);

        harness.click(SCREEN.x / 2.0, 720.0);
        assert_eq!(harness.closed, 2);
    }

    #[test]
    fn offscreen_rows_are_not_loaded() {
        let mut harness = Harness::new(records(40));
        let loader = Arc::new(RecordingLoader::default());
        harness.ctx.add_image_loader(loader.clone());
        harness.idle(2);

        let requested = loader.requested.lock().unwrap().clone();
        assert!(requested.iter().any(|uri| uri.ends_with("/1.jpg")));
        assert!(!requested.iter().any(|uri| uri.ends_with("/40.jpg")));
    }
}
