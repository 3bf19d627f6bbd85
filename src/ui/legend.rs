use crate::state::data_series::color32_for_index;
use crate::state::dataset::charge_label;
use crate::state::visibility::SeriesVisibility;

pub const LEGEND_COLUMNS: usize = 5;
pub const LEGEND_TITLE: &str = "Charge States";
pub const HIDDEN_OPACITY: f32 = 0.3;

/// How a legend row is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowAppearance {
    pub opacity: f32,
    pub strikethrough: bool,
}

impl RowAppearance {
    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            Self { opacity: 1.0, strikethrough: false }
        } else {
            Self { opacity: HIDDEN_OPACITY, strikethrough: true }
        }
    }

    pub fn shows_visible(&self) -> bool {
        !self.strikethrough
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub index: usize,
    pub label: String,
    pub color: egui::Color32,
    pub appearance: RowAppearance,
}

/// Multi-column, clickable charge-state legend.
///
/// Kept as columns of rows with their appearance so that a visibility change
/// patches single rows instead of rebuilding the whole thing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    pub columns: Vec<Vec<LegendRow>>,
}

/// Build the legend for `renderer_count` series.
///
/// Indices are split into at most [`LEGEND_COLUMNS`] columns of
/// `ceil(count / 5)` consecutive rows; trailing empty columns are left out.
pub fn build_legend(renderer_count: usize, visibility: &SeriesVisibility) -> Legend {
    let per_column = renderer_count.div_ceil(LEGEND_COLUMNS);
    let mut columns = Vec::new();
    for col in 0..LEGEND_COLUMNS {
        let start = col * per_column;
        let end = (start + per_column).min(renderer_count);
        if start >= end {
            continue;
        }
        columns.push(
            (start..end)
                .map(|index| LegendRow {
                    index,
                    label: charge_label(index),
                    color: color32_for_index(index),
                    appearance: RowAppearance::for_visibility(visibility.is_visible(index)),
                })
                .collect(),
        );
    }
    Legend { columns }
}

impl Legend {
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[cfg(test)]
    pub fn row(&self, index: usize) -> Option<&LegendRow> {
        self.rows().find(|r| r.index == index)
    }

    pub fn rows(&self) -> impl Iterator<Item = &LegendRow> {
        self.columns.iter().flatten()
    }

    /// Update the appearance of one row only.
    pub fn patch_row(&mut self, index: usize, visible: bool) {
        if let Some(row) = self.columns.iter_mut().flatten().find(|r| r.index == index) {
            row.appearance = RowAppearance::for_visibility(visible);
        }
    }

    /// Repaint every row from `visibility`, keeping the layout.
    pub fn repaint(&mut self, visibility: &SeriesVisibility) {
        for row in self.columns.iter_mut().flatten() {
            row.appearance = RowAppearance::for_visibility(visibility.is_visible(row.index));
        }
    }
}

/// What the user clicked in the legend this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendAction {
    None,
    Toggle(usize),
    ShowAll,
}

/// Draw the legend as a floating box in the top-right corner of `plot_rect`.
pub fn show_legend(ui: &mut egui::Ui, legend: &Legend, plot_rect: egui::Rect) -> LegendAction {
    let mut action = LegendAction::None;
    if legend.row_count() == 0 {
        return action;
    }

    let stroke_color = ui.visuals().widgets.noninteractive.bg_stroke.color;

    egui::Area::new(egui::Id::new("charge_state_legend"))
        .fixed_pos(plot_rect.right_top() + egui::vec2(-12.0, 12.0))
        .pivot(egui::Align2::RIGHT_TOP)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(egui::Margin::same(8))
                .corner_radius(egui::CornerRadius::same(6))
                .stroke(egui::Stroke::new(1.0, stroke_color))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(LEGEND_TITLE).strong().size(12.0));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Show All").clicked() {
                                action = LegendAction::ShowAll;
                            }
                        });
                    });
                    ui.separator();

                    egui::ScrollArea::vertical()
                        .max_height(plot_rect.height() - 100.0)
                        .show(ui, |ui| {
                            ui.horizontal_top(|ui| {
                                for column in &legend.columns {
                                    ui.vertical(|ui| {
                                        ui.set_min_width(56.0);
                                        for row in column {
                                            if legend_row(ui, row).clicked() {
                                                action = LegendAction::Toggle(row.index);
                                            }
                                        }
                                    });
                                }
                            });
                        });
                });
        });

    action
}

fn legend_row(ui: &mut egui::Ui, row: &LegendRow) -> egui::Response {
    let opacity = row.appearance.opacity;
    let text_color = ui.visuals().text_color().gamma_multiply(opacity);

    let mut text = egui::RichText::new(&row.label).size(11.0).color(text_color);
    if row.appearance.strikethrough {
        text = text.strikethrough();
    }

    let inner = ui.horizontal(|ui| {
        let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
        ui.painter()
            .rect_filled(swatch, 2.0, row.color.gamma_multiply(opacity));
        ui.label(text);
    });

    let response = ui.interact(
        inner.response.rect,
        egui::Id::new("legend_row").with(row.index),
        egui::Sense::click(),
    );
    if response.hovered() {
        ui.painter().rect_filled(
            inner.response.rect.expand(1.0),
            3.0,
            ui.visuals().widgets.hovered.weak_bg_fill.gamma_multiply(0.3),
        );
    }
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_ranges(legend: &Legend) -> Vec<(usize, usize)> {
        legend
            .columns
            .iter()
            .map(|c| (c.first().unwrap().index, c.last().unwrap().index + 1))
            .collect()
    }

    #[test]
    fn test_columns_cover_all_indices_contiguously() {
        let visibility = SeriesVisibility::new();
        for count in 0..=60 {
            let legend = build_legend(count, &visibility);
            assert!(legend.columns.len() <= LEGEND_COLUMNS, "count {count}");
            assert!(legend.columns.iter().all(|c| !c.is_empty()));

            let mut next = 0;
            for (start, end) in column_ranges(&legend) {
                assert_eq!(start, next, "count {count}");
                assert!(end > start);
                next = end;
            }
            assert_eq!(next, count);

            let flat: Vec<usize> = legend.rows().map(|r| r.index).collect();
            assert_eq!(flat, (0..count).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_six_states_use_three_columns_of_two() {
        let legend = build_legend(6, &SeriesVisibility::new());
        assert_eq!(column_ranges(&legend), vec![(0, 2), (2, 4), (4, 6)]);
    }

    #[test]
    fn test_eighteen_states() {
        let legend = build_legend(18, &SeriesVisibility::new());
        assert_eq!(
            column_ranges(&legend),
            vec![(0, 4), (4, 8), (8, 12), (12, 16), (16, 18)]
        );
        assert_eq!(legend.row(17).unwrap().label, "17+");
    }

    #[test]
    fn test_rows_reflect_visibility() {
        let mut visibility = SeriesVisibility::new();
        visibility.toggle(2);
        let legend = build_legend(4, &visibility);

        let hidden = legend.row(2).unwrap().appearance;
        assert_eq!(hidden.opacity, HIDDEN_OPACITY);
        assert!(hidden.strikethrough);

        let shown = legend.row(1).unwrap().appearance;
        assert_eq!(shown.opacity, 1.0);
        assert!(!shown.strikethrough);
    }

    #[test]
    fn test_patch_row_touches_only_that_row() {
        let mut legend = build_legend(10, &SeriesVisibility::new());
        let before = legend.clone();

        legend.patch_row(7, false);

        for (a, b) in legend.rows().zip(before.rows()) {
            if a.index == 7 {
                assert!(!a.appearance.shows_visible());
            } else {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_repaint_keeps_layout() {
        let mut legend = build_legend(12, &SeriesVisibility::new());
        let mut visibility = SeriesVisibility::new();
        visibility.set_all(12, false);

        legend.repaint(&visibility);

        assert_eq!(legend.columns.len(), build_legend(12, &visibility).columns.len());
        assert!(legend.rows().all(|r| r.appearance.strikethrough));
    }
}
