// ui.rs - eframe front end for LifeApp
// Reads the engine through grid().iter_coords() and only ever mutates it via step() or reload().

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::Instant;

use crate::LifeApp;
use conway::patterns;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval() {
            self.advance();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Simulate" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.cycle_detected = false;
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⟳ Reload").clicked() {
                    self.reload();
                }

                ui.separator();

                // Seed selector: empty pattern text means noise seeding
                ui.label("Seed:");
                let selected = patterns::PATTERNS
                    .iter()
                    .find(|p| p.apgcode == self.pattern_text.trim())
                    .map_or(
                        if self.pattern_text.trim().is_empty() { "Noise" } else { "Custom" },
                        |p| p.name,
                    );
                egui::ComboBox::from_id_source("seed_selector")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(selected == "Noise", "Noise").clicked() {
                            self.pattern_text.clear();
                        }
                        for pattern in patterns::PATTERNS {
                            if ui.selectable_label(selected == pattern.name, pattern.name).clicked() {
                                self.pattern_text = pattern.apgcode.to_string();
                            }
                        }
                    });

                ui.label("apgcode:");
                ui.text_edit_singleline(&mut self.pattern_text);

                ui.separator();

                ui.label(format!("Generation: {}", self.engine().generation()));
            });

            ui.separator();

            // Speed and appearance
            ui.horizontal(|ui| {
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.display.fps, 0.5..=90.0).suffix(" gen/sec"));

                ui.label("Tile:");
                ui.add(egui::Slider::new(&mut self.display.tile_size, 2.0..=32.0).suffix(" px"));

                ui.checkbox(&mut self.display.show_grid, "Grid");

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            if let Some(error) = &self.error {
                ui.colored_label(Color32::RED, format!("⚠ {error}"));
            }
            if self.cycle_detected {
                ui.label("Cycle detected: simulation paused.");
            }

            ui.separator();

            let grid = self.engine().grid();
            let (width, height) = (grid.width(), grid.height());
            let box_size = self.display.tile_size;

            egui::ScrollArea::both().show(ui, |ui| {
                let total_size = Vec2::new(width as f32 * box_size, height as f32 * box_size);
                let (response, painter) = ui.allocate_painter(total_size, egui::Sense::hover());
                let start_pos = response.rect.min;

                painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, self.dead_color);

                for (pos, state) in self.engine().grid().iter_coords() {
                    if state.is_alive() {
                        let rect = Rect::from_min_size(
                            start_pos + Vec2::new(pos.x as f32, pos.y as f32) * box_size,
                            Vec2::splat(box_size),
                        );
                        painter.rect_filled(rect, 0.0, self.live_color);
                    }
                }

                if self.display.show_grid {
                    let stroke = Stroke::new(1.0, Color32::from_gray(0xbb));
                    for col in 0..=width {
                        let x = start_pos.x + col as f32 * box_size;
                        painter.line_segment(
                            [egui::pos2(x, start_pos.y), egui::pos2(x, start_pos.y + total_size.y)],
                            stroke,
                        );
                    }
                    for row in 0..=height {
                        let y = start_pos.y + row as f32 * box_size;
                        painter.line_segment(
                            [egui::pos2(start_pos.x, y), egui::pos2(start_pos.x + total_size.x, y)],
                            stroke,
                        );
                    }
                }
            });

            ui.separator();

            // Statistics
            let total = self.engine().grid().len();
            let live_cells = self.engine().population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        // Request repaint if running to keep animation smooth
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
