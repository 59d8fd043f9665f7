use super::style::{severity_color, ACCENT, MUTED};
use super::{Analysis, DashboardApp};
use crate::fault::catalog;
use crate::fault::report::REPORT_TIMESTAMP_FORMAT;
use eframe::egui;
use std::path::PathBuf;

const PREVIEW_SIZE: u32 = 512;

pub fn analyze_page(ui: &mut egui::Ui, app: &mut DashboardApp) {
    ui.heading("🔍 Thermal Image Analysis");
    ui.label("Analyze thermal images of solar panels for faults");
    ui.separator();

    let model_ready = app.gateway.is_available();
    if !model_ready {
        ui.colored_label(
            severity_color(crate::fault::Severity::Critical),
            format!(
                "Model unavailable ({}). Image analysis is disabled; fault records remain available.",
                app.config.model.onnx_model_path
            ),
        );
        ui.add_space(8.0);
    }

    let mut to_analyze: Option<PathBuf> = None;
    let dropped = ui.ctx().input(|i| i.raw.dropped_files.clone());

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("📤 Thermal Image").strong());
        columns[0].horizontal(|ui| {
            ui.label("Path:");
            ui.text_edit_singleline(&mut app.ui.image_path);
            let can_run = model_ready && !app.ui.image_path.trim().is_empty();
            if ui.add_enabled(can_run, egui::Button::new("Analyze")).clicked() {
                to_analyze = Some(PathBuf::from(app.ui.image_path.trim()));
            }
        });
        columns[0].label(egui::RichText::new("…or drop a JPG/PNG onto this window").color(MUTED));

        columns[1].label(egui::RichText::new("🖼️ Or Try Sample").strong());
        let samples = app.sample_images();
        if samples.is_empty() {
            columns[1].label(
                egui::RichText::new(format!(
                    "No samples in {}",
                    app.config.sample_images_dir.display()
                ))
                .color(MUTED),
            );
        } else {
            let selected_text = app
                .ui
                .selected_sample
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "-- Select Sample Image --".to_string());
            let before = app.ui.selected_sample.clone();
            egui::ComboBox::from_label("Sample Images")
                .selected_text(selected_text)
                .show_ui(&mut columns[1], |ui| {
                    for sample in &samples {
                        let name = sample
                            .file_name()
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default();
                        ui.selectable_value(&mut app.ui.selected_sample, Some(sample.clone()), name);
                    }
                });
            if model_ready && app.ui.selected_sample != before {
                to_analyze = app.ui.selected_sample.clone();
            }
        }
    });

    if let Some(path) = to_analyze {
        app.analyze(&path);
    } else if let Some(file) = dropped.into_iter().next().filter(|_| model_ready) {
        match (&file.path, &file.bytes) {
            (Some(path), _) => {
                app.ui.image_path = path.display().to_string();
                app.analyze(path);
            }
            (None, Some(bytes)) => app.analyze_bytes(&file.name, bytes),
            (None, None) => {}
        }
    }

    if let Some(error) = &app.ui.last_error {
        ui.colored_label(severity_color(crate::fault::Severity::Critical), error);
    }
    if let Some(notice) = &app.ui.notice {
        ui.colored_label(severity_color(crate::fault::Severity::Low), notice);
    }

    if app.analysis.is_some() {
        ui.separator();
        detection_report(ui, app);
    }
}

fn preview_texture(ctx: &egui::Context, analysis: &mut Analysis) -> egui::TextureHandle {
    if let Some(texture) = &analysis.texture {
        return texture.clone();
    }

    let rgba = analysis.image.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE).to_rgba8();
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [rgba.width() as usize, rgba.height() as usize],
        rgba.as_raw(),
    );
    let texture = ctx.load_texture("analyzed_image", color_image, egui::TextureOptions::default());
    analysis.texture = Some(texture.clone());
    texture
}

fn detection_report(ui: &mut egui::Ui, app: &mut DashboardApp) {
    let ctx = ui.ctx().clone();
    let Some(analysis) = app.analysis.as_mut() else {
        return;
    };
    let texture = preview_texture(&ctx, analysis);
    let classification = &analysis.classification;
    let entry = catalog::entry(classification.fault_type);

    ui.heading("📊 DETECTION REPORT");

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("📸 Analyzed Image").strong());
        columns[0].add(
            egui::Image::new(egui::load::SizedTexture::new(texture.id(), texture.size_vec2()))
                .max_width(360.0),
        );
        columns[0].label(egui::RichText::new(analysis.source.display().to_string()).color(MUTED));

        let ui = &mut columns[1];
        ui.label(egui::RichText::new("🎯 Detection Result").strong());
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(2.0, ACCENT))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{} {}", entry.icon, entry.fault_type))
                            .size(28.0)
                            .strong(),
                    );
                    ui.label(
                        egui::RichText::new(format!(
                            "Confidence: {:.1}%",
                            classification.confidence * 100.0
                        ))
                        .size(18.0)
                        .color(MUTED),
                    );
                });
            });
        ui.add_space(6.0);
        egui::Frame::group(ui.style())
            .fill(severity_color(entry.severity))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(format!("⚠️ {} Severity", entry.severity))
                            .size(20.0)
                            .color(egui::Color32::WHITE),
                    );
                });
            });
        ui.add_space(6.0);
        ui.label(format!("💰 Efficiency Loss: {}", entry.loss_range));
        ui.label(format!("🔧 Action Required: {}", entry.action));
    });

    ui.separator();
    ui.label(egui::RichText::new("📄 Detailed Analysis").strong());
    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("Detection Information:").strong());
        columns[0].label(format!("• Fault Type: {}", entry.fault_type));
        columns[0].label(format!("• Severity: {}", entry.severity));
        columns[0].label(format!(
            "• Confidence: {:.2}%",
            classification.confidence * 100.0
        ));
        columns[0].label(format!(
            "• Time: {}",
            analysis.analyzed_at.format(REPORT_TIMESTAMP_FORMAT)
        ));

        columns[1].label(egui::RichText::new("Impact Assessment:").strong());
        columns[1].label(format!("• Efficiency Loss: {}", entry.loss_range));
        columns[1].label(format!("• Recommended Action: {}", entry.action));
        columns[1].label(format!("• Icon: {}", entry.icon));
    });

    ui.collapsing("Top 5 predictions", |ui| {
        for fault_type in classification.top_k(5) {
            let probability = classification.probability(fault_type);
            ui.add(
                egui::ProgressBar::new(probability)
                    .text(format!("{} {:.2}%", fault_type, probability * 100.0)),
            );
        }
    });

    ui.separator();

    let already_added = analysis.added_record.is_some();
    let mut save_report = false;
    let mut add_record = false;
    let mut reset = false;
    ui.horizontal(|ui| {
        save_report = ui.button("📄 Save Report").clicked();
        add_record = ui
            .add_enabled(!already_added, egui::Button::new("➕ Add to Database"))
            .clicked();
        reset = ui.button("🔄 Analyze Another").clicked();
    });

    if save_report {
        match app.save_report() {
            Ok(Some(path)) => app.ui.notice = Some(format!("✅ Report saved to {}", path.display())),
            Ok(None) => {}
            Err(e) => app.ui.last_error = Some(format!("{:#}", e)),
        }
    }
    if add_record {
        match app.add_analysis_to_store() {
            Some(Ok(id)) => {
                let panel = app
                    .store
                    .get(id)
                    .map(|r| r.panel_id().to_string())
                    .unwrap_or_default();
                app.ui.notice = Some(format!("✅ Added to database as panel {}", panel));
            }
            Some(Err(e)) => app.ui.last_error = Some(e.to_string()),
            None => {}
        }
    }
    if reset {
        app.analysis = None;
        app.ui.selected_sample = None;
        app.ui.image_path.clear();
        app.ui.clear_messages();
    }
}
