use super::style::severity_color;
use super::DashboardApp;
use crate::fault::{catalog, Assignee, FaultRecord, FilterSummary, RecordId, Severity, Status};
use eframe::egui;

pub fn manage_page(ui: &mut egui::Ui, app: &mut DashboardApp) {
    ui.heading("📋 Fault Management System");
    ui.label("Track and manage detected faults across your solar farm");
    ui.separator();

    filters(ui, app);
    ui.separator();

    let records: Vec<FaultRecord> = app
        .store
        .filter(&app.ui.filter)
        .into_iter()
        .cloned()
        .collect();
    let summary = FilterSummary::of(&records.iter().collect::<Vec<_>>());

    ui.columns(4, |columns| {
        metric(&mut columns[0], "📊 Total Faults", summary.total);
        metric(&mut columns[1], "🔴 Critical", summary.critical);
        metric(&mut columns[2], "⚙️ In Progress", summary.in_progress);
        metric(&mut columns[3], "✅ Completed", summary.completed);
    });
    ui.separator();

    ui.label(egui::RichText::new("🗂️ Fault Records").strong());
    if let Some(error) = &app.ui.last_error {
        ui.colored_label(severity_color(Severity::Critical), error);
    }

    if records.is_empty() {
        ui.label("No faults match the selected filters");
        return;
    }

    let mut save: Option<RecordId> = None;
    for record in &records {
        if record_card(ui, app, record) {
            save = Some(record.id());
        }
    }

    if let Some(id) = save {
        app.ui.clear_messages();
        if let Err(e) = app.save_record(id) {
            app.ui.last_error = Some(e.to_string());
        }
    }
}

fn metric(ui: &mut egui::Ui, label: &str, value: usize) {
    ui.label(label);
    ui.label(egui::RichText::new(value.to_string()).size(24.0).strong());
}

fn filters(ui: &mut egui::Ui, app: &mut DashboardApp) {
    let filter = &mut app.ui.filter;
    ui.horizontal_wrapped(|ui| {
        egui::ComboBox::from_label("🔍 Status")
            .selected_text(filter.status.map_or("All", |s| s.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.status, None, "All");
                for status in Status::ALL {
                    ui.selectable_value(&mut filter.status, Some(status), status.label());
                }
            });

        egui::ComboBox::from_label("⚠️ Severity")
            .selected_text(filter.severity.map_or("All", |s| s.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.severity, None, "All");
                for severity in Severity::ALL {
                    ui.selectable_value(&mut filter.severity, Some(severity), severity.label());
                }
            });

        egui::ComboBox::from_label("👤 Technician")
            .selected_text(filter.assigned_to.map_or("All", |a| a.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.assigned_to, None, "All");
                for assignee in Assignee::ALL {
                    ui.selectable_value(&mut filter.assigned_to, Some(assignee), assignee.label());
                }
            });

        if ui.button("Reset filters").clicked() {
            *filter = Default::default();
        }
    });
}

/// Returns true when the card's Save button was pressed.
fn record_card(ui: &mut egui::Ui, app: &mut DashboardApp, record: &FaultRecord) -> bool {
    let entry = catalog::entry(record.fault_type());
    let title = format!(
        "📍 {} - {} {} ({})",
        record.panel_id(),
        entry.icon,
        record.fault_type(),
        record.severity()
    );

    let mut clicked = false;
    egui::CollapsingHeader::new(egui::RichText::new(title).color(severity_color(record.severity())))
        .id_source(("fault_record", record.id().0))
        .default_open(false)
        .show(ui, |ui| {
            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Fault Details:").strong());
                columns[0].label(format!("• Panel ID: {}", record.panel_id()));
                columns[0].label(format!("• Fault Type: {}", record.fault_type()));
                columns[0].label(format!("• Severity: {}", record.severity()));
                columns[0].label(format!("• Efficiency Loss: {}", record.efficiency_loss()));
                columns[0].label(format!("• Detected: {}", record.detected_label()));

                let ui = &mut columns[1];
                ui.label(egui::RichText::new("Assignment & Status:").strong());
                let Some(draft) = app.draft_for(record.id()) else {
                    return;
                };

                let mut assignee = draft.assigned_to.unwrap_or(record.assigned_to);
                egui::ComboBox::from_id_source(("assign", record.id().0))
                    .selected_text(assignee.label())
                    .show_ui(ui, |ui| {
                        for option in Assignee::ALL {
                            ui.selectable_value(&mut assignee, option, option.label());
                        }
                    });
                draft.assigned_to = Some(assignee);

                let mut status = draft.status.unwrap_or(record.status);
                egui::ComboBox::from_id_source(("status", record.id().0))
                    .selected_text(status.label())
                    .show_ui(ui, |ui| {
                        for option in Status::ALL {
                            ui.selectable_value(&mut status, option, option.label());
                        }
                    });
                draft.status = Some(status);

                clicked = ui.button("💾 Save Changes").clicked();
            });
        });
    clicked
}
