use super::style::{severity_color, ACCENT, MUTED};
use super::DashboardApp;
use crate::fault::{GroupBy, Severity};
use eframe::egui;

/// 100% when nothing is open, one point lost per 12.47 open faults.
pub fn system_health(active_faults: usize) -> f64 {
    100.0 - (active_faults as f64 / 12.47)
}

pub fn overview_page(ui: &mut egui::Ui, app: &mut DashboardApp) {
    ui.heading("📊 System Overview & Analytics");
    ui.label("Monitor system-wide performance and metrics");
    ui.separator();

    let active = app.store.active_count();
    ui.columns(4, |columns| {
        tile(&mut columns[0], "Total Panels", &format_thousands(app.config.total_panels), ACCENT);
        tile(
            &mut columns[1],
            "Active Faults",
            &active.to_string(),
            severity_color(Severity::Critical),
        );
        tile(
            &mut columns[2],
            "Avg Response",
            "2.3 hrs",
            severity_color(Severity::Low),
        );
        tile(
            &mut columns[3],
            "System Health",
            &format!("{:.1}%", system_health(active)),
            egui::Color32::from_rgb(0x8b, 0x5c, 0xf6),
        );
    });
    ui.separator();

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("🔧 Fault Type Distribution").strong());
        bars(&mut columns[0], &app.store.aggregate(GroupBy::FaultType));

        columns[1].label(egui::RichText::new("⚠️ Severity Levels").strong());
        bars(&mut columns[1], &app.store.aggregate(GroupBy::Severity));
    });
    ui.separator();

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("👥 Technician Workload").strong());
        table(
            &mut columns[0],
            "workload",
            ("Technician", "Assigned Faults"),
            &app.store.aggregate(GroupBy::AssignedTo),
        );

        columns[1].label(egui::RichText::new("📈 Status Breakdown").strong());
        table(
            &mut columns[1],
            "status_breakdown",
            ("Status", "Count"),
            &app.store.aggregate(GroupBy::Status),
        );
    });
    ui.separator();

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("🤖 AI Model Information").strong());
        columns[0].label(format!("Model: {}", app.config.model.onnx_model_path));
        columns[0].label(format!(
            "Input: {}x{}",
            app.config.model.input_shape.1, app.config.model.input_shape.0
        ));
        columns[0].label("Classes: 12 fault types");

        columns[1].label(egui::RichText::new("💻 System Status").strong());
        let (status, color) = if app.gateway.is_available() {
            ("✅ Online", severity_color(Severity::Low))
        } else {
            ("⚠️ Model unavailable", severity_color(Severity::Critical))
        };
        columns[1].colored_label(color, format!("Status: {}", status));
        columns[1].label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
    });
}

fn tile(ui: &mut egui::Ui, title: &str, value: &str, accent: egui::Color32) {
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(2.0, accent))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(title).color(MUTED));
                ui.label(egui::RichText::new(value).size(26.0).strong());
            });
        });
}

fn bars(ui: &mut egui::Ui, counts: &[(String, usize)]) {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    for (label, count) in counts {
        ui.add(
            egui::ProgressBar::new(*count as f32 / max as f32)
                .text(format!("{} ({})", label, count)),
        );
    }
}

fn table(ui: &mut egui::Ui, id: &str, headers: (&str, &str), rows: &[(String, usize)]) {
    egui::Grid::new(id).striped(true).num_columns(2).show(ui, |ui| {
        ui.label(egui::RichText::new(headers.0).strong());
        ui.label(egui::RichText::new(headers.1).strong());
        ui.end_row();
        for (label, count) in rows {
            ui.label(label);
            ui.label(count.to_string());
            ui.end_row();
        }
    });
}

pub fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
