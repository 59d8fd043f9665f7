use crate::fault::Severity;
use eframe::egui::Color32;

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Critical => Color32::from_rgb(0xef, 0x44, 0x44),
        Severity::High => Color32::from_rgb(0xf5, 0x9e, 0x0b),
        Severity::Medium => Color32::from_rgb(0xea, 0xb3, 0x08),
        Severity::Low => Color32::from_rgb(0x10, 0xb9, 0x81),
    }
}

pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const MUTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
