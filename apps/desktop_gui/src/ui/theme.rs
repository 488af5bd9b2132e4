//! Palette and color helpers for the card.

use eframe::egui;

/// Near-black stage backdrop.
pub const MIDNIGHT: egui::Color32 = egui::Color32::from_rgb(5, 3, 8);
/// Signature pink carried through every stage.
pub const LOVE: egui::Color32 = egui::Color32::from_rgb(255, 77, 109);
pub const STARLIGHT: egui::Color32 = egui::Color32::WHITE;
/// Soft pink for the closing note.
pub const BLUSH: egui::Color32 = egui::Color32::from_rgb(251, 207, 232);
/// Warm yellow for the decorative sparkles.
pub const GOLD: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
/// Muted gray for secondary copy and the decline control.
pub const MIST: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
pub const SLATE: egui::Color32 = egui::Color32::from_rgb(55, 65, 81);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn mix(a: egui::Color32, b: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |x: u8, y: u8| -> u8 {
        (x as f32 + (y as f32 - x as f32) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
        channel(a.a(), b.a()),
    )
}

pub fn with_opacity(c: egui::Color32, opacity: f32) -> egui::Color32 {
    let a = (c.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    egui::Color32::from_rgba_unmultiplied(c.r(), c.g(), c.b(), a)
}
