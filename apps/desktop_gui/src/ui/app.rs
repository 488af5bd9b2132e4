//! Card shell: one full-viewport panel, a twinkling backdrop, and exactly
//! one stage view per frame.

use std::time::Duration;

use eframe::egui;
use image::GenericImageView;
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{
    choreography::{
        self, evade_offset, memory_pose, proposal_pose, success_pose, OffsetTween,
    },
    confetti::{edge_bursts, spawn_burst, ConfettiHue, Particle},
    domain::Stage,
    script::CardScript,
};

use crate::controller::reducer::NarrativeController;
use crate::ui::theme;

const REPAINT_ACTIVE: Duration = Duration::from_millis(16);
const REPAINT_SETTLED: Duration = Duration::from_millis(100);

const STAR_COUNT: usize = 20;

struct Star {
    /// Position as viewport fractions so stars survive window resizes.
    x: f32,
    y: f32,
    radius: f32,
    phase: f32,
    speed: f32,
}

enum MemoryImage {
    Unloaded,
    Ready {
        texture: egui::TextureHandle,
        size: egui::Vec2,
    },
    Failed,
}

pub struct CardApp {
    script: CardScript,
    controller: NarrativeController,
    stars: Vec<Star>,
    memory_image: MemoryImage,
    decline_offset: OffsetTween,
    decline_hovered: bool,
    particles: Vec<Particle>,
    rng: StdRng,
    last_frame_at: f64,
}

impl CardApp {
    pub fn new(script: CardScript) -> Self {
        let mut rng = StdRng::from_os_rng();
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                radius: rng.random_range(0.6..1.8),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                speed: rng.random_range(0.6..1.6),
            })
            .collect();
        let controller = NarrativeController::new(script.intro_chars().len());
        Self {
            script,
            controller,
            stars,
            memory_image: MemoryImage::Unloaded,
            decline_offset: OffsetTween::rest(),
            decline_hovered: false,
            particles: Vec::new(),
            rng,
            last_frame_at: 0.0,
        }
    }

    fn paint_starfield(&self, ui: &egui::Ui, viewport: egui::Rect, now: f64) {
        let painter = ui.painter();
        for star in &self.stars {
            let twinkle = 0.5 + 0.5 * ((now as f32) * star.speed + star.phase).sin();
            let alpha = 0.08 + 0.22 * twinkle;
            let pos = egui::pos2(
                viewport.left() + star.x * viewport.width(),
                viewport.top() + star.y * viewport.height(),
            );
            painter.circle_filled(pos, star.radius, theme::with_opacity(theme::STARLIGHT, alpha));
        }
    }

    fn show_intro(&self, ui: &egui::Ui, viewport: egui::Rect, now: f64) {
        let elapsed = self.controller.stage_elapsed(now);
        let timeline = self.controller.intro();
        let chars = self.script.intro_chars();
        let painter = ui.painter();

        let base_size = (viewport.width() * 0.11).clamp(48.0, 128.0);
        let spacing = base_size * 0.12;

        // measure the settled line once so it stays centered while
        // individual glyphs move
        let mut widths = Vec::with_capacity(chars.len());
        let mut line_width = 0.0;
        for &ch in &chars {
            let galley = painter.layout_no_wrap(
                ch.to_string(),
                egui::FontId::proportional(base_size),
                theme::STARLIGHT,
            );
            widths.push(galley.size().x);
            line_width += galley.size().x + spacing;
        }
        line_width -= spacing;

        let mut cursor_x = viewport.center().x - line_width / 2.0;
        let baseline_y = viewport.center().y;

        for (index, &ch) in chars.iter().enumerate() {
            let pose = timeline.char_pose(elapsed, index);
            let width = widths[index];
            if pose.opacity > 0.003 {
                // the fold toward the viewer reads as vertical compression
                let flatness = pose.fold_degrees.to_radians().cos().clamp(0.0, 1.0);
                let font = egui::FontId::proportional((base_size * flatness).max(1.0));
                let color = theme::mix(theme::STARLIGHT, theme::LOVE, pose.glow);
                let pos = egui::pos2(cursor_x + width / 2.0, baseline_y + pose.y_offset);

                if pose.glow > 0.0 {
                    let halo =
                        theme::with_opacity(theme::LOVE, 0.35 * pose.glow * pose.opacity);
                    for offset in [
                        egui::vec2(-2.0, 0.0),
                        egui::vec2(2.0, 0.0),
                        egui::vec2(0.0, -2.0),
                        egui::vec2(0.0, 2.0),
                    ] {
                        painter.text(
                            pos + offset,
                            egui::Align2::CENTER_CENTER,
                            ch,
                            font.clone(),
                            halo,
                        );
                    }
                }
                painter.text(
                    pos,
                    egui::Align2::CENTER_CENTER,
                    ch,
                    font,
                    theme::with_opacity(color, pose.opacity),
                );
            }
            cursor_x += width + spacing;
        }
    }

    fn show_memory(&mut self, ui: &egui::Ui, viewport: egui::Rect, now: f64) {
        let elapsed = self.controller.stage_elapsed(now);
        let pose = memory_pose(elapsed);
        self.ensure_memory_image(ui.ctx());

        // portrait framing, bounded by the viewport
        let frame_height = viewport.height() * 0.72;
        let frame_size = egui::vec2(frame_height * 0.8, frame_height) * pose.scale;
        let rect = egui::Rect::from_center_size(viewport.center(), frame_size);
        let painter = ui.painter();

        match &self.memory_image {
            MemoryImage::Ready { texture, size } => {
                let uv = cover_uv(*size, frame_size);
                let blur_frac = pose.blur / choreography::MEMORY_EXIT_BLUR;
                let tint = theme::with_opacity(
                    egui::Color32::WHITE,
                    pose.opacity * (1.0 - 0.55 * blur_frac),
                );
                painter.image(texture.id(), rect, uv, tint);
                if blur_frac > 0.0 {
                    // cheap blur: translucent offset passes on the way out
                    let ghost = theme::with_opacity(
                        egui::Color32::WHITE,
                        pose.opacity * 0.18 * blur_frac,
                    );
                    let spread = pose.blur * 0.9;
                    for offset in [
                        egui::vec2(-spread, 0.0),
                        egui::vec2(spread, 0.0),
                        egui::vec2(0.0, -spread),
                        egui::vec2(0.0, spread),
                    ] {
                        painter.image(texture.id(), rect.translate(offset), uv, ghost);
                    }
                }
            }
            MemoryImage::Unloaded | MemoryImage::Failed => {
                painter.rect_filled(
                    rect,
                    16.0,
                    theme::with_opacity(egui::Color32::from_rgb(26, 16, 22), pose.opacity),
                );
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "\u{2764}",
                    egui::FontId::proportional(72.0),
                    theme::with_opacity(theme::LOVE, 0.6 * pose.opacity),
                );
            }
        }

        painter.rect_stroke(
            rect,
            16.0,
            egui::Stroke::new(3.0, theme::with_opacity(theme::LOVE, 0.3 * pose.opacity)),
            egui::StrokeKind::Outside,
        );

        if pose.opacity > 0.01 {
            let scrim = egui::Rect::from_min_max(
                egui::pos2(rect.left(), rect.bottom() - 64.0),
                rect.max,
            );
            painter.rect_filled(
                scrim,
                16.0,
                theme::with_opacity(egui::Color32::BLACK, 0.45 * pose.opacity),
            );
            painter.text(
                egui::pos2(rect.center().x, rect.bottom() - 30.0),
                egui::Align2::CENTER_CENTER,
                &self.script.memory_caption,
                egui::FontId::proportional(22.0),
                theme::with_opacity(theme::STARLIGHT, 0.9 * pose.opacity),
            );
        }
    }

    fn ensure_memory_image(&mut self, ctx: &egui::Context) {
        if !matches!(self.memory_image, MemoryImage::Unloaded) {
            return;
        }
        self.memory_image = match load_memory_texture(ctx, &self.script.image_path) {
            Ok((texture, size)) => MemoryImage::Ready { texture, size },
            Err(err) => {
                tracing::warn!(
                    image = %self.script.image_path.display(),
                    "memory photo unavailable, showing placeholder: {err}"
                );
                MemoryImage::Failed
            }
        };
    }

    fn show_proposal(&mut self, ui: &mut egui::Ui, viewport: egui::Rect, now: f64) {
        let elapsed = self.controller.stage_elapsed(now);
        let pose = proposal_pose(elapsed);

        let card_width = (viewport.width() * 0.9).min(560.0);
        let card_size = egui::vec2(card_width, 380.0);
        let rect = egui::Rect::from_center_size(
            viewport.center() + egui::vec2(0.0, pose.y_offset),
            card_size,
        );

        let mut child = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::top_down(egui::Align::Center)),
        );
        child.set_clip_rect(viewport);
        child.set_opacity(pose.opacity);

        egui::Frame::NONE
            .fill(theme::with_opacity(egui::Color32::WHITE, 0.06))
            .stroke(egui::Stroke::new(
                1.0,
                theme::with_opacity(egui::Color32::WHITE, 0.14),
            ))
            .corner_radius(24.0)
            .inner_margin(egui::Margin::symmetric(28, 24))
            .show(&mut child, |ui| {
                ui.vertical_centered(|ui| {
                    let (heart_rect, _) =
                        ui.allocate_exact_size(egui::vec2(48.0, 56.0), egui::Sense::hover());
                    let bounce = (((now * 3.0).sin() * 0.5 + 0.5) * 10.0) as f32;
                    ui.painter().text(
                        heart_rect.center_bottom() - egui::vec2(0.0, bounce),
                        egui::Align2::CENTER_BOTTOM,
                        "\u{2764}",
                        egui::FontId::proportional(44.0),
                        theme::LOVE,
                    );

                    ui.add_space(6.0);
                    let (lead, highlight) = split_question(&self.script.question);
                    if !lead.is_empty() {
                        ui.label(
                            egui::RichText::new(lead)
                                .size(34.0)
                                .strong()
                                .color(theme::STARLIGHT),
                        );
                    }
                    if !highlight.is_empty() {
                        ui.label(
                            egui::RichText::new(highlight)
                                .size(34.0)
                                .strong()
                                .color(theme::LOVE),
                        );
                    }

                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(&self.script.proposal_note)
                            .size(17.0)
                            .color(theme::MIST),
                    );
                    ui.add_space(14.0);

                    self.show_proposal_controls(ui, now);
                });
            });
    }

    fn show_proposal_controls(&mut self, ui: &mut egui::Ui, now: f64) {
        let (row_rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 80.0),
            egui::Sense::hover(),
        );

        let yes_rect = egui::Rect::from_center_size(
            row_rect.center() - egui::vec2(90.0, 0.0),
            egui::vec2(140.0, 48.0),
        );
        let yes = ui.put(
            yes_rect,
            egui::Button::new(
                egui::RichText::new(&self.script.affirm_label)
                    .size(20.0)
                    .strong()
                    .color(theme::STARLIGHT),
            )
            .fill(theme::LOVE)
            .corner_radius(24.0),
        );
        if yes.hovered() {
            ui.painter().rect_stroke(
                yes.rect,
                24.0,
                egui::Stroke::new(2.0, theme::lighten_color(theme::LOVE, 0.3)),
                egui::StrokeKind::Outside,
            );
        }
        if yes.clicked() {
            self.controller.affirm(now);
        }

        // the decline control runs from the pointer; its home sits right of
        // center and the evasive offset is applied on top
        let offset = self.decline_offset.at(now);
        let no_rect = egui::Rect::from_center_size(
            row_rect.center() + egui::vec2(110.0 + offset.0, offset.1),
            egui::vec2(110.0, 48.0),
        );
        let no = ui.put(
            no_rect,
            egui::Button::new(
                egui::RichText::new(&self.script.decline_label)
                    .size(20.0)
                    .color(theme::MIST),
            )
            .fill(theme::SLATE)
            .corner_radius(24.0),
        );
        let hovered = no.hovered();
        if no.clicked() || (hovered && !self.decline_hovered) {
            self.evade(now);
        }
        self.decline_hovered = hovered;
    }

    fn evade(&mut self, now: f64) {
        self.controller.decline(now);
        let from = self.decline_offset.at(now);
        let to = evade_offset(&mut self.rng);
        self.decline_offset = OffsetTween::start(now, from, to);
        tracing::debug!(x = to.0, y = to.1, "decline control evading pointer");
    }

    fn show_success(&self, ui: &egui::Ui, viewport: egui::Rect, now: f64) {
        let elapsed = self.controller.stage_elapsed(now);
        let pose = success_pose(elapsed);
        let painter = ui.painter();
        let center = viewport.center() + egui::vec2(0.0, pose.y_offset);

        let title_size = (viewport.width() * 0.055).clamp(36.0, 72.0);
        painter.text(
            center - egui::vec2(0.0, 70.0),
            egui::Align2::CENTER_CENTER,
            &self.script.success_title,
            egui::FontId::proportional(title_size),
            theme::with_opacity(theme::STARLIGHT, pose.opacity),
        );
        painter.text(
            center + egui::vec2(0.0, 4.0),
            egui::Align2::CENTER_CENTER,
            &self.script.success_note,
            egui::FontId::proportional(26.0),
            theme::with_opacity(theme::BLUSH, pose.opacity),
        );

        // decorative row: slow-spinning sparkles flanking a pulsing heart
        let icon_y = center.y + 90.0;
        let spin = (now * 0.9) as f32;
        for dx in [-72.0, 72.0] {
            rotated_glyph(
                painter,
                egui::pos2(center.x + dx, icon_y),
                "\u{2728}",
                36.0,
                theme::with_opacity(theme::GOLD, pose.opacity),
                spin * dx.signum(),
            );
        }
        let pulse = ((now * 3.0).sin() * 0.5 + 0.5) as f32;
        painter.text(
            egui::pos2(center.x, icon_y),
            egui::Align2::CENTER_CENTER,
            "\u{2764}",
            egui::FontId::proportional(34.0 + 6.0 * pulse),
            theme::with_opacity(theme::LOVE, pose.opacity * (0.5 + 0.5 * pulse)),
        );
    }

    fn drive_confetti(&mut self, ui: &egui::Ui, viewport: egui::Rect, now: f64, dt: f32) {
        if self.controller.confetti_live(now) {
            for spec in edge_bursts() {
                let burst = spawn_burst(spec, viewport.width(), viewport.height(), &mut self.rng);
                self.particles.extend(burst);
            }
        }
        if self.particles.is_empty() {
            return;
        }

        let cull_below = viewport.height() + 60.0;
        for particle in &mut self.particles {
            particle.step(dt);
        }
        self.particles
            .retain(|p| !p.expired() && p.y < cull_below);

        let painter = ui.painter();
        for particle in &self.particles {
            let base = match particle.hue {
                ConfettiHue::Love => theme::LOVE,
                ConfettiHue::White => theme::STARLIGHT,
            };
            let color = theme::with_opacity(base, particle.opacity());
            let center = egui::pos2(
                viewport.left() + particle.x,
                viewport.top() + particle.y,
            );
            let rot = egui::emath::Rot2::from_angle(particle.rotation);
            let corners = [
                egui::vec2(-5.0, -3.5),
                egui::vec2(5.0, -3.5),
                egui::vec2(5.0, 3.5),
                egui::vec2(-5.0, 3.5),
            ]
            .map(|corner| center + rot * corner);
            painter.add(egui::Shape::convex_polygon(
                corners.to_vec(),
                color,
                egui::Stroke::NONE,
            ));
        }
    }
}

impl eframe::App for CardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        let dt = ((now - self.last_frame_at).clamp(0.0, 0.1)) as f32;
        self.last_frame_at = now;

        self.controller.tick(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::MIDNIGHT))
            .show(ctx, |ui| {
                let viewport = ui.max_rect();
                self.paint_starfield(ui, viewport, now);
                match self.controller.stage() {
                    Stage::Intro => self.show_intro(ui, viewport, now),
                    Stage::Memory => self.show_memory(ui, viewport, now),
                    Stage::Proposal => self.show_proposal(ui, viewport, now),
                    Stage::Success => self.show_success(ui, viewport, now),
                }
                self.drive_confetti(ui, viewport, now, dt);
            });

        let settled = self.controller.stage() == Stage::Success
            && !self.controller.confetti_live(now)
            && self.particles.is_empty();
        if settled {
            // only the starfield and glyph pulses are moving now
            ctx.request_repaint_after(REPAINT_SETTLED);
        } else {
            ctx.request_repaint_after(REPAINT_ACTIVE);
        }
    }
}

fn rotated_glyph(
    painter: &egui::Painter,
    center: egui::Pos2,
    glyph: &str,
    size: f32,
    color: egui::Color32,
    angle: f32,
) {
    let galley = painter.layout_no_wrap(
        glyph.to_string(),
        egui::FontId::proportional(size),
        color,
    );
    let rot = egui::emath::Rot2::from_angle(angle);
    let half = galley.size() / 2.0;
    let mut shape = egui::epaint::TextShape::new(center - rot * half, galley, color);
    shape.angle = angle;
    painter.add(shape);
}

/// Crops the unit uv square so `image` covers `frame` without stretching.
fn cover_uv(image: egui::Vec2, frame: egui::Vec2) -> egui::Rect {
    if image.x <= 0.0 || image.y <= 0.0 || frame.x <= 0.0 || frame.y <= 0.0 {
        return egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    }
    let image_aspect = image.x / image.y;
    let frame_aspect = frame.x / frame.y;
    if image_aspect > frame_aspect {
        let used = frame_aspect / image_aspect;
        egui::Rect::from_min_max(
            egui::pos2((1.0 - used) / 2.0, 0.0),
            egui::pos2((1.0 + used) / 2.0, 1.0),
        )
    } else {
        let used = image_aspect / frame_aspect;
        egui::Rect::from_min_max(
            egui::pos2(0.0, (1.0 - used) / 2.0),
            egui::pos2(1.0, (1.0 + used) / 2.0),
        )
    }
}

fn load_memory_texture(
    ctx: &egui::Context,
    path: &std::path::Path,
) -> anyhow::Result<(egui::TextureHandle, egui::Vec2)> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    let (orig_w, orig_h) = decoded.dimensions();
    let max_dimension = 1600.0_f32;
    let scale = (max_dimension / (orig_w.max(orig_h) as f32)).min(1.0);
    let resized = if scale < 1.0 {
        decoded.resize(
            (orig_w as f32 * scale).max(1.0) as u32,
            (orig_h as f32 * scale).max(1.0) as u32,
            image::imageops::FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = resized.to_rgba8();
    let [w, h] = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], rgba.as_raw());
    let texture = ctx.load_texture("memory-photo", color_image, egui::TextureOptions::LINEAR);
    Ok((texture, egui::vec2(w as f32, h as f32)))
}

/// Splits the question so the renderer can pick out the last word; a
/// one-word question is highlighted whole.
pub(crate) fn split_question(question: &str) -> (&str, &str) {
    match question.trim_end().rsplit_once(' ') {
        Some((lead, highlight)) => (lead, highlight),
        None => ("", question.trim_end()),
    }
}
