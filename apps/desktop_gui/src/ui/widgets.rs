//! Answer rendering: narrative blocks, source cards and tag chips.

use client_core::{AnswerView, MarkdownBlock, SourceCard};
use eframe::egui;

const IMAGE_SIZE: f32 = 300.0;

pub fn card<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(egui::Layout::top_down(egui::Align::Min), add_contents)
                .inner
        })
        .inner
}

pub fn answer_card(ui: &mut egui::Ui, answer: &AnswerView) {
    card(ui, |ui| {
        ui.label(egui::RichText::new("Response:").size(20.0).strong());
        ui.add_space(4.0);
        for block in &answer.narrative.blocks {
            markdown_block(ui, block);
        }

        ui.add_space(12.0);
        ui.label(
            egui::RichText::new(&answer.sources_heading)
                .size(20.0)
                .strong(),
        );
        for source in &answer.sources {
            source_card(ui, source);
            ui.add_space(8.0);
        }
    });
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 26.0,
        2 => 22.0,
        3 => 19.0,
        _ => 16.0,
    }
}

fn markdown_block(ui: &mut egui::Ui, block: &MarkdownBlock) {
    match block {
        MarkdownBlock::Heading { level, text } => {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(text).size(heading_size(*level)).strong());
        }
        MarkdownBlock::Paragraph(text) => {
            ui.label(text);
            ui.add_space(4.0);
        }
        MarkdownBlock::ListItem {
            depth,
            ordinal,
            text,
        } => {
            ui.horizontal_wrapped(|ui| {
                ui.add_space(16.0 * (*depth as f32 + 1.0));
                let marker = match ordinal {
                    Some(n) => format!("{n}."),
                    None => "•".to_string(),
                };
                ui.label(marker);
                ui.label(text);
            });
        }
        MarkdownBlock::CodeBlock(code) => {
            egui::Frame::new()
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(code).monospace());
                });
        }
        MarkdownBlock::Quote(text) => {
            ui.horizontal_wrapped(|ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(text).italics().weak());
            });
        }
        MarkdownBlock::Rule => {
            ui.separator();
        }
    }
}

fn source_card(ui: &mut egui::Ui, source: &SourceCard) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                if let Some(url) = &source.image_url {
                    ui.add(
                        egui::Image::from_uri(url.clone())
                            .fit_to_exact_size(egui::vec2(IMAGE_SIZE, IMAGE_SIZE))
                            .maintain_aspect_ratio(true),
                    );
                }
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&source.caption).small());
                    ui.horizontal_wrapped(|ui| {
                        for tag in &source.tags {
                            tag_chip(ui, tag);
                        }
                    });
                    if !source.location.is_empty() {
                        ui.label(egui::RichText::new(&source.location).small().weak());
                    }
                });
            });
        });
}

fn tag_chip(ui: &mut egui::Ui, tag: &str) {
    egui::Frame::new()
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(capitalize(tag)).small());
        });
}

/// Upper-cases the first letter of every word, like a badge label.
pub fn capitalize(tag: &str) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut word_start = true;
    for ch in tag.chars() {
        if word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        word_start = ch.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_every_word() {
        assert_eq!(capitalize("pothole"), "Pothole");
        assert_eq!(capitalize("open drain"), "Open Drain");
        assert_eq!(capitalize("street  light\tpole"), "Street  Light\tPole");
        assert_eq!(capitalize("eNGLISH ivy"), "ENGLISH Ivy");
        assert_eq!(capitalize("émission"), "Émission");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn deeper_headings_are_not_larger() {
        for level in 1..6 {
            assert!(heading_size(level) >= heading_size(level + 1));
        }
    }
}
