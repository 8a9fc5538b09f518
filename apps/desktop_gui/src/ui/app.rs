use std::time::Duration;

use client_core::{Presenter, QueryController, RenderPlan};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{DEFAULT_RESULT_COUNT, MAX_RESULT_COUNT, MIN_RESULT_COUNT};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration};
use crate::ui::widgets;

pub const WINDOW_TITLE: &str = "AI for Sustainable Community";
const TAGLINE: &str =
    "Analyze urban scenes using AI to support Sustainable Development Goals (SDGs).";
const QUESTION_LABEL: &str = "What would you like to ask?";
const QUESTION_HINT: &str = "e.g., What areas show signs of poor infrastructure?";
const CONTENT_WIDTH: f32 = 860.0;

pub struct AskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: QueryController,
    presenter: Presenter,
    status: Option<String>,
}

impl AskApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        presenter: Presenter,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: QueryController::new(),
            presenter,
            status: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            if let Some(status) = orchestration::apply_ui_event(&mut self.controller, event) {
                self.status = Some(status);
            }
        }
    }

    fn show_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(WINDOW_TITLE).size(32.0).strong());
            ui.label(egui::RichText::new(TAGLINE).size(16.0).weak());
        });
    }

    fn show_query_card(&mut self, ui: &mut egui::Ui, plan: &RenderPlan) {
        widgets::card(ui, |ui| {
            ui.label(egui::RichText::new(QUESTION_LABEL).strong());

            let mut question = self.controller.state().question.clone();
            let response = ui.add(
                egui::TextEdit::singleline(&mut question)
                    .hint_text(QUESTION_HINT)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                self.controller.set_question(question);
            }
            let enter_pressed =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));

            ui.horizontal(|ui| {
                ui.label("Top-K Results:");
                let mut k = self
                    .controller
                    .state()
                    .result_count
                    .value()
                    .unwrap_or(DEFAULT_RESULT_COUNT);
                if ui
                    .add(egui::DragValue::new(&mut k).range(MIN_RESULT_COUNT..=MAX_RESULT_COUNT))
                    .changed()
                {
                    self.controller.set_result_count_value(k);
                }
            });

            let clicked = ui
                .add_enabled_ui(plan.submit.enabled, |ui| {
                    ui.horizontal(|ui| {
                        if plan.submit.busy {
                            ui.spinner();
                        }
                        ui.button(plan.submit.label).clicked()
                    })
                    .inner
                })
                .inner;

            if plan.submit.enabled && (clicked || enter_pressed) {
                orchestration::submit_ask(&mut self.controller, &self.cmd_tx);
            }
        });
    }
}

impl eframe::App for AskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let plan = self.presenter.present(self.controller.state());

        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status_strip").show(ctx, |ui| {
                ui.small(egui::RichText::new(status).color(ui.visuals().warn_fg_color));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.set_max_width(CONTENT_WIDTH);
                        ui.add_space(24.0);
                        self.show_header(ui);
                        ui.add_space(16.0);
                        self.show_query_card(ui, &plan);

                        if let Some(message) = &plan.error {
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new(message).color(ui.visuals().error_fg_color),
                            );
                        }
                        if let Some(answer) = &plan.answer {
                            ui.add_space(8.0);
                            widgets::answer_card(ui, answer);
                        }
                    });
                });
        });

        if plan.submit.busy {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
