//! Main application state and eframe integration.

use std::path::PathBuf;

use egui::{CentralPanel, Context, Key, RichText, TopBottomPanel, Vec2};
use glass_core::ocr::{extract_from_image, ExtractedRow, SUPPORTED_EXTENSIONS};
use glass_core::{
    export_bill, format_sqft, render_preview, Bill, BillConfig, BillError, BillSummary,
    PositionalParser, Row, RowField, TesseractEngine,
};

use crate::theme;

/// Message shown in a blocking dialog.
struct Notice {
    title: String,
    message: String,
}

impl Notice {
    fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Rows read from an uploaded photo, waiting for the clerk to decide.
struct ExtractionPreview {
    source: PathBuf,
    rows: Vec<ExtractedRow>,
    rejected: usize,
}

impl ExtractionPreview {
    fn to_bill(&self, current: &Bill) -> Bill {
        Bill::from_rows(
            current.glass_name(),
            current.price_text(),
            self.rows.iter().cloned().map(Row::from),
        )
    }
}

/// What the clerk chose in the extraction preview.
enum PreviewAction {
    UseRows,
    GeneratePdf,
    GoBack,
}

/// A change requested by the row grid, applied after drawing.
enum RowEdit {
    Field(usize, RowField, String),
    Remove(usize),
}

/// Main application state.
pub struct FormApp {
    /// The bill being edited
    bill: Bill,
    /// Output and formatting settings
    config: BillConfig,
    /// Text recognition for uploaded photos
    engine: TesseractEngine,

    /// Last summary that priced successfully, shown while the price is being retyped
    last_summary: Option<BillSummary>,

    /// Status message
    status_message: String,

    /// Error dialog to display
    error: Option<Notice>,
    /// Information dialog to display
    info: Option<Notice>,

    /// Rows extracted from an uploaded photo
    extraction: Option<ExtractionPreview>,

    /// Show about dialog
    show_about_dialog: bool,
}

impl FormApp {
    /// Create a new form application.
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_image: Option<PathBuf>) -> Self {
        let mut app = Self {
            bill: Bill::new(),
            config: BillConfig::default(),
            engine: TesseractEngine::default(),
            last_summary: None,
            status_message: "Enter measurements in inches. Ctrl+U uploads a photo.".to_string(),
            error: None,
            info: None,
            extraction: None,
            show_about_dialog: false,
        };

        if let Some(path) = initial_image {
            app.read_image(path);
        }

        app
    }

    /// Recompute the bill for display.
    ///
    /// While the price does not parse, the previous figures stay on screen.
    fn refresh_summary(&mut self) -> bool {
        match self.bill.summary() {
            Ok(summary) => {
                self.last_summary = Some(summary);
                true
            }
            Err(_) => false,
        }
    }

    /// "Calculate" button: price the bill or complain about the input.
    fn calculate(&mut self) {
        match self.bill.summary() {
            Ok(summary) => {
                self.status_message = format!(
                    "{} row(s) priced | Total Price: {}",
                    summary.complete_rows(),
                    self.config.format_price(summary.total_price)
                );
                self.last_summary = Some(summary);
            }
            Err(e) => self.show_input_error(&e),
        }
    }

    fn show_input_error(&mut self, e: &BillError) {
        tracing::warn!("{}", e);
        self.error = Some(Notice::new(
            "Invalid Input",
            format!("Please enter valid numeric values!\n\n{}", e),
        ));
    }

    /// Validate and export a bill, reporting the outcome in a dialog.
    fn export(&mut self, bill: &Bill) {
        match export_bill(bill, &self.config) {
            Ok((validation, Some(path))) => {
                self.status_message = if validation.warnings.is_empty() {
                    format!("Saved {}", path.display())
                } else {
                    format!(
                        "Saved {} ({} warning(s): {})",
                        path.display(),
                        validation.warnings.len(),
                        validation.warnings.join("; ")
                    )
                };
                self.info = Some(Notice::new(
                    "PDF Generated",
                    format!(
                        "PDF has been generated successfully!\nSaved at: {}",
                        path.display()
                    ),
                ));
            }
            Ok((validation, None)) => {
                self.error = Some(Notice::new(
                    "Cannot Generate PDF",
                    validation.errors.join("\n"),
                ));
            }
            Err(e) if e.is_user_input() => self.show_input_error(&e),
            Err(e) => {
                tracing::error!("PDF export failed: {}", e);
                self.error = Some(Notice::new("Export Failed", e.to_string()));
            }
        }
    }

    /// "Generate PDF" button.
    fn generate_pdf(&mut self) {
        let bill = self.bill.clone();
        self.export(&bill);
    }

    /// Open file dialog and read the selected photo.
    fn upload_image_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image Files", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            self.read_image(path);
        }
    }

    /// Run text recognition on a photo and open the extraction preview.
    fn read_image(&mut self, path: PathBuf) {
        match extract_from_image(&self.engine, &PositionalParser, &path) {
            Ok(extraction) if extraction.is_empty() => {
                self.info = Some(Notice::new(
                    "No Data Found",
                    "No valid data was extracted from the image.",
                ));
                self.status_message = format!("No measurements found in {}", path.display());
            }
            Ok(extraction) => {
                tracing::info!(
                    "Extracted {} row(s) from {}",
                    extraction.rows.len(),
                    path.display()
                );
                self.extraction = Some(ExtractionPreview {
                    source: path,
                    rejected: extraction.rejected.len(),
                    rows: extraction.rows,
                });
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                self.error = Some(Notice::new("Text Recognition Failed", e.to_string()));
            }
        }
    }

    /// Render the menu bar.
    fn render_menu(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Upload Image... (Ctrl+U)").clicked() {
                        self.upload_image_dialog();
                        ui.close_menu();
                    }
                    if ui.button("Generate PDF (Ctrl+P)").clicked() {
                        self.generate_pdf();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Clear Rows").clicked() {
                        self.bill.clear();
                        self.status_message = "Rows cleared".to_string();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit (Ctrl+Q)").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about_dialog = true;
                        ui.close_menu();
                    }
                });
            });
        });
    }

    /// Render the price and glass name inputs.
    fn render_settings(&mut self, ctx: &Context) {
        TopBottomPanel::top("price_setting").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(format!("Price per Sq-Feet ({}):", self.config.currency));
                let mut price = self.bill.price_text().to_string();
                let price_input = egui::TextEdit::singleline(&mut price)
                    .desired_width(theme::SETTINGS_INPUT_WIDTH);
                if ui.add(price_input).changed() {
                    self.bill.set_price(price);
                }

                ui.add_space(12.0);
                ui.label("Glass Name:");
                let mut name = self.bill.glass_name().to_string();
                let name_input = egui::TextEdit::singleline(&mut name)
                    .desired_width(theme::SETTINGS_INPUT_WIDTH);
                if ui.add(name_input).changed() {
                    self.bill.set_glass_name(name);
                }

                ui.add_space(12.0);
                if ui.button("Upload Image").clicked() {
                    self.upload_image_dialog();
                }
            });
            ui.add_space(4.0);
        });
    }

    /// Render the total, action buttons, rule label and status line.
    fn render_footer(&mut self, ctx: &Context, price_ok: bool) {
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(RichText::new(&self.status_message).color(theme::DIM_TEXT));
        });

        TopBottomPanel::bottom("totals").show(ctx, |ui| {
            ui.add_space(6.0);
            let total = self
                .last_summary
                .as_ref()
                .map_or(0.0, |s| s.total_price);
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!(
                        "Total Price: {}",
                        self.config.format_price(total)
                    ))
                    .size(theme::TOTAL_FONT_SIZE)
                    .strong()
                    .color(theme::TOTAL_TEXT),
                );
                if !price_ok {
                    ui.label(
                        RichText::new("price per sq ft is not a number")
                            .color(theme::WARNING_TEXT),
                    );
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Calculate").clicked() {
                    self.calculate();
                }
                if ui.button("Add Row").clicked() {
                    let idx = self.bill.add_row();
                    self.status_message = format!("Added row {}", idx + 1);
                }
                if ui.button("Generate PDF").clicked() {
                    self.generate_pdf();
                }
            });

            ui.label(&self.config.rule_label);
            ui.add_space(6.0);
        });
    }

    /// Render the measurement rows.
    fn render_rows(&mut self, ctx: &Context) {
        let mut edits: Vec<RowEdit> = Vec::new();

        CentralPanel::default().show(ctx, |ui| {
            ui.heading("Measurements");
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    egui::Grid::new("measurement_rows")
                        .num_columns(8)
                        .spacing(theme::GRID_SPACING)
                        .striped(true)
                        .show(ui, |ui| {
                            for header in [
                                "Row",
                                "Length (Inc)",
                                "Width (Inc)",
                                "Quantity",
                                "Original Sq ft",
                                "Sq ft",
                                "Price",
                                "",
                            ] {
                                ui.label(RichText::new(header).strong().color(theme::HEADER_TEXT));
                            }
                            ui.end_row();

                            let row_count = self.bill.len();
                            for (idx, row) in self.bill.rows().iter().enumerate() {
                                ui.label(format!("Row {}:", idx + 1));

                                for field in RowField::ALL {
                                    let mut text = row.field(field).to_string();
                                    let input = egui::TextEdit::singleline(&mut text)
                                        .desired_width(theme::INPUT_WIDTH);
                                    if ui.add(input).changed() {
                                        edits.push(RowEdit::Field(idx, field, text));
                                    }
                                }

                                let pricing = self
                                    .last_summary
                                    .as_ref()
                                    .and_then(|s| s.row_pricing(idx, row_count));
                                match pricing {
                                    Some(pricing) if row.is_complete() => {
                                        ui.label(
                                            RichText::new(format_sqft(pricing.original_area_sqft))
                                                .color(theme::DIM_TEXT),
                                        );
                                        ui.label(format_sqft(pricing.billed_area_sqft));
                                        ui.label(
                                            RichText::new(
                                                self.config.format_price(pricing.line_price),
                                            )
                                            .color(theme::PRICE_TEXT),
                                        );
                                    }
                                    _ => {
                                        let dim = |s: String| RichText::new(s).color(theme::DIM_TEXT);
                                        ui.label(dim(format_sqft(0.0)));
                                        ui.label(dim(format_sqft(0.0)));
                                        ui.label(dim(self.config.format_price(0.0)));
                                    }
                                }

                                let removable = !row.is_empty() || self.bill.len() > 1;
                                if ui
                                    .add_enabled(removable, egui::Button::new("✖"))
                                    .on_hover_text("Remove row")
                                    .clicked()
                                {
                                    edits.push(RowEdit::Remove(idx));
                                }
                                ui.end_row();
                            }
                        });
                });
        });

        // Apply removals from the bottom up so earlier indices stay valid.
        edits.sort_by_key(|edit| match edit {
            RowEdit::Field(..) => 0,
            RowEdit::Remove(idx) => usize::MAX - idx,
        });
        for edit in edits {
            let result = match edit {
                RowEdit::Field(idx, field, text) => self.bill.edit_row(idx, field, text).map(|_| ()),
                RowEdit::Remove(idx) => self.bill.remove_row(idx).map(|_| ()),
            };
            if let Err(e) = result {
                tracing::error!("Row edit failed: {}", e);
            }
        }
    }

    /// Handle keyboard shortcuts.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let (upload, pdf, escape) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(Key::U),
                i.modifiers.ctrl && i.key_pressed(Key::P),
                i.key_pressed(Key::Escape),
            )
        });

        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if upload {
            self.upload_image_dialog();
        }
        if pdf {
            self.generate_pdf();
        }
        if escape {
            self.error = None;
            self.info = None;
            self.show_about_dialog = false;
        }
    }

    /// Show the extracted rows with a preview of the resulting bill.
    fn show_extraction_preview(&mut self, ctx: &Context) {
        let Some(preview) = &self.extraction else {
            return;
        };

        let preview_bill = preview.to_bill(&self.bill);
        let preview_text = match preview_bill.summary() {
            Ok(summary) => render_preview(&summary, &self.config),
            Err(e) => format!("{}", e),
        };

        let mut action = None;
        egui::Window::new("Extracted Data and PDF Preview")
            .collapsible(false)
            .resizable(true)
            .default_width(600.0)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Source: {}", preview.source.display()));
                if preview.rejected > 0 {
                    ui.label(
                        RichText::new(format!(
                            "{} line(s) mentioned a pane but could not be read",
                            preview.rejected
                        ))
                        .color(theme::WARNING_TEXT),
                    );
                }

                ui.collapsing("Extracted Data", |ui| {
                    egui::Grid::new("extracted_rows")
                        .num_columns(4)
                        .spacing(theme::GRID_SPACING)
                        .show(ui, |ui| {
                            for (i, row) in preview.rows.iter().enumerate() {
                                ui.label(format!("Row {}:", i + 1));
                                ui.label(format!("Length: {}", row.length));
                                ui.label(format!("Width: {}", row.width));
                                ui.label(format!("Quantity: {}", row.quantity));
                                ui.end_row();
                            }
                        });
                });

                ui.separator();
                ui.label(RichText::new("PDF Preview").strong());
                ui.add(
                    egui::TextEdit::multiline(&mut preview_text.as_str())
                        .font(egui::TextStyle::Monospace)
                        .desired_rows(10)
                        .desired_width(f32::INFINITY),
                );

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Use Rows").clicked() {
                        action = Some(PreviewAction::UseRows);
                    }
                    if ui.button("Generate PDF").clicked() {
                        action = Some(PreviewAction::GeneratePdf);
                    }
                    if ui.button("Go Back").clicked() {
                        action = Some(PreviewAction::GoBack);
                    }
                });
            });

        match action {
            Some(PreviewAction::UseRows) => {
                if let Some(preview) = self.extraction.take() {
                    let added = self
                        .bill
                        .prefill(preview.rows.into_iter().map(Row::from));
                    self.status_message = format!(
                        "Added {} row(s) from {}",
                        added,
                        preview.source.display()
                    );
                }
            }
            Some(PreviewAction::GeneratePdf) => {
                self.export(&preview_bill);
                self.extraction = None;
            }
            Some(PreviewAction::GoBack) => self.extraction = None,
            None => {}
        }
    }

    /// Show an error or information dialog if one is pending.
    fn show_notices(&mut self, ctx: &Context) {
        if let Some(notice) = &self.error {
            let mut dismissed = false;
            egui::Window::new(&notice.title)
                .id(egui::Id::new("error_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(RichText::new(&notice.message).color(theme::ERROR_TEXT));
                    ui.separator();
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.error = None;
            }
            return;
        }

        if let Some(notice) = &self.info {
            let mut dismissed = false;
            egui::Window::new(&notice.title)
                .id(egui::Id::new("info_dialog"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&notice.message);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.info = None;
            }
        }
    }

    /// Show about dialog.
    fn show_about(&mut self, ctx: &Context) {
        if !self.show_about_dialog {
            return;
        }

        egui::Window::new("About Glass Price Calculator")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.heading("Glass Price Calculator");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.label(&self.config.rule_label);
                ui.label("Each side is rounded up to the next standard size:");
                for bp in glass_core::ROUNDING_TABLE {
                    ui.label(RichText::new(bp.to_string()).monospace());
                }
                ui.separator();
                if ui.button("Close").clicked() {
                    self.show_about_dialog = false;
                }
            });
    }
}

impl eframe::App for FormApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        let price_ok = self.refresh_summary();

        self.render_menu(ctx);
        self.render_settings(ctx);
        self.render_footer(ctx, price_ok);
        self.render_rows(ctx);
        self.show_extraction_preview(ctx);
        self.show_notices(ctx);
        self.show_about(ctx);
    }
}
