//! The egui shell: canvas view, toolbar, layer panel, menu, and the
//! translation from raw pointer/key input into editor commands.

use std::path::PathBuf;

use eframe::egui;
use tracing::error;

use crate::canvas::input::{self, GesturePhase};
use crate::canvas::stack::LayerStack;
use crate::canvas::style::DrawStyle;
use crate::canvas::surface::{Color, Surface};
use crate::canvas::Tool;
use crate::editor::{apply_command, shortcut_command, Command, EditorState, Effect, ShortcutKey};
use crate::io::{codec, dialogs};
use crate::settings::Settings;

const CANVAS_BACKGROUND: Color = Color::WHITE;

const TOOLS: &[(Tool, &str)] = &[
    (Tool::Pen, "Freehand strokes"),
    (Tool::Eraser, "Erase to transparent"),
    (Tool::Square, "Square from two points"),
    (Tool::Rect, "Rectangle from two points"),
    (Tool::Circle, "Circle from two points"),
    (Tool::Oval, "Oval inscribed in the drag box"),
    (Tool::Triangle, "Isosceles triangle"),
];

pub struct PainterApp {
    state: EditorState,
    settings: Settings,
    settings_path: PathBuf,
    canvas_texture: Option<egui::TextureHandle>,
    last_cursor: Option<(i32, i32)>,
}

impl PainterApp {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        let stack = LayerStack::new(
            settings.canvas_width,
            settings.canvas_height,
            Color::TRANSPARENT,
            settings.max_layers,
        );
        let style = DrawStyle::new(settings.default_color, settings.default_width);
        let mut state = EditorState::new(stack, style, settings.quick_colors.clone());
        apply_command(&mut state, Command::SelectTool(settings.default_tool));

        Self {
            state,
            settings,
            settings_path,
            canvas_texture: None,
            last_cursor: None,
        }
    }

    fn dispatch(&mut self, command: Command) {
        let effect = apply_command(&mut self.state, command);
        self.run_effect(effect);
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::RequestNew => self.new_document(),
            Effect::RequestOpen => self.open_document(),
            Effect::RequestSave => self.save_document(),
            Effect::RequestExport => self.export_flattened(),
        }
    }

    fn confirm_discard(&self) -> bool {
        !self.state.unsaved_changes || dialogs::confirm_discard_unsaved()
    }

    fn new_document(&mut self) {
        if !self.confirm_discard() {
            return;
        }
        self.state.replace_document(LayerStack::new(
            self.settings.canvas_width,
            self.settings.canvas_height,
            Color::TRANSPARENT,
            self.settings.max_layers,
        ));
    }

    fn open_document(&mut self) {
        if !self.confirm_discard() {
            return;
        }
        let Some(path) = dialogs::pick_open_path() else {
            return;
        };
        match codec::load_document(&path, Color::TRANSPARENT, self.settings.max_layers) {
            Ok(stack) => self.state.replace_document(stack),
            Err(err) => {
                error!(error = %err, path = %path.display(), "open failed");
                dialogs::show_error("Open failed", &format!("{err:#}"));
            }
        }
    }

    fn save_document(&mut self) {
        let Some(path) = dialogs::pick_save_document_path(&codec::default_file_stem()) else {
            return;
        };
        match codec::save_document(&self.state.stack, &path) {
            Ok(()) => self.state.unsaved_changes = false,
            Err(err) => {
                error!(error = %err, path = %path.display(), "save failed");
                dialogs::show_error("Save failed", &format!("{err:#}"));
            }
        }
    }

    fn export_flattened(&mut self) {
        let Some(path) = dialogs::pick_export_path(&codec::default_file_stem()) else {
            return;
        };
        if let Err(err) = codec::export_flattened(&self.state.stack, CANVAS_BACKGROUND, &path) {
            error!(error = %err, path = %path.display(), "export failed");
            dialogs::show_error("Export failed", &format!("{err:#}"));
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let bindings = [
            (egui::Key::Escape, ShortcutKey::Escape),
            (egui::Key::F, ShortcutKey::ToggleFill),
            (egui::Key::C, ShortcutKey::ClearLayer),
            (egui::Key::OpenBracket, ShortcutKey::WidthDown),
            (egui::Key::CloseBracket, ShortcutKey::WidthUp),
            (egui::Key::ArrowDown, ShortcutKey::AlphaDown),
            (egui::Key::ArrowUp, ShortcutKey::AlphaUp),
            (egui::Key::N, ShortcutKey::AddLayer),
            (egui::Key::Delete, ShortcutKey::DeleteLayer),
        ];
        for (key, shortcut) in bindings {
            if ctx.input(|i| i.key_pressed(key)) {
                self.dispatch(shortcut_command(shortcut));
            }
        }
    }

    /// Feed pointer input to the tool state machine, in canvas coordinates
    /// relative to the displayed texture rect.
    fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        let (pointer_pos, pressed, released) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let Some(screen_pos) = pointer_pos else {
            return;
        };

        let pos = (
            (screen_pos.x - canvas_rect.min.x).floor() as i32,
            (screen_pos.y - canvas_rect.min.y).floor() as i32,
        );
        let inside = canvas_rect.contains(screen_pos);
        let moved = self.last_cursor != Some(pos);
        self.last_cursor = Some(pos);

        let state = &mut self.state;
        let mut committed = false;
        if pressed && inside {
            committed |= input::pointer_down(&mut state.stack, &state.style, &mut state.tools, pos, true);
        } else if released {
            committed |= input::pointer_up(&mut state.stack, &state.style, &mut state.tools, pos);
        } else if moved {
            committed |=
                input::pointer_move(&mut state.stack, &state.style, &mut state.tools, pos, inside);
        }
        if committed {
            state.mark_dirty();
        }
    }

    fn composed_frame(&self) -> egui::ColorImage {
        let stack = &self.state.stack;
        let mut display = Surface::new(stack.width(), stack.height(), CANVAS_BACKGROUND);
        stack.render_frame().composite_onto(&mut display, (0, 0));
        egui::ColorImage::from_rgba_unmultiplied(
            [display.width() as usize, display.height() as usize],
            display.pixels(),
        )
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");
        for &(tool, tip) in TOOLS {
            let selected = self.state.tools.active_tool() == tool;
            if ui
                .selectable_label(selected, tool.label())
                .on_hover_text(tip)
                .clicked()
            {
                self.dispatch(Command::SelectTool(tool));
            }
        }

        ui.separator();
        ui.heading("Color");
        let mut srgba = {
            let c = self.state.style.color();
            egui::Color32::from_rgb(c.r, c.g, c.b)
        };
        if ui.color_edit_button_srgba(&mut srgba).changed() {
            self.dispatch(Command::SetColor(Color::rgb(srgba.r(), srgba.g(), srgba.b())));
        }
        ui.horizontal_wrapped(|ui| {
            for (index, color) in self.state.quick_colors.clone().into_iter().enumerate() {
                let swatch = egui::Button::new("  ")
                    .fill(egui::Color32::from_rgb(color.r, color.g, color.b));
                if ui.add(swatch).on_hover_text("Quick color").clicked() {
                    self.dispatch(Command::SelectQuickColor(index));
                }
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Opacity");
            if ui.button("−").on_hover_text("5% less opaque").clicked() {
                self.dispatch(Command::DecreaseAlpha);
            }
            ui.label(format!("{}%", self.state.style.alpha_percent()));
            if ui.button("+").on_hover_text("5% more opaque").clicked() {
                self.dispatch(Command::IncreaseAlpha);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Width");
            if ui.button("−").on_hover_text("Thinner stroke").clicked() {
                self.dispatch(Command::DecreaseWidth);
            }
            ui.label(format!("{}", self.state.style.width()));
            if ui.button("+").on_hover_text("Thicker stroke").clicked() {
                self.dispatch(Command::IncreaseWidth);
            }
        });
        let mut fill = self.state.style.fill();
        if ui
            .checkbox(&mut fill, "Fill shapes")
            .on_hover_text("Filled instead of outlined shapes")
            .changed()
        {
            self.dispatch(Command::ToggleFill);
        }

        ui.separator();
        self.layer_panel_ui(ui);
    }

    fn layer_panel_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Layers");
        ui.horizontal(|ui| {
            let at_cap = self.state.stack.len() >= self.state.stack.max_layers();
            if ui
                .add_enabled(!at_cap, egui::Button::new("Add"))
                .on_hover_text("New empty layer on top")
                .clicked()
            {
                self.dispatch(Command::AddLayer);
            }
            let last = self.state.stack.len() == 1;
            if ui
                .add_enabled(!last, egui::Button::new("Delete"))
                .on_hover_text("Delete the current layer")
                .clicked()
            {
                self.dispatch(Command::DeleteLayer);
            }
            if ui.button("Up").on_hover_text("Raise the current layer").clicked() {
                self.dispatch(Command::MoveLayerUp);
            }
            if ui.button("Down").on_hover_text("Lower the current layer").clicked() {
                self.dispatch(Command::MoveLayerDown);
            }
        });

        // Top layer first, matching how the stack reads visually.
        let rows: Vec<_> = self
            .state
            .stack
            .order()
            .iter()
            .rev()
            .copied()
            .enumerate()
            .collect();
        let current = self.state.stack.current_id();
        let total = rows.len();
        for (row, id) in rows {
            let Some(layer) = self.state.stack.layer(id) else {
                continue;
            };
            let mut visible = layer.visible;
            ui.horizontal(|ui| {
                if ui
                    .checkbox(&mut visible, "")
                    .on_hover_text("Show or hide this layer")
                    .changed()
                {
                    self.dispatch(Command::ToggleLayerVisibility(id));
                }
                let label = format!("Layer {}", total - row);
                if ui.selectable_label(id == current, label).clicked() {
                    self.dispatch(Command::SelectLayer(id));
                }
            });
        }
    }

    fn menu_ui(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New").clicked() {
                    self.dispatch(Command::NewDocument);
                    ui.close_menu();
                }
                if ui.button("Open…").clicked() {
                    self.dispatch(Command::OpenDocument);
                    ui.close_menu();
                }
                if ui.button("Save As…").clicked() {
                    self.dispatch(Command::SaveDocument);
                    ui.close_menu();
                }
                if ui.button("Export Image…").clicked() {
                    self.dispatch(Command::ExportFlattened);
                    ui.close_menu();
                }
            });
            if self.state.unsaved_changes {
                ui.label("●").on_hover_text("Unsaved changes");
            }
        });
    }
}

impl eframe::App for PainterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| self.menu_ui(ui));
        egui::SidePanel::left("toolbar")
            .resizable(false)
            .show(ctx, |ui| self.toolbar_ui(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let frame = self.composed_frame();
            let size = egui::vec2(frame.size[0] as f32, frame.size[1] as f32);
            let texture = match self.canvas_texture.take() {
                Some(mut texture) => {
                    texture.set(frame, egui::TextureOptions::NEAREST);
                    texture
                }
                None => ctx.load_texture("canvas", frame, egui::TextureOptions::NEAREST),
            };
            let texture_id = texture.id();
            self.canvas_texture = Some(texture);

            let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
            ui.painter().image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            self.handle_canvas_input(ctx, rect);
        });

        // Keep repainting while a stroke or preview is live.
        if self.state.tools.phase() != GesturePhase::Idle {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            error!(error = %err, "failed to persist settings");
        }
    }
}
