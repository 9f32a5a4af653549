//! Editor state and the closed command set.
//!
//! All mutable application state lives in [`EditorState`] and is passed
//! explicitly; there are no process-wide singletons. UI buttons and
//! keyboard shortcuts both reduce to a [`Command`], dispatched through
//! [`apply_command`]. Commands that need dialogs or disk I/O return an
//! [`Effect`] for the shell to carry out.

use tracing::debug;

use crate::canvas::input::{self, ToolState};
use crate::canvas::stack::{LayerId, LayerStack};
use crate::canvas::style::DrawStyle;
use crate::canvas::surface::Color;
use crate::canvas::Tool;

#[derive(Debug)]
pub struct EditorState {
    pub stack: LayerStack,
    pub style: DrawStyle,
    pub tools: ToolState,
    pub quick_colors: Vec<Color>,
    pub unsaved_changes: bool,
}

impl EditorState {
    pub fn new(stack: LayerStack, style: DrawStyle, quick_colors: Vec<Color>) -> Self {
        Self {
            stack,
            style,
            tools: ToolState::new(Tool::Pen),
            quick_colors,
            unsaved_changes: false,
        }
    }

    /// Replace the document, dropping all transient gesture state.
    pub fn replace_document(&mut self, stack: LayerStack) {
        self.stack = stack;
        self.tools = ToolState::new(self.tools.active_tool());
        self.unsaved_changes = false;
    }

    pub fn mark_dirty(&mut self) {
        self.unsaved_changes = true;
    }
}

/// Everything a toolbar button, menu entry, or shortcut can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectTool(Tool),
    SetColor(Color),
    SelectQuickColor(usize),
    IncreaseAlpha,
    DecreaseAlpha,
    IncreaseWidth,
    DecreaseWidth,
    ToggleFill,
    ClearLayer,
    AddLayer,
    DeleteLayer,
    MoveLayerUp,
    MoveLayerDown,
    SelectLayer(LayerId),
    ToggleLayerVisibility(LayerId),
    CancelShape,
    NewDocument,
    OpenDocument,
    SaveDocument,
    ExportFlattened,
}

/// Follow-up work a command leaves for the shell (dialogs, codecs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    RequestNew,
    RequestOpen,
    RequestSave,
    RequestExport,
}

pub fn apply_command(state: &mut EditorState, command: Command) -> Effect {
    match command {
        Command::SelectTool(tool) => {
            input::set_tool(&mut state.stack, &mut state.tools, tool);
        }
        Command::SetColor(color) => state.style.set_color(color),
        Command::SelectQuickColor(index) => {
            if let Some(&color) = state.quick_colors.get(index) {
                state.style.set_color(color);
            }
        }
        Command::IncreaseAlpha => state.style.increase_alpha(),
        Command::DecreaseAlpha => state.style.decrease_alpha(),
        Command::IncreaseWidth => state.style.increase_width(),
        Command::DecreaseWidth => state.style.decrease_width(),
        Command::ToggleFill => state.style.toggle_fill(),
        Command::ClearLayer => {
            state.stack.clear_current();
            state.mark_dirty();
        }
        Command::AddLayer => {
            if state.stack.add_layer() {
                state.mark_dirty();
            }
        }
        Command::DeleteLayer => {
            if state.stack.delete_layer() {
                state.mark_dirty();
            }
        }
        Command::MoveLayerUp => {
            if state.stack.move_current_up() {
                state.mark_dirty();
            }
        }
        Command::MoveLayerDown => {
            if state.stack.move_current_down() {
                state.mark_dirty();
            }
        }
        Command::SelectLayer(id) => {
            state.stack.set_current(id);
        }
        Command::ToggleLayerVisibility(id) => {
            state.stack.toggle_visibility(id);
        }
        Command::CancelShape => input::cancel(&mut state.stack, &mut state.tools),
        Command::NewDocument => return Effect::RequestNew,
        Command::OpenDocument => return Effect::RequestOpen,
        Command::SaveDocument => return Effect::RequestSave,
        Command::ExportFlattened => return Effect::RequestExport,
    }
    debug!(?command, "command applied");
    Effect::None
}

/// Recognized keyboard shortcuts. Returns the command bound to the key,
/// if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutKey {
    Escape,
    ToggleFill,
    ClearLayer,
    WidthDown,
    WidthUp,
    AlphaDown,
    AlphaUp,
    AddLayer,
    DeleteLayer,
}

pub fn shortcut_command(key: ShortcutKey) -> Command {
    match key {
        ShortcutKey::Escape => Command::CancelShape,
        ShortcutKey::ToggleFill => Command::ToggleFill,
        ShortcutKey::ClearLayer => Command::ClearLayer,
        ShortcutKey::WidthDown => Command::DecreaseWidth,
        ShortcutKey::WidthUp => Command::IncreaseWidth,
        ShortcutKey::AlphaDown => Command::DecreaseAlpha,
        ShortcutKey::AlphaUp => Command::IncreaseAlpha,
        ShortcutKey::AddLayer => Command::AddLayer,
        ShortcutKey::DeleteLayer => Command::DeleteLayer,
    }
}
