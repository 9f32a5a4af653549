//! The pointer/tool state machine.
//!
//! Freehand tools stroke straight onto the current layer while the button
//! is held. Shape tools support both workflows: click-drag-release and
//! click-then-click, with a live preview rendered into the scratch surface
//! between the two defining points. Escape cancels an in-progress shape.

use tracing::trace;

use crate::canvas::geometry::Point;
use crate::canvas::raster;
use crate::canvas::stack::LayerStack;
use crate::canvas::style::DrawStyle;
use crate::canvas::surface::{Color, Paint};
use crate::canvas::Tool;

/// Outline ink used when previewing an erase gesture, which would
/// otherwise be invisible against the canvas.
const ERASE_PREVIEW_INK: Color = Color::rgb(128, 128, 128);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    /// A shape anchor is set and the tool awaits its second click.
    Armed,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolState {
    active_tool: Tool,
    anchor: Option<Point>,
    last_pos: Option<Point>,
    dragging: bool,
}

impl ToolState {
    pub fn new(tool: Tool) -> Self {
        Self {
            active_tool: tool,
            ..Self::default()
        }
    }

    pub fn active_tool(&self) -> Tool {
        self.active_tool
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn phase(&self) -> GesturePhase {
        if self.dragging {
            GesturePhase::Dragging
        } else if self.anchor.is_some() {
            GesturePhase::Armed
        } else {
            GesturePhase::Idle
        }
    }
}

/// Switch tools, defensively dropping any in-progress gesture.
pub fn set_tool(stack: &mut LayerStack, tools: &mut ToolState, tool: Tool) {
    if tools.active_tool != tool {
        cancel(stack, tools);
        tools.active_tool = tool;
    }
}

/// Abandon the in-progress gesture without touching the current layer.
pub fn cancel(stack: &mut LayerStack, tools: &mut ToolState) {
    if tools.anchor.is_some() {
        stack.clear_scratch();
    }
    tools.anchor = None;
    tools.last_pos = None;
    tools.dragging = false;
}

/// Left-button press. Returns `true` when the current layer was modified.
pub fn pointer_down(
    stack: &mut LayerStack,
    style: &DrawStyle,
    tools: &mut ToolState,
    pos: Point,
    inside: bool,
) -> bool {
    let tool = tools.active_tool;
    if tool.is_freehand() {
        if !inside {
            return false;
        }
        tools.last_pos = Some(pos);
        tools.dragging = true;
        // Stamp the initial dot so single clicks leave a mark.
        let (paint, width) = freehand_ink(stack, style, tool);
        raster::draw_line(&mut stack.current_layer_mut().surface, paint, pos, pos, width);
        return true;
    }

    if tool.is_shape() {
        match tools.anchor {
            None => {
                if !inside {
                    return false;
                }
                tools.anchor = Some(pos);
                tools.dragging = true;
                trace!(?pos, ?tool, "shape armed");
            }
            Some(_) => return finalize_shape(stack, style, tools, pos),
        }
    }
    false
}

/// Pointer motion. Freehand draws incremental segments; an armed shape
/// refreshes its scratch preview (tracked even outside the canvas).
pub fn pointer_move(
    stack: &mut LayerStack,
    style: &DrawStyle,
    tools: &mut ToolState,
    pos: Point,
    inside: bool,
) -> bool {
    let tool = tools.active_tool;
    if tool.is_freehand() && tools.dragging {
        if !inside {
            return false;
        }
        let Some(last) = tools.last_pos else {
            return false;
        };
        let (paint, width) = freehand_ink(stack, style, tool);
        raster::draw_line(&mut stack.current_layer_mut().surface, paint, last, pos, width);
        tools.last_pos = Some(pos);
        return true;
    }

    if tool.is_shape() {
        if let Some(anchor) = tools.anchor {
            stack.clear_scratch();
            let (paint, stroke_width) = shape_preview_ink(stack, style);
            raster::draw_shape(tool, stack.scratch_mut(), paint, anchor, pos, stroke_width);
        }
    }
    false
}

/// Left-button release. A drag-style shape finalizes here when the pointer
/// actually moved; releasing on the anchor leaves the tool armed for the
/// click-then-click workflow.
pub fn pointer_up(
    stack: &mut LayerStack,
    style: &DrawStyle,
    tools: &mut ToolState,
    pos: Point,
) -> bool {
    let tool = tools.active_tool;
    if tool.is_freehand() {
        tools.last_pos = None;
        tools.dragging = false;
        return false;
    }

    if tool.is_shape() && tools.dragging {
        tools.dragging = false;
        if let Some(anchor) = tools.anchor {
            if pos != anchor {
                return finalize_shape(stack, style, tools, pos);
            }
        }
    }
    false
}

/// Commit the shape between the anchor and `pos` onto the current layer.
/// Zero-area gestures are rejected in both workflows and cancel instead.
fn finalize_shape(
    stack: &mut LayerStack,
    style: &DrawStyle,
    tools: &mut ToolState,
    pos: Point,
) -> bool {
    let Some(anchor) = tools.anchor.take() else {
        return false;
    };
    stack.clear_scratch();
    tools.dragging = false;

    if pos == anchor {
        trace!(?pos, "zero-area shape rejected");
        return false;
    }

    let tool = tools.active_tool;
    let (paint, stroke_width) = shape_commit_ink(stack, style);
    raster::draw_shape(
        tool,
        &mut stack.current_layer_mut().surface,
        paint,
        anchor,
        pos,
        stroke_width,
    );
    trace!(?anchor, ?pos, ?tool, "shape committed");
    true
}

/// Pen blends the styled color; the eraser overwrites with the layer's
/// transparent key.
fn freehand_ink(stack: &LayerStack, style: &DrawStyle, tool: Tool) -> (Paint, u32) {
    if tool == Tool::Eraser {
        (Paint::replace(stack.current_layer().surface.key()), style.width())
    } else {
        (Paint::blend(style.paint_color()), style.width())
    }
}

/// A fully transparent shape color means "erase this shape".
fn shape_commit_ink(stack: &LayerStack, style: &DrawStyle) -> (Paint, u32) {
    if style.alpha_u8() == 0 {
        (
            Paint::replace(stack.current_layer().surface.key()),
            style.stroke_width(),
        )
    } else {
        (Paint::blend(style.paint_color()), style.stroke_width())
    }
}

/// Erase previews substitute a visible neutral outline of width 1; normal
/// previews use the committed ink as-is.
fn shape_preview_ink(stack: &LayerStack, style: &DrawStyle) -> (Paint, u32) {
    if style.alpha_u8() == 0 {
        (Paint::blend(ERASE_PREVIEW_INK), 1)
    } else {
        shape_commit_ink(stack, style)
    }
}
