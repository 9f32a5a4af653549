//! End-to-end drawing sessions driven through the command dispatch and
//! pointer state machine, the same way the GUI shell drives them.

use layrs::canvas::input::{self, GesturePhase};
use layrs::canvas::stack::{LayerStack, DEFAULT_MAX_LAYERS};
use layrs::canvas::style::DrawStyle;
use layrs::canvas::surface::Color;
use layrs::canvas::Tool;
use layrs::editor::{apply_command, Command, EditorState};

const INK: Color = Color::rgb(180, 40, 40);

fn editor() -> EditorState {
    EditorState::new(
        LayerStack::new(96, 64, Color::TRANSPARENT, DEFAULT_MAX_LAYERS),
        DrawStyle::new(INK, 1),
        vec![Color::BLACK, Color::WHITE],
    )
}

fn press(state: &mut EditorState, pos: (i32, i32)) -> bool {
    input::pointer_down(&mut state.stack, &state.style, &mut state.tools, pos, true)
}

fn drag(state: &mut EditorState, pos: (i32, i32)) -> bool {
    input::pointer_move(&mut state.stack, &state.style, &mut state.tools, pos, true)
}

fn release(state: &mut EditorState, pos: (i32, i32)) -> bool {
    input::pointer_up(&mut state.stack, &state.style, &mut state.tools, pos)
}

#[test]
fn filled_rectangle_gesture_paints_exact_span() {
    let mut state = editor();
    apply_command(&mut state, Command::SelectTool(Tool::Rect));
    apply_command(&mut state, Command::ToggleFill);

    press(&mut state, (10, 10));
    drag(&mut state, (50, 30));
    assert!(release(&mut state, (50, 30)));

    let surface = &state.stack.current_layer().surface;
    for y in 10..=30 {
        for x in 10..=50 {
            assert_eq!(surface.pixel(x, y), INK, "at ({x}, {y})");
        }
    }
    assert_eq!(surface.pixel(9, 10), Color::TRANSPARENT);
    assert_eq!(surface.pixel(51, 30), Color::TRANSPARENT);
}

#[test]
fn escape_mid_shape_leaves_document_untouched() {
    let mut state = editor();
    apply_command(&mut state, Command::SelectTool(Tool::Triangle));

    press(&mut state, (20, 20));
    drag(&mut state, (60, 50));
    assert_eq!(state.tools.phase(), GesturePhase::Dragging);

    apply_command(&mut state, Command::CancelShape);
    assert_eq!(state.tools.phase(), GesturePhase::Idle);

    let blank = LayerStack::new(96, 64, Color::TRANSPARENT, DEFAULT_MAX_LAYERS);
    assert_eq!(
        state.stack.current_layer().surface,
        blank.current_layer().surface
    );
    assert_eq!(state.stack.scratch(), blank.scratch());
}

#[test]
fn strokes_land_on_the_selected_layer_only() {
    let mut state = editor();
    let bottom = state.stack.current_id();
    apply_command(&mut state, Command::AddLayer);
    let top = state.stack.current_id();

    press(&mut state, (5, 5));
    release(&mut state, (5, 5));

    assert_eq!(
        state.stack.layer(top).unwrap().surface.pixel(5, 5),
        INK
    );
    assert_eq!(
        state.stack.layer(bottom).unwrap().surface.pixel(5, 5),
        Color::TRANSPARENT
    );

    // Hiding the top layer removes the stroke from the composed frame.
    apply_command(&mut state, Command::ToggleLayerVisibility(top));
    assert_eq!(state.stack.render_frame().pixel(5, 5), Color::TRANSPARENT);
}

#[test]
fn width_and_alpha_shortcut_stepping_respects_clamps() {
    let mut state = editor();
    for _ in 0..60 {
        apply_command(&mut state, Command::IncreaseWidth);
    }
    assert_eq!(state.style.width(), 50);
    for _ in 0..60 {
        apply_command(&mut state, Command::DecreaseWidth);
    }
    assert_eq!(state.style.width(), 1);

    for _ in 0..5 {
        apply_command(&mut state, Command::DecreaseAlpha);
    }
    assert_eq!(state.style.alpha_percent(), 75);
    for _ in 0..5 {
        apply_command(&mut state, Command::IncreaseAlpha);
    }
    assert_eq!(state.style.alpha_percent(), 100);
}

#[test]
fn delete_after_switching_returns_to_previous_layer() {
    let mut state = editor();
    let first = state.stack.current_id();
    apply_command(&mut state, Command::AddLayer);
    apply_command(&mut state, Command::AddLayer);
    let third = state.stack.current_id();

    apply_command(&mut state, Command::DeleteLayer);
    assert!(state.stack.layer(third).is_none());
    assert_ne!(state.stack.current_id(), first);
    apply_command(&mut state, Command::DeleteLayer);
    assert_eq!(state.stack.current_id(), first);

    // The last layer refuses deletion.
    apply_command(&mut state, Command::DeleteLayer);
    assert_eq!(state.stack.len(), 1);
}

#[test]
fn eraser_session_round_trips_to_transparent() {
    let mut state = editor();
    press(&mut state, (12, 12));
    drag(&mut state, (20, 12));
    release(&mut state, (20, 12));
    assert_eq!(state.stack.current_layer().surface.pixel(16, 12), INK);

    apply_command(&mut state, Command::SelectTool(Tool::Eraser));
    for _ in 0..10 {
        apply_command(&mut state, Command::IncreaseWidth);
    }
    press(&mut state, (12, 12));
    drag(&mut state, (20, 12));
    release(&mut state, (20, 12));

    for x in 12..=20 {
        assert_eq!(
            state.stack.current_layer().surface.pixel(x, 12),
            Color::TRANSPARENT
        );
    }
}
