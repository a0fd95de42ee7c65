//! Terminal events to scene inputs.

use crate::scene::SceneInput;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Map a key press. Releases and repeats never flap.
pub fn map_key(key: KeyEvent) -> Option<SceneInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(SceneInput::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ')
        | KeyCode::Enter
        | KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(SceneInput::Tap { touches: 1 }),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(SceneInput::Quit),
        _ => None,
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Option<SceneInput> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(SceneInput::Tap { touches: 1 }),
        _ => None,
    }
}

/// Map any terminal event.
pub fn map_event(event: &Event) -> Option<SceneInput> {
    match event {
        Event::Key(key) => map_key(*key),
        Event::Mouse(mouse) => map_mouse(*mouse),
        _ => None,
    }
}
