use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::chord::KeyPress;

/// A terminal key event translated for the quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Down(KeyPress),
    Up(KeyPress),
}

impl KeyAction {
    pub fn press(&self) -> &KeyPress {
        match self {
            KeyAction::Down(p) | KeyAction::Up(p) => p,
        }
    }
}

/// Name used in answer keys for a terminal key code
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Tab | KeyCode::BackTab => "Tab".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Insert => "Insert".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Modifier(m) => modifier_name(m)?.into(),
        _ => return None,
    };
    Some(name)
}

fn modifier_name(code: ModifierKeyCode) -> Option<&'static str> {
    use ModifierKeyCode::*;
    match code {
        LeftControl | RightControl => Some("Control"),
        LeftSuper | RightSuper | LeftMeta | RightMeta => Some("Meta"),
        LeftAlt | RightAlt => Some("Alt"),
        LeftShift | RightShift => Some("Shift"),
        _ => None,
    }
}

pub fn to_key_action(event: &KeyEvent) -> Option<KeyAction> {
    let key = key_name(event.code)?;
    let mods = event.modifiers;
    let down = event.kind != KeyEventKind::Release;

    let mut press = KeyPress {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        meta: mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT) || event.code == KeyCode::BackTab,
        key,
        repeat: event.kind == KeyEventKind::Repeat,
    };

    // terminals disagree on whether a modifier's own flag is set on its press and release
    match press.key.as_str() {
        "Control" => press.ctrl = down,
        "Meta" => press.meta = down,
        "Alt" => press.alt = down,
        "Shift" => press.shift = down,
        _ => {}
    }

    Some(if down {
        KeyAction::Down(press)
    } else {
        KeyAction::Up(press)
    })
}
