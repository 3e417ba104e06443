/* ------------------------ Virtual Keymap system ------------------------ */

#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VirtualAction {
    P1_Up,
    P1_Down,
    P1_Left,
    P1_Right,
    P1_Start,
    P1_Back,
    P1_MenuUp,
    P1_MenuDown,
    P1_MenuLeft,
    P1_MenuRight,
    P1_Select,
}

#[derive(Clone, Copy, Debug)]
pub struct InputEvent {
    pub action: VirtualAction,
    pub pressed: bool,
}

impl InputEvent {
    pub const fn press(action: VirtualAction) -> Self {
        Self {
            action,
            pressed: true,
        }
    }
}

#[inline(always)]
fn action_from_word(word: &str) -> Option<VirtualAction> {
    match word.to_ascii_lowercase().as_str() {
        "u" | "up" => Some(VirtualAction::P1_MenuUp),
        "down" => Some(VirtualAction::P1_MenuDown),
        "l" | "left" => Some(VirtualAction::P1_MenuLeft),
        "r" | "right" => Some(VirtualAction::P1_MenuRight),
        // Pad directions
        "w" => Some(VirtualAction::P1_Up),
        "a" => Some(VirtualAction::P1_Left),
        "s" => Some(VirtualAction::P1_Down),
        "d" => Some(VirtualAction::P1_Right),
        "start" | "enter" | "ok" => Some(VirtualAction::P1_Start),
        "back" | "esc" | "b" => Some(VirtualAction::P1_Back),
        "select" | "refresh" => Some(VirtualAction::P1_Select),
        _ => None,
    }
}

/// Maps one line of console input (`up`, `right 3`, `start`) to pressed events.
/// A trailing count repeats the action.
pub fn map_console_line(line: &str) -> Vec<InputEvent> {
    let mut words = line.split_whitespace();
    let Some(action) = words.next().and_then(action_from_word) else {
        return Vec::new();
    };
    let repeat = words
        .next()
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, 64);
    (0..repeat)
        .map(|_| InputEvent::press(action))
        .collect()
}
