// Keyboard handling inside the open modal

/// Keys the modal reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
    Other,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_event(key: &str, shift: bool) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab { shift },
            _ => Self::Other,
        }
    }
}

/// What the controller did with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Closed,
    /// Default tab behavior was replaced by focusing this element
    MovedFocus(String),
    Ignored,
}

/// Next element in a cyclic tab order.
///
/// Focus outside the list enters at the first element (last when going
/// backwards). Returns `None` for an empty list.
pub fn next_focus(elements: &[String], current: Option<&str>, backwards: bool) -> Option<String> {
    if elements.is_empty() {
        return None;
    }
    let last = elements.len() - 1;

    let position = current.and_then(|c| elements.iter().position(|e| e == c));
    let index = match (position, backwards) {
        (None, false) => 0,
        (None, true) => last,
        (Some(i), false) => if i == last { 0 } else { i + 1 },
        (Some(i), true) => if i == 0 { last } else { i - 1 },
    };
    Some(elements[index].clone())
}
