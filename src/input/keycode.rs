//! Key names as written in `settings.toml`.

use winit::keyboard::KeyCode;

/// Parses a winit `KeyCode` name such as `KeyA`, `Digit1`, `F5` or `Enter`.
pub fn parse_keycode(s: &str) -> Option<KeyCode> {
    let code = match s {
        "KeyA" => KeyCode::KeyA, "KeyB" => KeyCode::KeyB, "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD, "KeyE" => KeyCode::KeyE, "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG, "KeyH" => KeyCode::KeyH, "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ, "KeyK" => KeyCode::KeyK, "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM, "KeyN" => KeyCode::KeyN, "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP, "KeyQ" => KeyCode::KeyQ, "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS, "KeyT" => KeyCode::KeyT, "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV, "KeyW" => KeyCode::KeyW, "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY, "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0, "Digit1" => KeyCode::Digit1, "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3, "Digit4" => KeyCode::Digit4, "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6, "Digit7" => KeyCode::Digit7, "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "F1" => KeyCode::F1, "F2" => KeyCode::F2, "F3" => KeyCode::F3, "F4" => KeyCode::F4,
        "F5" => KeyCode::F5, "F6" => KeyCode::F6, "F7" => KeyCode::F7, "F8" => KeyCode::F8,
        "F9" => KeyCode::F9, "F10" => KeyCode::F10, "F11" => KeyCode::F11, "F12" => KeyCode::F12,
        "Space" => KeyCode::Space, "Enter" => KeyCode::Enter, "NumpadEnter" => KeyCode::NumpadEnter,
        "Escape" => KeyCode::Escape, "Backspace" => KeyCode::Backspace, "Tab" => KeyCode::Tab,
        "ArrowUp" => KeyCode::ArrowUp, "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft, "ArrowRight" => KeyCode::ArrowRight,
        "PageUp" => KeyCode::PageUp, "PageDown" => KeyCode::PageDown,
        "ShiftLeft" => KeyCode::ShiftLeft, "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft, "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft, "AltRight" => KeyCode::AltRight,
        "Semicolon" => KeyCode::Semicolon, "Quote" => KeyCode::Quote,
        "Comma" => KeyCode::Comma, "Period" => KeyCode::Period, "Slash" => KeyCode::Slash,
        "Backslash" => KeyCode::Backslash, "BracketLeft" => KeyCode::BracketLeft,
        "BracketRight" => KeyCode::BracketRight, "Minus" => KeyCode::Minus, "Equal" => KeyCode::Equal,
        _ => return None,
    };
    Some(code)
}
