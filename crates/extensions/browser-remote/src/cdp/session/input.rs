//! Input (mouse and keyboard) operations for CDP page session.

use serde_json::{Value, json};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEventType, MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    /// Click at coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_move(x, y).await?;
        for event in [MouseEventType::MousePressed, MouseEventType::MouseReleased] {
            self.call(
                "Input.dispatchMouseEvent",
                Some(json!({
                    "type": event,
                    "x": x,
                    "y": y,
                    "button": MouseButton::Left,
                    "clickCount": 1,
                })),
            )
            .await?;
        }

        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Move mouse to coordinates.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseMoved,
                "x": x,
                "y": y,
                "button": MouseButton::None,
            })),
        )
        .await?;
        Ok(())
    }

    /// Scroll by delta at the given point.
    pub async fn scroll(&self, x: f64, y: f64, delta_x: f64, delta_y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": MouseEventType::MouseWheel,
                "x": x,
                "y": y,
                "deltaX": delta_x,
                "deltaY": delta_y,
            })),
        )
        .await?;
        Ok(())
    }

    /// Insert text at the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    /// Press a key or key combination (e.g. "Enter", "Control+a").
    pub async fn press_key(&self, combo: &str) -> Result<(), CdpError> {
        let parts: Vec<&str> = combo.split('+').map(str::trim).collect();
        let (key, modifiers) = match parts.split_last() {
            Some((key, modifiers)) if !key.is_empty() => (*key, get_modifiers(modifiers)),
            _ => return Err(CdpError::InvalidResponse(format!("Invalid key: {:?}", combo))),
        };

        for event in [KeyEventType::KeyDown, KeyEventType::KeyUp] {
            let mut params = key_event_params(key, modifiers);
            params["type"] = json!(event);
            if matches!(event, KeyEventType::KeyUp) {
                if let Some(obj) = params.as_object_mut() {
                    obj.remove("text");
                }
            }
            self.call("Input.dispatchKeyEvent", Some(params)).await?;
        }

        debug!("Pressed {}", combo);
        Ok(())
    }
}

/// Modifier bit flags from modifier names.
pub(super) fn get_modifiers(modifiers: &[&str]) -> i32 {
    let mut flags = 0;
    for m in modifiers {
        match m.to_lowercase().as_str() {
            "alt" => flags |= 1,
            "control" | "ctrl" => flags |= 2,
            "meta" | "command" | "cmd" => flags |= 4,
            "shift" => flags |= 8,
            _ => {}
        }
    }
    flags
}

/// `Input.dispatchKeyEvent` parameters for a key name.
///
/// Named keys need a virtual key code for the page to act on them;
/// single characters carry their text.
pub(super) fn key_event_params(key: &str, modifiers: i32) -> Value {
    let named = match key.to_lowercase().as_str() {
        "enter" | "return" => Some(("Enter", "Enter", 13, Some("\r"))),
        "tab" => Some(("Tab", "Tab", 9, None)),
        "escape" | "esc" => Some(("Escape", "Escape", 27, None)),
        "backspace" => Some(("Backspace", "Backspace", 8, None)),
        "delete" => Some(("Delete", "Delete", 46, None)),
        "arrowup" | "up" => Some(("ArrowUp", "ArrowUp", 38, None)),
        "arrowdown" | "down" => Some(("ArrowDown", "ArrowDown", 40, None)),
        "arrowleft" | "left" => Some(("ArrowLeft", "ArrowLeft", 37, None)),
        "arrowright" | "right" => Some(("ArrowRight", "ArrowRight", 39, None)),
        "pageup" => Some(("PageUp", "PageUp", 33, None)),
        "pagedown" => Some(("PageDown", "PageDown", 34, None)),
        "home" => Some(("Home", "Home", 36, None)),
        "end" => Some(("End", "End", 35, None)),
        "space" => Some((" ", "Space", 32, Some(" "))),
        _ => None,
    };

    let mut params = match named {
        Some((key, code, vk, text)) => {
            let mut p = json!({
                "key": key,
                "code": code,
                "windowsVirtualKeyCode": vk,
            });
            if let Some(text) = text {
                p["text"] = json!(text);
            }
            p
        }
        None => {
            let mut p = json!({"key": key});
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if modifiers & !8 == 0 {
                    p["text"] = json!(c.to_string());
                }
                if c.is_ascii_alphanumeric() {
                    p["windowsVirtualKeyCode"] = json!(c.to_ascii_uppercase() as u32);
                }
            }
            p
        }
    };
    params["modifiers"] = json!(modifiers);
    params
}
