//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into engine input and window events.
//
// Architecture:
//   WindowEvent → InputProcessor → InputEvent      → InputBuffer
//                               → WindowEventKind → channel
//
// Unmapped keys (F-keys, numpad, media keys) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, MouseButton, WindowEventKind};

//=== Translated ==========================================================

/// Result of translating one Winit window event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Translated {
    Input(InputEvent),
    Window(WindowEventKind),
}

//=== InputProcessor ======================================================

/// Stateless translator from Winit events to engine events.
pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Event Processing -------------------------------------------------

    /// Translates a window event. Events the engine ignores return `None`.
    pub(crate) fn translate(event: &WindowEvent) -> Option<Translated> {
        match event {
            WindowEvent::CloseRequested => Some(Translated::Window(WindowEventKind::Close)),
            WindowEvent::Resized(_) => Some(Translated::Window(WindowEventKind::Resize)),
            WindowEvent::Focused(true) => Some(Translated::Window(WindowEventKind::FocusGained)),
            WindowEvent::Focused(false) => Some(Translated::Window(WindowEventKind::FocusLost)),

            WindowEvent::KeyboardInput { event, .. } => {
                Self::process_key_event(event).map(Translated::Input)
            }

            WindowEvent::MouseInput { state, button, .. } => Some(Translated::Input(
                Self::process_mouse_button(*button, *state),
            )),

            WindowEvent::CursorMoved { position, .. } => Some(Translated::Input(
                InputEvent::MouseMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                },
            )),

            _ => None,
        }
    }

    /// Converts a Winit key event (filters unmapped keys).
    pub(crate) fn process_key_event(key_event: &KeyEvent) -> Option<InputEvent> {
        let PhysicalKey::Code(code) = key_event.physical_key else {
            return None;
        };
        Self::key_input(KeyCode::from(code), key_event.state)
    }

    pub(crate) fn process_mouse_button(button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown(button),
            ElementState::Released => InputEvent::MouseButtonUp(button),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_input(key: KeyCode, state: ElementState) -> Option<InputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps letters, arrows and the menu keys. Everything else is
/// `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Backspace => KeyCode::Backspace,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn close_and_focus_become_window_events() {
        assert_eq!(
            InputProcessor::translate(&WindowEvent::CloseRequested),
            Some(Translated::Window(WindowEventKind::Close))
        );
        assert_eq!(
            InputProcessor::translate(&WindowEvent::Focused(false)),
            Some(Translated::Window(WindowEventKind::FocusLost))
        );
        assert_eq!(
            InputProcessor::translate(&WindowEvent::Resized(PhysicalSize::new(288, 512))),
            Some(Translated::Window(WindowEventKind::Resize))
        );
    }

    #[test]
    fn ignored_events_translate_to_none() {
        assert_eq!(InputProcessor::translate(&WindowEvent::RedrawRequested), None);
    }

    #[test]
    fn unidentified_keys_are_filtered() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(
            InputProcessor::key_input(KeyCode::Unidentified, ElementState::Pressed),
            None
        );
    }

    #[test]
    fn key_state_maps_to_edges() {
        assert_eq!(
            InputProcessor::key_input(KeyCode::Space, ElementState::Pressed),
            Some(InputEvent::KeyDown(KeyCode::Space))
        );
        assert_eq!(
            InputProcessor::key_input(KeyCode::Space, ElementState::Released),
            Some(InputEvent::KeyUp(KeyCode::Space))
        );
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyM), KeyCode::KeyM);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowLeft), KeyCode::ArrowLeft);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(
            InputProcessor::process_mouse_button(WinitMouseButton::Left, ElementState::Pressed),
            InputEvent::MouseButtonDown(MouseButton::Left)
        );
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
