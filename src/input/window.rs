//! Conversion of winit window events into [`InputEvent`]s.

use glam::Vec2;
use winit::event::{
    ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase,
    WindowEvent,
};

use super::event::{InputEvent, PointerEvent, PointerPhase};

/// Tracks the cursor so button events carry a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInput {
    cursor: Vec2,
}

impl WinitInput {
    /// Adapter with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Returns `None` for events the viewer
    /// does not consume.
    pub fn convert(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let event =
                    PointerEvent::mouse(PointerPhase::Move, self.cursor);
                Some(event.into())
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let phase = match state {
                    ElementState::Pressed => PointerPhase::Down,
                    ElementState::Released => PointerPhase::Up,
                };
                Some(PointerEvent::mouse(phase, self.cursor).into())
            }
            WindowEvent::Touch(Touch {
                phase, location, ..
            }) => {
                let position =
                    Vec2::new(location.x as f32, location.y as f32);
                let phase = match phase {
                    TouchPhase::Started => PointerPhase::Down,
                    TouchPhase::Moved => PointerPhase::Move,
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        PointerPhase::Up
                    }
                };
                Some(PointerEvent::touch(phase, position).into())
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                Some(InputEvent::Scroll { delta })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                Some(InputEvent::ModifiersChanged {
                    control: modifiers.state().control_key(),
                })
            }
            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}
