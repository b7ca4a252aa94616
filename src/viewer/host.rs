//! Host-side bindings: which window/container listeners the viewer holds,
//! and the container the render surface lives in.

use glam::Vec2;
use rustc_hash::FxHashSet;

use crate::picking::SurfaceRect;

/// Where a host listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostTarget {
    /// The browser-style window (resize, keyboard, sensors).
    Window,
    /// The container holding the render surface (pointer input).
    Container,
}

/// A host event the viewer listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostListener {
    /// Mouse button pressed.
    MouseDown,
    /// Mouse moved.
    MouseMove,
    /// Mouse button released.
    MouseUp,
    /// Touch started.
    TouchStart,
    /// Touch ended.
    TouchEnd,
    /// Window resized.
    Resize,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Device orientation sensor reading.
    DeviceOrientation,
    /// Screen rotation changed.
    OrientationChange,
}

/// Container listeners that make up direct pointer input.
pub const POINTER_LISTENERS: [HostListener; 5] = [
    HostListener::MouseDown,
    HostListener::MouseMove,
    HostListener::MouseUp,
    HostListener::TouchStart,
    HostListener::TouchEnd,
];

/// Window listeners held for the viewer's whole lifetime.
pub const WINDOW_LISTENERS: [HostListener; 5] = [
    HostListener::Resize,
    HostListener::KeyDown,
    HostListener::KeyUp,
    HostListener::DeviceOrientation,
    HostListener::OrientationChange,
];

/// Registry of host listeners the viewer currently holds.
///
/// Input is only routed for registered listeners, so unregistering is what
/// actually detaches the viewer from its host.
#[derive(Debug, Default)]
pub struct HostBindings {
    registered: FxHashSet<(HostTarget, HostListener)>,
}

impl HostBindings {
    /// Shorthand for [`HostTarget::Container`].
    pub const CONTAINER: HostTarget = HostTarget::Container;
    /// Shorthand for [`HostTarget::Window`].
    pub const WINDOW: HostTarget = HostTarget::Window;

    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns `false` if it was already registered.
    pub fn register(
        &mut self,
        target: HostTarget,
        listener: HostListener,
    ) -> bool {
        self.registered.insert((target, listener))
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn unregister(
        &mut self,
        target: HostTarget,
        listener: HostListener,
    ) -> bool {
        self.registered.remove(&(target, listener))
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn is_registered(
        &self,
        target: HostTarget,
        listener: HostListener,
    ) -> bool {
        self.registered.contains(&(target, listener))
    }

    /// Whether the full set of pointer listeners is on the container.
    #[must_use]
    pub fn pointer_registered(&self) -> bool {
        POINTER_LISTENERS
            .iter()
            .all(|l| self.is_registered(HostTarget::Container, *l))
    }

    /// Register every window listener.
    pub fn register_window(&mut self) {
        for listener in WINDOW_LISTENERS {
            let _ = self.register(HostTarget::Window, listener);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Unregister everything.
    pub fn clear(&mut self) {
        self.registered.clear();
    }
}

/// The element hosting the render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    width: u32,
    height: u32,
    /// Auto-created containers always fill the window.
    auto: bool,
    fullscreen: bool,
    /// Size remembered when entering fullscreen.
    saved: Option<(u32, u32)>,
}

impl Container {
    /// A container created by the viewer, sized to the window.
    #[must_use]
    pub fn auto(window: (u32, u32)) -> Self {
        Self {
            width: window.0,
            height: window.1,
            auto: true,
            fullscreen: false,
            saved: None,
        }
    }

    /// A container provided by the host with a fixed size.
    #[must_use]
    pub fn provided(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            auto: false,
            fullscreen: false,
            saved: None,
        }
    }

    /// Whether the viewer created this container.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Current size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width over height, 1.0 for a degenerate size.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Center point, where the reticle samples.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.surface().center()
    }

    /// The render surface placement within the container.
    #[must_use]
    pub fn surface(&self) -> SurfaceRect {
        SurfaceRect::sized(self.width as f32, self.height as f32)
    }

    /// Whether the container is in fullscreen.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Set an explicit size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Follow a window resize. Returns `true` if the container changed.
    pub fn on_window_resize(&mut self, width: u32, height: u32) -> bool {
        if !(self.auto || self.fullscreen) || self.size() == (width, height) {
            return false;
        }
        self.set_size(width, height);
        true
    }

    /// Enter fullscreen (remembering the current size) or leave it
    /// (restoring the remembered size).
    pub fn set_fullscreen(&mut self, fullscreen: bool, window: (u32, u32)) {
        if fullscreen {
            if !self.fullscreen {
                self.saved = Some(self.size());
            }
            self.fullscreen = true;
            self.set_size(window.0, window.1);
        } else {
            self.fullscreen = false;
            if let Some((w, h)) = self.saved.take() {
                self.set_size(w, h);
            }
        }
    }
}
