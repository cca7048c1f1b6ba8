//! Pointer state used for local repulsion.

/// Coordinate used on both axes while the pointer is away. Far enough
/// outside any plausible surface that no particle is ever within repel
/// radius of it.
pub const CURSOR_SENTINEL: f32 = -9999.0;

/// Shared pointer position in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl Cursor {
    /// An inactive cursor parked at the sentinel.
    pub const fn inactive() -> Self {
        Self {
            x: CURSOR_SENTINEL,
            y: CURSOR_SENTINEL,
            active: false,
        }
    }

    /// Activate at a viewport-relative pointer position, translated by the
    /// surface's viewport offset. Positions off the surface are kept as is.
    pub fn move_to(&mut self, client_x: f32, client_y: f32, surface_left: f32, surface_top: f32) {
        self.x = client_x - surface_left;
        self.y = client_y - surface_top;
        self.active = true;
    }

    /// Park at the sentinel.
    pub fn leave(&mut self) {
        *self = Self::inactive();
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::inactive()
    }
}
