/// Logical buttons the game reacts to. The host maps raw keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

pub const BUTTON_COUNT: usize = 4;

impl Button {
    pub const ALL: [Self; BUTTON_COUNT] = [Self::Left, Self::Up, Self::Right, Self::Down];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-button press counters.
///
/// A key-down (including auto-repeat) bumps the counter, saturating at
/// `i32::MAX`; a key-up zeroes it. Non-zero means held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    counters: [u32; BUTTON_COUNT],
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        let c = &mut self.counters[button.index()];
        if *c < i32::MAX as u32 {
            *c += 1;
        }
    }

    pub fn release(&mut self, button: Button) {
        self.counters[button.index()] = 0;
    }

    pub fn release_all(&mut self) {
        self.counters = [0; BUTTON_COUNT];
    }

    /// Press count since the last release
    #[inline]
    pub fn count(&self, button: Button) -> u32 {
        self.counters[button.index()]
    }

    #[inline]
    pub fn held(&self, button: Button) -> bool {
        self.count(button) > 0
    }

    #[inline]
    pub fn any_held(&self) -> bool {
        self.counters.iter().any(|&c| c > 0)
    }
}
