/// Auxiliary dialogs. Independent of the stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Modal {
    Developer = 0,
    Gallery,
    /// Companion-app promo.
    Promo,
}

impl Modal {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Developer),
            1 => Some(Self::Gallery),
            2 => Some(Self::Promo),
            _ => None,
        }
    }

    fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Open/closed toggles for every modal, packed as bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modals(u32);

impl Modals {
    pub fn open(&mut self, modal: Modal) {
        self.0 |= modal.bit();
    }

    pub fn close(&mut self, modal: Modal) {
        self.0 &= !modal.bit();
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.0 & modal.bit() != 0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }
}
