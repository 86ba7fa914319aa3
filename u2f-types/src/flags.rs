use bitflags::bitflags;

bitflags! {
    /// The packed flags byte carried by an authentication response.
    ///
    /// Only user presence is defined by U2F. Bit 1 is reserved for the transfer access
    /// extension and is retained when parsing so that a flags byte always round-trips.
    #[repr(transparent)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct ControlFlags: u8 {
        /// User Present, bit 0
        const USER_PRESENCE = 1 << 0;
        /// Transfer Access Message, bit 1
        const TRANSFER_ACCESS = 1 << 1;

        // Unknown bits are kept as-is
        const _ = !0;
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        ControlFlags::USER_PRESENCE
    }
}

impl ControlFlags {
    /// Whether the user presence bit is set.
    pub fn user_present(&self) -> bool {
        self.contains(ControlFlags::USER_PRESENCE)
    }
}

impl From<ControlFlags> for u8 {
    fn from(src: ControlFlags) -> Self {
        src.bits()
    }
}

impl From<u8> for ControlFlags {
    fn from(value: u8) -> Self {
        ControlFlags::from_bits_retain(value)
    }
}
