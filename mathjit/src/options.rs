//! Compilation options.

use std::ops::{BitOr, BitOrAssign};

/// A bitset of compilation options. Unknown bits are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options(u32);

impl Options {
    /// No options.
    pub const NONE: Options = Options(0);
    /// Emit warnings through the output log, not just errors.
    pub const VERBOSE: Options = Options(1);
    /// Emit the syntax tree before and after optimization.
    pub const DEBUG_AST: Options = Options(2);
    /// Emit the compiled program listing.
    pub const DEBUG_MACHINE_CODE: Options = Options(4);

    /// Builds options from raw bits. Bits without a meaning are kept but
    /// never consulted.
    pub fn from_bits(bits: u32) -> Options {
        Options(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Options) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_when_combined_then_both_set() {
        let options = Options::VERBOSE | Options::DEBUG_AST;
        assert!(options.contains(Options::VERBOSE));
        assert!(options.contains(Options::DEBUG_AST));
        assert!(!options.contains(Options::DEBUG_MACHINE_CODE));
    }

    #[test]
    fn from_bits_when_unknown_bits_then_preserved_but_harmless() {
        let options = Options::from_bits(0xFF00 | 1);
        assert!(options.contains(Options::VERBOSE));
        assert!(!options.contains(Options::DEBUG_AST));
    }
}
