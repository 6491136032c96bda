//! ERC-165 interface identifiers of the Sound protocol contracts
//!
//! Literal selectors, used by on-chain `supportsInterface` checks to tell
//! edition and minter contract versions apart.

use std::fmt;
use std::str::FromStr;

use crate::error::SoundError;

macro_rules! interface_ids {
    ($($(#[$doc:meta])* $name:ident => $id:literal,)+) => {
        /// Named Sound contract interface
        #[allow(non_camel_case_types)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum InterfaceId {
            $($(#[$doc])* $name,)+
        }

        /// Every interface name paired with its `0x`-prefixed selector
        pub const INTERFACE_IDS: &[(&str, &str)] = &[$((stringify!($name), $id),)+];

        impl InterfaceId {
            /// Every interface, in declaration order
            pub const ALL: &'static [InterfaceId] = &[$(InterfaceId::$name,)+];

            /// Interface name as used in the Solidity sources
            pub fn name(self) -> &'static str {
                match self {
                    $(InterfaceId::$name => stringify!($name),)+
                }
            }

            /// Selector as a `0x`-prefixed lower-case hex string
            pub fn hex(self) -> &'static str {
                match self {
                    $(InterfaceId::$name => $id,)+
                }
            }
        }
    };
}

interface_ids! {
    ISoundEditionV1 => "0x50899e54",
    ISoundEditionV1_2 => "0xa176eca6",
    IMinterModule => "0x37c74bd8",
    IFixedPriceSignatureMinter => "0xa61bd96f",
    IMerkleDropMinter => "0x89691c4c",
    IEditionMaxMinter => "0xa7ea8688",
    IRangeEditionMinter => "0x4d4a2e35",
    IMinterModuleV2 => "0xf8ccd08e",
    IFixedPriceSignatureMinterV2 => "0x0f713f15",
    IMerkleDropMinterV2 => "0x5e9a2e5f",
    IEditionMaxMinterV2 => "0x6ee3f258",
    IRangeEditionMinterV2 => "0x84435ae5",
    IMinterModuleV2_1 => "0x09d98f1e",
    IFixedPriceSignatureMinterV2_1 => "0x32c3f8e7",
    IMerkleDropMinterV2_1 => "0x6328e9ad",
    IEditionMaxMinterV2_1 => "0x535135aa",
    IRangeEditionMinterV2_1 => "0xb9f19d17",
    /// Sound Automated Market
    ISAM => "0xa3c2dbc7",
    ISAMV1_1 => "0x212580d2",
}

impl InterfaceId {
    /// Selector as the four bytes passed to `supportsInterface(bytes4)`
    pub fn selector(self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        // Literals above are always 0x + 8 hex digits.
        hex::decode_to_slice(&self.hex()[2..], &mut bytes).unwrap_or_default();
        bytes
    }

    /// Look up an interface by its 4-byte selector
    pub fn from_selector(selector: [u8; 4]) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.selector() == selector)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterfaceId {
    type Err = SoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| SoundError::configuration(format!("unknown interface: {s}")))
    }
}
