//! Special-token roles and the maps keyed by them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural role a reserved token can play.
///
/// Declaration order is the serialization order of the maps below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialRole {
    Unk,
    Pad,
    Bos,
    Eos,
    Cls,
    Sep,
    Mask,
}

impl SpecialRole {
    /// Every role, in lookup order.
    pub const ALL: [SpecialRole; 7] = [
        SpecialRole::Unk,
        SpecialRole::Pad,
        SpecialRole::Bos,
        SpecialRole::Eos,
        SpecialRole::Cls,
        SpecialRole::Sep,
        SpecialRole::Mask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SpecialRole::Unk => "unk",
            SpecialRole::Pad => "pad",
            SpecialRole::Bos => "bos",
            SpecialRole::Eos => "eos",
            SpecialRole::Cls => "cls",
            SpecialRole::Sep => "sep",
            SpecialRole::Mask => "mask",
        }
    }

    /// Config field holding the role's id directly, e.g. `bos_token_id`.
    pub fn id_key(self) -> String {
        format!("{}_token_id", self.as_str())
    }

    /// Config field holding the role's token text, e.g. `bos_token`.
    pub fn token_key(self) -> String {
        format!("{}_token", self.as_str())
    }

    /// Config field saying whether the token is inserted on encode, e.g. `add_bos_token`.
    pub fn add_key(self) -> String {
        format!("add_{}_token", self.as_str())
    }
}

impl fmt::Display for SpecialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved role -> token id. Unresolved roles are absent.
pub type SpecialTokenIds = BTreeMap<SpecialRole, u32>;

/// Role -> "insert automatically" flag. Absent means unspecified.
pub type SpecialTokenFlags = BTreeMap<SpecialRole, bool>;
