// patterns.rs - Catalog of well-known apgcodes

use crate::apg::{ApgCode, ApgError};

pub struct Pattern {
    pub name: &'static str,
    pub apgcode: &'static str,
}

impl Pattern {
    pub fn parse(&self) -> Result<ApgCode, ApgError> {
        ApgCode::parse(self.apgcode)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern { name: "Block",    apgcode: "xs4_33" },
    Pattern { name: "Beehive",  apgcode: "xs6_696" },
    Pattern { name: "Blinker",  apgcode: "xp2_7" },
    Pattern { name: "Toad",     apgcode: "xp2_7e" },
    Pattern { name: "Beacon",   apgcode: "xp2_318c" },
    Pattern { name: "Pulsar",   apgcode: "xp3_co9nas0san9oczgoldlo0oldlogz1047210127401" },
    Pattern { name: "Glider",   apgcode: "xq4_153" },
    Pattern { name: "LWSS",     apgcode: "xq4_6frc" },
];

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
