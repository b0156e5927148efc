//! High-level runtime engine settings
//!
//! Selects the force model, parallel evaluation, the SOI parent rule and
//! primary recoil used when building and running a `Scenario`

use serde::Deserialize;

use super::soi::ParentRule;

/// Which force model drives the bodies
/// force_model: "full-nbody" or force_model: "patched-conic"
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceModel {
    #[serde(rename = "full-nbody")] // every body and the primary pull on every body
    FullNBody,

    #[serde(rename = "patched-conic")] // each body only feels its SOI parent
    PatchedConic,
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub force_model: ForceModel,
    pub parallel: bool, // rayon evaluation, full N-body only
    pub parent_rule: ParentRule, // patched-conic only
    pub primary_recoil: bool, // full N-body only, off keeps the star at the origin
}

impl Engine {
    /// Whether parents are resolved at run start and report boundaries
    pub fn resolves_soi(&self) -> bool {
        self.force_model == ForceModel::PatchedConic
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            force_model: ForceModel::FullNBody,
            parallel: false,
            parent_rule: ParentRule::default(),
            primary_recoil: false,
        }
    }
}
