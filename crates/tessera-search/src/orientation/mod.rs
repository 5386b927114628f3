//! Edge orientation: background knowledge, unshielded colliders, then Meek rules.

pub mod colliders;
pub mod knowledge;
pub mod meek;

pub use colliders::{orient_colliders, ColliderStats};
pub use knowledge::{apply_background_knowledge, is_arrowhead_allowed, KnowledgeStats};
pub use meek::{meek_orient, MeekRules, MeekStats, Rule};
