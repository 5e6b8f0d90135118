//! # brandforge-core
//!
//! Core types, readers/writers, and abstractions for the brandforge
//! brand-kit system.
//!
//! The central design is a schema-less, versioned JSON document per brand
//! that accumulates palette, profile, voice, and campaigns of generated
//! caption-pack assets. Documents carry multiple historical shapes and are
//! never migrated in place, so this crate reconstructs typed values
//! defensively on every read and merges fragments on write with a
//! monotonic version bump.

pub mod brief;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod policy;
pub mod readers;
pub mod traits;
pub mod variant;
pub mod writers;

// Re-export commonly used types at crate root
pub use brief::{read_brief, read_brief_patch, validate_complete_brief, BriefPatch};
pub use error::{Error, Result};
pub use models::*;
pub use normalize::{
    clamp_percent, looks_like_hex, normalize_word_list, read_object, read_string_array_exact,
    read_string_list, read_timestamp, trim_and_clamp, truncate_chars,
};
pub use policy::{
    contains_avoid_word, facet_has_avoid_words, output_has_avoid_words, sanitize_entry,
    sanitize_facet, sanitize_output,
};
pub use readers::{
    read_asset_campaigns, read_brand_palette, read_brand_voice, read_caption_output_v2,
    read_caption_pack, read_constraints, read_meta, read_profile,
};
pub use traits::{GenerationBackend, KitRepository};
pub use variant::{find_variant_parent, merge_variant_output};
pub use writers::{new_kit_document, save_campaigns, save_profile, save_voice, update_meta, MetaStamp};
