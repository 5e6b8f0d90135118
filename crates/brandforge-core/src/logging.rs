//! Structured logging schema and field name constants for brandforge.
//!
//! All crates use these constants for consistent structured logging fields
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied (e.g. sanitizer) |
//! | INFO  | Lifecycle events, operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across request → generation → persistence.
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "db", "inference", "core"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "asset_service", "openai", "pool", "sanitizer"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "caption_pack", "variant_caption_pack", "generate_brief"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Brand kit UUID being operated on.
pub const KIT_ID: &str = "kit_id";

/// Owner identifier (record-store key, never logged with PII beyond the id).
pub const OWNER_ID: &str = "owner_id";

/// Campaign id inside a kit document.
pub const CAMPAIGN_ID: &str = "campaign_id";

/// Asset item id inside a campaign.
pub const ITEM_ID: &str = "item_id";

/// Document meta version after a write.
pub const DOC_VERSION: &str = "doc_version";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of avoid-word hits found by the policy scan.
pub const POLICY_HITS: &str = "policy_hits";

/// Generation attempt number (1 = first call, 2 = policy retry).
pub const ATTEMPT: &str = "attempt";
