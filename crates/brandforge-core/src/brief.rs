//! Campaign intelligence briefs: complete-unit validation and patch merge.
//!
//! A brief only ever persists whole. Callers may send partial patches, but
//! the patch is merged onto the stored brief first and the merged object
//! must pass the complete-brief validator; an incomplete merged result
//! rejects the entire update, so partial/invalid brief states never reach
//! storage.

use serde_json::Value as JsonValue;

use crate::defaults;
use crate::error::{Error, Result};
use crate::models::{CampaignBrief, Objection};
use crate::normalize::{read_object, read_string_array_exact, trim_and_clamp, truncate_chars};

static NULL: JsonValue = JsonValue::Null;

fn field<'a>(value: &'a JsonValue, key: &str) -> &'a JsonValue {
    value.get(key).unwrap_or(&NULL)
}

/// A brief with every field optional: the working shape for patches and
/// for merge-then-validate. Field contents are already normalized
/// (trimmed, clamped, arity-checked) by the time they land here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BriefPatch {
    pub angle: Option<String>,
    pub promise: Option<String>,
    pub proof_points: Option<Vec<String>>,
    pub objections: Option<Vec<Objection>>,
    pub pillars: Option<Vec<String>>,
    pub do_list: Option<Vec<String>>,
    pub dont_list: Option<Vec<String>>,
}

impl BriefPatch {
    /// Decompose a stored complete brief so a patch can be overlaid.
    pub fn from_complete(brief: &CampaignBrief) -> Self {
        Self {
            angle: Some(brief.angle.clone()),
            promise: Some(brief.promise.clone()),
            proof_points: Some(brief.proof_points.to_vec()),
            objections: Some(brief.objections.clone()),
            pillars: Some(brief.pillars.to_vec()),
            do_list: Some(brief.do_list.clone()),
            dont_list: Some(brief.dont_list.clone()),
        }
    }

    /// Shallow field overwrite: patched fields win, everything else comes
    /// from `base`.
    pub fn merged_onto(self, base: BriefPatch) -> BriefPatch {
        BriefPatch {
            angle: self.angle.or(base.angle),
            promise: self.promise.or(base.promise),
            proof_points: self.proof_points.or(base.proof_points),
            objections: self.objections.or(base.objections),
            pillars: self.pillars.or(base.pillars),
            do_list: self.do_list.or(base.do_list),
            dont_list: self.dont_list.or(base.dont_list),
        }
    }
}

/// Trim/clamp a do/dont-style list, capping at the max (extra entries are
/// dropped, not rejected). Returns `None` below the minimum.
fn capped_list(value: &JsonValue, min: usize, max: usize, item_max: usize) -> Option<Vec<String>> {
    let entries = value.as_array()?;
    let list: Vec<String> = entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .map(|entry| truncate_chars(entry.trim(), item_max).to_string())
        .filter(|entry| !entry.is_empty())
        .take(max)
        .collect();
    if list.len() < min {
        return None;
    }
    Some(list)
}

/// Read objection/response rows: malformed rows are dropped, the list is
/// capped at the max, and the surviving count must be in range.
fn read_objections(value: &JsonValue) -> Option<Vec<Objection>> {
    let entries = value.as_array()?;

    let objections: Vec<Objection> = entries
        .iter()
        .filter_map(|entry| {
            read_object(entry)?;
            let objection = trim_and_clamp(field(entry, "objection"), defaults::BRIEF_OBJECTION_MAX);
            let response = trim_and_clamp(field(entry, "response"), defaults::BRIEF_RESPONSE_MAX);
            if objection.is_empty() || response.is_empty() {
                return None;
            }
            Some(Objection { objection, response })
        })
        .take(defaults::BRIEF_OBJECTIONS_MAX)
        .collect();

    if objections.len() < defaults::BRIEF_OBJECTIONS_MIN {
        return None;
    }
    Some(objections)
}

/// Lenient extraction of whatever brief fields validate individually.
/// Fields that fail their own shape rule read as absent; the complete
/// validator then decides whether the whole is acceptable.
fn partial_from_value(value: &JsonValue) -> Option<BriefPatch> {
    read_object(value)?;

    let nonempty = |key: &str, max: usize| {
        let v = trim_and_clamp(field(value, key), max);
        if v.is_empty() {
            None
        } else {
            Some(v)
        }
    };

    Some(BriefPatch {
        angle: nonempty("angle", defaults::BRIEF_ANGLE_MAX),
        promise: nonempty("promise", defaults::BRIEF_PROMISE_MAX),
        proof_points: read_string_array_exact(
            field(value, "proofPoints"),
            defaults::BRIEF_PROOF_POINT_COUNT,
            defaults::BRIEF_PROOF_POINT_MAX,
        ),
        objections: read_objections(field(value, "objections")),
        pillars: read_string_array_exact(
            field(value, "pillars"),
            defaults::BRIEF_PILLAR_COUNT,
            defaults::BRIEF_PILLAR_MAX,
        ),
        do_list: capped_list(
            field(value, "do"),
            defaults::BRIEF_LIST_MIN,
            defaults::BRIEF_LIST_MAX,
            defaults::BRIEF_LIST_ITEM_MAX,
        ),
        dont_list: capped_list(
            field(value, "dont"),
            defaults::BRIEF_LIST_MIN,
            defaults::BRIEF_LIST_MAX,
            defaults::BRIEF_LIST_ITEM_MAX,
        ),
    })
}

/// The complete-brief validator: every field present and within arity.
/// This is the single gate in front of persistence: both generator
/// output and merged user patches go through it.
pub fn validate_complete_brief(partial: &BriefPatch) -> Option<CampaignBrief> {
    let angle = partial.angle.clone()?;
    let promise = partial.promise.clone()?;
    let proof_points = partial.proof_points.clone()?;
    let objections = partial.objections.clone()?;
    let pillars = partial.pillars.clone()?;
    let do_list = partial.do_list.clone()?;
    let dont_list = partial.dont_list.clone()?;

    if proof_points.len() != defaults::BRIEF_PROOF_POINT_COUNT
        || pillars.len() != defaults::BRIEF_PILLAR_COUNT
    {
        return None;
    }
    if objections.len() < defaults::BRIEF_OBJECTIONS_MIN
        || objections.len() > defaults::BRIEF_OBJECTIONS_MAX
    {
        return None;
    }
    if do_list.len() < defaults::BRIEF_LIST_MIN || do_list.len() > defaults::BRIEF_LIST_MAX {
        return None;
    }
    if dont_list.len() < defaults::BRIEF_LIST_MIN || dont_list.len() > defaults::BRIEF_LIST_MAX {
        return None;
    }

    Some(CampaignBrief {
        angle,
        promise,
        proof_points: proof_points.try_into().ok()?,
        objections,
        pillars: pillars.try_into().ok()?,
        do_list,
        dont_list,
    })
}

/// Read a complete brief from untrusted JSON (generator output or a stored
/// `intelligence.brief`). `None` unless the whole unit validates.
pub fn read_brief(value: &JsonValue) -> Option<CampaignBrief> {
    validate_complete_brief(&partial_from_value(value)?)
}

/// Read a user-supplied brief patch, field-wise, with descriptive errors.
/// A present-but-invalid field is an error (unlike [`read_brief`], which
/// is lenient; a patch is an explicit request and gets explicit feedback).
pub fn read_brief_patch(value: &JsonValue) -> Result<BriefPatch> {
    let obj =
        read_object(value).ok_or_else(|| Error::InvalidInput("brief is required.".to_string()))?;

    let mut patch = BriefPatch::default();
    let mut touched = false;

    if obj.contains_key("angle") {
        let angle = trim_and_clamp(field(value, "angle"), defaults::BRIEF_ANGLE_MAX);
        if angle.is_empty() {
            return Err(Error::InvalidInput("angle is required.".to_string()));
        }
        patch.angle = Some(angle);
        touched = true;
    }

    if obj.contains_key("promise") {
        let promise = trim_and_clamp(field(value, "promise"), defaults::BRIEF_PROMISE_MAX);
        if promise.is_empty() {
            return Err(Error::InvalidInput("promise is required.".to_string()));
        }
        patch.promise = Some(promise);
        touched = true;
    }

    if obj.contains_key("proofPoints") {
        let proof_points = read_string_array_exact(
            field(value, "proofPoints"),
            defaults::BRIEF_PROOF_POINT_COUNT,
            defaults::BRIEF_PROOF_POINT_MAX,
        )
        .ok_or_else(|| {
            Error::InvalidInput("proofPoints must contain exactly 3 items.".to_string())
        })?;
        patch.proof_points = Some(proof_points);
        touched = true;
    }

    if obj.contains_key("pillars") {
        let pillars = read_string_array_exact(
            field(value, "pillars"),
            defaults::BRIEF_PILLAR_COUNT,
            defaults::BRIEF_PILLAR_MAX,
        )
        .ok_or_else(|| Error::InvalidInput("pillars must contain exactly 3 items.".to_string()))?;
        patch.pillars = Some(pillars);
        touched = true;
    }

    if obj.contains_key("objections") {
        if !field(value, "objections").is_array() {
            return Err(Error::InvalidInput("objections must be an array.".to_string()));
        }
        let objections = read_objections(field(value, "objections")).ok_or_else(|| {
            Error::InvalidInput("objections must contain 2 to 3 rows.".to_string())
        })?;
        patch.objections = Some(objections);
        touched = true;
    }

    if obj.contains_key("do") {
        let do_list = capped_list(
            field(value, "do"),
            defaults::BRIEF_LIST_MIN,
            defaults::BRIEF_LIST_MAX,
            defaults::BRIEF_LIST_ITEM_MAX,
        )
        .ok_or_else(|| Error::InvalidInput("do must contain at least 3 items.".to_string()))?;
        patch.do_list = Some(do_list);
        touched = true;
    }

    if obj.contains_key("dont") {
        let dont_list = capped_list(
            field(value, "dont"),
            defaults::BRIEF_LIST_MIN,
            defaults::BRIEF_LIST_MAX,
            defaults::BRIEF_LIST_ITEM_MAX,
        )
        .ok_or_else(|| Error::InvalidInput("dont must contain at least 3 items.".to_string()))?;
        patch.dont_list = Some(dont_list);
        touched = true;
    }

    if !touched {
        return Err(Error::InvalidInput("brief patch is empty.".to_string()));
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_brief_value() -> JsonValue {
        json!({
            "angle": "Position the product as the calm choice.",
            "promise": "Less noise, more signal.",
            "proofPoints": ["10k teams", "4.8 rating", "SOC2"],
            "objections": [
                {"objection": "Too expensive", "response": "Saves 3h weekly"},
                {"objection": "Hard to switch", "response": "Importer does it"}
            ],
            "pillars": ["Calm", "Craft", "Clarity"],
            "do": ["Be concrete", "Name the user", "Show the work"],
            "dont": ["No hype", "No jargon", "No filler"]
        })
    }

    #[test]
    fn test_read_brief_complete() {
        let brief = read_brief(&complete_brief_value()).unwrap();
        assert_eq!(brief.proof_points.len(), 3);
        assert_eq!(brief.objections.len(), 2);
        assert_eq!(brief.do_list.len(), 3);
    }

    #[test]
    fn test_read_brief_rejects_missing_field() {
        let mut value = complete_brief_value();
        value.as_object_mut().unwrap().remove("promise");
        assert!(read_brief(&value).is_none());
    }

    #[test]
    fn test_read_brief_rejects_wrong_arity() {
        let mut value = complete_brief_value();
        value["proofPoints"] = json!(["only", "two"]);
        assert!(read_brief(&value).is_none());

        let mut value = complete_brief_value();
        value["objections"] = json!([{"objection": "one", "response": "row"}]);
        assert!(read_brief(&value).is_none());

        let mut value = complete_brief_value();
        value["do"] = json!(["just", "two"]);
        assert!(read_brief(&value).is_none());
    }

    #[test]
    fn test_read_brief_caps_overlong_lists() {
        let mut value = complete_brief_value();
        value["dont"] = json!(["1", "2", "3", "4", "5", "6", "7", "8"]);
        let brief = read_brief(&value).unwrap();
        assert_eq!(brief.dont_list.len(), 6);

        let mut value = complete_brief_value();
        value["objections"] = json!([
            {"objection": "a", "response": "ra"},
            {"objection": "b", "response": "rb"},
            {"objection": "c", "response": "rc"},
            {"objection": "d", "response": "rd"}
        ]);
        let brief = read_brief(&value).unwrap();
        assert_eq!(brief.objections.len(), 3);
    }

    #[test]
    fn test_patch_only_proof_points_onto_empty_fails() {
        let patch = read_brief_patch(&json!({
            "proofPoints": ["one", "two", "three"]
        }))
        .unwrap();

        let merged = patch.merged_onto(BriefPatch::default());
        assert!(validate_complete_brief(&merged).is_none());
    }

    #[test]
    fn test_patch_onto_complete_brief_preserves_unpatched_fields() {
        let existing = read_brief(&complete_brief_value()).unwrap();
        let patch = read_brief_patch(&json!({
            "proofPoints": ["New A", "New B", "New C"]
        }))
        .unwrap();

        let merged = patch.merged_onto(BriefPatch::from_complete(&existing));
        let brief = validate_complete_brief(&merged).unwrap();
        assert_eq!(brief.proof_points[0], "New A");
        assert_eq!(brief.angle, existing.angle);
        assert_eq!(brief.objections, existing.objections);
        assert_eq!(brief.dont_list, existing.dont_list);
    }

    #[test]
    fn test_patch_errors_are_descriptive() {
        let err = read_brief_patch(&json!(null)).unwrap_err();
        assert!(err.to_string().contains("brief is required."));

        let err = read_brief_patch(&json!({"angle": "  "})).unwrap_err();
        assert!(err.to_string().contains("angle is required."));

        let err = read_brief_patch(&json!({"proofPoints": ["a"]})).unwrap_err();
        assert!(err.to_string().contains("exactly 3"));

        let err = read_brief_patch(&json!({"objections": "rows"})).unwrap_err();
        assert!(err.to_string().contains("must be an array"));

        let err = read_brief_patch(&json!({"do": ["only", "two"]})).unwrap_err();
        assert!(err.to_string().contains("at least 3"));

        let err = read_brief_patch(&json!({})).unwrap_err();
        assert!(err.to_string().contains("brief patch is empty."));
    }

    #[test]
    fn test_patch_clamps_field_lengths() {
        let long = "x".repeat(400);
        let patch = read_brief_patch(&json!({"angle": long})).unwrap();
        assert_eq!(patch.angle.unwrap().len(), defaults::BRIEF_ANGLE_MAX);
    }
}
