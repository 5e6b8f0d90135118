//! Avoid-word policy: detection and deterministic sanitization.
//!
//! Generated copy must never contain a brand's avoid words. Detection is a
//! case-insensitive substring scan over every generated text facet. When
//! the generative retry also violates, the mechanical sanitizer takes
//! over: strip every occurrence, clean up the whitespace and punctuation
//! damage, clamp to the facet's length bound, and substitute canned copy
//! if a field empties out. The sanitizer is guaranteed-safe: its output
//! never contains an avoid word and never leaves a field blank.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::defaults;
use crate::models::{Caption, CaptionOutput, CaptionOutputV2, Hook, VariantMode};

static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("static pattern"));
static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,.!?;:])").expect("static pattern"));

/// Case-insensitive substring test against a word list.
pub fn contains_avoid_word(text: &str, avoid_words: &[String]) -> bool {
    if avoid_words.is_empty() {
        return false;
    }
    let normalized = text.to_lowercase();
    avoid_words
        .iter()
        .any(|word| normalized.contains(&word.to_lowercase()))
}

fn v2_texts(output: &CaptionOutputV2) -> Vec<&str> {
    let mut texts: Vec<&str> = vec![output.angle.as_str()];
    texts.extend(output.hooks.iter().map(|h| h.text.as_str()));
    for caption in &output.captions {
        texts.push(caption.text.as_str());
        texts.push(caption.cta_line.as_str());
    }
    texts
}

/// Scan all generated text facets of an output for avoid words.
pub fn output_has_avoid_words(output: &CaptionOutput, avoid_words: &[String]) -> bool {
    if avoid_words.is_empty() {
        return false;
    }
    match output {
        CaptionOutput::V2(v2) => v2_texts(v2)
            .into_iter()
            .any(|text| contains_avoid_word(text, avoid_words)),
        CaptionOutput::V1(v1) => v1
            .hooks
            .iter()
            .chain(v1.captions.iter())
            .any(|text| contains_avoid_word(text, avoid_words)),
    }
}

/// Scan only the facet a variant regenerated. Unmodified parent facets are
/// already compliant and are not re-checked.
pub fn facet_has_avoid_words(
    output: &CaptionOutputV2,
    mode: VariantMode,
    avoid_words: &[String],
) -> bool {
    if avoid_words.is_empty() {
        return false;
    }
    match mode {
        VariantMode::HooksOnly => output
            .hooks
            .iter()
            .any(|h| contains_avoid_word(&h.text, avoid_words)),
        VariantMode::CaptionsOnly => output.captions.iter().any(|c| {
            contains_avoid_word(&c.text, avoid_words) || contains_avoid_word(&c.cta_line, avoid_words)
        }),
        VariantMode::CtasOnly => output
            .captions
            .iter()
            .any(|c| contains_avoid_word(&c.cta_line, avoid_words)),
    }
}

/// Strip every avoid-word occurrence from one field, repair the text, and
/// fall back to canned copy if nothing survives.
pub fn sanitize_entry(value: &str, avoid_words: &[String], max_len: usize, fallback: &str) -> String {
    let mut next = value.to_string();

    for word in avoid_words {
        if let Ok(pattern) = Regex::new(&format!("(?i){}", regex::escape(word))) {
            next = pattern.replace_all(&next, "").into_owned();
        }
    }

    let next = MULTI_SPACE.replace_all(&next, " ");
    let next = SPACE_BEFORE_PUNCT.replace_all(&next, "$1");
    let next = crate::normalize::truncate_chars(next.trim(), max_len);

    if next.is_empty() {
        fallback.to_string()
    } else {
        next.to_string()
    }
}

fn sanitize_v2(mut output: CaptionOutputV2, avoid_words: &[String]) -> CaptionOutputV2 {
    output.angle = sanitize_entry(
        &output.angle,
        avoid_words,
        defaults::ANGLE_MAX,
        defaults::ANGLE_FALLBACK,
    );

    let mut slot = 0;
    output.hooks = output.hooks.map(|hook| {
        let sanitized = Hook {
            style: hook.style,
            text: sanitize_entry(
                &hook.text,
                avoid_words,
                defaults::HOOK_TEXT_MAX,
                defaults::HOOK_FALLBACKS[slot],
            ),
        };
        slot += 1;
        sanitized
    });

    let mut slot = 0;
    output.captions = output.captions.map(|caption| {
        let sanitized = Caption {
            text: sanitize_entry(
                &caption.text,
                avoid_words,
                defaults::CAPTION_TEXT_MAX,
                defaults::CAPTION_FALLBACKS[slot],
            ),
            cta_line: sanitize_entry(
                &caption.cta_line,
                avoid_words,
                defaults::CTA_LINE_MAX,
                defaults::CTA_LINE_FALLBACK,
            ),
        };
        slot += 1;
        sanitized
    });

    output
}

/// Sanitize every generated facet of an output.
pub fn sanitize_output(output: CaptionOutput, avoid_words: &[String]) -> CaptionOutput {
    match output {
        CaptionOutput::V2(v2) => CaptionOutput::V2(sanitize_v2(v2, avoid_words)),
        CaptionOutput::V1(mut v1) => {
            let mut slot = 0;
            v1.hooks = v1.hooks.map(|hook| {
                let sanitized = sanitize_entry(
                    &hook,
                    avoid_words,
                    defaults::HOOK_V1_MAX,
                    defaults::HOOK_FALLBACKS[slot],
                );
                slot += 1;
                sanitized
            });
            let mut slot = 0;
            v1.captions = v1.captions.map(|caption| {
                let sanitized = sanitize_entry(
                    &caption,
                    avoid_words,
                    defaults::CAPTION_TEXT_MAX,
                    defaults::CAPTION_FALLBACKS[slot],
                );
                slot += 1;
                sanitized
            });
            CaptionOutput::V1(v1)
        }
    }
}

/// Sanitize only the facet a variant regenerated, leaving parent-copied
/// facets untouched.
pub fn sanitize_facet(
    mut output: CaptionOutputV2,
    mode: VariantMode,
    avoid_words: &[String],
) -> CaptionOutputV2 {
    match mode {
        VariantMode::HooksOnly => {
            let mut slot = 0;
            output.hooks = output.hooks.map(|hook| {
                let sanitized = Hook {
                    style: hook.style,
                    text: sanitize_entry(
                        &hook.text,
                        avoid_words,
                        defaults::HOOK_TEXT_MAX,
                        defaults::HOOK_FALLBACKS[slot],
                    ),
                };
                slot += 1;
                sanitized
            });
        }
        VariantMode::CaptionsOnly => {
            let mut slot = 0;
            output.captions = output.captions.map(|caption| {
                let sanitized = Caption {
                    text: sanitize_entry(
                        &caption.text,
                        avoid_words,
                        defaults::CAPTION_TEXT_MAX,
                        defaults::CAPTION_FALLBACKS[slot],
                    ),
                    cta_line: sanitize_entry(
                        &caption.cta_line,
                        avoid_words,
                        defaults::CTA_LINE_MAX,
                        defaults::CTA_LINE_FALLBACK,
                    ),
                };
                slot += 1;
                sanitized
            });
        }
        VariantMode::CtasOnly => {
            output.captions = output.captions.map(|caption| Caption {
                text: caption.text,
                cta_line: sanitize_entry(
                    &caption.cta_line,
                    avoid_words,
                    defaults::CTA_LINE_MAX,
                    defaults::CTA_LINE_FALLBACK,
                ),
            });
        }
    }
    output
}
