//! Provider adaptation table (spec.md §4.4, §6).
//!
//! A small, immutable per-provider tweak table: role-preamble wording,
//! default output format, and whether negative constraints are rewritten
//! to positive form. Populated once at init — the same "small immutable
//! table" discipline as [`crate::schema`]'s registry.

use crate::context::Provider;
use crate::delimiter::Delimiter;

/// Whether a provider prefers constraints phrased positively (`MUST: do X`)
/// or will accept the author's original polarity (`MUST NOT: do Y`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintStyle {
    Positive,
    Negative,
}

/// One provider's adaptation entry (spec.md §6 "Provider adaptation
/// table").
#[derive(Clone, Copy, Debug)]
pub struct ProviderAdaptation {
    pub role_prefix: &'static str,
    pub format_preference: Delimiter,
    pub constraint_style: ConstraintStyle,
}

/// Looks up the adaptation for `provider`. `Unspecified` (and any provider
/// not explicitly named in spec.md §6) gets a neutral default: no role
/// prefix beyond the generic wording, markdown format, and original
/// constraint polarity preserved.
pub fn adaptation_for(provider: Provider) -> ProviderAdaptation {
    match provider {
        Provider::Anthropic => ProviderAdaptation {
            role_prefix: "You are ",
            format_preference: Delimiter::Xml,
            constraint_style: ConstraintStyle::Positive,
        },
        Provider::Openai => ProviderAdaptation {
            role_prefix: "You are ",
            format_preference: Delimiter::Markdown,
            constraint_style: ConstraintStyle::Negative,
        },
        Provider::Google => ProviderAdaptation {
            role_prefix: "Your role: ",
            format_preference: Delimiter::Markdown,
            constraint_style: ConstraintStyle::Positive,
        },
        Provider::Unspecified => ProviderAdaptation {
            role_prefix: "You are ",
            format_preference: Delimiter::Markdown,
            constraint_style: ConstraintStyle::Negative,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anthropic_prefers_xml_and_positive_constraints() {
        let a = adaptation_for(Provider::Anthropic);
        assert_eq!(a.format_preference, Delimiter::Xml);
        assert_eq!(a.constraint_style, ConstraintStyle::Positive);
    }

    #[test]
    fn openai_prefers_markdown_and_negative_constraints() {
        let a = adaptation_for(Provider::Openai);
        assert_eq!(a.format_preference, Delimiter::Markdown);
        assert_eq!(a.constraint_style, ConstraintStyle::Negative);
    }
}
