//! Template normalization
//!
//! Turns a [`ParsedTemplate`] into a [`TranslationDraft`]: components keyed
//! `header`, `body`, `footer` and `button.N`, each with its content and the
//! parameter types its placeholders expect.

pub mod placeholders;

use thiserror::Error;

use crate::entities::{
    Components, NormalizedComponent, ParamDescriptor, ParamKind, TranslationDraft,
    TranslationStatus,
};
use crate::value_objects::Locale;
use crate::vendor::{
    ButtonKind, ComponentKind, HeaderFormat, ParsedButton, ParsedComponent, ParsedTemplate,
    VariableScope, VendorProfile,
};

/// Why a vendor template entry is not stored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("unsupported language: {0}")]
    UnknownLanguage(String),
}

/// A template entry ready for reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTemplate {
    pub name: String,
    pub category: String,
    pub draft: TranslationDraft,
}

/// Normalize one parsed template
///
/// `default_namespace` is used when the payload carries none.
pub fn normalize_template(
    profile: &VendorProfile,
    parsed: &ParsedTemplate,
    default_namespace: &str,
) -> Result<NormalizedTemplate, SkipReason> {
    let status = TranslationStatus::from_vendor(&parsed.status)
        .ok_or_else(|| SkipReason::UnknownStatus(parsed.status.clone()))?;
    let locale = Locale::from_vendor(&parsed.language)
        .ok_or_else(|| SkipReason::UnknownLanguage(parsed.language.clone()))?;

    let (components, supported) = normalize_components(&parsed.components);
    let status = if supported {
        status
    } else {
        TranslationStatus::UnsupportedComponents
    };

    let variable_count = variable_count(profile.variable_scope, &parsed.components);

    Ok(NormalizedTemplate {
        name: parsed.name.clone(),
        category: parsed.category.clone(),
        draft: TranslationDraft {
            locale,
            status,
            external_id: profile.external_id.resolve(parsed),
            external_locale: parsed.language.clone(),
            namespace: parsed
                .namespace
                .clone()
                .unwrap_or_else(|| default_namespace.to_string()),
            components,
            variable_count: i32::try_from(variable_count).unwrap_or(i32::MAX),
        },
    })
}

/// Normalized components and whether every one of them is supported
fn normalize_components(parsed: &[ParsedComponent]) -> (Components, bool) {
    let mut components = Components::new();
    let mut supported = true;
    let mut button_index = 0usize;

    for component in parsed {
        match &component.kind {
            ComponentKind::Buttons => {
                for button in &component.buttons {
                    let (normalized, ok) = normalize_button(button);
                    supported &= ok;
                    components.insert(format!("button.{button_index}"), normalized);
                    button_index += 1;
                }
            }
            ComponentKind::Unknown(raw) => {
                supported = false;
                components.insert(
                    raw.clone(),
                    NormalizedComponent {
                        content: component.text.clone().unwrap_or_default(),
                        kind: raw.clone(),
                        display: None,
                        params: Vec::new(),
                    },
                );
            }
            kind @ (ComponentKind::Header | ComponentKind::Body | ComponentKind::Footer) => {
                // Missing text means a part we can't render, e.g. a media header
                let content = component.text.clone().unwrap_or_default();
                supported &= component.text.is_some();

                let params = match (kind, &component.format) {
                    (ComponentKind::Header, Some(format)) if component.text.is_none() => {
                        media_param(format).into_iter().collect()
                    }
                    _ => text_params(&content),
                };

                components.insert(
                    kind.as_str().to_string(),
                    NormalizedComponent {
                        content,
                        kind: kind.as_str().to_string(),
                        display: None,
                        params,
                    },
                );
            }
        }
    }

    (components, supported)
}

/// Normalized button and whether its kind is supported
fn normalize_button(button: &ParsedButton) -> (NormalizedComponent, bool) {
    let kind = button.kind.as_str().to_string();

    let normalized = match &button.kind {
        ButtonKind::Url => {
            let url = button.url.clone().unwrap_or_default();
            let params = repeat_params(placeholders::occurrences(&url).len(), ParamKind::Url);
            NormalizedComponent {
                content: url,
                kind,
                display: Some(button.text.clone()),
                params,
            }
        }
        ButtonKind::QuickReply => NormalizedComponent {
            content: button.text.clone(),
            kind,
            display: None,
            params: text_params(&button.text),
        },
        ButtonKind::PhoneNumber | ButtonKind::Otp | ButtonKind::Unknown(_) => NormalizedComponent {
            content: button.text.clone(),
            kind,
            display: None,
            params: Vec::new(),
        },
    };

    let supported = !matches!(button.kind, ButtonKind::Unknown(_));
    (normalized, supported)
}

fn media_param(format: &HeaderFormat) -> Option<ParamDescriptor> {
    let kind = match format {
        HeaderFormat::Image => ParamKind::Image,
        HeaderFormat::Video => ParamKind::Video,
        HeaderFormat::Document => ParamKind::Document,
        HeaderFormat::Text | HeaderFormat::Unknown(_) => return None,
    };
    Some(ParamDescriptor::new(kind))
}

/// One text param per placeholder occurrence
fn text_params(content: &str) -> Vec<ParamDescriptor> {
    repeat_params(placeholders::occurrences(content).len(), ParamKind::Text)
}

fn repeat_params(count: usize, kind: ParamKind) -> Vec<ParamDescriptor> {
    vec![ParamDescriptor::new(kind); count]
}

fn variable_count(scope: VariableScope, components: &[ParsedComponent]) -> usize {
    let texts = components
        .iter()
        .filter(|c| match scope {
            VariableScope::AllParts => matches!(
                c.kind,
                ComponentKind::Header | ComponentKind::Body | ComponentKind::Footer
            ),
            VariableScope::BodyOnly => c.kind == ComponentKind::Body,
        })
        .filter_map(|c| c.text.as_deref());

    placeholders::distinct_count(texts)
}
