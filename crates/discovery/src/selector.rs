//! Target Selector - pick exactly one target, or say why not
//!
//! Policy: first listed wins. A URL hint narrows the list first, and among
//! matching targets only those a debugger can still attach to are eligible.

use crate::cdp::Target;
use crate::error::DiscoveryError;
use crate::matching::get_matching_targets;

/// Outcome of target selection
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    Found(&'a Target),

    /// Nothing matched the hint
    NotFound { hint: String, available: Vec<String> },

    /// Matches exist but every one already has a debugger attached
    Busy { matched_url: String },
}

impl<'a> Selection<'a> {
    pub fn into_result(self) -> Result<&'a Target, DiscoveryError> {
        match self {
            Selection::Found(target) => Ok(target),
            Selection::NotFound { hint, available } => {
                Err(DiscoveryError::TargetNotFound { hint, available })
            }
            Selection::Busy { matched_url } => Err(DiscoveryError::TargetBusy { url: matched_url }),
        }
    }
}

/// Choose one target from a non-empty list
///
/// `targets` must not be empty. Callers report an empty list as
/// [`DiscoveryError::NoTargets`] before selecting.
pub fn select_target<'a>(targets: &'a [Target], target_url: Option<&str>) -> Selection<'a> {
    debug_assert!(!targets.is_empty(), "select_target called with no targets");

    let candidates: Vec<&Target> = match target_url {
        Some(hint) => {
            let matching = get_matching_targets(targets, hint);
            let Some(first_match) = matching.first() else {
                return Selection::NotFound {
                    hint: hint.to_string(),
                    available: target_urls(targets.iter()),
                };
            };

            let attachable: Vec<&Target> = matching
                .iter()
                .copied()
                .filter(|target| target.has_websocket())
                .collect();
            if attachable.is_empty() {
                return Selection::Busy {
                    matched_url: first_match.url.clone(),
                };
            }
            attachable
        }
        None => targets.iter().collect(),
    };

    if candidates.len() > 1 {
        tracing::warn!(
            "Found more than one valid target page. Attaching to the first one. Available pages: {}",
            serde_json::to_string(&target_urls(candidates.iter().copied())).unwrap_or_default()
        );
    }

    match candidates.first() {
        Some(&target) => Selection::Found(target),
        None => Selection::NotFound {
            hint: target_url.unwrap_or_default().to_string(),
            available: Vec::new(),
        },
    }
}

fn target_urls<'a>(targets: impl Iterator<Item = &'a Target>) -> Vec<String> {
    targets.map(|target| target.url.clone()).collect()
}
