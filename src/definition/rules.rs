//! Invariant checks for state definitions using Validation.
//!
//! Every check runs; all broken invariants are reported together so that a
//! malformed table can be fixed in a single pass.

use crate::core::State;
use crate::error::DefinitionViolation;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<DefinitionViolation>>;

/// Raw parts of a definition, before they are checked.
pub(crate) struct DefinitionParts<'a, S: State> {
    pub members: &'a [S],
    pub transitions: &'a [(S, Vec<S>)],
    pub default: Option<&'a S>,
}

/// Check all definition invariants, accumulating ALL violations.
pub(crate) fn check_definition<S: State>(parts: &DefinitionParts<'_, S>) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    if parts.members.is_empty() {
        checks.push(Validation::fail(DefinitionViolation::NoMembers));
    }

    checks.extend(unique_members(parts.members));

    let members: HashSet<&S> = parts.members.iter().collect();
    for (to, origins) in parts.transitions {
        if !members.contains(to) {
            checks.push(Validation::fail(DefinitionViolation::UnknownTarget {
                state: to.value().to_string(),
            }));
        }
        for from in origins {
            if !members.contains(from) {
                checks.push(Validation::fail(DefinitionViolation::UnknownOrigin {
                    state: from.value().to_string(),
                    to: to.value().to_string(),
                }));
            }
        }
    }

    if let Some(default) = parts.default {
        if !members.contains(default) {
            checks.push(Validation::fail(DefinitionViolation::UnknownDefault {
                state: default.value().to_string(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

fn unique_members<S: State>(members: &[S]) -> Vec<Check> {
    let mut checks = Vec::new();
    let mut values = HashSet::new();
    let mut names = HashSet::new();

    for member in members {
        if !values.insert(member.value()) {
            checks.push(Validation::fail(DefinitionViolation::DuplicateValue {
                value: member.value().to_string(),
            }));
        }
        if !names.insert(member.name()) {
            checks.push(Validation::fail(DefinitionViolation::DuplicateName {
                name: member.name().to_string(),
            }));
        }
    }

    checks
}
