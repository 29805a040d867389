// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Checked reference traversal

use crate::error::AttributeResolutionError;
use ifc_qto_model::{AttributeName, AttributeValue, DecodedEntity, EntityId, EntityResolver};
use std::sync::Arc;

/// Follow a single-reference attribute
pub fn follow_ref(
    resolver: &dyn EntityResolver,
    entity: &DecodedEntity,
    attribute: AttributeName,
) -> Result<Arc<DecodedEntity>, AttributeResolutionError> {
    match entity.attribute(attribute) {
        Some(AttributeValue::EntityRef(target)) => resolve(resolver, entity.id, attribute, *target),
        Some(other) => Err(AttributeResolutionError::WrongKind {
            entity: entity.id,
            attribute,
            expected: "reference",
            found: other.kind(),
        }),
        None => Err(AttributeResolutionError::Missing {
            entity: entity.id,
            attribute,
        }),
    }
}

/// Follow every reference of a list attribute, in order
///
/// Fails on the first entry that is not a reference or does not resolve.
pub fn follow_refs(
    resolver: &dyn EntityResolver,
    entity: &DecodedEntity,
    attribute: AttributeName,
) -> Result<Vec<Arc<DecodedEntity>>, AttributeResolutionError> {
    let items = match entity.attribute(attribute) {
        Some(AttributeValue::List(items)) => items,
        Some(other) => {
            return Err(AttributeResolutionError::WrongKind {
                entity: entity.id,
                attribute,
                expected: "list",
                found: other.kind(),
            })
        }
        None => {
            return Err(AttributeResolutionError::Missing {
                entity: entity.id,
                attribute,
            })
        }
    };

    items
        .iter()
        .map(|item| match item {
            AttributeValue::EntityRef(target) => resolve(resolver, entity.id, attribute, *target),
            other => Err(AttributeResolutionError::WrongKind {
                entity: entity.id,
                attribute,
                expected: "reference",
                found: other.kind(),
            }),
        })
        .collect()
}

fn resolve(
    resolver: &dyn EntityResolver,
    entity: EntityId,
    attribute: AttributeName,
    target: EntityId,
) -> Result<Arc<DecodedEntity>, AttributeResolutionError> {
    resolver
        .get(target)
        .ok_or(AttributeResolutionError::Dangling {
            entity,
            attribute,
            target,
        })
}
