// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inverse relationship kinds
//!
//! STEP files only store the forward direction of a relationship (the
//! relationship entity lists the objects it relates). The kinds below name the
//! inverse traversals the model exposes per entity.

use crate::{AttributeName, IfcType};

/// Inverse relationship a model can traverse from an entity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// `IfcRelDefinesByProperties` naming the entity in `RelatedObjects`
    IsDefinedBy,
    /// `IfcRelContainedInSpatialStructure` naming the entity in `RelatedElements`
    ContainedInStructure,
}

impl RelationshipKind {
    /// All kinds, in index build order
    pub const ALL: [RelationshipKind; 2] = [
        RelationshipKind::IsDefinedBy,
        RelationshipKind::ContainedInStructure,
    ];

    /// Entity type of the relationship records
    pub fn relationship_type(&self) -> IfcType {
        match self {
            RelationshipKind::IsDefinedBy => IfcType::IfcRelDefinesByProperties,
            RelationshipKind::ContainedInStructure => IfcType::IfcRelContainedInSpatialStructure,
        }
    }

    /// Attribute listing the related entities
    pub fn related_attribute(&self) -> AttributeName {
        match self {
            RelationshipKind::IsDefinedBy => AttributeName::RelatedObjects,
            RelationshipKind::ContainedInStructure => AttributeName::RelatedElements,
        }
    }
}
