//! Reference data: the locations items are stored at and the categories
//! they are filed under. Slow-changing, served through a repository with an
//! explicit staleness contract (see `gearshed-store::reference`).

use serde::{Deserialize, Serialize};

use gearshed_core::{CategoryId, Entity, LocationId};

/// A physical storage location (shelf, container, room).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An item category (tents, cooking, first aid, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
