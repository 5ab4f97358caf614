//! Strongly-typed identifiers used across the domain.
//!
//! Every entity gets its own uuid-backed newtype so an `ItemId` can never be
//! handed to a function expecting a `LoanId`.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $t:ident) => {
        $(#[$doc])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Mint a fresh identifier (UUIDv7, time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s).map_err(|e| {
                    DomainError::invalid_id(format!("{}: {}", stringify!($t), e))
                })?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_id!(
    /// Identifier of an inventory item.
    ItemId
);
uuid_id!(
    /// Identifier of a member (borrower, reporter, packer, actor).
    MemberId
);
uuid_id!(
    /// Identifier of a loan.
    LoanId
);
uuid_id!(
    /// Identifier of a missing/damaged report.
    ReportId
);
uuid_id!(
    /// Identifier of a food log entry.
    FoodLogId
);
uuid_id!(
    /// Identifier of a gear set.
    SetId
);
uuid_id!(
    /// Identifier of a trip.
    TripId
);
uuid_id!(
    /// Identifier of one line on a trip packing list.
    TripItemId
);
uuid_id!(
    /// Identifier of a storage location.
    LocationId
);
uuid_id!(
    /// Identifier of an item category.
    CategoryId
);
uuid_id!(
    /// Identifier of an activity log entry.
    ActivityId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_round_trip() {
        let id = ItemId::new();
        let parsed: ItemId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<LoanId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }
}
