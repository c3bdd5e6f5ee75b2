//! Newtype wrappers for domain identifiers.
//!
//! All ids are storage-generated integers. A record that has not been
//! persisted yet carries no id (`Option<XxxId>` on the record itself).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifies a user account.
    UserId
);
define_id!(
    /// Identifies a published product listing.
    ProductId
);
define_id!(
    /// Identifies an order placed by a user.
    OrderId
);
define_id!(
    /// Identifies a product moderation report.
    ReportId
);
define_id!(
    /// Identifies a postal address owned by a user.
    AddressId
);
define_id!(
    /// Identifies a user verification record.
    VerificationId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_user_id_via_display_and_from_str() {
        let id = UserId(42);
        let s = id.to_string();
        let parsed: UserId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_serialize_product_id_as_integer() {
        let json = serde_json::to_string(&ProductId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn should_order_ids_numerically() {
        assert!(OrderId(1) < OrderId(2));
    }
}
