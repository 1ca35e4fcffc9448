//! Typed identifiers for teams, users and pull requests.
//!
//! All three are SQLite rowids underneath. Wrapping them keeps a `UserId`
//! from being passed where a `PrId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Ids handed out by storage are always positive.
            pub fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(n: i64) -> Self {
                $name(n)
            }
        }
    };
}

row_id!(
    /// Identifier of a team.
    TeamId
);

row_id!(
    /// Identifier of a user (authors and reviewers alike).
    UserId
);

row_id!(
    /// Identifier of a pull request.
    PrId
);
