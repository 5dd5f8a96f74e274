//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are random (v4
//! layout) UUIDs whose bytes are drawn from the simulation's own random
//! source, so a seeded run produces the same identifiers every time.

use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier from bytes drawn from `rng`.
            pub fn from_rng(rng: &mut impl Rng) -> Self {
                let mut bytes = [0_u8; 16];
                rng.fill(&mut bytes);
                Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent (citizen, trader, or monster).
    AgentId
}

define_id! {
    /// Unique identifier for a meme. Mutants get a fresh id.
    MemeId
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn ids_from_same_seed_are_identical() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(AgentId::from_rng(&mut a), AgentId::from_rng(&mut b));
    }

    #[test]
    fn consecutive_ids_differ() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = MemeId::from_rng(&mut rng);
        let second = MemeId::from_rng(&mut rng);
        assert_ne!(first, second);
        assert_ne!(first.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_is_a_v4_uuid() {
        let mut rng = StdRng::seed_from_u64(1);
        let id = AgentId::from_rng(&mut rng);
        assert_eq!(id.into_inner().get_version_num(), 4);
    }

    #[test]
    fn id_serializes_as_plain_uuid_string() {
        let mut rng = StdRng::seed_from_u64(3);
        let id = AgentId::from_rng(&mut rng);
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, format!("\"{id}\""));
    }
}
