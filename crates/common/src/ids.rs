use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
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

define_id!(
    DocumentId,
    "Typed wrapper for document UUIDs owned by the surrounding system."
);
define_id!(
    AssessmentId,
    "Typed wrapper for risk assessment UUIDs."
);
define_id!(
    PredictionId,
    "Typed wrapper for litigation prediction UUIDs."
);
define_id!(
    PrecedentId,
    "Typed wrapper for locally stored case precedent UUIDs."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip_through_uuid() {
        let id = DocumentId::new();
        let uuid: Uuid = id.into();
        assert_eq!(DocumentId::from_uuid(uuid), id);
    }
}
