//! The fixed store enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a store name is not one of the fixed three stores.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown store: {0}")]
pub struct UnknownStore(pub String);

/// One of the three stores covered by the loss-prevention team.
///
/// The enumeration is fixed at compile time; adding a store is a code
/// change. This mirrors how the rosters are organized operationally and is
/// a documented limitation rather than something to paper over with
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Store {
    /// IKEA NQS (Bogota), store id 1.
    Nqs,
    /// IKEA Mallplaza Cali, store id 2.
    MallplazaCali,
    /// IKEA Envigado, store id 3.
    Envigado,
}

impl Store {
    /// All stores, in id order.
    pub const ALL: [Self; 3] = [Self::Nqs, Self::MallplazaCali, Self::Envigado];

    /// Resolve a store from its display name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownStore`] if the name is not one of the three fixed
    /// store names.
    pub fn from_name(name: &str) -> Result<Self, UnknownStore> {
        match name {
            "IKEA NQS" => Ok(Self::Nqs),
            "IKEA MALLPLAZA CALI" => Ok(Self::MallplazaCali),
            "IKEA ENVIGADO" => Ok(Self::Envigado),
            other => Err(UnknownStore(other.to_owned())),
        }
    }

    /// The numeric store id used by the guard roster sheet.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Nqs => 1,
            Self::MallplazaCali => 2,
            Self::Envigado => 3,
        }
    }

    /// The display name as written in the submission rows.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nqs => "IKEA NQS",
            Self::MallplazaCali => "IKEA MALLPLAZA CALI",
            Self::Envigado => "IKEA ENVIGADO",
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_all_stores() {
        for store in Store::ALL {
            assert_eq!(Store::from_name(store.name()), Ok(store));
        }
    }

    #[test]
    fn test_from_name_rejects_unknown() {
        let err = Store::from_name("IKEA CHAPINERO").unwrap_err();
        assert_eq!(err.0, "IKEA CHAPINERO");
    }

    #[test]
    fn test_ids_are_stable() {
        assert_eq!(Store::Nqs.id(), 1);
        assert_eq!(Store::MallplazaCali.id(), 2);
        assert_eq!(Store::Envigado.id(), 3);
    }
}
