//! Tail selection for cumulative probabilities and quantiles.

/// Which tail of a distribution a probability refers to.
///
/// `Lower` is `P[X ≤ x]`, `Upper` is `P[X > x]`. Functions that accept a
/// `Tail` evaluate the requested tail directly instead of forming `1 - p`,
/// so upper-tail probabilities keep full relative precision far from the
/// centre of the distribution.
///
/// # Examples
///
/// ```
/// use hydro_core::types::Tail;
///
/// assert_eq!(Tail::default(), Tail::Lower);
/// assert_eq!(Tail::Lower.flip(), Tail::Upper);
/// assert_eq!(Tail::from_lower(false), Tail::Upper);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tail {
    /// `P[X ≤ x]`
    #[default]
    Lower,
    /// `P[X > x]`
    Upper,
}

impl Tail {
    /// Build from a `lower_tail` flag.
    #[inline]
    pub fn from_lower(lower_tail: bool) -> Self {
        if lower_tail {
            Tail::Lower
        } else {
            Tail::Upper
        }
    }

    /// The opposite tail.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Tail::Lower => Tail::Upper,
            Tail::Upper => Tail::Lower,
        }
    }

    /// Returns `true` for [`Tail::Lower`].
    #[inline]
    pub fn is_lower(self) -> bool {
        matches!(self, Tail::Lower)
    }
}

impl std::fmt::Display for Tail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tail::Lower => write!(f, "lower"),
            Tail::Upper => write!(f, "upper"),
        }
    }
}
