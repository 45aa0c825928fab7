//! Sort specifications and lenient direction parsing.

use serde::{Deserialize, Serialize};

/// Ordering direction for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Smallest values first.
    Asc,
    /// Largest values first.
    Desc,
}

impl Direction {
    /// Parse a direction token, falling back to [`Direction::Desc`] for
    /// anything other than a case-insensitive `asc` or `desc`.
    ///
    /// # Examples
    /// ```
    /// use pagination::Direction;
    ///
    /// assert_eq!(Direction::parse_lenient(" ASC "), Direction::Asc);
    /// assert_eq!(Direction::parse_lenient("sideways"), Direction::Desc);
    /// ```
    #[must_use]
    pub fn parse_lenient(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    /// Return whether this direction sorts ascending.
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

/// One sort key with its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort<K> {
    property: K,
    direction: Direction,
}

impl<K> Sort<K> {
    /// Build a sort specification.
    pub const fn new(property: K, direction: Direction) -> Self {
        Self {
            property,
            direction,
        }
    }

    /// Ascending sort on `property`.
    pub const fn asc(property: K) -> Self {
        Self::new(property, Direction::Asc)
    }

    /// Descending sort on `property`.
    pub const fn desc(property: K) -> Self {
        Self::new(property, Direction::Desc)
    }

    /// Sort key.
    pub const fn property(&self) -> &K {
        &self.property
    }

    /// Sort direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Convert the sort key, keeping the direction.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `convert` when the key is not accepted.
    pub fn try_map<T, E>(self, convert: impl FnOnce(K) -> Result<T, E>) -> Result<Sort<T>, E> {
        Ok(Sort {
            property: convert(self.property)?,
            direction: self.direction,
        })
    }
}

impl Sort<String> {
    /// Parse the `field` or `field,direction` query form.
    ///
    /// Returns `None` for a blank specification or a blank field so callers
    /// can substitute their endpoint default. A missing direction means
    /// descending, and so does an unrecognised direction token.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Direction, Sort};
    ///
    /// let sort = Sort::parse("salarioBruto,asc").expect("field present");
    /// assert_eq!(sort.property(), "salarioBruto");
    /// assert_eq!(sort.direction(), Direction::Asc);
    ///
    /// let fallback = Sort::parse("criadoEm,xyz").expect("field present");
    /// assert_eq!(fallback.direction(), Direction::Desc);
    /// ```
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split(',');
        let property = parts.next().map(str::trim).filter(|p| !p.is_empty())?;
        let direction = parts
            .next()
            .map_or(Direction::Desc, Direction::parse_lenient);
        Some(Self::new(property.to_owned(), direction))
    }
}
