use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A priority dimension of a rank, listed most significant first
pub trait Dimension: Copy + fmt::Debug + 'static {
    /// Every dimension in priority order
    const ALL: &'static [Self];

    /// Position of this dimension inside the rank tuple
    fn index(self) -> usize;
}

/// Crew rank dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrewDimension {
    Commitment,
    Flexibility,
    Membership,
    Absence,
}

impl Dimension for CrewDimension {
    const ALL: &'static [Self] = &[
        CrewDimension::Commitment,
        CrewDimension::Flexibility,
        CrewDimension::Membership,
        CrewDimension::Absence,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Boat rank dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoatDimension {
    Flexibility,
    Absence,
}

impl Dimension for BoatDimension {
    const ALL: &'static [Self] = &[BoatDimension::Flexibility, BoatDimension::Absence];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    #[error("rank has {found} values but its schema has {expected} dimensions")]
    WrongLength { expected: usize, found: usize },
}

/// Ordered tuple of priority values, compared lexicographically
#[derive(Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct Rank<D: Dimension> {
    values: Vec<i32>,
    #[serde(skip)]
    _schema: PhantomData<D>,
}

pub type CrewRank = Rank<CrewDimension>;
pub type BoatRank = Rank<BoatDimension>;

impl<D: Dimension> Rank<D> {
    pub fn new(values: Vec<i32>) -> Result<Self, RankError> {
        if values.len() != D::ALL.len() {
            return Err(RankError::WrongLength {
                expected: D::ALL.len(),
                found: values.len(),
            });
        }
        Ok(Self {
            values,
            _schema: PhantomData,
        })
    }

    pub fn get(&self, dimension: D) -> i32 {
        self.values[dimension.index()]
    }

    /// Returns a copy with one dimension replaced
    pub fn with(&self, dimension: D, value: i32) -> Self {
        let mut values = self.values.clone();
        values[dimension.index()] = value;
        Self {
            values,
            _schema: PhantomData,
        }
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }
}

impl<D: Dimension> Default for Rank<D> {
    fn default() -> Self {
        Self {
            values: vec![0; D::ALL.len()],
            _schema: PhantomData,
        }
    }
}

impl<D: Dimension> Clone for Rank<D> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _schema: PhantomData,
        }
    }
}

impl<D: Dimension> fmt::Debug for Rank<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for dimension in D::ALL {
            map.entry(dimension, &self.get(*dimension));
        }
        map.finish()
    }
}

impl<D: Dimension> PartialEq for Rank<D> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<D: Dimension> Eq for Rank<D> {}

impl<D: Dimension> PartialOrd for Rank<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Dimension> Ord for Rank<D> {
    // Same length is guaranteed by construction, so Vec's lexicographic order applies
    fn cmp(&self, other: &Self) -> Ordering {
        self.values.cmp(&other.values)
    }
}

impl<D: Dimension> TryFrom<Vec<i32>> for Rank<D> {
    type Error = RankError;

    fn try_from(values: Vec<i32>) -> Result<Self, Self::Error> {
        Rank::new(values)
    }
}

impl<D: Dimension> From<Rank<D>> for Vec<i32> {
    fn from(rank: Rank<D>) -> Self {
        rank.values
    }
}
