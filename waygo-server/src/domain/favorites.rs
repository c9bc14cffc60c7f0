//! The user's favourite stops.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{AtcoCode, Stop};

/// Ordered list of favourite stops, unique by ATCO code.
///
/// The only way to change membership is [`FavoritesList::toggle`], which
/// returns a new list and leaves the receiver untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FavoritesList(Vec<Stop>);

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored stops, keeping the first entry for any repeated
    /// code.
    pub fn from_stops(stops: impl IntoIterator<Item = Stop>) -> Self {
        let mut list: Vec<Stop> = Vec::new();
        for stop in stops {
            if !list.iter().any(|s| s.same_stop(&stop)) {
                list.push(stop);
            }
        }
        Self(list)
    }

    /// Remove `stop` if a stop with its code is present, otherwise append it.
    pub fn toggle(&self, stop: &Stop) -> Self {
        if self.contains(&stop.atcocode) {
            Self(
                self.0
                    .iter()
                    .filter(|s| !s.same_stop(stop))
                    .cloned()
                    .collect(),
            )
        } else {
            let mut next = self.0.clone();
            next.push(stop.clone());
            Self(next)
        }
    }

    pub fn contains(&self, code: &AtcoCode) -> bool {
        self.0.iter().any(|s| &s.atcocode == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stop> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Stop] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for FavoritesList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // One unreadable entry must not cost the rest of the list
        let entries = Vec::<Value>::deserialize(deserializer)?;
        let stops = entries.into_iter().filter_map(|entry| {
            match serde_json::from_value::<Stop>(entry) {
                Ok(stop) => Some(stop),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable favourite");
                    None
                }
            }
        });
        Ok(Self::from_stops(stops))
    }
}

impl<'a> IntoIterator for &'a FavoritesList {
    type Item = &'a Stop;
    type IntoIter = std::slice::Iter<'a, Stop>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
