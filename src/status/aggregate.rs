use serde::ser::{Serialize, SerializeMap, Serializer};

/// Tally of entities per status, in the order of the known statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts<S> {
    buckets: Vec<(S, usize)>,
    unrecognized: usize,
}

impl<S: PartialEq> StatusCounts<S> {
    /// Count for one status; zero for statuses outside the known set.
    pub fn get(&self, status: &S) -> usize {
        self.buckets
            .iter()
            .find(|(known, _)| known == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, usize)> {
        self.buckets.iter().map(|(status, count)| (status, *count))
    }

    /// Entities whose status was not in the known set.
    pub fn unrecognized(&self) -> usize {
        self.unrecognized
    }

    /// Total across every bucket, unrecognized included.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum::<usize>() + self.unrecognized
    }
}

impl<S: Serialize> Serialize for StatusCounts<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (status, count) in &self.buckets {
            map.serialize_entry(status, count)?;
        }
        map.end()
    }
}

/// Count `entities` by status.
///
/// Every known status appears in the result, zero when unseen. Entities whose
/// status is missing or outside `known` land in `unrecognized`. The result is
/// built fresh on each call.
pub fn aggregate<E, S, F>(entities: &[E], status_of: F, known: &[S]) -> StatusCounts<S>
where
    S: PartialEq + Clone,
    F: Fn(&E) -> Option<S>,
{
    let mut buckets: Vec<(S, usize)> = known.iter().cloned().map(|status| (status, 0)).collect();
    let mut unrecognized = 0usize;

    for entity in entities {
        let position = status_of(entity)
            .and_then(|status| buckets.iter().position(|(known, _)| *known == status));
        match position {
            Some(index) => buckets[index].1 = buckets[index].1.saturating_add(1),
            None => unrecognized = unrecognized.saturating_add(1),
        }
    }

    StatusCounts {
        buckets,
        unrecognized,
    }
}
