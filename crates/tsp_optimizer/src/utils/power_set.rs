/// Lazily enumerates every subset of a set.
///
/// Subsets come out ordered by cardinality first and then lexicographically by
/// their (ascending) members, so a subset is always yielded after every subset
/// of it. The dynamic program of the exact solver relies on that order.
#[derive(Debug, Clone)]
pub struct PowerSet<T> {
    elements: Vec<T>,
    // Positions into `elements` of the next subset to yield.
    indices: Vec<usize>,
    remaining: u128,
}

/// Returns all `2^m` subsets of `set`, see [`PowerSet`].
///
/// The input is sorted and deduplicated first, its order does not matter.
pub fn power_set<T>(set: &[T]) -> PowerSet<T>
where
    T: Ord + Clone,
{
    let mut elements = set.to_vec();
    elements.sort();
    elements.dedup();

    let remaining = 1u128.checked_shl(elements.len() as u32).unwrap_or(u128::MAX);

    PowerSet {
        elements,
        indices: Vec::new(),
        remaining,
    }
}

impl<T> PowerSet<T> {
    /// Moves `indices` to the next combination of the same size, or to the
    /// first combination of the next size.
    fn advance(&mut self) {
        let size = self.indices.len();
        let total = self.elements.len();

        for position in (0..size).rev() {
            if self.indices[position] < total - size + position {
                self.indices[position] += 1;
                for next in position + 1..size {
                    self.indices[next] = self.indices[next - 1] + 1;
                }
                return;
            }
        }

        self.indices = (0..size + 1).collect();
    }
}

impl<T> Iterator for PowerSet<T>
where
    T: Clone,
{
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let subset = self
            .indices
            .iter()
            .map(|&index| self.elements[index].clone())
            .collect();

        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }

        Some(subset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
