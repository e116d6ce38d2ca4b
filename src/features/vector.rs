use serde::Serialize;

/// Sparse lexical feature row: `(term_id, weight)` sorted by term id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LexicalVector {
    entries: Vec<(u32, f32)>,
}

impl LexicalVector {
    /// Builds a vector from entries, sorting them by term id.
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(id, _)| id);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when every term of the input was out of vocabulary.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sparse-dense dot product. Ids past the end of `dense` contribute zero.
    pub fn dot(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(id, w)| dense.get(id as usize).map(|d| d * w))
            .sum()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scales to unit L2 norm. The empty vector is left as is.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}
