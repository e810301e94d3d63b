use super::Rating;

/// Iterates the ratings of a view, either all of them or the selected rows in order
pub struct RatingsIter<'a, F> {
    ratings: &'a [Rating<F>],
    rows: Option<&'a [usize]>,
    idx: usize,
}

impl<'a, F> RatingsIter<'a, F> {
    pub fn new(ratings: &'a [Rating<F>], rows: Option<&'a [usize]>) -> RatingsIter<'a, F> {
        RatingsIter {
            ratings,
            rows,
            idx: 0,
        }
    }

    fn remaining(&self) -> usize {
        let len = match self.rows {
            Some(rows) => rows.len(),
            None => self.ratings.len(),
        };
        len.saturating_sub(self.idx)
    }
}

impl<'a, F> Iterator for RatingsIter<'a, F> {
    type Item = &'a Rating<F>;

    fn next(&mut self) -> Option<Self::Item> {
        let position = match self.rows {
            Some(rows) => *rows.get(self.idx)?,
            None => self.idx,
        };
        if self.rows.is_none() && position >= self.ratings.len() {
            return None;
        }
        self.idx += 1;

        Some(&self.ratings[position])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a, F> ExactSizeIterator for RatingsIter<'a, F> {}
