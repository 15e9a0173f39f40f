use serde::Serialize;

/// The loss of every completed training step, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LossHistory {
    losses: Vec<f32>,
}

impl LossHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            losses: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, loss: f32) {
        self.losses.push(loss);
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn first(&self) -> Option<f32> {
        self.losses.first().copied()
    }

    pub fn last(&self) -> Option<f32> {
        self.losses.last().copied()
    }

    /// The lowest loss and the step it was reached at.
    pub fn best(&self) -> Option<(usize, f32)> {
        self.losses
            .iter()
            .copied()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.losses
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.losses.iter().copied()
    }
}

impl From<Vec<f32>> for LossHistory {
    fn from(losses: Vec<f32>) -> Self {
        Self { losses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history() {
        let history = LossHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.first(), None);
        assert_eq!(history.last(), None);
        assert_eq!(history.best(), None);
    }

    #[test]
    fn best_is_the_first_minimum() {
        let history = LossHistory::from(vec![0.9, 0.2, 0.4, 0.2]);
        assert_eq!(history.best(), Some((1, 0.2)));
        assert_eq!(history.first(), Some(0.9));
        assert_eq!(history.last(), Some(0.2));
    }
}
