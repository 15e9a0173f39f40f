use super::Optimizer;

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Updates the parameters according to the algorithm's learning rule, that is, making a step in
    /// the opposite direction of the gradient, with a length of `learning_rate`.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient used for taking the step.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut params = [1.0_f32, -1.0, 0.5];
        GradientDescent::new(0.5).update_params(&mut params, &[2.0, -4.0, 0.0]);
        assert_eq!(params, [0.0, 1.0, 0.5]);
    }

    #[test]
    fn zero_learning_rate_keeps_params() {
        let mut params = [1.0_f32, 2.0];
        GradientDescent::new(0.0).update_params(&mut params, &[3.0, 4.0]);
        assert_eq!(params, [1.0, 2.0]);
    }
}
