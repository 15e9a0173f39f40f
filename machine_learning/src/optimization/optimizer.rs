pub trait Optimizer {
    /// Updates `params` in place given their gradient, both with the same layout.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
