/// Observes the advance of a training run.
pub trait Progress {
    /// Called once after each completed step.
    ///
    /// # Arguments
    /// * `done` - The amount of completed steps, starting at 1.
    /// * `total` - The amount of steps of the run.
    fn update(&mut self, done: usize, total: usize);

    /// Called once after the last step, even if the run had no steps.
    fn finish(&mut self) {}
}

impl Progress for () {
    fn update(&mut self, _done: usize, _total: usize) {}
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn update(&mut self, done: usize, total: usize) {
        (**self).update(done, total)
    }

    fn finish(&mut self) {
        (**self).finish()
    }
}
