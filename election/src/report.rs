/// Console collaborator. Receives human-readable status lines; the engine
/// never looks at what happens to them.
pub trait Reporter {
    fn report(&self, line: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&self, _line: &str) {}
}

impl<T: Reporter + ?Sized> Reporter for &T {
    fn report(&self, line: &str) {
        (**self).report(line)
    }
}
