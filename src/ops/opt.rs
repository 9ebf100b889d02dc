/// Common surface of optional-like containers that round-trip through [`Option`]
pub trait Opt<T>: From<Option<T>> + Into<Option<T>> {
    type GetOut;
    fn none() -> Self;
    fn some(v: T) -> Self;
    fn get(&self) -> Option<Self::GetOut>;
    fn take(&mut self) -> Option<T>;
    #[must_use]
    fn is_some(&self) -> bool {
        self.get().is_some()
    }
    fn map<U>(mut self, f: impl FnOnce(T) -> U) -> Option<U> {
        let o = self.take();
        o.map(f)
    }
}
impl<T: Clone> Opt<T> for Option<T> {
    type GetOut = T;
    fn none() -> Self {
        None
    }
    fn some(v: T) -> Self {
        Some(v)
    }
    fn get(&self) -> Option<Self::GetOut> {
        self.clone()
    }
    fn take(&mut self) -> Option<T> {
        Option::take(self)
    }
}
