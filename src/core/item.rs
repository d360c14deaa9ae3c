/// Receives each list item as soon as it is built, before the list parse returns.
///
/// `None` stands for a gap: an item that was malformed or carried no mapped content.
/// Returning an error aborts the parse.
pub trait ItemObserver<T> {
    fn on_new_item(&self, item: Option<&T>) -> anyhow::Result<()>;
}

impl<T, F> ItemObserver<T> for F
where
    F: Fn(Option<&T>) -> anyhow::Result<()>,
{
    fn on_new_item(&self, item: Option<&T>) -> anyhow::Result<()> {
        self(item)
    }
}
