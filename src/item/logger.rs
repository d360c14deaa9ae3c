use std::fmt::Debug;

use log::info;

use crate::core::item::ItemObserver;

/// Item observer logging each parsed item at `info` level.
#[derive(Default)]
pub struct LoggerObserver {}

impl<T> ItemObserver<T> for LoggerObserver
where
    T: Debug,
{
    fn on_new_item(&self, item: Option<&T>) -> anyhow::Result<()> {
        match item {
            Some(item) => info!("Record:{:?}", item),
            None => info!("Record:<gap>"),
        }
        Ok(())
    }
}
