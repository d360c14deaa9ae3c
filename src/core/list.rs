use log::{debug, warn};

use crate::{
    core::{
        builder::Scan,
        definition::{ClassDefinition, XmlObject},
        item::ItemObserver,
    },
    error::{MappingError, ParsingError},
    xml::StartElement,
};

/// Builds one list item from the element whose start was just read.
///
/// A malformed value anywhere in the item, or an item without any mapped content, yields a
/// gap (`None`) instead of failing the enclosing list. Other errors propagate.
pub(crate) fn build_item<U: XmlObject>(
    scan: &mut Scan<'_>,
    definition: &ClassDefinition<U>,
    start: &StartElement,
) -> Result<Option<U>, MappingError> {
    let depth = scan.depth();
    match scan.build_object(definition, start) {
        Ok((item, assigned)) if assigned > 0 => Ok(Some(item)),
        Ok(_) => {
            warn!(
                "<{}> carries no mapped content, keeping a gap for {}",
                start.name(),
                definition.type_name()
            );
            Ok(None)
        }
        Err(err) if err.is_value_format() => {
            warn!("Skipping malformed <{}> item: {}", start.name(), err);
            scan.skip_to_close(depth, start.name())?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Builds every element matching the node path of `T`, notifying the observers after each.
pub(crate) fn stream_items<T: XmlObject>(
    scan: &mut Scan<'_>,
    definition: &ClassDefinition<T>,
    observers: &[&dyn ItemObserver<T>],
) -> Result<Vec<Option<T>>, MappingError> {
    let mut stack = Vec::new();
    let mut items = Vec::new();

    while let Some(start) = scan.find_next(definition.node_path(), &mut stack)? {
        let item = build_item(scan, definition, &start)?;
        stack.pop();

        for observer in observers {
            observer
                .on_new_item(item.as_ref())
                .map_err(ParsingError::Observer)?;
        }
        items.push(item);
    }

    debug!(
        "Parsed {} {} items ({} gaps)",
        items.len(),
        definition.type_name(),
        items.iter().filter(|item| item.is_none()).count()
    );
    Ok(items)
}
