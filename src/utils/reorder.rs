//! Drag-and-drop reordering of ranked lists.

use std::collections::HashMap;

use crate::database::store::Document;
use crate::dto::page::page_offset;
use crate::error::{Error, Result};
use crate::models::{
    assessment::AssessmentSection,
    job::Job,
    question::Question,
};

/// An element carrying its own display rank.
pub trait Ordered {
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

impl Ordered for Job {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Ordered for AssessmentSection {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

impl Ordered for Question {
    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    if from >= items.len() || to >= items.len() {
        return Err(Error::BadRequest(format!(
            "Cannot move item {} to {} in a list of {}",
            from,
            to,
            items.len()
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Moves `from` to `to` and renumbers every element by position, starting at 0.
pub fn reorder<T: Ordered>(mut items: Vec<T>, from: usize, to: usize) -> Result<Vec<T>> {
    move_item(&mut items, from, to)?;
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i64);
    }
    Ok(items)
}

/// Reorders one displayed page and merges it back into the full collection by id.
///
/// Page items are ranked `(page - 1) * page_size + position`; anything not on
/// the page keeps its current rank. The result follows the order of `all`.
pub fn reorder_page<T>(
    all: Vec<T>,
    page_items: Vec<T>,
    page: i64,
    page_size: i64,
    from: usize,
    to: usize,
) -> Result<Vec<T>>
where
    T: Ordered + Document,
{
    let mut page_items = page_items;
    move_item(&mut page_items, from, to)?;

    let offset = page_offset(page, page_size);
    let mut ranked: HashMap<String, T> = page_items
        .into_iter()
        .enumerate()
        .map(|(index, mut item)| {
            item.set_order(offset.saturating_add(index as i64));
            (item.id().to_string(), item)
        })
        .collect();

    Ok(all
        .into_iter()
        .map(|item| ranked.remove(item.id()).unwrap_or(item))
        .collect())
}

/// Destination group of a cross-column drag, or `None` for a move within one column.
pub fn cross_group_target<G: PartialEq + Copy>(source: G, destination: G) -> Option<G> {
    (source != destination).then_some(destination)
}
