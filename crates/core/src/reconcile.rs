//! Child-collection reconciliation planning.
//!
//! When a parent entity (a template) is saved with a complete desired list
//! of children (its attributes), the persisted collection must be brought
//! in line with that list. [`plan`] partitions the difference into three
//! disjoint sets:
//!
//! - `to_create` -- desired entries with an unset id ([`UNSET_ID`]).
//! - `to_update` -- persisted rows whose id is claimed by a desired entry.
//! - `to_delete` -- persisted rows no desired entry claims.
//!
//! Deletion by absence is unconditional: a persisted child that the caller
//! leaves out of the desired list is destroyed.
//!
//! Planning is pure. Executing a plan (deletes first, then updates, then
//! creates, all on one transaction) is the storage layer's job.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::{DbId, UNSET_ID};

/// A child entity that can take part in reconciliation.
pub trait ChildEntity: Clone {
    /// Persisted identity, or [`UNSET_ID`] for an entity not yet stored.
    fn id(&self) -> DbId;

    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn is_new(&self) -> bool {
        self.id() == UNSET_ID
    }
}

/// An update pairing a persisted row with the values the caller submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedUpdate<T> {
    pub current: T,
    pub desired: T,
}

/// The outcome of [`plan`]: what to insert, update in place, and delete.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan<T> {
    pub to_create: Vec<T>,
    pub to_update: Vec<PlannedUpdate<T>>,
    pub to_delete: Vec<T>,
}

/// Row counts of a plan, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl<T> ReconcilePlan<T> {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            created: self.to_create.len(),
            updated: self.to_update.len(),
            deleted: self.to_delete.len(),
        }
    }

    /// Number of children present once the plan has been applied.
    pub fn resulting_len(&self) -> usize {
        self.to_create.len() + self.to_update.len()
    }
}

/// Compute the reconciliation plan transforming `current` into `desired`.
///
/// Duplicate ids in `desired` collapse to presence; the last occurrence
/// supplies the submitted values. A non-zero id in `desired` that matches
/// no row in `current` (a stale id, or one belonging to another parent) is
/// rejected with [`CoreError::Validation`] rather than silently ignored.
pub fn plan<T: ChildEntity>(desired: &[T], current: &[T]) -> Result<ReconcilePlan<T>, CoreError> {
    let mut to_create = Vec::new();
    let mut claimed: HashMap<DbId, &T> = HashMap::new();

    for entry in desired {
        if entry.is_new() {
            to_create.push(entry.clone());
        } else {
            claimed.insert(entry.id(), entry);
        }
    }

    let mut to_update = Vec::new();
    let mut to_delete = Vec::new();

    for row in current {
        match claimed.remove(&row.id()) {
            Some(desired) => to_update.push(PlannedUpdate {
                current: row.clone(),
                desired: desired.clone(),
            }),
            None => to_delete.push(row.clone()),
        }
    }

    if !claimed.is_empty() {
        let mut unknown: Vec<DbId> = claimed.into_keys().collect();
        unknown.sort_unstable();
        let ids = unknown
            .iter()
            .map(DbId::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CoreError::Validation(format!(
            "{} id(s) {ids} do not belong to this parent",
            T::ENTITY
        )));
    }

    Ok(ReconcilePlan {
        to_create,
        to_update,
        to_delete,
    })
}
