// Copyright 2025 the Colorbar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame reconciliation.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::{Mark, MarkId, MarkKind, MarkPayload};

/// Mark-level diffs keyed by stable identity.
///
/// Payloads are boxed to keep `MarkDiff` itself reasonably sized.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark is newly present.
    Enter {
        /// Stable identifier.
        id: MarkId,
        /// Z-ordering for rendering; higher values are drawn above lower values.
        z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// Newly evaluated channels.
        new: Box<MarkPayload>,
    },
    /// A mark exists and some channels (or its z-index) changed.
    Update {
        /// Stable identifier.
        id: MarkId,
        /// Previous z-index.
        old_z_index: i32,
        /// New z-index.
        new_z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// Previously cached channels.
        old: Box<MarkPayload>,
        /// Newly evaluated channels.
        new: Box<MarkPayload>,
    },
    /// A mark was removed.
    Exit {
        /// Stable identifier.
        id: MarkId,
        /// Z-ordering for rendering.
        z_index: i32,
        /// The mark kind.
        kind: MarkKind,
        /// Last known channels.
        old: Box<MarkPayload>,
    },
}

impl MarkDiff {
    /// Returns the stable id this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }

    /// Returns the best available damage rectangle for this diff.
    ///
    /// - `Enter`/`Exit`: the mark bounds, if known.
    /// - `Update`: the union of old and new bounds when both are known, otherwise `None`.
    pub fn damage(&self) -> Option<Rect> {
        match self {
            Self::Enter { new, .. } => new.bounds(),
            Self::Exit { old, .. } => old.bounds(),
            Self::Update { old, new, .. } => match (old.bounds(), new.bounds()) {
                (Some(a), Some(b)) => Some(a.union(b)),
                _ => None,
            },
        }
    }
}

/// The set of marks currently on screen, keyed by [`MarkId`].
#[derive(Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("marks_len", &self.marks.len())
            .finish()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of marks in the scene.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Look up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Returns all marks in paint order (`(z_index, id)` ascending).
    pub fn sorted_marks(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Replace the scene's mark set (structural reconciliation).
    ///
    /// The provided marks are treated as the complete "current frame":
    /// - new ids produce `Enter`,
    /// - ids whose payload or z-index changed produce `Update`,
    /// - ids whose kind changed produce `Exit` followed by `Enter`,
    /// - ids missing from `marks` produce `Exit` (sorted by id).
    ///
    /// Unchanged marks produce no diff, so re-submitting an identical frame yields nothing.
    pub fn set_marks<I>(&mut self, marks: I) -> Vec<MarkDiff>
    where
        I: IntoIterator<Item = Mark>,
    {
        let mut old_marks = core::mem::take(&mut self.marks);
        let mut diffs = Vec::new();

        for mark in marks {
            let old = old_marks.remove(&mark.id);
            if let Some(diff) = reconcile(old, &mark, &mut diffs) {
                diffs.push(diff);
            }
            self.marks.insert(mark.id, mark);
        }

        let mut exits: Vec<Mark> = old_marks.into_values().collect();
        exits.sort_by_key(|m| m.id);
        diffs.extend(exits.into_iter().map(exit_diff));
        diffs
    }

    /// Insert or replace a single mark, leaving all others untouched.
    pub fn upsert_mark(&mut self, mark: Mark) -> Vec<MarkDiff> {
        let mut diffs = Vec::new();
        let old = self.marks.remove(&mark.id);
        if let Some(diff) = reconcile(old, &mark, &mut diffs) {
            diffs.push(diff);
        }
        self.marks.insert(mark.id, mark);
        diffs
    }

    /// Remove a single mark, returning its `Exit` diff if it was present.
    pub fn remove_mark(&mut self, id: MarkId) -> Option<MarkDiff> {
        self.marks.remove(&id).map(exit_diff)
    }
}

/// Compute the diff for `mark` replacing `old`.
///
/// A kind change pushes the `Exit` for the old mark into `diffs` and returns the `Enter`.
fn reconcile(old: Option<Mark>, mark: &Mark, diffs: &mut Vec<MarkDiff>) -> Option<MarkDiff> {
    let Some(old) = old else {
        return Some(enter_diff(mark));
    };
    if old.kind() != mark.kind() {
        diffs.push(exit_diff(old));
        return Some(enter_diff(mark));
    }
    if old.payload == mark.payload && old.z_index == mark.z_index {
        return None;
    }
    Some(MarkDiff::Update {
        id: mark.id,
        old_z_index: old.z_index,
        new_z_index: mark.z_index,
        kind: mark.kind(),
        old: Box::new(old.payload),
        new: Box::new(mark.payload.clone()),
    })
}

fn enter_diff(mark: &Mark) -> MarkDiff {
    MarkDiff::Enter {
        id: mark.id,
        z_index: mark.z_index,
        kind: mark.kind(),
        new: Box::new(mark.payload.clone()),
    }
}

fn exit_diff(mark: Mark) -> MarkDiff {
    MarkDiff::Exit {
        id: mark.id,
        z_index: mark.z_index,
        kind: mark.kind(),
        old: Box::new(mark.payload),
    }
}
