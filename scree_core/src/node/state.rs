// Copyright 2026 the Scree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small per-node value types.

use kurbo::Rect;

/// Whether a node accepts children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Draws its own content; never has children.
    Leaf,
    /// Holds an ordered child sequence and draws nothing of its own.
    Group,
}

/// Per-node dirty state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DirtyState {
    /// Unchanged since the last clear.
    #[default]
    Clean,
    /// Moved by a pure translation absorbed by a cached parent.
    DirtyByTranslation,
    /// Must be redrawn.
    Dirty,
}

/// How a node's output is composited onto what lies beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source over destination.
    SrcOver,
    /// Source atop destination.
    SrcAtop,
    /// Additive.
    Add,
    /// Multiply.
    Multiply,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Darken.
    Darken,
    /// Lighten.
    Lighten,
    /// Color dodge.
    ColorDodge,
    /// Color burn.
    ColorBurn,
    /// Hard light.
    HardLight,
    /// Soft light.
    SoftLight,
    /// Difference.
    Difference,
    /// Exclusion.
    Exclusion,
    /// Red channel only.
    Red,
    /// Green channel only.
    Green,
    /// Blue channel only.
    Blue,
}

/// A child that left a group since the last clear, still owed one damage pass.
///
/// Only the slot and the bounds it last occupied are kept, so the snapshot
/// stays valid even if the node is destroyed afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemovedChild {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
    /// Last known bounds of the child in the group's coordinate space.
    pub bounds: Rect,
}
