// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: an ordered sequence of draw items for one frame.
//!
//! [`flatten`] walks the core's nested output once per frame, composing
//! transforms and opacities so backends can draw items in order with no
//! tree bookkeeping of their own. Opacity composes multiplicatively: an
//! item's [`opacity`](RenderItem::opacity) equals its texture's own clamped
//! opacity times that of every ancestor group. Masks accumulate: a group's
//! mask clips its whole subtree, so each item carries the stack of masks
//! (with their absolute placements) in effect where it sits.

use alloc::vec::Vec;

use kurbo::Affine;

use orogen_core::output::RenderedNode;
use orogen_core::props::{BaseProps, MaskShape};
use orogen_core::sprite::TextureKind;
use orogen_core::transform::LocalTransform;

/// A mask with the absolute transform of the node that declared it.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPlacement {
    /// Maps the mask shape's local coordinates to game-global coordinates.
    pub local_to_world: Affine,
    /// The shape to clip by.
    pub shape: MaskShape,
}

/// A single draw command.
///
/// Items appear in back-to-front order, matching the output tree's child
/// order.
#[derive(Clone, Debug)]
pub struct RenderItem {
    /// Absolute transform from the texture's local frame to game-global
    /// coordinates.
    pub world: Affine,
    /// Composed opacity in `[0, 1]`.
    pub opacity: f64,
    /// The primitive to draw.
    pub kind: TextureKind,
    /// Masks in effect for this item, outermost first.
    pub clips: Vec<ClipPlacement>,
}

/// An ordered list of draw commands for a single frame.
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    /// Draw items, back-to-front.
    pub items: Vec<RenderItem>,
}

impl RenderPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Flattens one frame's output tree into a draw plan.
#[must_use]
pub fn flatten(root: &RenderedNode) -> RenderPlan {
    let mut plan = RenderPlan::new();
    flatten_into(root, &mut plan);
    plan
}

/// Like [`flatten`], but reuses a caller-provided plan to avoid
/// allocation.
pub fn flatten_into(root: &RenderedNode, plan: &mut RenderPlan) {
    plan.clear();
    let mut clips = Vec::new();
    walk(root, Affine::IDENTITY, 1.0, &mut clips, &mut plan.items);
}

fn walk(
    node: &RenderedNode,
    parent_world: Affine,
    parent_opacity: f64,
    clips: &mut Vec<ClipPlacement>,
    out: &mut Vec<RenderItem>,
) {
    match node {
        RenderedNode::Group {
            base, children, ..
        } => {
            let world = parent_world * local_affine(base);
            let opacity = parent_opacity * base.opacity;
            let pushed = push_clip(base, world, clips);
            for child in children {
                walk(child, world, opacity, clips, out);
            }
            if pushed {
                clips.pop();
            }
        }
        RenderedNode::Texture { base, kind } => {
            let world = parent_world * local_affine(base);
            let pushed = push_clip(base, world, clips);
            out.push(RenderItem {
                world,
                opacity: parent_opacity * base.opacity,
                kind: kind.clone(),
                clips: clips.clone(),
            });
            if pushed {
                clips.pop();
            }
        }
    }
}

fn local_affine(base: &BaseProps) -> Affine {
    LocalTransform::from_props(base).to_affine()
}

fn push_clip(base: &BaseProps, world: Affine, clips: &mut Vec<ClipPlacement>) -> bool {
    match base.mask {
        Some(shape) => {
            clips.push(ClipPlacement {
                local_to_world: world,
                shape,
            });
            true
        }
        None => false,
    }
}
