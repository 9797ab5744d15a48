// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render-only pass: collect output without touching state.
//!
//! After its state ticks, each `advance` call re-renders the tree once with
//! the accumulator's fractional remainder as the extrapolation factor, so
//! renderers can interpolate visual position between ticks. This pass is
//! observably idempotent: running it twice with the same factor yields the
//! same output tree.
//!
//! Nothing mutates: no queue drains, no `update` calls, no container
//! creation or destruction, no pure-cache writes, no native `update`. A
//! child id first emitted during this pass has no container yet and is not
//! descended into; the next state tick creates it. Pure sprites whose cache
//! does not apply are recomputed transiently, since their render is
//! side-effect-free by contract.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;

use crate::device::{Device, Platform};
use crate::output::RenderedNode;
use crate::props::BaseProps;
use crate::size::ResolvedSize;
use crate::sprite::{
    AnyPureSprite, PureNode, PureSpriteNode, SpriteId, SpriteNode, resolve_render_variant,
};
use crate::trace::Tracer;
use crate::transform::{FrameLink, LocalTransform};

use super::container::ContainerKind;
use super::store::ContainerId;
use super::{SpriteTree, note_sibling_id};

impl<I: 'static> SpriteTree<I> {
    /// Renders the whole tree with the given extrapolation factor and
    /// returns the output for the renderer.
    ///
    /// # Panics
    ///
    /// Panics if no state tick has run yet; the scheduler always runs the
    /// creation tick first.
    pub(crate) fn render_pass(
        &mut self,
        extrapolation: f64,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) -> RenderedNode {
        let size = device.size();
        let root = self
            .root
            .expect("render pass requires a completed state tick");
        let frame = FrameLink::root();
        let root_props = Rc::clone(&self.root_props);
        let children = self.render_custom(
            root,
            &*root_props,
            &frame,
            extrapolation,
            &size,
            platform,
            device,
            tracer,
        );
        RenderedNode::Group {
            id: SpriteId::from(super::ROOT_ID),
            base: BaseProps::default(),
            children,
        }
    }

    /// Renders one custom container's subtree.
    fn render_custom(
        &mut self,
        cid: ContainerId,
        props: &dyn Any,
        frame: &FrameLink<'_>,
        extrapolation: f64,
        size: &ResolvedSize,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) -> Vec<RenderedNode> {
        let mut container = self.store.take(cid);
        let ContainerKind::Custom(cc) = &mut container.kind else {
            unreachable!("custom visit on non-custom container")
        };

        let inputs = platform.inputs(&|point| frame.to_local(point));
        let variant = resolve_render_variant(size.portrait, size.xl, cc.def.available_variants());
        let nodes = cc.def.render_erased(
            variant,
            props,
            &*cc.state,
            device,
            &inputs,
            &cc.queue,
            extrapolation,
        );

        let mut child_map = core::mem::take(&mut cc.children);
        let out = self.render_children(
            &container.global_id,
            &mut child_map,
            nodes,
            frame,
            extrapolation,
            size,
            platform,
            device,
            tracer,
        );
        let ContainerKind::Custom(cc) = &mut container.kind else {
            unreachable!("container kind changed mid-visit")
        };
        cc.children = child_map;
        self.store.restore(cid, container);
        out
    }

    /// Renders a child list against existing containers, without
    /// reconciling. The duplicate-id check still applies — a malformed
    /// tree is fatal in every pass.
    fn render_children(
        &mut self,
        parent_gid: &str,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        nodes: Vec<SpriteNode<I>>,
        parent_frame: &FrameLink<'_>,
        extrapolation: f64,
        size: &ResolvedSize,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) -> Vec<RenderedNode> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                SpriteNode::Empty => {}
                SpriteNode::Texture(texture) => out.push(RenderedNode::from_texture(texture)),
                SpriteNode::Custom(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let Some(&cid) = child_map.get(&n.id) else {
                        // Created on the next state tick.
                        continue;
                    };
                    if !matches!(self.store.get(cid).kind, ContainerKind::Custom(_)) {
                        continue;
                    }
                    let base = n.base.normalize();
                    let child_frame =
                        FrameLink::child(parent_frame, LocalTransform::from_props(&base));
                    let children = self.render_custom(
                        cid,
                        &*n.props,
                        &child_frame,
                        extrapolation,
                        size,
                        platform,
                        device,
                        tracer,
                    );
                    out.push(RenderedNode::Group {
                        id: n.id,
                        base,
                        children,
                    });
                }
                SpriteNode::Pure(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let existing = child_map.get(&n.id).copied();
                    let base = n.base.normalize();
                    let children = self.render_pure(existing, &n, size, tracer);
                    out.push(RenderedNode::Group {
                        id: n.id,
                        base,
                        children,
                    });
                }
                SpriteNode::Native(n) => {
                    // Host-drawn; contributes nothing to the output tree.
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                }
            }
        }
        out
    }

    /// Serves a pure sprite's cache when it applies, otherwise recomputes
    /// transiently without writing back.
    fn render_pure(
        &self,
        cid: Option<ContainerId>,
        node: &PureSpriteNode,
        size: &ResolvedSize,
        tracer: &mut Tracer<'_>,
    ) -> Vec<RenderedNode> {
        if let Some(cid) = cid {
            let container = self.store.get(cid);
            if let ContainerKind::Pure(pc) = &container.kind {
                let cache_applies = !self.did_resize
                    && pc.cache.is_some()
                    && !pc
                        .def
                        .should_rerender_erased(&*pc.last_props, &*node.props);
                if cache_applies {
                    tracer.pure_cache_hit(&container.global_id);
                    return pc.cache.clone().expect("cache presence checked above");
                }
            }
        }
        tracer.pure_cache_miss(node.id.as_str());
        render_pure_transient(&node.def, &*node.props, node.id.as_str(), size)
    }
}

/// Recomputes a pure subtree with no containers involved. Sound because
/// pure renders are side-effect-free and depend only on props and size.
fn render_pure_transient(
    def: &Rc<dyn AnyPureSprite>,
    props: &dyn Any,
    parent_label: &str,
    size: &ResolvedSize,
) -> Vec<RenderedNode> {
    let variant = resolve_render_variant(size.portrait, size.xl, def.available_variants());
    let nodes = def.render_erased(variant, props, size);
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            PureNode::Texture(texture) => out.push(RenderedNode::from_texture(texture)),
            PureNode::Sprite(n) => {
                note_sibling_id(&mut seen, &n.id, parent_label);
                let children = render_pure_transient(&n.def, &*n.props, n.id.as_str(), size);
                out.push(RenderedNode::Group {
                    id: n.id,
                    base: n.base.normalize(),
                    children,
                });
            }
        }
    }
    out
}
