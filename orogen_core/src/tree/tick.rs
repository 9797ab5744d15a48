// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state tick: advance, render, and reconcile one whole tree.
//!
//! Each custom sprite's visit follows a fixed sequence — drain the update
//! queue, run `update` (skipped on the creation tick), drain, render, drain
//! — and then reconciles the rendered children against the previous tick's
//! containers:
//!
//! 1. Sibling ids are checked for repeats; a duplicate panics naming the id.
//! 2. Ids without a container get one created (custom `init` runs, native
//!    `create` runs); existing ids are visited recursively. Textures pass
//!    through; native sprites are never descended into.
//! 3. Ids present last tick but absent now are destroyed depth-first.
//!
//! Pure sprites re-render only when their props changed or the viewport
//! resized; otherwise their cached output is reused without descending.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use crate::device::{Device, Platform};
use crate::output::RenderedNode;
use crate::size::ResolvedSize;
use crate::sprite::{
    NativeNode, NativeSpriteUtils, PureNode, PureSpriteNode, SpriteId, SpriteNode,
    resolve_render_variant,
};
use crate::trace::Tracer;
use crate::transform::{FrameLink, LocalTransform};
use crate::update::drain_to_fixpoint;

use super::container::{Container, ContainerKind, NativeContainer, PureContainer};
use super::store::ContainerId;
use super::{SpriteTree, note_sibling_id};

impl<I: 'static> SpriteTree<I> {
    /// Runs one logical tick over the whole tree, creating the root
    /// container on the first call.
    pub(crate) fn state_tick(
        &mut self,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) {
        let size = device.size();
        let root = match self.root {
            Some(root) => root,
            None => {
                let root_def = Rc::clone(&self.root_def);
                let root_props = Rc::clone(&self.root_props);
                let root = self.create_custom(
                    None,
                    &SpriteId::from(super::ROOT_ID),
                    &root_def,
                    &*root_props,
                    device,
                );
                tracer.container_created(super::ROOT_ID);
                self.root = Some(root);
                root
            }
        };
        let frame = FrameLink::root();
        let root_props = Rc::clone(&self.root_props);
        self.tick_custom(root, &*root_props, &frame, &size, platform, device, tracer);
        self.did_resize = false;
    }

    /// Visits one custom container: queue drains, `update`, render, then
    /// child reconciliation.
    fn tick_custom(
        &mut self,
        cid: ContainerId,
        props: &dyn Any,
        frame: &FrameLink<'_>,
        size: &ResolvedSize,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) {
        let mut container = self.store.take(cid);
        let ContainerKind::Custom(cc) = &mut container.kind else {
            unreachable!("custom visit on non-custom container")
        };

        let inputs = platform.inputs(&|point| frame.to_local(point));

        drain_to_fixpoint(&cc.queue, &mut *cc.state);
        if !cc.just_created {
            cc.def
                .update_erased(props, &mut *cc.state, device, &inputs, &cc.queue);
            drain_to_fixpoint(&cc.queue, &mut *cc.state);
        }

        let variant = resolve_render_variant(size.portrait, size.xl, cc.def.available_variants());
        let children =
            cc.def
                .render_erased(variant, props, &*cc.state, device, &inputs, &cc.queue, 0.0);
        drain_to_fixpoint(&cc.queue, &mut *cc.state);
        cc.just_created = false;

        let mut child_map = core::mem::take(&mut cc.children);
        self.reconcile_children(
            &container.global_id,
            &mut child_map,
            children,
            frame,
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
    }

    /// Diffs one container's fresh child list against its previous
    /// containers, visiting each child recursively.
    fn reconcile_children(
        &mut self,
        parent_gid: &str,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        nodes: Vec<SpriteNode<I>>,
        parent_frame: &FrameLink<'_>,
        size: &ResolvedSize,
        platform: &mut dyn Platform<Inputs = I>,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) {
        let mut seen = BTreeSet::new();
        for node in nodes {
            match node {
                SpriteNode::Empty | SpriteNode::Texture(_) => {}
                SpriteNode::Custom(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let cid = match self.reusable_container(child_map, &n.id, device, tracer, |kind| {
                        matches!(kind, ContainerKind::Custom(_))
                    }) {
                        Some(cid) => {
                            let ContainerKind::Custom(cc) = &mut self.store.get_mut(cid).kind
                            else {
                                unreachable!("reusable_container checked the kind")
                            };
                            cc.def = Rc::clone(&n.def);
                            cid
                        }
                        None => {
                            let cid = self.create_custom(
                                Some(parent_gid),
                                &n.id,
                                &n.def,
                                &*n.props,
                                device,
                            );
                            child_map.insert(n.id.clone(), cid);
                            tracer.container_created(&self.store.get(cid).global_id);
                            cid
                        }
                    };
                    let child_frame = FrameLink::child(
                        parent_frame,
                        LocalTransform::from_props(&n.base.normalize()),
                    );
                    self.tick_custom(cid, &*n.props, &child_frame, size, platform, device, tracer);
                }
                SpriteNode::Pure(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let _ = self.reusable_container(child_map, &n.id, device, tracer, |kind| {
                        matches!(kind, ContainerKind::Pure(_))
                    });
                    self.tick_pure(child_map, parent_gid, n, size, device, tracer);
                }
                SpriteNode::Native(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let _ = self.reusable_container(child_map, &n.id, device, tracer, |kind| {
                        matches!(kind, ContainerKind::Native(_))
                    });
                    self.tick_native(child_map, parent_gid, n, size, device, tracer);
                }
            }
        }

        let unused: Vec<(SpriteId, ContainerId)> = child_map
            .iter()
            .filter(|(id, _)| !seen.contains(*id))
            .map(|(id, &cid)| (id.clone(), cid))
            .collect();
        for (id, cid) in unused {
            child_map.remove(&id);
            self.destroy_container(cid, device, tracer);
        }
    }

    /// Returns the existing container for `id` if its kind still matches.
    /// A container whose id was reused for a different node kind is
    /// destroyed so a fresh one can be created — prior state is never
    /// carried across kinds.
    fn reusable_container(
        &mut self,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        id: &SpriteId,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
        kind_matches: impl Fn(&ContainerKind<I>) -> bool,
    ) -> Option<ContainerId> {
        let cid = *child_map.get(id)?;
        if kind_matches(&self.store.get(cid).kind) {
            Some(cid)
        } else {
            child_map.remove(id);
            self.destroy_container(cid, device, tracer);
            None
        }
    }

    /// Visits one pure container, re-rendering into its cache when the
    /// props changed or the viewport resized. Returns the container id so
    /// callers can read the cache.
    fn tick_pure(
        &mut self,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        parent_gid: &str,
        node: PureSpriteNode,
        size: &ResolvedSize,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) -> ContainerId {
        let cid = match child_map.get(&node.id) {
            Some(&cid) => {
                let ContainerKind::Pure(pc) = &mut self.store.get_mut(cid).kind else {
                    unreachable!("pure visit on non-pure container")
                };
                pc.def = Rc::clone(&node.def);
                cid
            }
            None => {
                let global_id = format!("{parent_gid}/{}", node.id);
                let cid = self.store.insert(Container {
                    global_id,
                    kind: ContainerKind::Pure(PureContainer {
                        def: Rc::clone(&node.def),
                        // Replaced below, before anything can read it.
                        last_props: alloc::boxed::Box::new(()),
                        cache: None,
                        children: BTreeMap::new(),
                    }),
                });
                child_map.insert(node.id.clone(), cid);
                tracer.container_created(&self.store.get(cid).global_id);
                cid
            }
        };

        let mut container = self.store.take(cid);
        let ContainerKind::Pure(pc) = &mut container.kind else {
            unreachable!("pure visit on non-pure container")
        };
        let stale = self.did_resize
            || pc.cache.is_none()
            || pc
                .def
                .should_rerender_erased(&*pc.last_props, &*node.props);
        if stale {
            let variant =
                resolve_render_variant(size.portrait, size.xl, pc.def.available_variants());
            let child_nodes = pc.def.render_erased(variant, &*node.props, size);
            let mut grand_children = core::mem::take(&mut pc.children);
            let rendered = self.reconcile_pure_children(
                &container.global_id,
                &mut grand_children,
                child_nodes,
                size,
                device,
                tracer,
            );
            let ContainerKind::Pure(pc) = &mut container.kind else {
                unreachable!("container kind changed mid-visit")
            };
            pc.children = grand_children;
            pc.cache = Some(rendered);
            tracer.pure_cache_miss(&container.global_id);
        } else {
            tracer.pure_cache_hit(&container.global_id);
        }
        let ContainerKind::Pure(pc) = &mut container.kind else {
            unreachable!("container kind changed mid-visit")
        };
        pc.last_props = node.props;
        self.store.restore(cid, container);
        cid
    }

    /// Reconciles a pure sprite's children (only pure sprites and
    /// textures) and materializes their rendered form for the cache.
    fn reconcile_pure_children(
        &mut self,
        parent_gid: &str,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        nodes: Vec<PureNode>,
        size: &ResolvedSize,
        device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) -> Vec<RenderedNode> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                PureNode::Texture(texture) => out.push(RenderedNode::from_texture(texture)),
                PureNode::Sprite(n) => {
                    note_sibling_id(&mut seen, &n.id, parent_gid);
                    let id = n.id.clone();
                    let base = n.base.normalize();
                    let cid = self.tick_pure(child_map, parent_gid, n, size, device, tracer);
                    let ContainerKind::Pure(pc) = &self.store.get(cid).kind else {
                        unreachable!("pure visit returned a non-pure container")
                    };
                    let children = pc
                        .cache
                        .clone()
                        .expect("pure cache is filled by the visit");
                    out.push(RenderedNode::Group { id, base, children });
                }
            }
        }

        let unused: Vec<(SpriteId, ContainerId)> = child_map
            .iter()
            .filter(|(id, _)| !seen.contains(*id))
            .map(|(id, &cid)| (id.clone(), cid))
            .collect();
        for (id, cid) in unused {
            child_map.remove(&id);
            self.destroy_container(cid, device, tracer);
        }
        out
    }

    /// Visits one native container: host `create` on first sight, host
    /// `update` afterwards. Never descends — native state is opaque.
    fn tick_native(
        &mut self,
        child_map: &mut BTreeMap<SpriteId, ContainerId>,
        parent_gid: &str,
        node: NativeNode,
        size: &ResolvedSize,
        _device: &mut dyn Device,
        tracer: &mut Tracer<'_>,
    ) {
        let imp = self
            .registry
            .get(&node.name)
            .unwrap_or_else(|| panic!("cannot find Native Sprite {:?}", node.name));
        let mut utils = NativeSpriteUtils {
            size,
            did_resize: self.did_resize,
        };
        match child_map.get(&node.id) {
            Some(&cid) => {
                let mut container = self.store.take(cid);
                let ContainerKind::Native(nc) = &mut container.kind else {
                    unreachable!("native visit on non-native container")
                };
                nc.imp = Rc::clone(&imp);
                imp.update(
                    &*node.props,
                    &mut *nc.state,
                    &nc.parent_global_id,
                    &mut utils,
                );
                self.store.restore(cid, container);
            }
            None => {
                let state = imp.create(&*node.props, parent_gid, &mut utils);
                let global_id = format!("{parent_gid}/{}", node.id);
                let cid = self.store.insert(Container {
                    global_id,
                    kind: ContainerKind::Native(NativeContainer {
                        imp,
                        state,
                        parent_global_id: String::from(parent_gid),
                    }),
                });
                child_map.insert(node.id.clone(), cid);
                tracer.container_created(&self.store.get(cid).global_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::any::Any;
    use core::cell::{Cell, RefCell};

    use crate::device::Platform;
    use crate::props::BaseProps;
    use crate::sprite::{
        CustomSprite, NativeRegistry, NativeSprite, NativeSpriteUtils, PureNode, PureSprite,
        SpriteCtx, SpriteNode, Texture, TextureKind,
    };
    use crate::testing::{NullDevice, NullPlatform};
    use crate::trace::Tracer;
    use crate::tree::SpriteTree;

    type Ctx<'a, S> = SpriteCtx<'a, (), S>;

    fn rect(width: f64) -> Texture {
        Texture {
            base: BaseProps::default(),
            kind: TextureKind::Rectangle {
                width,
                height: 1.0,
                color: String::from("red"),
            },
        }
    }

    /// Logs its state value on every update; children configured per test
    /// via a closure over the parent state.
    struct Probe {
        label: &'static str,
        children: fn(u32) -> Vec<SpriteNode<()>>,
    }

    impl CustomSprite<()> for Probe {
        type Props = ();
        type State = u32;

        fn update(&self, _props: &(), state: &mut u32, ctx: &mut Ctx<'_, u32>) {
            *state += 1;
            ctx.device.log(&format!("{}:{}", self.label, state));
        }

        fn render(&self, _props: &(), state: &u32, _ctx: &mut Ctx<'_, u32>) -> Vec<SpriteNode<()>> {
            (self.children)(*state)
        }
    }

    fn tick(tree: &mut SpriteTree<()>, platform: &mut NullPlatform, device: &mut NullDevice) {
        let mut tracer = Tracer::disabled();
        tree.state_tick(platform, device, &mut tracer);
        platform.end_tick();
    }

    fn fixture(
        children: fn(u32) -> Vec<SpriteNode<()>>,
        registry: NativeRegistry,
    ) -> (SpriteTree<()>, NullPlatform, NullDevice) {
        let root = Probe {
            label: "root",
            children,
        };
        (
            SpriteTree::new(Rc::new(root), (), registry),
            NullPlatform::default(),
            NullDevice::new(),
        )
    }

    fn leaf_def() -> Rc<Probe> {
        Rc::new(Probe {
            label: "kid",
            children: |_| Vec::new(),
        })
    }

    #[test]
    fn update_skipped_on_creation_tick() {
        let (mut tree, mut platform, mut device) = fixture(|_| Vec::new(), NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device);
        assert!(device.logs.is_empty(), "creation tick must not run update");
        tick(&mut tree, &mut platform, &mut device);
        assert_eq!(device.logs, ["root:1"]);
    }

    #[test]
    fn stable_id_preserves_state_across_ticks() {
        fn one_kid(_state: u32) -> Vec<SpriteNode<()>> {
            vec![SpriteNode::custom(
                "kid",
                &leaf_def(),
                BaseProps::default(),
                (),
            )]
        }
        let (mut tree, mut platform, mut device) = fixture(one_kid, NativeRegistry::new());
        for _ in 0..4 {
            tick(&mut tree, &mut platform, &mut device);
        }
        // The kid was created on the first tick (update skipped there) and
        // advanced on the following three.
        let kid_logs: Vec<&str> = device
            .logs
            .iter()
            .filter(|l| l.starts_with("kid"))
            .map(String::as_str)
            .collect();
        assert_eq!(kid_logs, ["kid:1", "kid:2", "kid:3"]);
    }

    #[test]
    fn removed_then_readded_id_gets_fresh_state() {
        // The kid lives for root states 0-1, vanishes at 2, and returns
        // for 3-4; its counter must restart after the gap.
        fn with_gap(state: u32) -> Vec<SpriteNode<()>> {
            if state == 2 {
                vec![SpriteNode::Empty]
            } else {
                vec![SpriteNode::custom(
                    "kid",
                    &leaf_def(),
                    BaseProps::default(),
                    (),
                )]
            }
        }
        let (mut tree, mut platform, mut device) = fixture(with_gap, NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device); // root 0: kid created
        assert_eq!(tree.container_count(), 2);
        tick(&mut tree, &mut platform, &mut device); // root 1: kid updates
        tick(&mut tree, &mut platform, &mut device); // root 2: kid destroyed
        assert_eq!(tree.container_count(), 1);
        assert_eq!(device.cleanups, ["game/kid"]);
        tick(&mut tree, &mut platform, &mut device); // root 3: fresh kid
        assert_eq!(tree.container_count(), 2);
        tick(&mut tree, &mut platform, &mut device); // root 4: kid updates
        let kid_logs: Vec<&str> = device
            .logs
            .iter()
            .filter(|l| l.starts_with("kid"))
            .map(String::as_str)
            .collect();
        // The counter restarted from zero after the re-add: never "kid:2".
        assert_eq!(kid_logs, ["kid:1", "kid:1"]);
    }

    #[test]
    fn sibling_reorder_preserves_state() {
        struct Named;
        impl CustomSprite<()> for Named {
            type Props = &'static str;
            type State = u32;
            fn update(&self, label: &&'static str, state: &mut u32, ctx: &mut Ctx<'_, u32>) {
                *state += 1;
                ctx.device.log(&format!("{label}:{state}"));
            }
            fn render(
                &self,
                _props: &&'static str,
                _state: &u32,
                _ctx: &mut Ctx<'_, u32>,
            ) -> Vec<SpriteNode<()>> {
                Vec::new()
            }
        }

        fn swapping(state: u32) -> Vec<SpriteNode<()>> {
            let def = Rc::new(Named);
            let a = SpriteNode::custom("a", &def, BaseProps::default(), "a");
            let b = SpriteNode::custom("b", &def, BaseProps::default(), "b");
            if state % 2 == 0 {
                vec![a, b]
            } else {
                vec![b, a]
            }
        }
        let (mut tree, mut platform, mut device) = fixture(swapping, NativeRegistry::new());
        for _ in 0..4 {
            tick(&mut tree, &mut platform, &mut device);
        }
        let a_logs: Vec<&str> = device
            .logs
            .iter()
            .filter(|l| l.starts_with("a:"))
            .map(String::as_str)
            .collect();
        // Position in the child list never resets state.
        assert_eq!(a_logs, ["a:1", "a:2", "a:3"]);
        assert_eq!(tree.container_count(), 3);
    }

    #[test]
    #[should_panic(expected = "duplicate sprite id")]
    fn duplicate_sibling_id_panics() {
        fn twins(_state: u32) -> Vec<SpriteNode<()>> {
            vec![
                SpriteNode::custom("kid", &leaf_def(), BaseProps::default(), ()),
                SpriteNode::custom("kid", &leaf_def(), BaseProps::default(), ()),
            ]
        }
        let (mut tree, mut platform, mut device) = fixture(twins, NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device);
    }

    #[test]
    #[should_panic(expected = "duplicate sprite id")]
    fn duplicate_id_across_kinds_panics() {
        fn mixed(_state: u32) -> Vec<SpriteNode<()>> {
            struct Label;
            impl PureSprite for Label {
                type Props = ();
                fn should_rerender(&self, _prev: &(), _next: &()) -> bool {
                    false
                }
                fn render(&self, _props: &(), _size: &crate::size::ResolvedSize) -> Vec<PureNode> {
                    Vec::new()
                }
            }
            vec![
                SpriteNode::custom("kid", &leaf_def(), BaseProps::default(), ()),
                SpriteNode::pure("kid", &Rc::new(Label), BaseProps::default(), ()),
            ]
        }
        let (mut tree, mut platform, mut device) = fixture(mixed, NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device);
    }

    #[test]
    fn queued_updates_apply_fifo_before_render_sees_state() {
        struct Queuer;
        impl CustomSprite<()> for Queuer {
            type Props = ();
            type State = u32;
            fn update(&self, _props: &(), _state: &mut u32, ctx: &mut Ctx<'_, u32>) {
                // Three queued increments inside one update invocation.
                for _ in 0..3 {
                    ctx.updater.queue(|n| *n += 1);
                }
            }
            fn render(&self, _props: &(), state: &u32, ctx: &mut Ctx<'_, u32>) -> Vec<SpriteNode<()>> {
                ctx.device.log(&format!("n:{state}"));
                Vec::new()
            }
        }
        let mut tree: SpriteTree<()> =
            SpriteTree::new(Rc::new(Queuer), (), NativeRegistry::new());
        let mut platform = NullPlatform::default();
        let mut device = NullDevice::new();
        tick(&mut tree, &mut platform, &mut device); // creation: n:0
        tick(&mut tree, &mut platform, &mut device); // update queues, drain applies: n:3
        tick(&mut tree, &mut platform, &mut device); // again: n:6
        assert_eq!(device.logs, ["n:0", "n:3", "n:6"]);
    }

    #[test]
    fn deferred_release_waits_for_inflight_preload() {
        struct Loader;
        impl CustomSprite<()> for Loader {
            type Props = ();
            type State = ();
            fn init(&self, _props: &(), ctx: &mut crate::sprite::InitCtx<'_, ()>) {
                ctx.preload_files(&[crate::device::FileRef::Image(String::from("kid.png"))]);
            }
            fn render(&self, _props: &(), _state: &(), _ctx: &mut Ctx<'_, ()>) -> Vec<SpriteNode<()>> {
                Vec::new()
            }
        }
        fn loading_kid(state: u32) -> Vec<SpriteNode<()>> {
            if state == 0 {
                vec![SpriteNode::custom(
                    "kid",
                    &Rc::new(Loader),
                    BaseProps::default(),
                    (),
                )]
            } else {
                Vec::new()
            }
        }
        let (mut tree, mut platform, mut device) = fixture(loading_kid, NativeRegistry::new());
        device.loads_settled = false;
        tick(&mut tree, &mut platform, &mut device); // kid created, preload pending
        assert_eq!(device.preloads, ["game/kid"]);
        tick(&mut tree, &mut platform, &mut device); // kid removed, load in flight
        assert!(
            device.cleanups.is_empty(),
            "release must wait for the in-flight load"
        );
        tree.poll_pending_releases(&mut device);
        assert!(device.cleanups.is_empty(), "still unsettled");

        device.loads_settled = true;
        tree.poll_pending_releases(&mut device);
        assert_eq!(device.cleanups, ["game/kid"]);
    }

    #[test]
    fn kind_change_with_same_id_resets_the_container() {
        struct Label;
        impl PureSprite for Label {
            type Props = ();
            fn should_rerender(&self, _prev: &(), _next: &()) -> bool {
                false
            }
            fn render(&self, _props: &(), _size: &crate::size::ResolvedSize) -> Vec<PureNode> {
                Vec::new()
            }
        }
        fn shape_shifter(state: u32) -> Vec<SpriteNode<()>> {
            if state % 2 == 0 {
                vec![SpriteNode::custom("kid", &leaf_def(), BaseProps::default(), ())]
            } else {
                vec![SpriteNode::pure("kid", &Rc::new(Label), BaseProps::default(), ())]
            }
        }
        let (mut tree, mut platform, mut device) = fixture(shape_shifter, NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device); // custom kid
        tick(&mut tree, &mut platform, &mut device); // becomes pure: old destroyed
        assert_eq!(device.cleanups, ["game/kid"]);
        assert_eq!(tree.container_count(), 2);
        tick(&mut tree, &mut platform, &mut device); // back to custom, fresh state
        let kid_logs: Vec<&str> = device
            .logs
            .iter()
            .filter(|l| l.starts_with("kid"))
            .map(String::as_str)
            .collect();
        assert!(kid_logs.is_empty(), "recreated kid never reached update");
    }

    /// A pure sprite that counts its renders. The counter lives in the
    /// shared definition so the test can read it from outside the tree.
    struct Badge {
        renders: Cell<u32>,
    }
    impl PureSprite for Badge {
        type Props = u32;
        fn should_rerender(&self, prev: &u32, next: &u32) -> bool {
            prev != next
        }
        fn render(&self, props: &u32, _size: &crate::size::ResolvedSize) -> Vec<PureNode> {
            self.renders.set(self.renders.get() + 1);
            vec![PureNode::from(rect(f64::from(*props)))]
        }
    }

    /// A root hosting one pure badge whose props derive from root state.
    struct BadgeHost {
        badge: Rc<Badge>,
        props_from_state: fn(u32) -> u32,
    }
    impl CustomSprite<()> for BadgeHost {
        type Props = ();
        type State = u32;
        fn update(&self, _props: &(), state: &mut u32, _ctx: &mut Ctx<'_, u32>) {
            *state += 1;
        }
        fn render(&self, _props: &(), state: &u32, _ctx: &mut Ctx<'_, u32>) -> Vec<SpriteNode<()>> {
            vec![SpriteNode::pure(
                "badge",
                &self.badge,
                BaseProps::default(),
                (self.props_from_state)(*state),
            )]
        }
    }

    fn badge_fixture(
        props_from_state: fn(u32) -> u32,
    ) -> (Rc<Badge>, SpriteTree<()>, NullPlatform, NullDevice) {
        let badge = Rc::new(Badge {
            renders: Cell::new(0),
        });
        let tree = SpriteTree::new(
            Rc::new(BadgeHost {
                badge: Rc::clone(&badge),
                props_from_state,
            }),
            (),
            NativeRegistry::new(),
        );
        (badge, tree, NullPlatform::default(), NullDevice::new())
    }

    #[test]
    fn pure_cache_reused_until_props_change() {
        let (badge, mut tree, mut platform, mut device) = badge_fixture(|_| 7);
        for _ in 0..5 {
            tick(&mut tree, &mut platform, &mut device);
        }
        assert_eq!(
            badge.renders.get(),
            1,
            "constant props must render exactly once"
        );

        tree.notify_resize();
        tick(&mut tree, &mut platform, &mut device);
        assert_eq!(badge.renders.get(), 2, "resize invalidates the cache");
        tick(&mut tree, &mut platform, &mut device);
        assert_eq!(badge.renders.get(), 2, "flag cleared after one tick");
    }

    #[test]
    fn pure_rerenders_every_tick_when_props_change() {
        let (badge, mut tree, mut platform, mut device) = badge_fixture(|state| state);
        for _ in 0..4 {
            tick(&mut tree, &mut platform, &mut device);
        }
        // Root state ran 0, 1, 2, 3: one render per distinct props value.
        assert_eq!(badge.renders.get(), 4);
    }

    #[test]
    fn native_sprite_lifecycle_sequences_host_hooks() {
        struct Widget {
            calls: Rc<RefCell<Vec<String>>>,
        }
        impl NativeSprite for Widget {
            fn create(
                &self,
                _props: &dyn Any,
                parent: &str,
                utils: &mut NativeSpriteUtils<'_>,
            ) -> Box<dyn Any> {
                self.calls
                    .borrow_mut()
                    .push(format!("create:{parent}:{}", utils.scale()));
                Box::new(0_u32)
            }
            fn update(
                &self,
                _props: &dyn Any,
                state: &mut dyn Any,
                parent: &str,
                _utils: &mut NativeSpriteUtils<'_>,
            ) {
                let count = state.downcast_mut::<u32>().expect("widget state");
                *count += 1;
                self.calls.borrow_mut().push(format!("update:{parent}:{count}"));
            }
            fn cleanup(&self, state: Box<dyn Any>, parent: &str) {
                let count = state.downcast::<u32>().expect("widget state");
                self.calls.borrow_mut().push(format!("cleanup:{parent}:{count}"));
            }
        }

        fn native_kid(state: u32) -> Vec<SpriteNode<()>> {
            if state < 2 {
                vec![SpriteNode::native("field", "text-input", ())]
            } else {
                Vec::new()
            }
        }

        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut registry = NativeRegistry::new();
        registry.register(
            "text-input",
            Rc::new(Widget {
                calls: Rc::clone(&calls),
            }),
        );
        let (mut tree, mut platform, mut device) = fixture(native_kid, registry);
        tick(&mut tree, &mut platform, &mut device); // state 0: create
        tick(&mut tree, &mut platform, &mut device); // state 1: update
        tick(&mut tree, &mut platform, &mut device); // state 2: cleanup
        assert_eq!(
            *calls.borrow(),
            [
                String::from("create:game:2"),
                String::from("update:game:1"),
                String::from("cleanup:game:1"),
            ]
        );
        assert_eq!(tree.container_count(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot find Native Sprite")]
    fn unregistered_native_name_panics() {
        fn unknown(_state: u32) -> Vec<SpriteNode<()>> {
            vec![SpriteNode::native("field", "slider", ())]
        }
        let (mut tree, mut platform, mut device) = fixture(unknown, NativeRegistry::new());
        tick(&mut tree, &mut platform, &mut device);
    }
}
