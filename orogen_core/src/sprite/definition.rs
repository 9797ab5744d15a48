// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sprite definition traits and hook contexts.
//!
//! Authors describe behavior by implementing [`CustomSprite`] (stateful) or
//! [`PureSprite`] (memoized, side-effect-free) on a plain type, then emit
//! nodes referencing a shared `Rc` of that type. The tree erases the
//! per-definition `Props`/`State` types behind object-safe crate-internal
//! traits; downcasts are sound because a container only ever pairs a
//! definition with the state that definition produced.
//!
//! # Hook sequencing (custom sprites)
//!
//! Per logical tick, a container drains its update queue, runs
//! [`update`](CustomSprite::update) (skipped on the tick the container was
//! created), drains again, runs the selected render method, and drains once
//! more. [`init`](CustomSprite::init) runs exactly once per container
//! lifetime, before the first render.
//!
//! # Orientation variants
//!
//! The optional `render_portrait`/`render_xl`/`render_portrait_xl` methods
//! default to the fallback chain in
//! [`resolve_render_variant`](crate::sprite::resolve_render_variant). A
//! definition that overrides one must also report it in
//! [`variants`](CustomSprite::variants) so selection can find it.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::any::Any;

use crate::device::{Device, FileRef, LoadTicket};
use crate::size::ResolvedSize;
use crate::sprite::node::{PureNode, SpriteNode};
use crate::sprite::variant::{RenderVariant, VariantSet};
use crate::update::{SharedUpdateQueue, Updater};

/// Context passed to [`CustomSprite::init`].
pub struct InitCtx<'a, S> {
    /// The host device.
    pub device: &'a mut dyn Device,
    /// Enqueues state updates; useful for wiring timer callbacks.
    pub updater: Updater<S>,
    global_id: &'a str,
    load: &'a mut Option<LoadTicket>,
}

impl<S> InitCtx<'_, S> {
    /// Requests asset files scoped to this sprite instance.
    ///
    /// Files are reference-counted per instance and released when the
    /// instance leaves the tree (deferred until the load settles if it is
    /// still in flight). One request per `init`; a second call replaces the
    /// tracked ticket.
    pub fn preload_files(&mut self, files: &[FileRef]) {
        *self.load = Some(self.device.preload_files(self.global_id, files));
    }
}

impl<S> core::fmt::Debug for InitCtx<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "InitCtx({})", self.global_id)
    }
}

/// Context passed to [`CustomSprite::update`] and the render methods.
pub struct SpriteCtx<'a, I, S> {
    /// The host device.
    pub device: &'a mut dyn Device,
    /// This sprite's input snapshot, in its own local frame.
    pub inputs: &'a I,
    /// Enqueues state updates for the next drain point.
    pub updater: Updater<S>,
    /// Fraction of a tick elapsed past the last completed one, in `[0, 1)`.
    /// Zero during state ticks; meaningful in render methods, which may use
    /// it to extrapolate visual position.
    pub extrapolation: f64,
}

impl<I, S> core::fmt::Debug for SpriteCtx<'_, I, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "SpriteCtx(extrapolation: {})", self.extrapolation)
    }
}

/// A stateful sprite definition.
///
/// `I` is the host platform's input snapshot type, shared by every custom
/// sprite in one game.
pub trait CustomSprite<I>: 'static {
    /// Per-node props, supplied by the parent on every render.
    type Props: 'static;
    /// Per-instance state, created by [`init`](Self::init) and owned by the
    /// container.
    type State: Default + 'static;

    /// Produces the initial state. Runs exactly once per container
    /// lifetime. The default returns `State::default()`.
    fn init(&self, props: &Self::Props, ctx: &mut InitCtx<'_, Self::State>) -> Self::State {
        let _ = (props, ctx);
        Self::State::default()
    }

    /// Advances state by one logical tick. Not called on the tick the
    /// container was created. The default does nothing.
    fn update(
        &self,
        props: &Self::Props,
        state: &mut Self::State,
        ctx: &mut SpriteCtx<'_, I, Self::State>,
    ) {
        let _ = (props, state, ctx);
    }

    /// Produces this sprite's children. Must not mutate anything other than
    /// through [`SpriteCtx::updater`]; sibling ids must be unique.
    fn render(
        &self,
        props: &Self::Props,
        state: &Self::State,
        ctx: &mut SpriteCtx<'_, I, Self::State>,
    ) -> Vec<SpriteNode<I>>;

    /// Portrait render method; defaults to [`render`](Self::render).
    fn render_portrait(
        &self,
        props: &Self::Props,
        state: &Self::State,
        ctx: &mut SpriteCtx<'_, I, Self::State>,
    ) -> Vec<SpriteNode<I>> {
        self.render(props, state, ctx)
    }

    /// Large-viewport render method; defaults to [`render`](Self::render).
    fn render_xl(
        &self,
        props: &Self::Props,
        state: &Self::State,
        ctx: &mut SpriteCtx<'_, I, Self::State>,
    ) -> Vec<SpriteNode<I>> {
        self.render(props, state, ctx)
    }

    /// Large-viewport portrait render method; defaults to
    /// [`render_portrait`](Self::render_portrait).
    fn render_portrait_xl(
        &self,
        props: &Self::Props,
        state: &Self::State,
        ctx: &mut SpriteCtx<'_, I, Self::State>,
    ) -> Vec<SpriteNode<I>> {
        self.render_portrait(props, state, ctx)
    }

    /// The orientation-specific render methods this definition overrides.
    fn variants(&self) -> VariantSet {
        VariantSet::BASE
    }
}

/// A memoized, side-effect-free sprite definition.
///
/// Pure sprites render from props and viewport size alone — no state, no
/// device, no inputs — and may only produce other pure sprites or textures
/// ([`PureNode`] enforces this). Their output is cached and recomputed only
/// when [`should_rerender`](Self::should_rerender) reports a change or the
/// viewport was resized.
pub trait PureSprite: 'static {
    /// Per-node props, supplied by the parent on every render.
    type Props: 'static;

    /// Whether a props change requires re-rendering.
    fn should_rerender(&self, prev: &Self::Props, next: &Self::Props) -> bool;

    /// Produces this sprite's children.
    fn render(&self, props: &Self::Props, size: &ResolvedSize) -> Vec<PureNode>;

    /// Portrait render method; defaults to [`render`](Self::render).
    fn render_portrait(&self, props: &Self::Props, size: &ResolvedSize) -> Vec<PureNode> {
        self.render(props, size)
    }

    /// Large-viewport render method; defaults to [`render`](Self::render).
    fn render_xl(&self, props: &Self::Props, size: &ResolvedSize) -> Vec<PureNode> {
        self.render(props, size)
    }

    /// Large-viewport portrait render method; defaults to
    /// [`render_portrait`](Self::render_portrait).
    fn render_portrait_xl(&self, props: &Self::Props, size: &ResolvedSize) -> Vec<PureNode> {
        self.render_portrait(props, size)
    }

    /// The orientation-specific render methods this definition overrides.
    fn variants(&self) -> VariantSet {
        VariantSet::BASE
    }
}

/// Object-safe erasure of [`CustomSprite`], implemented for every definition
/// by blanket impl. Downcast failures are container-pairing bugs, not
/// author errors, and panic.
pub(crate) trait AnyCustomSprite<I> {
    fn init_erased(
        &self,
        props: &dyn Any,
        device: &mut dyn Device,
        queue: &SharedUpdateQueue,
        global_id: &str,
        load: &mut Option<LoadTicket>,
    ) -> Box<dyn Any>;

    fn update_erased(
        &self,
        props: &dyn Any,
        state: &mut dyn Any,
        device: &mut dyn Device,
        inputs: &I,
        queue: &SharedUpdateQueue,
    );

    fn render_erased(
        &self,
        variant: RenderVariant,
        props: &dyn Any,
        state: &dyn Any,
        device: &mut dyn Device,
        inputs: &I,
        queue: &SharedUpdateQueue,
        extrapolation: f64,
    ) -> Vec<SpriteNode<I>>;

    fn available_variants(&self) -> VariantSet;
}

impl<I: 'static, D: CustomSprite<I>> AnyCustomSprite<I> for D {
    fn init_erased(
        &self,
        props: &dyn Any,
        device: &mut dyn Device,
        queue: &SharedUpdateQueue,
        global_id: &str,
        load: &mut Option<LoadTicket>,
    ) -> Box<dyn Any> {
        let props = downcast_props::<D::Props>(props);
        let mut ctx = InitCtx {
            device,
            updater: Updater::new(Rc::clone(queue)),
            global_id,
            load,
        };
        Box::new(self.init(props, &mut ctx))
    }

    fn update_erased(
        &self,
        props: &dyn Any,
        state: &mut dyn Any,
        device: &mut dyn Device,
        inputs: &I,
        queue: &SharedUpdateQueue,
    ) {
        let props = downcast_props::<D::Props>(props);
        let state = state
            .downcast_mut::<D::State>()
            .expect("container state paired with a different definition");
        let mut ctx = SpriteCtx {
            device,
            inputs,
            updater: Updater::new(Rc::clone(queue)),
            extrapolation: 0.0,
        };
        self.update(props, state, &mut ctx);
    }

    fn render_erased(
        &self,
        variant: RenderVariant,
        props: &dyn Any,
        state: &dyn Any,
        device: &mut dyn Device,
        inputs: &I,
        queue: &SharedUpdateQueue,
        extrapolation: f64,
    ) -> Vec<SpriteNode<I>> {
        let props = downcast_props::<D::Props>(props);
        let state = state
            .downcast_ref::<D::State>()
            .expect("container state paired with a different definition");
        let mut ctx = SpriteCtx {
            device,
            inputs,
            updater: Updater::new(Rc::clone(queue)),
            extrapolation,
        };
        match variant {
            RenderVariant::Landscape => self.render(props, state, &mut ctx),
            RenderVariant::Portrait => self.render_portrait(props, state, &mut ctx),
            RenderVariant::LandscapeXl => self.render_xl(props, state, &mut ctx),
            RenderVariant::PortraitXl => self.render_portrait_xl(props, state, &mut ctx),
        }
    }

    fn available_variants(&self) -> VariantSet {
        self.variants()
    }
}

/// Object-safe erasure of [`PureSprite`].
pub(crate) trait AnyPureSprite {
    fn should_rerender_erased(&self, prev: &dyn Any, next: &dyn Any) -> bool;

    fn render_erased(
        &self,
        variant: RenderVariant,
        props: &dyn Any,
        size: &ResolvedSize,
    ) -> Vec<PureNode>;

    fn available_variants(&self) -> VariantSet;
}

impl<D: PureSprite> AnyPureSprite for D {
    fn should_rerender_erased(&self, prev: &dyn Any, next: &dyn Any) -> bool {
        self.should_rerender(downcast_props::<D::Props>(prev), downcast_props::<D::Props>(next))
    }

    fn render_erased(
        &self,
        variant: RenderVariant,
        props: &dyn Any,
        size: &ResolvedSize,
    ) -> Vec<PureNode> {
        let props = downcast_props::<D::Props>(props);
        match variant {
            RenderVariant::Landscape => self.render(props, size),
            RenderVariant::Portrait => self.render_portrait(props, size),
            RenderVariant::LandscapeXl => self.render_xl(props, size),
            RenderVariant::PortraitXl => self.render_portrait_xl(props, size),
        }
    }

    fn available_variants(&self) -> VariantSet {
        self.variants()
    }
}

fn downcast_props<P: 'static>(props: &dyn Any) -> &P {
    props
        .downcast_ref::<P>()
        .expect("sprite props paired with a different definition")
}
