// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-plan flattening for orogen sprite trees.
//!
//! This crate provides the intermediate representation between
//! [`orogen_core`]'s nested render output and backend-specific drawing. It
//! defines:
//!
//! - [`RenderItem`] — one drawable with its absolute transform, composed
//!   opacity, and accumulated clip stack
//! - [`RenderPlan`] — an ordered, back-to-front list of items for one frame
//! - [`flatten`] — the walk from [`RenderedNode`] tree to plan
//!
//! [`RenderedNode`]: orogen_core::output::RenderedNode

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod plan;

pub use plan::{ClipPlacement, RenderItem, RenderPlan, flatten, flatten_into};
