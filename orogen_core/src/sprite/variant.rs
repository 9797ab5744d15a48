// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-method variants and the orientation/XL fallback table.
//!
//! A sprite definition always provides a base (landscape) render method and
//! may provide portrait and/or XL-specific ones. Which method runs is
//! decided *before* dispatch by [`resolve_render_variant`], a pure function
//! over the requested orientation/XL flags and the set the definition
//! declares — selection never silently produces an empty tree.

/// Which render method a pass dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderVariant {
    /// The base method; always available.
    Landscape,
    /// Portrait-specific method.
    Portrait,
    /// Large-viewport landscape method.
    LandscapeXl,
    /// Large-viewport portrait method.
    PortraitXl,
}

/// The set of orientation-specific render methods a definition provides in
/// addition to its base method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct VariantSet(u8);

impl VariantSet {
    const PORTRAIT: u8 = 1 << 0;
    const LANDSCAPE_XL: u8 = 1 << 1;
    const PORTRAIT_XL: u8 = 1 << 2;

    /// Only the base method.
    pub const BASE: Self = Self(0);

    /// Adds the portrait method.
    #[must_use]
    pub const fn with_portrait(self) -> Self {
        Self(self.0 | Self::PORTRAIT)
    }

    /// Adds the landscape XL method.
    #[must_use]
    pub const fn with_landscape_xl(self) -> Self {
        Self(self.0 | Self::LANDSCAPE_XL)
    }

    /// Adds the portrait XL method.
    #[must_use]
    pub const fn with_portrait_xl(self) -> Self {
        Self(self.0 | Self::PORTRAIT_XL)
    }

    /// Whether `variant` is available. The base method always is.
    #[must_use]
    pub const fn contains(self, variant: RenderVariant) -> bool {
        match variant {
            RenderVariant::Landscape => true,
            RenderVariant::Portrait => self.0 & Self::PORTRAIT != 0,
            RenderVariant::LandscapeXl => self.0 & Self::LANDSCAPE_XL != 0,
            RenderVariant::PortraitXl => self.0 & Self::PORTRAIT_XL != 0,
        }
    }
}

/// Selects the render method for the requested orientation and XL flags.
///
/// Fallback rules: a missing portrait method falls back to the landscape
/// one; a missing XL method falls back to the corresponding non-XL one. For
/// portrait XL the candidates are tried in the order portrait-XL,
/// landscape-XL, portrait, base — an XL request dominates orientation.
#[must_use]
pub fn resolve_render_variant(portrait: bool, xl: bool, available: VariantSet) -> RenderVariant {
    match (portrait, xl) {
        (false, false) => RenderVariant::Landscape,
        (true, false) => {
            if available.contains(RenderVariant::Portrait) {
                RenderVariant::Portrait
            } else {
                RenderVariant::Landscape
            }
        }
        (false, true) => {
            if available.contains(RenderVariant::LandscapeXl) {
                RenderVariant::LandscapeXl
            } else {
                RenderVariant::Landscape
            }
        }
        (true, true) => {
            if available.contains(RenderVariant::PortraitXl) {
                RenderVariant::PortraitXl
            } else if available.contains(RenderVariant::LandscapeXl) {
                RenderVariant::LandscapeXl
            } else if available.contains(RenderVariant::Portrait) {
                RenderVariant::Portrait
            } else {
                RenderVariant::Landscape
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: VariantSet = VariantSet::BASE
        .with_portrait()
        .with_landscape_xl()
        .with_portrait_xl();

    #[test]
    fn base_only_always_lands_on_landscape() {
        for portrait in [false, true] {
            for xl in [false, true] {
                assert_eq!(
                    resolve_render_variant(portrait, xl, VariantSet::BASE),
                    RenderVariant::Landscape,
                    "portrait={portrait} xl={xl}"
                );
            }
        }
    }

    #[test]
    fn exact_match_wins_when_available() {
        assert_eq!(
            resolve_render_variant(false, false, ALL),
            RenderVariant::Landscape
        );
        assert_eq!(
            resolve_render_variant(true, false, ALL),
            RenderVariant::Portrait
        );
        assert_eq!(
            resolve_render_variant(false, true, ALL),
            RenderVariant::LandscapeXl
        );
        assert_eq!(
            resolve_render_variant(true, true, ALL),
            RenderVariant::PortraitXl
        );
    }

    #[test]
    fn portrait_falls_back_to_landscape() {
        let xl_only = VariantSet::BASE.with_landscape_xl();
        assert_eq!(
            resolve_render_variant(true, false, xl_only),
            RenderVariant::Landscape
        );
    }

    #[test]
    fn xl_falls_back_to_non_xl() {
        let portrait_only = VariantSet::BASE.with_portrait();
        assert_eq!(
            resolve_render_variant(false, true, portrait_only),
            RenderVariant::Landscape
        );
        assert_eq!(
            resolve_render_variant(true, true, portrait_only),
            RenderVariant::Portrait
        );
    }

    #[test]
    fn portrait_xl_prefers_landscape_xl_over_portrait() {
        let both = VariantSet::BASE.with_portrait().with_landscape_xl();
        assert_eq!(
            resolve_render_variant(true, true, both),
            RenderVariant::LandscapeXl
        );
    }

    #[test]
    fn contains_reports_declared_methods() {
        let set = VariantSet::BASE.with_portrait_xl();
        assert!(set.contains(RenderVariant::Landscape));
        assert!(set.contains(RenderVariant::PortraitXl));
        assert!(!set.contains(RenderVariant::Portrait));
        assert!(!set.contains(RenderVariant::LandscapeXl));
    }
}
