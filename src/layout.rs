//! Responsive sizes derived from the screen dimensions.

use serde::Serialize;

use crate::theme::Theme;

/// Widths below this are compact (small phones).
pub const COMPACT_MAX_WIDTH: f32 = 375.0;

/// Widths below this, and not compact, are regular (phones); anything
/// wider is a tablet.
pub const REGULAR_MAX_WIDTH: f32 = 768.0;

pub const MODAL_MAX_WIDTH: f32 = 560.0;
const MODAL_WIDTH_RATIO: f32 = 0.9;
const MODAL_HEIGHT_RATIO: f32 = 0.85;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Compact,
    Regular,
    Wide,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        if width < COMPACT_MAX_WIDTH {
            Breakpoint::Compact
        } else if width < REGULAR_MAX_WIDTH {
            Breakpoint::Regular
        } else {
            Breakpoint::Wide
        }
    }

    /// Columns in the photo gallery grid.
    pub fn gallery_columns(self) -> u32 {
        match self {
            Breakpoint::Compact => 2,
            Breakpoint::Regular => 3,
            Breakpoint::Wide => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// The usable screen area, in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport; negative or non-finite sizes are taken as zero.
    pub fn new(width: f32, height: f32) -> Self {
        fn clean(v: f32) -> f32 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }

        Viewport {
            width: clean(width),
            height: clean(height),
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }

    pub fn gallery_columns(&self) -> u32 {
        self.breakpoint().gallery_columns()
    }

    /// Side of a square gallery tile: the row is split evenly between
    /// the columns after outer padding and gutters.
    pub fn photo_tile_size(&self, theme: &Theme) -> f32 {
        let columns = self.gallery_columns() as f32;
        let padding = theme.spacing.md * 2.0;
        let gutters = theme.spacing.sm * (columns - 1.0);

        ((self.width - padding - gutters) / columns).max(0.0)
    }

    /// Size of a centred modal dialog.
    pub fn modal_size(&self) -> Size {
        Size {
            width: (self.width * MODAL_WIDTH_RATIO).min(MODAL_MAX_WIDTH),
            height: self.height * MODAL_HEIGHT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::theme::THEME;

    #[test]
    fn breakpoints_follow_width() {
        assert_eq!(Breakpoint::for_width(320.0), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(375.0), Breakpoint::Regular);
        assert_eq!(Breakpoint::for_width(767.9), Breakpoint::Regular);
        assert_eq!(Breakpoint::for_width(1024.0), Breakpoint::Wide);

        assert_eq!(Viewport::new(320.0, 640.0).gallery_columns(), 2);
        assert_eq!(Viewport::new(414.0, 896.0).gallery_columns(), 3);
        assert_eq!(Viewport::new(1024.0, 768.0).gallery_columns(), 4);
    }

    #[test]
    fn tiles_fill_the_row() {
        let viewport = Viewport::new(414.0, 896.0);
        let tile = viewport.photo_tile_size(&THEME);

        // 414 - 2 * 16 padding - 2 * 8 gutters, over 3 columns
        assert!((tile - 122.0).abs() < f32::EPSILON);
    }

    #[test]
    fn modal_is_capped_on_wide_screens() {
        assert_eq!(
            Viewport::new(1024.0, 768.0).modal_size(),
            Size {
                width: 560.0,
                height: 768.0 * 0.85
            }
        );
        assert!((Viewport::new(400.0, 800.0).modal_size().width - 360.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn layout_stays_within_screen(width in -10.0f32..3000.0, height in -10.0f32..3000.0) {
            let viewport = Viewport::new(width, height);
            let modal = viewport.modal_size();
            let tile = viewport.photo_tile_size(&THEME);

            prop_assert!(modal.width >= 0.0 && modal.width <= viewport.width);
            prop_assert!(modal.height >= 0.0 && modal.height <= viewport.height);
            prop_assert!(tile >= 0.0);
            prop_assert!(tile * viewport.gallery_columns() as f32 <= viewport.width + 0.001);
        }
    }
}
