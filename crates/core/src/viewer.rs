use crate::domain::Slide;

/// The full-screen lightbox the gallery hands its visible slides to.
///
/// The gallery keeps the handle it is given and calls [`Viewer::refresh`] after every
/// change to the visible slide list, so the viewer never indexes into a stale list.
pub trait Viewer {
    /// Replace the slide list.
    fn refresh(&mut self, slides: &[Slide]);

    /// Show the slide at `index` of the most recent list. `slug` identifies the same
    /// slide, for viewers that look slides up by identifier.
    fn open(&mut self, index: usize, slug: &str);
}

/// Navigation reported back by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    SlideChanged { index: usize },
    Closed,
}
