//! Boundary with the host UI framework's renderer.

use crate::location::Location;

/// Props handed to the unit being rendered: the current location merged
/// with whatever the router itself was given by its parent.
#[derive(Debug)]
pub struct RenderProps<'a, U, P> {
    pub location: &'a Location<U>,
    pub inherited: &'a P,
}

// Manual impls: deriving would require `U: Clone` and `P: Clone`.
impl<U, P> Clone for RenderProps<'_, U, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U, P> Copy for RenderProps<'_, U, P> {}

/// Produces a view for a unit. Rendering and diffing are the host's business.
pub trait Renderer<U> {
    type Props;
    type View;

    fn render(&self, unit: &U, props: RenderProps<'_, U, Self::Props>) -> Self::View;
}
