/// Geometry of the stencil support.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StencilShape {
    /// Center row and center column only.
    Star,

    /// Full square neighborhood.
    Compact,
}

impl StencilShape {
    /// Shape selected for the binary at build time.
    #[cfg(feature = "compact")]
    pub const BUILD: StencilShape = StencilShape::Compact;

    #[cfg(not(feature = "compact"))]
    pub const BUILD: StencilShape = StencilShape::Star;

    /// Number of points in the support, center included.
    pub fn stencil_size(&self, radius: usize) -> usize {
        match self {
            StencilShape::Star => 4 * radius + 1,
            StencilShape::Compact => (2 * radius + 1) * (2 * radius + 1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StencilShape::Star => "star",
            StencilShape::Compact => "compact",
        }
    }
}

impl std::fmt::Display for StencilShape {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.name())
    }
}
