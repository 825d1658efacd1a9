use bytemuck::{Pod, Zeroable};

/// An RGBA color with floating point components between 0 and 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Color::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Parameters of a stroke draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Line width in world units.
    ///
    /// Default value: `StrokeStyle::DEFAULT_WIDTH`.
    pub width: f32,
}

impl StrokeStyle {
    pub const DEFAULT_WIDTH: f32 = 0.02;

    pub const DEFAULT: Self = StrokeStyle {
        color: Color::BLACK,
        width: Self::DEFAULT_WIDTH,
    };

    #[inline]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters of a fill draw.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FillStyle {
    pub color: Color,
}

impl FillStyle {
    pub const fn color(color: Color) -> Self {
        FillStyle { color }
    }
}
