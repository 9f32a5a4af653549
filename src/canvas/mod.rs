pub mod geometry;
pub mod input;
pub mod layer;
pub mod raster;
pub mod stack;
pub mod style;
pub mod surface;

/// The active drawing tool. Freehand tools stroke directly onto the
/// current layer; shape tools go through the two-point geometry and the
/// scratch preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    None,
    Pen,
    Eraser,
    Square,
    Rect,
    Circle,
    Oval,
    Triangle,
}

impl Tool {
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }

    pub fn is_shape(self) -> bool {
        matches!(
            self,
            Self::Square | Self::Rect | Self::Circle | Self::Oval | Self::Triangle
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Pen => "Pen",
            Self::Eraser => "Eraser",
            Self::Square => "Square",
            Self::Rect => "Rectangle",
            Self::Circle => "Circle",
            Self::Oval => "Oval",
            Self::Triangle => "Triangle",
        }
    }
}
