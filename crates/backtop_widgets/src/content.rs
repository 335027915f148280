//! What the control renders inside its circle

use std::fmt::Write as _;

use backtop_core::Color;

/// Path data of the up-chevron glyph (256x256 box)
pub const CHEVRON_UP_PATH: &str = "M213.66 165.66a8 8 0 0 1-11.32 0L128 91.31l-74.34 74.35a8 8 0 0 1-11.32-11.32l80-80a8 8 0 0 1 11.32 0l80 80a8 8 0 0 1 0 11.32";

/// Single-path vector icon
#[derive(Clone, Debug, PartialEq)]
pub struct SvgIcon {
    /// `[min_x, min_y, width, height]`
    pub view_box: [f32; 4],
    pub width: f32,
    pub height: f32,
    pub path: String,
    /// `None` paints with the control's foreground color
    pub fill: Option<Color>,
}

impl SvgIcon {
    pub fn new(view_box: [f32; 4], width: f32, height: f32, path: impl Into<String>) -> Self {
        Self {
            view_box,
            width,
            height,
            path: path.into(),
            fill: None,
        }
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Standalone SVG markup for hosts that paint through a browser
    pub fn to_markup(&self) -> String {
        let [x, y, w, h] = self.view_box;
        let fill = self
            .fill
            .map_or_else(|| "currentColor".to_string(), |c| c.to_hex_string());
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}"><path fill="{}" d="{}"/></svg>"#,
            self.width, self.height, x, y, w, h, fill, self.path
        );
        out
    }
}

/// Content of the control
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Icon(SvgIcon),
}

impl Content {
    /// The up-chevron shown by the scroll-to-top control
    pub fn default_chevron() -> Self {
        Content::Icon(SvgIcon::new(
            [0.0, 0.0, 256.0, 256.0],
            20.0,
            20.0,
            CHEVRON_UP_PATH,
        ))
    }

    pub fn text(label: impl Into<String>) -> Self {
        Content::Text(label.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Content::Empty)
    }

    /// `self`, or `fallback` when empty
    pub fn or(self, fallback: Content) -> Content {
        if self.is_empty() {
            fallback
        } else {
            self
        }
    }
}
