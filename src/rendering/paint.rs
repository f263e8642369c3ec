//! Paint command set for the print backend

use crate::typography::FontWeight;

pub type Rgba = (u8, u8, u8, u8);

pub const BLACK: Rgba = (0, 0, 0, 255);
pub const WHITE: Rgba = (255, 255, 255, 255);

/// Opaque color from a `0xRRGGBB` literal
pub const fn rgb(hex: u32) -> Rgba {
    (((hex >> 16) & 0xff) as u8, ((hex >> 8) & 0xff) as u8, (hex & 0xff) as u8, 255)
}

/// Which family a run is set in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// The document's selected (or fallback) family
    Body,
    /// Built-in monospace, used for labels by some templates
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontRef {
    pub face: Face,
    pub weight: FontWeight,
}

/// Positioned drawing operations in page space (points, origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rgba: Rgba,
    },
    Text {
        x: f32,
        /// Baseline position
        y: f32,
        size: f32,
        font: FontRef,
        rgba: Rgba,
        text: String,
        heading: bool,
    },
    Link {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        href: String,
    },
}

impl PaintCommand {
    /// One-line textual form used for fingerprints and debugging
    pub fn describe(&self) -> String {
        match self {
            PaintCommand::SolidRect { x, y, width, height, rgba } => format!(
                "rect {:.2} {:.2} {:.2} {:.2} #{:02x}{:02x}{:02x}",
                x, y, width, height, rgba.0, rgba.1, rgba.2
            ),
            PaintCommand::Text { x, y, size, font, rgba, text, heading } => format!(
                "text {:.2} {:.2} {:.1} {:?}/{} #{:02x}{:02x}{:02x}{} {:?}",
                x,
                y,
                size,
                font.face,
                font.weight.numeric(),
                rgba.0,
                rgba.1,
                rgba.2,
                if *heading { " h" } else { "" },
                text
            ),
            PaintCommand::Link { x, y, width, height, href } => {
                format!("link {:.2} {:.2} {:.2} {:.2} {}", x, y, width, height, href)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_unpacks_channels() {
        assert_eq!(rgb(0x336699), (0x33, 0x66, 0x99, 255));
    }

    #[test]
    fn describe_is_stable() {
        let cmd = PaintCommand::SolidRect { x: 0.0, y: 1.5, width: 10.0, height: 2.0, rgba: BLACK };
        assert_eq!(cmd.describe(), "rect 0.00 1.50 10.00 2.00 #000000");
    }
}
