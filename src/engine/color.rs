//! Stage colours.

use crate::domain::{Rgb, StageLabel};

/// Colour for labels outside the stage catalog.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0x74, 0x7d, 0x8c);

/// Marker colour of the highlighted current-day point.
pub const HIGHLIGHT_COLOR: Rgb = Rgb::new(0xff, 0x6b, 0x6b);

impl StageLabel {
    pub fn color(self) -> Rgb {
        match self {
            StageLabel::YolkSacLarvae => Rgb::new(0xff, 0x6b, 0x6b),
            StageLabel::EarlyLarvae => Rgb::new(0xfe, 0xca, 0x57),
            StageLabel::Larvae => Rgb::new(0x48, 0xdb, 0xfb),
            StageLabel::LateLarvae => Rgb::new(0x0a, 0xbd, 0xe3),
            StageLabel::Juvenile => Rgb::new(0x00, 0xd2, 0xd3),
            StageLabel::SmallFingerling => Rgb::new(0x54, 0xa0, 0xff),
            StageLabel::Fingerling => Rgb::new(0x5f, 0x27, 0xcd),
            StageLabel::LargeFingerling => Rgb::new(0xa5, 0x5e, 0xea),
            StageLabel::TableFish => Rgb::new(0x26, 0xde, 0x81),
            StageLabel::Adult => Rgb::new(0x2d, 0x34, 0x36),
            StageLabel::Start => Rgb::new(0x95, 0xa5, 0xa6),
        }
    }
}

/// Colour for any stage label text; unknown labels get `FALLBACK_COLOR`.
pub fn phase_color(stage_label: &str) -> Rgb {
    stage_label
        .parse::<StageLabel>()
        .map(StageLabel::color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_labels() {
        assert_eq!(phase_color("Adult").hex(), "#2d3436");
        assert_eq!(phase_color("Larvae").hex(), "#48dbfb");
        assert_eq!(phase_color("Unknown"), FALLBACK_COLOR);
        assert_eq!(phase_color("").hex(), "#747d8c");
    }

    #[test]
    fn every_stage_has_its_own_colour() {
        for stage in StageLabel::ALL {
            assert_eq!(phase_color(stage.label()), stage.color());
            assert_ne!(stage.color(), FALLBACK_COLOR);
        }
    }
}
