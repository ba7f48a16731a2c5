use crate::steps::ColorClass;
use crossterm::style::Color;

/// Terminal color for each semantic class (default background)
pub fn class_color(class: ColorClass) -> Color {
    match class {
        ColorClass::Leaf => Color::Green,
        ColorClass::Wood => Color::Yellow,
        ColorClass::Base => Color::White,
        ColorClass::Text => Color::Cyan,
    }
}
