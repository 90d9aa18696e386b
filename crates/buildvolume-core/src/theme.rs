use crate::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Scene colors for a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemePalette {
    pub background: Rgb,
    pub grid_major: Rgb,
    pub grid_minor: Rgb,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Theme::Dark => ThemePalette {
                background: Rgb::from_u32(0x0a1020),
                grid_major: Rgb::from_u32(0x3b4358),
                grid_minor: Rgb::from_u32(0x1f2a3c),
            },
            Theme::Light => ThemePalette {
                background: Rgb::from_u32(0xf5f7fb),
                grid_major: Rgb::from_u32(0xcad3e2),
                grid_minor: Rgb::from_u32(0xdfe5f0),
            },
        }
    }
}
