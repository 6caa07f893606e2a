use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Small,
    #[default]
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Columns {
    #[default]
    One,
    Two,
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Rendering knobs sent alongside every batch. All combinations are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub font_size: FontSize,
    pub columns: Columns,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value {:?}", self.field, self.value)
    }
}

impl std::error::Error for UnknownOption {}

impl FontSize {
    pub fn wire_value(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Large => "large",
        }
    }
}

impl Columns {
    pub fn wire_value(self) -> &'static str {
        match self {
            Columns::One => "1",
            Columns::Two => "2",
            Columns::Three => "3",
        }
    }
}

impl Orientation {
    pub fn wire_value(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl FromStr for FontSize {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "normal" => Ok(FontSize::Normal),
            "large" => Ok(FontSize::Large),
            _ => Err(UnknownOption {
                field: "font size",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Columns {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Columns::One),
            "2" => Ok(Columns::Two),
            "3" => Ok(Columns::Three),
            _ => Err(UnknownOption {
                field: "columns",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Orientation {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(UnknownOption {
                field: "orientation",
                value: s.to_string(),
            }),
        }
    }
}
